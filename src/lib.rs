//! Caisson - resolve validated service configuration from a stack reference
//! and a secret reference.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Operator-facing commands
//! │   ├── resolve       # Resolve and print the runtime configuration
//! │   ├── profile       # Profile create/show/validate/list
//! │   ├── deploy        # Deployment history recording and inspection
//! │   └── completions   # Completion script generation
//! └── core/             # Resolution and persistence library
//!     ├── reference     # Bootstrap reference classification
//!     ├── stack         # Stack output resolution (CloudFormation)
//!     ├── secret        # Secret document resolution (Secrets Manager)
//!     ├── resolved      # The immutable resolved configuration
//!     ├── cache         # Resolve-once configuration cache
//!     ├── validation    # Shared validation primitives
//!     └── profile/      # Profile store
//!         ├── mod       # Directory-backed persistence
//!         ├── document  # Profile document and inheritance merge
//!         └── history   # Append-only deployment history
//! ```
//!
//! # Features
//!
//! - Single-fetch, process-lifetime configuration resolution
//! - Fail-fast validation that reports every violation at once
//! - Queue locator normalization between ARN and URL forms
//! - Atomic, inheritance-aware profile persistence
//! - Append-only deployment history per profile

pub mod cli;
pub mod core;
pub mod error;
