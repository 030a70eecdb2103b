//! Resolution and persistence internals.
//!
//! Reference classification, configuration resolution against the AWS
//! backends, and the on-disk profile store.

pub(crate) mod aws;
pub mod cache;
pub mod constants;
pub mod profile;
pub mod reference;
pub mod resolved;
pub mod secret;
pub mod stack;
pub mod validation;
