//! Command-line interface.

pub mod completions;
pub mod deploy;
pub mod output;
pub mod profile;
pub mod resolve;

use clap::{Parser, Subcommand};

use crate::core::constants;

/// Caisson - resolve validated service configuration and manage deployment profiles.
#[derive(Parser)]
#[command(
    name = "caisson",
    about = "Resolve validated service configuration from a stack and a secret",
    version,
    after_help = "Resolve once. Deploy steady."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve and print the runtime configuration (client secret masked)
    Resolve {
        /// Stack reference: ARN, @file, or bare stack name
        #[arg(long, env = constants::STACK_ENV)]
        stack: String,
        /// Secret reference: ARN, @file, or bare secret name
        #[arg(long, env = constants::SECRET_ENV)]
        secret: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage deployment profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Record and inspect deployment history
    Deploy {
        #[command(subcommand)]
        action: DeployAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a new profile
    Create {
        /// Profile name
        name: String,
        /// Parent profile whose values fill unset fields
        #[arg(long)]
        inherit: Option<String>,
        /// Set a field by dotted path (e.g. authentication.tenant=acme)
        #[arg(long = "set", value_name = "PATH=VALUE")]
        set: Vec<String>,
    },

    /// Show a profile document
    Show {
        /// Profile name
        name: String,
        /// Apply inheritance before printing
        #[arg(long)]
        effective: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a profile against the required-field set
    Validate {
        /// Profile name
        name: String,
    },

    /// List profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Deployment history subcommands.
#[derive(Subcommand)]
pub enum DeployAction {
    /// Record a deployment for an environment
    Record {
        /// Profile name
        profile: String,
        /// Target environment (e.g. dev, prod)
        #[arg(long)]
        environment: String,
        /// Image or version identifier that was deployed
        #[arg(long)]
        image: String,
        /// Endpoint the deployment serves
        #[arg(long)]
        endpoint: Option<String>,
        /// Stack that was deployed
        #[arg(long)]
        stack: Option<String>,
        /// Region the deployment landed in
        #[arg(long)]
        region: Option<String>,
    },

    /// Show deployment history
    History {
        /// Profile name
        profile: String,
        /// Restrict to one environment
        #[arg(long)]
        environment: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the active deployment for an environment
    Active {
        /// Profile name
        profile: String,
        /// Target environment
        #[arg(long)]
        environment: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Resolve {
            stack,
            secret,
            json,
        } => resolve::execute(&stack, &secret, json),
        Profile { action } => match action {
            ProfileAction::Create { name, inherit, set } => {
                profile::create(&name, inherit.as_deref(), &set)
            }
            ProfileAction::Show {
                name,
                effective,
                json,
            } => profile::show(&name, effective, json),
            ProfileAction::Validate { name } => profile::validate(&name),
            ProfileAction::List { json } => profile::list(json),
        },
        Deploy { action } => match action {
            DeployAction::Record {
                profile,
                environment,
                image,
                endpoint,
                stack,
                region,
            } => deploy::record(&profile, &environment, &image, endpoint, stack, region),
            DeployAction::History {
                profile,
                environment,
                json,
            } => deploy::history(&profile, environment.as_deref(), json),
            DeployAction::Active {
                profile,
                environment,
                json,
            } => deploy::active(&profile, &environment, json),
        },
        Completions { shell } => completions::execute(shell),
    }
}
