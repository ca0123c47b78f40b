//! Command-line interface.

pub mod completions;
pub mod init;
pub mod output;
pub mod secrets;

use clap::{Parser, Subcommand};

/// Stowaway - end-to-end encrypted team secrets.
#[derive(Parser)]
#[command(
    name = "stowaway",
    about = "End-to-end encrypted secrets for teams",
    version
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
    /// Initialize a workspace in the current directory
    Init {
        /// Your name (defaults to the system user name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List and manage secrets
    Secrets {
        /// Environment to act on (dev, test, staging, prod)
        #[arg(short, long, global = true)]
        env: Option<String>,

        /// Expand ${NAME} references in listed values (--expand=false to disable)
        #[arg(long, default_value_t = true, num_args = 0..=1, default_missing_value = "true", require_equals = true, action = clap::ArgAction::Set)]
        expand: bool,

        #[command(subcommand)]
        action: Option<SecretsAction>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
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

/// Secrets subcommands.
#[derive(Subcommand)]
pub enum SecretsAction {
    /// Show the named secrets
    Get {
        /// Secret names (case-insensitive)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Create or update secrets
    Set {
        /// Assignments in KEY=VALUE form
        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// Delete secrets; nothing is deleted if any name is unknown
    Delete {
        /// Secret names (case-insensitive)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print a .env.example built from the secrets' comments and tags
    GenerateExampleEnv,
}

/// Execute a CLI command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Init { name } => init::execute(name),
        Command::Secrets {
            env,
            expand,
            action,
        } => secrets::execute(env, expand, action),
        Command::Completions { shell } => completions::execute(shell),
    }
}
