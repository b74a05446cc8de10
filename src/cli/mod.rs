//! CLI Module
//!
//! Command-line interface for partnerapply using Clap v4.

mod commands;
mod console;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::logging::{self, LogSink};

/// partnerapply - Partnership application wizard for the terminal
#[derive(Parser, Debug)]
#[command(name = "partnerapply")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (writes debug logs to ~/.partnerapply/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill in the application interactively (default)
    Apply {
        /// Security verification token
        #[arg(long)]
        token: Option<String>,
    },

    /// Check one value against a field's rules
    Validate {
        /// Field name as sent to the server, e.g. `email` or `whyPartner`
        field: String,

        /// Value to check
        value: String,
    },

    /// Submit an answers file (TOML or JSON) without the interactive UI
    Submit {
        /// Answers file, keyed by field name
        answers: PathBuf,

        /// Validate and print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// List steps, fields and their options
    Fields,

    /// Initialize configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration
    Config,
}

impl Commands {
    /// Commands that take over the terminal log to a file
    fn owns_terminal(&self) -> bool {
        matches!(self, Self::Apply { .. })
    }
}

/// Main CLI entry point
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Apply { token: None });

    let config = commands::load_config(cli.config.as_deref())?;

    let sink = if cli.debug || command.owns_terminal() {
        LogSink::File
    } else {
        LogSink::Stderr
    };
    let _log_guard = logging::init(&config.logging, sink, cli.debug)?;
    if cli.debug {
        tracing::info!("Debug mode enabled");
    }

    match command {
        Commands::Apply { token } => commands::cmd_apply(&config, token).await,
        Commands::Validate { field, value } => commands::cmd_validate(&field, &value),
        Commands::Submit { answers, dry_run } => {
            commands::cmd_submit(&config, &answers, dry_run).await
        }
        Commands::Fields => commands::cmd_fields(),
        Commands::Init { force } => commands::cmd_init(force),
        Commands::Config => commands::cmd_config(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["partnerapply"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "partnerapply",
            "--config",
            "custom.toml",
            "submit",
            "answers.toml",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Some(Commands::Submit { answers, dry_run }) => {
                assert_eq!(answers, PathBuf::from("answers.toml"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_validate() {
        let cli =
            Cli::try_parse_from(["partnerapply", "-d", "validate", "email", "a@b.co"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Some(Commands::Validate { ref field, ref value }) if field == "email" && value == "a@b.co"
        ));
    }

    #[test]
    fn test_only_apply_owns_terminal() {
        assert!(Commands::Apply { token: None }.owns_terminal());
        assert!(!Commands::Fields.owns_terminal());
    }
}
