// server/src/cli/commands.rs

// This file defines the command-line arguments and subcommands
// for the CardioGuard CLI using the `clap` crate.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cardioguard-cli")]
#[command(version, about = "CardioGuard health-risk assessment", long_about = None)]
pub struct CliArgs {
    /// Configuration file (toml, yaml or json); defaults to ./cardioguard.* when present
    #[arg(long, short = 'c', global = true, env = "CARDIOGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CardioGuardCommands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CardioGuardCommands {
    /// Start the REST API
    Serve {
        #[arg(short = 'p', long = "port", value_name = "PORT")]
        port: Option<u16>,
        #[arg(long = "host", value_name = "HOST")]
        host: Option<String>,
    },
    /// Assess a JSON health input file and print the result
    Assess {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// User the stored record is filed under
        #[arg(short = 'u', long = "user", default_value = "cli")]
        user: String,
    },
    /// Print a user's stored assessments, newest first
    History {
        #[arg(short = 'u', long = "user")]
        user: String,
    },
    /// List primary-service models that support content generation
    ListModels,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_assess_with_defaults() {
        let args = CliArgs::parse_from(["cardioguard-cli", "assess", "input.json"]);
        assert_eq!(
            args.command,
            CardioGuardCommands::Assess {
                file: PathBuf::from("input.json"),
                user: "cli".to_string()
            }
        );
    }

    #[test]
    fn config_flag_is_global() {
        let args = CliArgs::parse_from(["cardioguard-cli", "serve", "-p", "8080", "--config", "cg.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("cg.toml")));
        assert_eq!(
            args.command,
            CardioGuardCommands::Serve {
                port: Some(8080),
                host: None
            }
        );
    }

    #[test]
    fn history_requires_a_user() {
        assert!(CliArgs::try_parse_from(["cardioguard-cli", "history"]).is_err());
    }
}
