// server/src/cli/cli.rs

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cardioguard_lib::config::load_app_config;

use super::commands::{CardioGuardCommands, CliArgs};
use super::handlers::{handle_assess, handle_history, handle_list_models, handle_serve};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// CLI entry point for CardioGuard
pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    let config = load_app_config(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        CardioGuardCommands::Serve { port, host } => handle_serve(config, port, host).await,
        CardioGuardCommands::Assess { file, user } => {
            let result = handle_assess(&config, &file, &user).await?;
            print_json(&result)
        }
        CardioGuardCommands::History { user } => {
            let records = handle_history(&config, &user).await?;
            if records.is_empty() {
                eprintln!("No assessments stored for {}", user);
            }
            print_json(&records)
        }
        CardioGuardCommands::ListModels => {
            for model in handle_list_models(&config).await? {
                match model.display_name {
                    Some(display) => println!("{}  ({})", model.name, display),
                    None => println!("{}", model.name),
                }
            }
            Ok(())
        }
    }
}
