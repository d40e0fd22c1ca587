// server/src/main.rs

// This is the main entry point for the CardioGuard command line.
// It handles command-line argument parsing and dispatches to the CLI logic.

use anyhow::Result;
use cardioguard_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so both logging and configuration see its variables
    dotenv::dotenv().ok();
    env_logger::init();

    start_cli().await
}
