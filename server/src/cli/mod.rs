// server/src/cli/mod.rs

pub mod cli;
pub mod commands;
pub mod handlers;

pub use cli::start_cli;
pub use commands::{CardioGuardCommands, CliArgs};
pub use handlers::{
    handle_assess, handle_history, handle_list_models, handle_serve, read_health_input,
};
