//! CNN Builder CLI
//!
//! Command-line interface for validating and editing MNIST CNN model documents.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use cnn_builder::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("CNN Builder v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => match handle_command(cmd) {
            Ok(true) => Ok(ExitCode::SUCCESS),
            Ok(false) => Ok(ExitCode::FAILURE),
            Err(e) => {
                error!("{} [{}]", e, e.error_code());
                for suggestion in e.recovery_suggestions() {
                    eprintln!("  hint: {}", suggestion);
                }
                Err(e.into())
            }
        },
        None => {
            println!("CNN Builder v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run a command, returning whether the checked model(s) were valid
fn handle_command(cmd: Commands) -> cnn_builder::Result<bool> {
    match cmd {
        Commands::New { path, label } => commands::new_model(&path, &label).map(|_| true),
        Commands::Validate { path, json } => commands::validate(&path, json),
        Commands::CheckTraining { path, json } => commands::check_training(&path, json),
        Commands::Recommend { path } => commands::recommend(&path).map(|_| true),
        Commands::Shapes { path } => commands::shapes(&path).map(|_| true),
        Commands::AddLayer { path, layer_type } => {
            commands::add_layer(&path, &layer_type).map(|_| true)
        }
        Commands::RemoveLayer { path, position } => {
            commands::remove_layer(&path, position).map(|_| true)
        }
        Commands::ValidateDir { dir } => commands::validate_dir(&dir),
        Commands::Train { path, epochs } => commands::train(&path, epochs).map(|_| true),
    }
}
