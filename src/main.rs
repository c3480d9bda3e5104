use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use estate_admin::cli::{Cli, Command};
use estate_admin::commands::{execute, CommandError};
use estate_admin::config::{load_config, print_schema};
use estate_admin::errors::ApiError;
use estate_admin::navigation::Navigator;
use estate_admin::startup::build_context;
use estate_admin::utils::logger::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Schema = cli.command {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error printing schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    let ctx = match build_context(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error starting up: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(location = ?ctx.navigator.current(), "command failed");
            match &e {
                CommandError::Api(ApiError::Unauthorized) => {
                    eprintln!("Session ended. Run `estate-admin login` to sign in again.")
                }
                other => eprintln!("Error: {}", other),
            }
            ExitCode::from(e.exit_code())
        }
    }
}
