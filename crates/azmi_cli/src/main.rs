//! azmi CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or unreadable input
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

mod commands;
mod config;
mod error;
mod input;

use azmi_identity::IdentityError;
use azmi_schema::SchemaError;
use commands::{Cli, Commands};
use config::{CliConfig, Settings};
use error::CliError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::discover(cli.config.as_deref());

    init_logging(&cli, config.as_ref().ok());

    let result = match config {
        Ok(config) => run(cli, &config),
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let settings = Settings::new(cli.output, config);

    match cli.command {
        Commands::Schema(args) => commands::schema::execute(args, &settings),
        Commands::Validate(args) => commands::validate::execute(args, &settings),
        Commands::Expand(args) => commands::expand::execute(args, &settings),
        Commands::Flatten(args) => commands::flatten::execute(args, &settings),
        Commands::ToArm(args) => commands::arm::execute_to_arm(args, &settings),
        Commands::FromArm(args) => commands::arm::execute_from_arm(args, &settings),
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` wins over flags, flags win over the config file.
fn init_logging(cli: &Cli, config: Option<&CliConfig>) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config
            .and_then(|c| c.log_level.as_deref())
            .unwrap_or("info")
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "azmi={level},azmi_identity={level},azmi_schema={level},azmi_resource_id={level},warn"
        ))
    });

    let fmt_layer = if cli.log_json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(cli_error) = e.downcast_ref::<CliError>() {
        return match cli_error {
            CliError::ValidationFailed(_) => ExitCodes::VALIDATION_FAILURE,
            CliError::Read { .. } | CliError::Parse { .. } | CliError::Config { .. } => {
                ExitCodes::INVALID_ARGS
            }
        };
    }

    if e.downcast_ref::<IdentityError>().is_some() || e.downcast_ref::<SchemaError>().is_some() {
        ExitCodes::VALIDATION_FAILURE
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
