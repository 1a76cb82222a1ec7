//! Validate command - Check an identity block against the schema.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::{InputArgs, VariantArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::input::{identity_blocks, read_document};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

pub fn execute(args: ValidateArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.variant);
    info!("Validating {} as {}", args.input.file.display(), variant);

    let document = read_document(&args.input.file)?;
    let blocks = identity_blocks(document)
        .map_err(|message| CliError::Parse {
            path: args.input.file.clone(),
            message,
        })
        .context("Reading identity block")?;

    let report = variant.block().validate(&blocks);

    for warning in &report.warnings {
        println!("⚠️  {}", warning);
    }

    if report.valid {
        println!("✅ Identity block is valid");
        return Ok(());
    }

    println!("❌ Identity block is invalid:");
    for error in &report.errors {
        println!("   - {}", error);
    }
    Err(CliError::ValidationFailed(report.errors.len()).into())
}
