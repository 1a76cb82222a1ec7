//! Expand command - Read an identity block into its normalized form.

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use super::{InputArgs, VariantArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::input::{identity_blocks, read_document, write_output};

#[derive(Args, Debug)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    #[command(flatten)]
    pub input: InputArgs,

    /// Skip schema validation and only apply the expand rules
    #[arg(long)]
    pub no_validate: bool,
}

pub fn execute(args: ExpandArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.variant);
    info!("Expanding {} as {}", args.input.file.display(), variant);

    let document = read_document(&args.input.file)?;
    let blocks = identity_blocks(document).map_err(|message| CliError::Parse {
        path: args.input.file.clone(),
        message,
    })?;

    let block = variant.block();
    let expanded = if args.no_validate {
        debug!("Schema validation skipped");
        block.expand(&blocks)
    } else {
        block.expand_validated(&blocks)
    };
    let config = expanded.context("Expanding identity block")?;

    write_output(&config, settings.output)
}
