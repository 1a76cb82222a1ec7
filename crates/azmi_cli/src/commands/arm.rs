//! ARM commands - Convert between identity blocks and ARM bodies.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use azmi_identity::ArmIdentity;

use super::{InputArgs, VariantArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::input::{identity_blocks, read_document, unwrap_identity_object, write_output};

#[derive(Args, Debug)]
pub struct ToArmArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct FromArmArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

pub fn execute_to_arm(args: ToArmArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.variant);
    info!("Building ARM identity from {} as {}", args.input.file.display(), variant);

    let document = read_document(&args.input.file)?;
    let blocks = identity_blocks(document).map_err(|message| CliError::Parse {
        path: args.input.file.clone(),
        message,
    })?;

    let config = variant
        .block()
        .expand_validated(&blocks)
        .context("Expanding identity block")?;

    write_output(&ArmIdentity::from_config(&config), settings.output)
}

/// Accepts a bare identity object or a whole resource body.
pub fn execute_from_arm(args: FromArmArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.variant);
    info!("Reading ARM identity from {} as {}", args.input.file.display(), variant);

    let document = unwrap_identity_object(read_document(&args.input.file)?);
    let identity: ArmIdentity = serde_json::from_value(document).map_err(|e| CliError::Parse {
        path: args.input.file.clone(),
        message: e.to_string(),
    })?;
    let config = identity.into_config().context("Reading ARM identity")?;

    write_output(&variant.block().flatten(Some(&config)), settings.output)
}
