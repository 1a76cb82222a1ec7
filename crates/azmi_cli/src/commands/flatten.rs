//! Flatten command - Write a normalized identity back as a block.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tracing::info;

use azmi_identity::ManagedIdentityConfig;

use super::{InputArgs, VariantArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::input::{read_document, write_output};

#[derive(Args, Debug)]
pub struct FlattenArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

pub fn execute(args: FlattenArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.variant);
    info!("Flattening {} as {}", args.input.file.display(), variant);

    let document = read_document(&args.input.file)?;
    let config: Option<ManagedIdentityConfig> = match document {
        Value::Null => None,
        document => Some(serde_json::from_value(document).map_err(|e| CliError::Parse {
            path: args.input.file.clone(),
            message: e.to_string(),
        })?),
    };

    write_output(&variant.block().flatten(config.as_ref()), settings.output)
}
