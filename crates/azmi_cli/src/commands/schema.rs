//! Schema command - Print the identity block schema.

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};
use tracing::info;

use azmi_identity::BLOCK_NAME;

use super::VariantArgs;
use crate::config::Settings;
use crate::input::write_output;

#[derive(Args, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub variant: VariantArgs,

    /// Print only the attributes of the block element
    #[arg(long)]
    pub block_only: bool,
}

pub fn execute(args: SchemaArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.variant);
    info!("Printing {} schema for {}", BLOCK_NAME, variant);

    let block = variant.block();
    if args.block_only {
        return write_output(&block.block_schema(), settings.output);
    }

    let mut document = Map::new();
    document.insert(BLOCK_NAME.to_string(), serde_json::to_value(block.schema())?);
    write_output(&Value::Object(document), settings.output)
}
