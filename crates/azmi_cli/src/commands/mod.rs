//! CLI command definitions.
//!
//! Each subcommand drives one direction of the identity block mapping.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{OutputFormat, Variant};

pub mod arm;
pub mod expand;
pub mod flatten;
pub mod schema;
pub mod validate;

/// azmi - Azure managed identity block tool
#[derive(Parser, Debug)]
#[command(name = "azmi")]
#[command(version, about = "azmi - Azure managed identity block tool")]
#[command(long_about = r#"
azmi describes, validates and converts the `identity` configuration block
used by Azure resources that support managed identities.

COMMANDS:
  schema    → Print the identity block schema
  validate  → Check an identity block against the schema
  expand    → Read an identity block into its normalized form
  flatten   → Write a normalized identity back as a block
  to-arm    → Convert an identity block into an ARM request body
  from-arm  → Convert an ARM response body into an identity block

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or unreadable input
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file (defaults to ./azmi.toml when present)
    #[arg(long, global = true, env = "AZMI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the identity block schema
    Schema(schema::SchemaArgs),

    /// Validate an identity block
    Validate(validate::ValidateArgs),

    /// Expand an identity block into its normalized form
    Expand(expand::ExpandArgs),

    /// Flatten a normalized identity back into a block
    Flatten(flatten::FlattenArgs),

    /// Convert an identity block into an ARM request body
    #[command(name = "to-arm")]
    ToArm(arm::ToArmArgs),

    /// Convert an ARM response body into an identity block
    #[command(name = "from-arm")]
    FromArm(arm::FromArmArgs),
}

/// Capability set selection shared by every command.
#[derive(Args, Debug, Clone, Copy)]
pub struct VariantArgs {
    /// Identity capability set of the resource type
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,
}

/// Input document shared by the conversion commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON or YAML document, `-` for stdin
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_expand() {
        let cli = Cli::try_parse_from([
            "azmi",
            "expand",
            "--variant",
            "system-assigned",
            "identity.json",
            "-o",
            "yaml",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Yaml));
        match cli.command {
            Commands::Expand(args) => {
                assert_eq!(args.variant.variant, Some(Variant::SystemAssigned));
                assert_eq!(args.input.file, PathBuf::from("identity.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["azmi", "-v", "-q", "schema"]).is_err());
    }
}
