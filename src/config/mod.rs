pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sdk-deserialize")]
#[command(about = "Deserialize API payloads into declared SDK types")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with the type declarations")]
    pub types: String,

    #[arg(long = "type", help = "Name of the target type")]
    pub target_type: String,

    #[arg(long, help = "Content-Type of the payload")]
    pub content_type: Option<String>,

    #[arg(long, help = "Payload file (reads stdin when omitted)")]
    pub input: Option<String>,

    #[arg(long, help = "Pretty-print the output JSON")]
    pub pretty: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("types", &self.types)?;
        validate_non_empty_string("type", &self.target_type)?;
        if let Some(input) = &self.input {
            validate_path("input", input)?;
        }
        Ok(())
    }
}
