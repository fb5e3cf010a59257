use crate::domain::model::{ExtractFormat, ExtractParams, RealEstateIdentity};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "oereb-extract")]
#[command(about = "Creates the public-law restriction extract of a real estate")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "oereb.toml")]
    pub config: String,

    /// Directory holding the raw extracts as <EGRID>.json
    #[arg(long, default_value = "./store")]
    pub store: String,

    /// EGRID of the real estate
    #[arg(long)]
    pub egrid: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, default_value_t = ExtractFormat::Json)]
    pub format: ExtractFormat,

    /// Language of the map services, defaults to app.default_language
    #[arg(long)]
    pub language: Option<String>,

    /// Download the map images
    #[arg(long)]
    pub images: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn identity(&self) -> RealEstateIdentity {
        RealEstateIdentity {
            egrid: self.egrid.clone(),
        }
    }

    pub fn params(&self) -> ExtractParams {
        ExtractParams {
            format: self.format,
            images: self.images,
            language: self.language.clone(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        validate_path("store", &self.store)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("egrid", &self.egrid)?;
        if let Some(language) = &self.language {
            validate_non_empty_string("language", language)?;
        }
        Ok(())
    }
}
