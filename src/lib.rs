pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpWmsClient, JsonExtractReader, LocalStorage};
pub use config::OerebConfig;
pub use crate::core::{engine::ExtractEngine, processor::ExtractProcessor};
pub use utils::error::{OerebError, Result};
