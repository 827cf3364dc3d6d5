#[cfg(feature = "cli")]
pub mod cli;
pub mod provider;

use crate::domain::model::{Language, TransportConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};

pub use provider::{Provider, ProviderPreset};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_CITY: &str = "Berlin";
pub const DEFAULT_SENDER_NAME: &str = "Pollen Alert";
pub const DEFAULT_LOG_FILE: &str = "pollen_alert.log";

/// Fully resolved settings for one run. Built once at start-up and handed to
/// the pipeline; nothing downstream reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub transport: TransportConfig,
}

impl AppConfig {
    pub fn city(&self) -> &str {
        &self.transport.city
    }

    pub fn language(&self) -> Language {
        self.transport.language
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        self.transport.validate()
    }
}

/// Reads `true`/`false` style flags the way the environment variables are documented.
pub(crate) fn env_flag(value: Option<String>, default: bool) -> bool {
    value.map_or(default, |v| v.trim().eq_ignore_ascii_case("true"))
}
