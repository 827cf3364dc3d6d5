pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod scrape;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpFetcher, SmtpMailer};
pub use config::AppConfig;
pub use crate::core::{etl::EtlEngine, pipeline::PollenPipeline};
pub use domain::model::{
    Concentration, ForecastResult, ForecastStatus, Language, PollenReading, ReadingOrigin,
    RenderedEmail, TransportConfig,
};
pub use utils::error::{EtlError, Result};
