use crate::domain::model::{ForecastResult, RenderedEmail, TransportConfig};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Downloads the raw forecast page for a city.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<String>;

    /// Public page for the city, linked from the warning banner.
    fn page_url(&self, city: &str) -> String;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &RenderedEmail, config: &TransportConfig) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ForecastResult>;
    async fn transform(&self, data: ForecastResult) -> Result<RenderedEmail>;
    async fn load(&self, email: RenderedEmail) -> Result<String>;
}
