use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs fetch/parse, render and send strictly one after another.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting pollen data scraping script");

        let forecast = self.pipeline.extract().await?;
        match forecast.error() {
            Some(error) => tracing::warn!("Forecast extraction failed: {}", error),
            None => tracing::info!(
                "Extracted {} pollen readings for {}",
                forecast.pollen_items.len(),
                forecast.city
            ),
        }

        let email = self.pipeline.transform(forecast).await?;
        tracing::debug!("Rendered email '{}' ({} bytes)", email.subject, email.html.len());

        let recipient = self.pipeline.load(email).await?;

        tracing::info!("Script execution complete");
        Ok(recipient)
    }
}
