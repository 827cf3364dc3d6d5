use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://www.wetteronline.de/pollen";

/// Sent with every request so the site serves the regular page.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    client: Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, city: &str) -> Result<String> {
        let url = self.page_url(city);
        tracing::info!("Starting to scrape pollen data: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Forecast page response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        tracing::debug!("Received {} bytes of markup", body.len());
        Ok(body)
    }

    fn page_url(&self, city: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            city.trim().to_lowercase()
        )
    }
}
