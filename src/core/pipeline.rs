use crate::config::AppConfig;
use crate::core::{ForecastResult, Mailer, PageFetcher, Pipeline, RenderedEmail};
use crate::render::render_email;
use crate::scrape::extract_forecast;
use crate::utils::error::Result;
use chrono::{Local, NaiveDate};

pub struct PollenPipeline<F: PageFetcher, M: Mailer> {
    fetcher: F,
    mailer: M,
    config: AppConfig,
    today: NaiveDate,
}

impl<F: PageFetcher, M: Mailer> PollenPipeline<F, M> {
    pub fn new(fetcher: F, mailer: M, config: AppConfig) -> Self {
        Self {
            fetcher,
            mailer,
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Pins the date used for fallbacks, the report header and the subject.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    async fn scrape(&self) -> Result<ForecastResult> {
        let html = self.fetcher.fetch(self.config.city()).await?;
        extract_forecast(&html, self.config.city(), self.today)
    }
}

#[async_trait::async_trait]
impl<F: PageFetcher, M: Mailer> Pipeline for PollenPipeline<F, M> {
    /// Never fails: fetch and parse errors become a failed `ForecastResult`.
    async fn extract(&self) -> Result<ForecastResult> {
        let city = self.config.city();
        let forecast = match self.scrape().await {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::error!("Error scraping data: {}", e);
                tracing::error!("Suggestion: {}", e.recovery_suggestion());
                ForecastResult::failed(city, self.today, &e)
            }
        };

        match serde_json::to_string(&forecast) {
            Ok(json) => tracing::debug!("Forecast: {}", json),
            Err(e) => tracing::debug!("Forecast could not be serialized: {}", e),
        }

        Ok(forecast)
    }

    async fn transform(&self, data: ForecastResult) -> Result<RenderedEmail> {
        let page_url = self.fetcher.page_url(&data.city);
        Ok(render_email(
            &data,
            self.config.language(),
            &page_url,
            self.today,
        ))
    }

    async fn load(&self, email: RenderedEmail) -> Result<String> {
        self.mailer.send(&email, &self.config.transport).await?;
        Ok(self
            .config
            .transport
            .email_to
            .clone()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::HttpFetcher;
    use crate::domain::model::{
        Concentration, ForecastStatus, Language, PollenReading, ReadingOrigin, TransportConfig,
    };
    use crate::utils::error::EtlError;
    use httpmock::prelude::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<RenderedEmail>>>,
    }

    #[async_trait::async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &RenderedEmail, _config: &TransportConfig) -> Result<()> {
            self.sent.lock().await.push(email.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait::async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _email: &RenderedEmail, _config: &TransportConfig) -> Result<()> {
            Err(EtlError::MissingConfigError {
                fields: vec!["smtp_server".to_string()],
            })
        }
    }

    fn config(base_url: String, language: Language) -> AppConfig {
        AppConfig {
            base_url,
            transport: TransportConfig {
                email_from: Some("alerts@example.com".to_string()),
                email_to: Some("me@example.com".to_string()),
                email_password: Some("secret".to_string()),
                smtp_server: Some("smtp.example.com".to_string()),
                smtp_port: Some("587".to_string()),
                use_ssl: false,
                smtp_auth_required: true,
                sender_name: "Pollen Alert".to_string(),
                city: "berlin".to_string(),
                language,
            },
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    const PAGE: &str = r#"<html><body>
        <div class="pollenflug-items"><div class="row">
        <div class="pollenflug-item"><div class="name">Hasel</div><div class="grad grad-3"></div></div>
        </div></div></body></html>"#;

    #[tokio::test]
    async fn test_extract_reads_page() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/pollen/berlin");
            then.status(200).body(PAGE);
        });

        let pipeline = PollenPipeline::new(
            HttpFetcher::new(server.url("/pollen")).unwrap(),
            RecordingMailer::default(),
            config(server.url("/pollen"), Language::En),
        )
        .with_date(today());

        let forecast = pipeline.extract().await.unwrap();

        page_mock.assert();
        assert_eq!(forecast.status, ForecastStatus::Extracted(ReadingOrigin::Page));
        assert_eq!(
            forecast.pollen_items,
            vec![PollenReading::new("Hasel", Concentration::High)]
        );
        assert_eq!(forecast.date, "2024-03-18");
    }

    #[tokio::test]
    async fn test_extract_fetch_failure_becomes_failed_result() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/pollen/berlin");
            then.status(500);
        });

        let pipeline = PollenPipeline::new(
            HttpFetcher::new(server.url("/pollen")).unwrap(),
            RecordingMailer::default(),
            config(server.url("/pollen"), Language::En),
        )
        .with_date(today());

        let forecast = pipeline.extract().await.unwrap();

        page_mock.assert();
        assert!(forecast.error().is_some());
        assert_eq!(forecast.title, "Pollen Forecast for Berlin (Scraping Failed)");
        assert_eq!(forecast.pollen_items.len(), 1);
        assert!(forecast.pollen_items[0].pollen_type.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_transform_builds_subject_and_banner_link() {
        let server = MockServer::start();
        let pipeline = PollenPipeline::new(
            HttpFetcher::new(server.url("/pollen")).unwrap(),
            RecordingMailer::default(),
            config(server.url("/pollen"), Language::De),
        )
        .with_date(today());

        let failed = ForecastResult::failed("berlin", today(), "timeout");
        let email = pipeline.transform(failed).await.unwrap();

        assert_eq!(email.subject, "Pollenvorhersage für berlin - 2024-03-18");
        assert!(email.html.contains(&server.url("/pollen/berlin")));
        assert!(email.html.contains("timeout"));
    }

    #[tokio::test]
    async fn test_load_hands_email_to_mailer() {
        let server = MockServer::start();
        let mailer = RecordingMailer::default();
        let pipeline = PollenPipeline::new(
            HttpFetcher::new(server.url("/pollen")).unwrap(),
            mailer.clone(),
            config(server.url("/pollen"), Language::En),
        );

        let email = RenderedEmail {
            subject: "s".to_string(),
            html: "<p>x</p>".to_string(),
        };
        let recipient = pipeline.load(email.clone()).await.unwrap();

        assert_eq!(recipient, "me@example.com");
        assert_eq!(*mailer.sent.lock().await, vec![email]);
    }

    #[tokio::test]
    async fn test_load_propagates_mailer_errors() {
        let server = MockServer::start();
        let pipeline = PollenPipeline::new(
            HttpFetcher::new(server.url("/pollen")).unwrap(),
            FailingMailer,
            config(server.url("/pollen"), Language::En),
        );

        let email = RenderedEmail {
            subject: "s".to_string(),
            html: String::new(),
        };
        assert!(matches!(
            pipeline.load(email).await,
            Err(EtlError::MissingConfigError { .. })
        ));
    }
}
