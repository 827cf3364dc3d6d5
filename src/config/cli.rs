use crate::adapters::http::DEFAULT_BASE_URL;
use crate::config::{env_flag, AppConfig, Provider, DEFAULT_CITY, DEFAULT_LOG_FILE, DEFAULT_SENDER_NAME};
use crate::domain::model::{Language, TransportConfig};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pollen-alert")]
#[command(about = "Scrape pollen data and send email notification")]
pub struct CliConfig {
    #[arg(long, help = "City name")]
    pub city: Option<String>,

    #[arg(long, help = "Sender email address")]
    pub email_from: Option<String>,

    #[arg(long, help = "Recipient email address")]
    pub email_to: Option<String>,

    #[arg(long, help = "Email password or app password")]
    pub email_password: Option<String>,

    #[arg(long, help = "SMTP server address")]
    pub smtp_server: Option<String>,

    #[arg(long, help = "SMTP server port")]
    pub smtp_port: Option<String>,

    #[arg(long, help = "Use SSL connection")]
    pub use_ssl: bool,

    #[arg(long, help = "No SMTP authentication required")]
    pub no_auth: bool,

    #[arg(long, help = "Sender name")]
    pub sender_name: Option<String>,

    #[arg(long, value_enum, help = "Email provider, can automatically set SMTP parameters")]
    pub provider: Option<Provider>,

    #[arg(long, value_enum, help = "Email language: en (English), de (German), zh (Chinese)")]
    pub language: Option<Language>,

    #[arg(long, help = "Forecast site base URL; the city is appended as a path segment")]
    pub base_url: Option<String>,

    #[arg(long, default_value = DEFAULT_LOG_FILE, help = "Log file, appended to")]
    pub log_file: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Merges flags, the provider preset and the environment into one `AppConfig`.
    /// Flags win over the preset, the preset over the environment.
    pub fn resolve<F>(&self, env: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let preset = self.provider.map(Provider::preset);
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let language = match self.language {
            Some(language) => language,
            None => match env("LANGUAGE") {
                Some(code) => Language::parse(&code).unwrap_or_else(|| {
                    tracing::warn!("Unsupported language '{}', falling back to English", code);
                    Language::En
                }),
                None => Language::En,
            },
        };

        let use_ssl = if self.use_ssl {
            true
        } else if let Some(preset) = preset {
            preset.use_ssl
        } else {
            env_flag(env("USE_SSL"), false)
        };

        let smtp_auth_required = if self.no_auth {
            false
        } else if let Some(preset) = preset {
            preset.smtp_auth_required
        } else {
            env_flag(env("SMTP_AUTH_REQUIRED"), true)
        };

        let transport = TransportConfig {
            email_from: self.email_from.clone().or_else(|| env("EMAIL_ADDRESS")),
            email_to: self.email_to.clone().or_else(|| env("RECIPIENT_EMAIL")),
            email_password: self.email_password.clone().or_else(|| env("EMAIL_PASSWORD")),
            smtp_server: self
                .smtp_server
                .clone()
                .or_else(|| preset.map(|p| p.smtp_server.to_string()))
                .or_else(|| env("SMTP_SERVER")),
            smtp_port: self
                .smtp_port
                .clone()
                .or_else(|| preset.map(|p| p.smtp_port.to_string()))
                .or_else(|| env("SMTP_PORT")),
            use_ssl,
            smtp_auth_required,
            sender_name: self
                .sender_name
                .clone()
                .or_else(|| env("SENDER_NAME"))
                .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            city: self
                .city
                .clone()
                .or_else(|| env("CITY_NAME"))
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
            language,
        };

        let base_url = self
            .base_url
            .clone()
            .or_else(|| env("POLLEN_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_url("base_url", &base_url)?;

        Ok(AppConfig {
            base_url,
            transport,
        })
    }
}
