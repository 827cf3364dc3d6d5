use crate::domain::model::TransportConfig;
use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_port(field_name: &str, value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Port must be a number between 1 and 65535".to_string(),
        }),
    }
}

/// Names of the fields that are absent or blank.
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

impl Validate for TransportConfig {
    fn validate(&self) -> Result<()> {
        let missing = missing_fields(&[
            ("email_from", self.email_from.as_deref()),
            ("email_to", self.email_to.as_deref()),
            ("email_password", self.email_password.as_deref()),
            ("smtp_server", self.smtp_server.as_deref()),
            ("smtp_port", self.smtp_port.as_deref()),
        ]);

        if !missing.is_empty() {
            return Err(EtlError::MissingConfigError {
                fields: missing.into_iter().map(String::from).collect(),
            });
        }

        if let Some(port) = &self.smtp_port {
            validate_port("smtp_port", port)?;
        }

        Ok(())
    }
}
