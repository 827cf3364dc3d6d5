use crate::domain::model::{RenderedEmail, TransportConfig};
use crate::domain::ports::Mailer;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_port, Validate};
use async_trait::async_trait;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

const SMTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport settings after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub from: String,
    pub to: String,
    pub password: String,
    pub implicit_tls: bool,
    pub auth_required: bool,
    pub sender_name: String,
}

impl TryFrom<&TransportConfig> for SmtpSettings {
    type Error = EtlError;

    fn try_from(config: &TransportConfig) -> Result<Self> {
        config.validate()?;

        let required = |value: &Option<String>, field: &str| {
            value
                .as_deref()
                .map(|v| v.trim().to_string())
                .ok_or_else(|| EtlError::MissingConfigError {
                    fields: vec![field.to_string()],
                })
        };

        Ok(Self {
            host: required(&config.smtp_server, "smtp_server")?,
            port: validate_port("smtp_port", &required(&config.smtp_port, "smtp_port")?)?,
            from: required(&config.email_from, "email_from")?,
            to: required(&config.email_to, "email_to")?,
            password: required(&config.email_password, "email_password")?,
            implicit_tls: config.use_ssl,
            auth_required: config.smtp_auth_required,
            sender_name: config.sender_name.clone(),
        })
    }
}

/// Single-part HTML message from the configured sender to one recipient.
pub fn build_message(email: &RenderedEmail, settings: &SmtpSettings) -> Result<Message> {
    let from = Mailbox::new(
        Some(settings.sender_name.clone()),
        settings.from.parse::<Address>()?,
    );
    let to = settings.to.parse::<Mailbox>()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .singlepart(SinglePart::html(email.html.clone()))?;
    Ok(message)
}

fn build_transport(settings: &SmtpSettings) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let builder = if settings.implicit_tls {
        tracing::info!("Using SSL connection to SMTP server");
        AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
    } else {
        tracing::info!("Using STARTTLS connection to SMTP server");
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
    };

    let mut builder = builder.port(settings.port).timeout(Some(SMTP_TIMEOUT));
    if settings.auth_required {
        tracing::info!("Using {} for SMTP authentication", settings.from);
        builder = builder.credentials(Credentials::new(
            settings.from.clone(),
            settings.password.clone(),
        ));
    }

    Ok(builder.build())
}

#[derive(Debug, Clone, Default)]
pub struct SmtpMailer;

impl SmtpMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &RenderedEmail, config: &TransportConfig) -> Result<()> {
        let settings = SmtpSettings::try_from(config).inspect_err(|e| {
            tracing::error!("{}", e);
        })?;

        tracing::info!("Preparing to send email to {}", settings.to);
        tracing::info!(
            "SMTP settings: server={}, port={}, SSL={}, auth={}",
            settings.host,
            settings.port,
            settings.implicit_tls,
            settings.auth_required
        );

        let message = build_message(email, &settings)?;
        let transport = build_transport(&settings)?;

        tracing::info!("Sending email...");
        match transport.send(message).await {
            Ok(_) => {
                tracing::info!("Email successfully sent to {}", settings.to);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error sending email: {}", e);
                Err(e.into())
            }
        }
    }
}
