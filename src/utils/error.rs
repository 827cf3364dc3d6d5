use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Fetching forecast page failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Markup parsing error: {message}")]
    ParseError { message: String },

    #[error("Pattern error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required email configuration: {}", fields.join(", "))]
    MissingConfigError { fields: Vec<String> },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid email address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),
}

impl EtlError {
    /// One-line hint for whoever reads the log after a failed run.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::FetchError(_) => {
                "Check the city name and that the forecast site is reachable"
            }
            EtlError::ParseError { .. } | EtlError::RegexError(_) => {
                "The forecast page layout may have changed"
            }
            EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Pass the missing values as flags or environment variables, or pick a --provider"
            }
            EtlError::AddressError(_) => "Check EMAIL_ADDRESS and RECIPIENT_EMAIL",
            EtlError::SmtpError(_) => {
                "Verify SMTP host, port, TLS mode and credentials (some providers need an app password)"
            }
            EtlError::MessageError(_) | EtlError::IoError(_) => {
                "Re-run with --verbose and inspect the log file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
