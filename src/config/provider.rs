use serde::{Deserialize, Serialize};

/// Well-known mail providers with their SMTP submission defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gmail,
    Outlook,
    Yahoo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPreset {
    pub smtp_server: &'static str,
    pub smtp_port: u16,
    pub use_ssl: bool,
    pub smtp_auth_required: bool,
}

impl Provider {
    pub fn preset(self) -> ProviderPreset {
        // Gmail additionally needs an app password.
        let smtp_server = match self {
            Provider::Gmail => "smtp.gmail.com",
            Provider::Outlook => "smtp.office365.com",
            Provider::Yahoo => "smtp.mail.yahoo.com",
        };
        ProviderPreset {
            smtp_server,
            smtp_port: 587,
            use_ssl: false,
            smtp_auth_required: true,
        }
    }
}
