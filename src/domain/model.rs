use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pollen intensity as published by the forecast site. Serialized as `"0"`..`"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Concentration {
    None,
    Low,
    Medium,
    High,
}

impl Concentration {
    /// Maps a level digit to a concentration. Anything outside 0..=3 is `None`.
    pub fn from_level(level: u32) -> Self {
        match level {
            1 => Concentration::Low,
            2 => Concentration::Medium,
            3 => Concentration::High,
            _ => Concentration::None,
        }
    }

    /// Strict parse of a level string such as `"2"`; `None` when it is not a digit in 0..=3.
    pub fn parse_level(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        match text.parse::<u32>() {
            Ok(level) if level <= 3 => Some(Self::from_level(level)),
            _ => None,
        }
    }

    /// Lenient parse: unrecognised values normalize to `None`.
    pub fn normalize(text: &str) -> Self {
        Self::parse_level(text).unwrap_or(Concentration::None)
    }

    pub fn level(self) -> u8 {
        match self {
            Concentration::None => 0,
            Concentration::Low => 1,
            Concentration::Medium => 2,
            Concentration::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Concentration::None => "0",
            Concentration::Low => "1",
            Concentration::Medium => "2",
            Concentration::High => "3",
        }
    }

    /// CSS class used for the badge cell.
    pub fn css_class(self) -> &'static str {
        match self {
            Concentration::High => "high",
            Concentration::Medium => "medium",
            Concentration::Low => "low",
            Concentration::None => "none",
        }
    }
}

impl From<Concentration> for String {
    fn from(level: Concentration) -> Self {
        level.as_str().to_string()
    }
}

impl From<String> for Concentration {
    fn from(text: String) -> Self {
        Concentration::normalize(&text)
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollenReading {
    /// Pollen name as printed on the page (German common name).
    #[serde(rename = "type")]
    pub pollen_type: String,
    pub concentration: Concentration,
}

impl PollenReading {
    pub fn new(pollen_type: impl Into<String>, concentration: Concentration) -> Self {
        Self {
            pollen_type: pollen_type.into(),
            concentration,
        }
    }
}

/// Which extraction tier produced the readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingOrigin {
    Page,
    FlatScan,
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastStatus {
    Extracted(ReadingOrigin),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub date: String,
    pub title: String,
    pub pollen_items: Vec<PollenReading>,
    pub city: String,
    pub status: ForecastStatus,
}

impl ForecastResult {
    /// Result used when fetching or parsing blew up. Always renderable.
    pub fn failed(city: &str, today: NaiveDate, error: impl fmt::Display) -> Self {
        let message = error.to_string();
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            title: format!("Pollen Forecast for {} (Scraping Failed)", capitalize(city)),
            pollen_items: vec![PollenReading::new(
                format!("Error: {}", message),
                Concentration::None,
            )],
            city: city.to_string(),
            status: ForecastStatus::Failed(message),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ForecastStatus::Failed(message) => Some(message),
            ForecastStatus::Extracted(_) => None,
        }
    }
}

/// Report languages. Unknown codes fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Zh,
}

impl Language {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Zh => "zh",
        }
    }
}

/// SMTP settings as collected from flags, presets and the environment.
/// Required fields stay optional here; see `Validate` for the check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
    pub email_from: Option<String>,
    pub email_to: Option<String>,
    pub email_password: Option<String>,
    pub smtp_server: Option<String>,
    pub smtp_port: Option<String>,
    pub use_ssl: bool,
    pub smtp_auth_required: bool,
    pub sender_name: String,
    pub city: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
