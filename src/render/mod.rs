pub mod html;
pub mod i18n;

use crate::domain::model::{ForecastResult, Language, RenderedEmail};
use chrono::NaiveDate;

pub use html::render_report;

/// HTML body plus the localized subject line.
pub fn render_email(
    data: &ForecastResult,
    language: Language,
    page_url: &str,
    today: NaiveDate,
) -> RenderedEmail {
    let subject = i18n::ui_text(language).subject(&data.city, &today.format("%Y-%m-%d").to_string());
    RenderedEmail {
        subject,
        html: render_report(data, language, page_url, today),
    }
}
