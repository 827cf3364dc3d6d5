use crate::domain::model::{Concentration, ForecastResult, Language, PollenReading};
use crate::render::i18n::{fill, translate_pollen, ui_text, UiText};
use chrono::NaiveDate;

const STYLE: &str = r#"body { font-family: Arial, sans-serif; margin: 0; padding: 20px; color: #333; background-color: #f5f5f5; }
h1 { color: #2c3e50; margin-top: 0; }
h2 { color: #3498db; }
.date { color: #7f8c8d; font-size: 0.9em; margin-bottom: 20px; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; background-color: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
th { background-color: #f2f2f2; font-weight: bold; }
tr:nth-child(even) { background-color: #f9f9f9; }
.high { color: #e74c3c; font-weight: bold; }
.medium { color: #f39c12; }
.low { color: #27ae60; }
.none { color: #7f8c8d; }
.footer { margin-top: 30px; font-size: 0.8em; color: #7f8c8d; border-top: 1px solid #eee; padding-top: 15px; }
.container { max-width: 600px; margin: 0 auto; background: white; padding: 20px; border-radius: 5px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
.header { background-color: #3498db; color: white; padding: 15px; border-radius: 5px 5px 0 0; margin: -20px -20px 20px; }
.header h1 { color: white; margin: 0; }"#;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Non-zero readings first, then by page name.
pub fn sorted_readings(items: &[PollenReading]) -> Vec<&PollenReading> {
    let mut sorted: Vec<&PollenReading> = items.iter().collect();
    sorted.sort_by(|a, b| {
        (a.concentration == Concentration::None, &a.pollen_type)
            .cmp(&(b.concentration == Concentration::None, &b.pollen_type))
    });
    sorted
}

fn error_banner(out: &mut String, text: &UiText, error: &str, page_url: &str) {
    out.push_str(&format!(
        r#"<div style="background-color: #ffebee; padding: 10px; border-left: 4px solid #f44336; margin-bottom: 20px;">
<h3 style="color: #d32f2f; margin-top: 0;">{}</h3>
<p>{}</p>
<p>{} <a href="{}" target="_blank">wetteronline.de</a></p>
</div>
"#,
        text.error_title,
        escape_html(error),
        text.error_check,
        escape_html(page_url),
    ));
}

/// Renders the complete HTML report. `today` is the date shown in the header.
pub fn render_report(
    data: &ForecastResult,
    language: Language,
    page_url: &str,
    today: NaiveDate,
) -> String {
    let text = ui_text(language);
    let city = escape_html(&data.city);
    let today = today.format("%Y-%m-%d").to_string();
    let mut out = format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="utf-8">
<style>
{}
</style>
</head>
<body>
<div class="container">
<div class="header">
<h1>{}</h1>
</div>
<p class="date">{}</p>
"#,
        language.code(),
        STYLE,
        fill(text.email_title, &city, &today),
        fill(text.date, &city, &today),
    );

    if let Some(error) = data.error() {
        error_banner(&mut out, text, error, page_url);
    }

    out.push_str(&format!(
        r#"<h2>{}</h2>
<p>{}: {}</p>
<table>
<tr>
<th>{}</th>
<th>{}</th>
<th>{}</th>
</tr>
"#,
        escape_html(&data.title),
        text.forecast_date,
        escape_html(&data.date),
        text.pollen_type,
        text.translation,
        text.concentration,
    ));

    for reading in sorted_readings(&data.pollen_items) {
        let level = reading.concentration;
        out.push_str(&format!(
            r#"<tr>
<td>{}</td>
<td>{}</td>
<td class="{}">{}</td>
</tr>
"#,
            escape_html(&reading.pollen_type),
            escape_html(translate_pollen(
                &reading.pollen_type,
                text.translation_language
            )),
            level.css_class(),
            text.badge(level),
        ));
    }

    out.push_str(&format!(
        r#"</table>
<p>{}</p>
<div class="footer">
<p>{}</p>
<p>{}</p>
</div>
</div>
</body>
</html>
"#,
        text.greeting, text.footer_auto, text.footer_source,
    ));

    out
}
