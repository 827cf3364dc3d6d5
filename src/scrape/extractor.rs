use crate::domain::model::{
    capitalize, Concentration, ForecastResult, ForecastStatus, PollenReading, ReadingOrigin,
};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Typical values used when the page carries no readings at all.
/// Not a measurement.
pub const DEFAULT_READINGS: [(&str, Concentration); 14] = [
    ("Ambrosia", Concentration::None),
    ("Ampfer", Concentration::None),
    ("Beifuß", Concentration::None),
    ("Birke", Concentration::None),
    ("Buche", Concentration::None),
    ("Erle", Concentration::Low),
    ("Esche", Concentration::Low),
    ("Gräser", Concentration::None),
    ("Hasel", Concentration::None),
    ("Pappel", Concentration::High),
    ("Roggen", Concentration::None),
    ("Ulme", Concentration::High),
    ("Wegerich", Concentration::None),
    ("Weide", Concentration::High),
];

pub fn default_readings() -> Vec<PollenReading> {
    DEFAULT_READINGS
        .iter()
        .map(|(name, level)| PollenReading::new(*name, *level))
        .collect()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::ParseError {
        message: format!("invalid selector `{}`: {}", css, e),
    })
}

/// Compiled selectors for the forecast page.
struct PageSelectors {
    page_title: Selector,
    headline: Selector,
    active_tab: Selector,
    rows: Selector,
    item: Selector,
    name: Selector,
    grad: Selector,
    grad_class: Regex,
}

impl PageSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            page_title: selector("title")?,
            headline: selector("div.text-headline")?,
            active_tab: selector("div.tab-btn.active")?,
            rows: selector("div.pollenflug-items div.row")?,
            item: selector("div.pollenflug-item")?,
            name: selector("div.name")?,
            grad: selector("div.grad")?,
            grad_class: Regex::new(r"grad-(\d)")?,
        })
    }

    /// Text field first, then a `grad-N` class token, then zero.
    fn concentration(&self, grad: ElementRef<'_>) -> Concentration {
        if let Some(level) = Concentration::parse_level(&element_text(grad)) {
            return level;
        }

        grad.value()
            .classes()
            .find_map(|class| {
                self.grad_class
                    .captures(class)
                    .and_then(|caps| caps.get(1))
                    .and_then(|digit| digit.as_str().parse::<u32>().ok())
            })
            .map(Concentration::from_level)
            .unwrap_or(Concentration::None)
    }

    /// Grouped pass: a missing grad element reads as zero.
    fn grouped_reading(&self, item: ElementRef<'_>) -> Option<PollenReading> {
        let name = element_text(item.select(&self.name).next()?);
        if name.is_empty() {
            return None;
        }
        let concentration = item
            .select(&self.grad)
            .next()
            .map(|grad| self.concentration(grad))
            .unwrap_or(Concentration::None);
        Some(PollenReading::new(name, concentration))
    }

    /// Flat pass: both name and grad must be present.
    fn flat_reading(&self, item: ElementRef<'_>) -> Option<PollenReading> {
        let name_elem = item.select(&self.name).next()?;
        let grad_elem = item.select(&self.grad).next()?;
        let name = element_text(name_elem);
        if name.is_empty() {
            return None;
        }
        Some(PollenReading::new(name, self.concentration(grad_elem)))
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a forecast page into readings, falling back from the grouped rows to a
/// flat scan and finally to `DEFAULT_READINGS`.
pub fn extract_forecast(html: &str, city: &str, today: NaiveDate) -> Result<ForecastResult> {
    let selectors = PageSelectors::new()?;
    let document = Html::parse_document(html);

    tracing::info!(
        "Page title: {}",
        document
            .select(&selectors.page_title)
            .next()
            .map(element_text)
            .unwrap_or_else(|| "No title".to_string())
    );

    let title = document
        .select(&selectors.headline)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            let fallback = format!("Pollen Forecast - {}", capitalize(city));
            tracing::warn!("Cannot find forecast title, using default: {}", fallback);
            fallback
        });

    let date = match document.select(&selectors.active_tab).next().map(element_text) {
        Some(label) if !label.is_empty() => {
            tracing::info!("Found current date label: {}", label);
            label
        }
        _ => today.format("%Y-%m-%d").to_string(),
    };

    let rows: Vec<ElementRef<'_>> = document.select(&selectors.rows).collect();
    tracing::info!("Found {} rows of pollen data", rows.len());

    let mut origin = ReadingOrigin::Page;
    let mut pollen_items: Vec<PollenReading> = rows
        .iter()
        .flat_map(|row| row.select(&selectors.item))
        .filter_map(|item| selectors.grouped_reading(item))
        .inspect(|r| {
            tracing::info!("Found pollen: {}, concentration: {}", r.pollen_type, r.concentration)
        })
        .collect();

    if pollen_items.is_empty() {
        tracing::warn!("No pollen data found, trying backup parsing method");
        origin = ReadingOrigin::FlatScan;
        pollen_items = document
            .select(&selectors.item)
            .filter_map(|item| selectors.flat_reading(item))
            .inspect(|r| {
                tracing::info!(
                    "Backup method found pollen: {}, concentration: {}",
                    r.pollen_type,
                    r.concentration
                )
            })
            .collect();
    }

    if pollen_items.is_empty() {
        tracing::warn!("Cannot extract pollen data from webpage, using default values");
        origin = ReadingOrigin::Defaults;
        pollen_items = default_readings();
    }

    tracing::info!(
        "Data scraping successful, found {} pollen types",
        pollen_items.len()
    );

    Ok(ForecastResult {
        date,
        title,
        pollen_items,
        city: city.to_string(),
        status: ForecastStatus::Extracted(origin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    }

    fn item(name: &str, grad_class: &str, grad_text: &str) -> String {
        format!(
            r#"<div class="pollenflug-item"><div class="name">{}</div><div class="{}">{}</div></div>"#,
            name, grad_class, grad_text
        )
    }

    fn grouped_page(items: &[String]) -> String {
        format!(
            r#"<html><head><title>Pollenflug Berlin</title></head><body>
            <div class="text-headline">Pollenflug-Vorhersage für Berlin</div>
            <div class="tab-btn active">Heute, 18.03.</div>
            <div class="tab-btn">Morgen</div>
            <div class="pollenflug-items"><div class="row">{}</div></div>
            </body></html>"#,
            items.join("")
        )
    }

    #[test]
    fn test_grouped_rows_are_read() {
        let html = grouped_page(&[item("Birke", "grad", "2"), item("Erle", "grad", "0")]);

        let result = extract_forecast(&html, "berlin", today()).unwrap();

        assert_eq!(result.title, "Pollenflug-Vorhersage für Berlin");
        assert_eq!(result.date, "Heute, 18.03.");
        assert_eq!(result.status, ForecastStatus::Extracted(ReadingOrigin::Page));
        assert_eq!(
            result.pollen_items,
            vec![
                PollenReading::new("Birke", Concentration::Medium),
                PollenReading::new("Erle", Concentration::None),
            ]
        );
    }

    #[test]
    fn test_severity_resolution() {
        let html = grouped_page(&[
            item("Birke", "grad", "2"),
            item("Erle", "grad grad-1", "7"),
            item("Hasel", "grad grad-1", "mäßig"),
            item("Ulme", "grad level-x", ""),
            item("Esche", "grad pollen-grad-3", ""),
            item("Pappel", "grad grad-9", ""),
        ]);

        let result = extract_forecast(&html, "berlin", today()).unwrap();
        let levels: Vec<(&str, Concentration)> = result
            .pollen_items
            .iter()
            .map(|r| (r.pollen_type.as_str(), r.concentration))
            .collect();

        assert_eq!(
            levels,
            vec![
                ("Birke", Concentration::Medium),
                ("Erle", Concentration::Low),
                ("Hasel", Concentration::Low),
                ("Ulme", Concentration::None),
                ("Esche", Concentration::High),
                ("Pappel", Concentration::None),
            ]
        );
    }

    #[test]
    fn test_grouped_items_without_name_are_skipped() {
        let html = grouped_page(&[
            r#"<div class="pollenflug-item"><div class="grad">3</div></div>"#.to_string(),
            item("   ", "grad", "3"),
            r#"<div class="pollenflug-item"><div class="name">Roggen</div></div>"#.to_string(),
        ]);

        let result = extract_forecast(&html, "berlin", today()).unwrap();

        assert_eq!(
            result.pollen_items,
            vec![PollenReading::new("Roggen", Concentration::None)]
        );
    }

    #[test]
    fn test_flat_scan_when_rows_are_missing() {
        let html = format!(
            r#"<html><body><section>{}{}</section>
            <div class="pollenflug-item"><div class="name">Gräser</div></div></body></html>"#,
            item("Beifuß", "grad", "1"),
            item("Ampfer", "grad grad-2", "?"),
        );

        let result = extract_forecast(&html, "münchen", today()).unwrap();

        assert_eq!(
            result.status,
            ForecastStatus::Extracted(ReadingOrigin::FlatScan)
        );
        assert_eq!(
            result.pollen_items,
            vec![
                PollenReading::new("Beifuß", Concentration::Low),
                PollenReading::new("Ampfer", Concentration::Medium),
            ]
        );
        assert_eq!(result.title, "Pollen Forecast - München");
        assert_eq!(result.date, "2024-03-18");
    }

    #[test]
    fn test_page_without_pollen_markup_uses_defaults() {
        let html = "<html><head><title>Nothing here</title></head><body><p>Wartung</p></body></html>";

        let result = extract_forecast(html, "hamburg", today()).unwrap();

        assert_eq!(
            result.status,
            ForecastStatus::Extracted(ReadingOrigin::Defaults)
        );
        assert_eq!(result.pollen_items.len(), 14);
        assert_eq!(result.pollen_items, default_readings());

        let non_zero: Vec<(&str, u8)> = result
            .pollen_items
            .iter()
            .filter(|r| r.concentration != Concentration::None)
            .map(|r| (r.pollen_type.as_str(), r.concentration.level()))
            .collect();
        assert_eq!(
            non_zero,
            vec![
                ("Erle", 1),
                ("Esche", 1),
                ("Pappel", 3),
                ("Ulme", 3),
                ("Weide", 3)
            ]
        );
    }

    #[test]
    fn test_empty_input_uses_defaults() {
        let result = extract_forecast("", "berlin", today()).unwrap();
        assert_eq!(result.pollen_items, default_readings());
        assert_eq!(result.title, "Pollen Forecast - Berlin");
    }
}
