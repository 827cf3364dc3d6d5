use crate::domain::model::{Concentration, Language};

/// German page name, English, Chinese.
const POLLEN_NAMES: [(&str, &str, &str); 14] = [
    ("Ambrosia", "Ragweed", "豚草"),
    ("Ampfer", "Sorrel", "酸模"),
    ("Beifuß", "Mugwort", "艾蒿"),
    ("Birke", "Birch", "桦树"),
    ("Buche", "Beech", "山毛榉"),
    ("Erle", "Alder", "桤木"),
    ("Esche", "Ash", "梣树"),
    ("Gräser", "Grasses", "草"),
    ("Hasel", "Hazel", "榛树"),
    ("Pappel", "Poplar", "杨树"),
    ("Roggen", "Rye", "黑麦"),
    ("Ulme", "Elm", "榆树"),
    ("Wegerich", "Plantain", "车前草"),
    ("Weide", "Willow", "柳树"),
];

/// Display name of a pollen type in `target`. Accepts German or English names;
/// anything unknown is returned as is.
pub fn translate_pollen<'a>(name: &'a str, target: Language) -> &'a str {
    POLLEN_NAMES
        .iter()
        .find(|(de, en, _)| *de == name || en.eq_ignore_ascii_case(name))
        .map(|(de, en, zh)| match target {
            Language::De => *de,
            Language::En => *en,
            Language::Zh => *zh,
        })
        .unwrap_or(name)
}

/// Fixed UI strings for one report language.
#[derive(Debug)]
pub struct UiText {
    pub email_title: &'static str,
    pub date: &'static str,
    pub forecast_date: &'static str,
    pub pollen_type: &'static str,
    pub translation: &'static str,
    /// Language the translation column is rendered in.
    pub translation_language: Language,
    pub concentration: &'static str,
    pub greeting: &'static str,
    pub footer_auto: &'static str,
    pub footer_source: &'static str,
    pub error_title: &'static str,
    pub error_check: &'static str,
    levels: [&'static str; 4],
    subject: &'static str,
}

const EN: UiText = UiText {
    email_title: "Pollen Concentration Forecast for {city}",
    date: "Date: {date}",
    forecast_date: "Forecast Date",
    pollen_type: "Pollen Type",
    translation: "English Name",
    translation_language: Language::En,
    concentration: "Concentration Level",
    greeting: "Stay healthy!",
    footer_auto: "This email is generated by an automated system. Please do not reply.",
    footer_source: "Data Source: wetteronline.de",
    error_title: "Warning: Data Scraping Issue",
    error_check: "Please check if the website structure has changed or contact the script maintainer. You can visit the website manually to check the latest data:",
    levels: ["✅ None", "⚠️ Low", "🟠 Medium", "🔴 High"],
    subject: "Pollen Forecast for {city} - {date}",
};

const DE: UiText = UiText {
    email_title: "Pollenkonzentrationsprognose für {city}",
    date: "Datum: {date}",
    forecast_date: "Prognosedatum",
    pollen_type: "Pollentyp",
    translation: "Englischer Name",
    // Page names are already German.
    translation_language: Language::En,
    concentration: "Konzentrationsniveau",
    greeting: "Bleiben Sie gesund!",
    footer_auto: "Diese E-Mail wird von einem automatisierten System generiert. Bitte antworten Sie nicht.",
    footer_source: "Datenquelle: wetteronline.de",
    error_title: "Warnung: Problem beim Datenabrufen",
    error_check: "Bitte überprüfen Sie, ob sich die Website-Struktur geändert hat, oder kontaktieren Sie den Skript-Betreuer. Sie können die Website manuell besuchen, um die neuesten Daten zu überprüfen:",
    levels: ["✅ Keine", "⚠️ Gering", "🟠 Mittel", "🔴 Stark"],
    subject: "Pollenvorhersage für {city} - {date}",
};

const ZH: UiText = UiText {
    email_title: "{city}地区花粉浓度预报",
    date: "日期: {date}",
    forecast_date: "预报日期",
    pollen_type: "花粉类型",
    translation: "中文名称",
    translation_language: Language::Zh,
    concentration: "浓度等级",
    greeting: "祝您健康每一天！",
    footer_auto: "此邮件由自动系统生成，请勿回复。",
    footer_source: "数据来源: wetteronline.de",
    error_title: "警告：数据抓取遇到问题",
    error_check: "请检查网站结构是否已更改或联系脚本维护人员。您可以手动访问以下网站查看最新数据:",
    levels: ["✅ 无", "⚠️ 弱", "🟠 中", "🔴 强"],
    subject: "{city}花粉浓度预报 - {date}",
};

pub fn ui_text(language: Language) -> &'static UiText {
    match language {
        Language::En => &EN,
        Language::De => &DE,
        Language::Zh => &ZH,
    }
}

impl UiText {
    pub fn badge(&self, level: Concentration) -> &'static str {
        self.levels[level.level() as usize]
    }

    pub fn subject(&self, city: &str, date: &str) -> String {
        fill(self.subject, city, date)
    }
}

/// Substitutes `{city}` and `{date}` placeholders.
pub fn fill(template: &str, city: &str, date: &str) -> String {
    template.replace("{city}", city).replace("{date}", date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_and_unknown() {
        assert_eq!(translate_pollen("Birke", Language::En), "Birch");
        assert_eq!(translate_pollen("Birke", Language::Zh), "桦树");
        assert_eq!(translate_pollen("Birch", Language::De), "Birke");
        assert_eq!(translate_pollen("Zeder", Language::En), "Zeder");
    }

    #[test]
    fn test_badges_per_language() {
        assert_eq!(ui_text(Language::En).badge(Concentration::High), "🔴 High");
        assert_eq!(ui_text(Language::De).badge(Concentration::Medium), "🟠 Mittel");
        assert_eq!(ui_text(Language::Zh).badge(Concentration::None), "✅ 无");
    }

    #[test]
    fn test_subject_templates() {
        assert_eq!(
            ui_text(Language::De).subject("berlin", "2024-03-18"),
            "Pollenvorhersage für berlin - 2024-03-18"
        );
        assert_eq!(
            ui_text(Language::Zh).subject("Berlin", "2024-03-18"),
            "Berlin花粉浓度预报 - 2024-03-18"
        );
    }
}
