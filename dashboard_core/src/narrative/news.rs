//! Keyword-driven news digest.

use std::fmt;

use crate::snapshot::NewsItem;

/// Themes in the order they are reported, with the substrings that trigger
/// them.
const THEMES: &[(&str, &[&str])] = &[
    ("faiz", &["faiz", "rate", "yield"]),
    ("enflasyon", &["enflasyon", "inflation", "cpi"]),
    ("kur", &["dolar", "usd", "kur"]),
    ("merkez bankası", &["merkez bank", "fed", "ecb"]),
    ("jeopolitik risk", &["jeopolitik", "savaş", "tension"]),
    ("büyüme endişesi", &["resesyon", "recession", "daralma"]),
    ("altın teması", &["altın", "gold", "bullion"]),
];

const FALLBACK_THEME: &str = "genel gündem";

const RISK_OFF: &[&str] = &["risk", "savaş", "kriz", "recession", "daralma"];
const RISK_ON: &[&str] = &["güçlü", "strong", "iyileşme", "ralli"];

/// Overall tone of the headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// No tone keyword matched.
    Neutral,
    /// Risk-off vocabulary present.
    RiskOff,
    /// Risk-on vocabulary present; wins over risk-off.
    RiskOn,
}

impl Tone {
    /// Turkish label.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Neutral => "nötr",
            Tone::RiskOff => "riskten kaçış",
            Tone::RiskOn => "risk iştahı",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn search_text(national: &[NewsItem], international: &[NewsItem]) -> String {
    national
        .iter()
        .chain(international)
        .map(|item| item.title.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn hits(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Themes mentioned anywhere in the titles, in table order.
pub fn themes(national: &[NewsItem], international: &[NewsItem]) -> Vec<&'static str> {
    let text = search_text(national, international);
    THEMES
        .iter()
        .filter(|(_, keywords)| hits(&text, keywords))
        .map(|(label, _)| *label)
        .collect()
}

/// Tone of the titles. Risk-on keywords override risk-off ones.
pub fn tone(national: &[NewsItem], international: &[NewsItem]) -> Tone {
    let text = search_text(national, international);
    if hits(&text, RISK_ON) {
        Tone::RiskOn
    } else if hits(&text, RISK_OFF) {
        Tone::RiskOff
    } else {
        Tone::Neutral
    }
}

/// Two-sentence digest: headline counts, detected themes and tone.
pub fn news_summary(national: &[NewsItem], international: &[NewsItem]) -> String {
    let themes = themes(national, international);
    let theme_text = if themes.is_empty() {
        FALLBACK_THEME.to_string()
    } else {
        themes.join(", ")
    };
    format!(
        "Ulusal tarafta {} haber, uluslararası tarafta {} haber var. Öne çıkan temalar: {theme_text}. Genel ton: {}.",
        national.len(),
        international.len(),
        tone(national, international),
    )
}
