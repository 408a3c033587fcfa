//! Display strings for every numeric readout on the dashboard.
//!
//! These helpers are pure formatting; none of them fail. Numbers that are
//! shown "as received" (quote prices and changes) use `f64`'s shortest
//! round-trip formatting, everything in TRY uses two decimals.

use chrono::Timelike;

use crate::{
    range::ChartRange,
    snapshot::{Analysis, BidAsk, LocalPrices, NewsItem, Quote},
};

const WIDE_SPREAD_PCT: f64 = 1.5;

/// Background of the spread card when the spread is wide.
pub const WIDE_SPREAD_TINT: &str = "#3a1414";
/// Background of the spread card otherwise.
pub const NORMAL_SPREAD_TINT: &str = "#123022";

/// Shown instead of the ticker when local prices are unavailable.
pub const NO_PRICE_PLACEHOLDER: &str = "Fiyat verisi bulunamadı.";
/// Single entry shown for an empty headline list.
pub const NO_NEWS_PLACEHOLDER: &str = "Haber bulunamadı.";
/// Title used for a headline without one.
pub const UNTITLED_PLACEHOLDER: &str = "Başlık yok";
/// Shown when the news payload carries no refresh time.
pub const NO_UPDATE_TIME: &str = "--:--:--";

/// Sign class of a percent change, used to color the change readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeClass {
    /// Positive.
    Pos,
    /// Negative.
    Neg,
    /// Zero or unknown.
    Neu,
}

impl ChangeClass {
    /// Classify by sign.
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            ChangeClass::Pos
        } else if change < 0.0 {
            ChangeClass::Neg
        } else {
            ChangeClass::Neu
        }
    }

    /// CSS-style class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeClass::Pos => "pos",
            ChangeClass::Neg => "neg",
            ChangeClass::Neu => "neu",
        }
    }
}

/// Price and change readout for one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteReadout {
    /// Price as received.
    pub price: String,
    /// Change with a `%` suffix.
    pub change: String,
    /// Sign class of the change.
    pub class: ChangeClass,
}

/// Readouts for a quote.
pub fn quote(q: &Quote) -> QuoteReadout {
    QuoteReadout {
        price: q.price.to_string(),
        change: format!("{}%", q.change),
        class: ChangeClass::of(q.change),
    }
}

/// Spread in TRY, two decimals.
pub fn spread_value(analysis: &Analysis) -> String {
    format!("{:.2}", analysis.spread_tl)
}

/// Spread percentage, two decimals with a `%` suffix.
pub fn spread_percent(analysis: &Analysis) -> String {
    format!("{:.2}%", analysis.spread_pct)
}

/// Spread card background for a spread percentage.
pub fn spread_tint(spread_pct: f64) -> &'static str {
    if spread_pct > WIDE_SPREAD_PCT {
        WIDE_SPREAD_TINT
    } else {
        NORMAL_SPREAD_TINT
    }
}

/// Gram gold price: the market selling price, two decimals.
pub fn gram_price(local: &LocalPrices) -> String {
    format!("{:.2}", gram_price_value(local))
}

/// Numeric gram price used by the calculator.
pub fn gram_price_value(local: &LocalPrices) -> f64 {
    local.market.map(|m| m.ask).unwrap_or(0.0)
}

/// Arbitrage figure: the server's value when present, otherwise market ask
/// minus bank bid.
pub fn arbitrage_value(analysis: &Analysis, local: &LocalPrices) -> f64 {
    analysis.arbitrage.unwrap_or_else(|| {
        let market_ask = local.market.map(|m| m.ask).unwrap_or(0.0);
        let bank_bid = local.bank.map(|b| b.bid).unwrap_or(0.0);
        market_ask - bank_bid
    })
}

/// [`arbitrage_value`] with two decimals.
pub fn arbitrage(analysis: &Analysis, local: &LocalPrices) -> String {
    format!("{:.2}", arbitrage_value(analysis, local))
}

/// One-line bank vs. market bid/ask ticker.
pub fn hot_ticker(local: &LocalPrices) -> String {
    let (Some(bank), Some(market)) = (local.bank, local.market) else {
        return NO_PRICE_PLACEHOLDER.to_string();
    };
    let BidAsk { bid: g_bid, ask: g_ask } = bank;
    let BidAsk { bid: p_bid, ask: p_ask } = market;
    format!(
        "Garanti BBVA Alış: {g_bid:.2} TL • Satış: {g_ask:.2} TL  |  Kapalıçarşı Alış: {p_bid:.2} TL • Satış: {p_ask:.2} TL"
    )
}

/// Wall clock as `HH:MM:SS`.
pub fn clock<T: Timelike>(time: &T) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Status line for the selected chart range.
pub fn range_status(range: ChartRange) -> String {
    format!("Grafik aralığı: {}", range.label())
}

/// News refresh line.
pub fn news_updated(updated_at: Option<&str>) -> String {
    match updated_at.map(str::trim).filter(|s| !s.is_empty()) {
        Some(t) => format!("Son güncelleme: {t}"),
        None => NO_UPDATE_TIME.to_string(),
    }
}

/// One rendered headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsLine {
    /// Link text.
    pub title: String,
    /// Link target; `None` for the empty-list placeholder.
    pub link: Option<String>,
    /// `• source • published`, trimmed; empty when both are missing.
    pub meta: String,
}

/// Render a headline list.
///
/// With `with_translation`, a present `title_tr` is appended in parentheses.
/// An empty list renders as a single placeholder line.
pub fn news_lines(items: &[NewsItem], with_translation: bool) -> Vec<NewsLine> {
    if items.is_empty() {
        return vec![NewsLine {
            title: NO_NEWS_PLACEHOLDER.to_string(),
            link: None,
            meta: String::new(),
        }];
    }

    items
        .iter()
        .map(|item| {
            let title = non_blank(item.title.as_deref()).unwrap_or(UNTITLED_PLACEHOLDER);
            let translation = with_translation
                .then(|| non_blank(item.title_tr.as_deref()))
                .flatten();
            let title = match translation {
                Some(tr) => format!("{title} ({tr})"),
                None => title.to_string(),
            };
            let link = non_blank(item.link.as_deref()).unwrap_or("#").to_string();
            let source = non_blank(item.source.as_deref())
                .map(|s| format!("• {s}"))
                .unwrap_or_default();
            let time = non_blank(item.published.as_deref())
                .map(|s| format!("• {s}"))
                .unwrap_or_default();
            NewsLine {
                title,
                link: Some(link),
                meta: format!("{source} {time}").trim().to_string(),
            }
        })
        .collect()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Gram-to-TRY calculator; invalid inputs count as zero.
pub fn gram_to_try(grams: f64, gram_price: f64) -> String {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    format!("{:.2}", finite(grams) * finite(gram_price))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn local() -> LocalPrices {
        LocalPrices {
            bank: Some(BidAsk {
                bid: 2950.5,
                ask: 3080.0,
            }),
            market: Some(BidAsk {
                bid: 3000.0,
                ask: 3010.25,
            }),
            status: Default::default(),
        }
    }

    #[test]
    fn quote_readout_keeps_raw_numbers() {
        let r = quote(&Quote {
            price: 2650.4,
            change: -0.25,
        });
        assert_eq!(r.price, "2650.4");
        assert_eq!(r.change, "-0.25%");
        assert_eq!(r.class, ChangeClass::Neg);
        assert_eq!(quote(&Quote::default()).class.as_str(), "neu");
    }

    #[test]
    fn spread_formatting_and_tint() {
        let a = Analysis {
            spread_tl: 129.5,
            spread_pct: 4.389,
            ..Default::default()
        };
        assert_eq!(spread_value(&a), "129.50");
        assert_eq!(spread_percent(&a), "4.39%");
        assert_eq!(spread_tint(1.5), NORMAL_SPREAD_TINT);
        assert_eq!(spread_tint(1.51), WIDE_SPREAD_TINT);
    }

    #[test]
    fn arbitrage_falls_back_to_local_difference() {
        let mut a = Analysis::default();
        assert_eq!(arbitrage(&a, &local()), "59.75");
        a.arbitrage = Some(-12.0);
        assert_eq!(arbitrage(&a, &local()), "-12.00");
    }

    #[test]
    fn ticker_needs_both_sides() {
        assert_eq!(
            hot_ticker(&local()),
            "Garanti BBVA Alış: 2950.50 TL • Satış: 3080.00 TL  |  Kapalıçarşı Alış: 3000.00 TL • Satış: 3010.25 TL"
        );
        let mut partial = local();
        partial.market = None;
        assert_eq!(hot_ticker(&partial), NO_PRICE_PLACEHOLDER);
    }

    #[test]
    fn clock_is_zero_padded() {
        let t = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        assert_eq!(clock(&t), "09:05:07");
    }

    #[test]
    fn range_and_news_status_lines() {
        assert_eq!(range_status(ChartRange::Weekly), "Grafik aralığı: Haftalık");
        assert_eq!(news_updated(Some("12:00:05")), "Son güncelleme: 12:00:05");
        assert_eq!(news_updated(None), "--:--:--");
        assert_eq!(news_updated(Some("  ")), "--:--:--");
    }

    #[test]
    fn news_lines_fill_placeholders() {
        assert_eq!(news_lines(&[], false)[0].title, NO_NEWS_PLACEHOLDER);

        let items = [
            NewsItem {
                title: Some("Gold hits record".into()),
                title_tr: Some("Altın rekor kırdı".into()),
                source: Some("Reuters".into()),
                published: Some("10:30".into()),
                ..Default::default()
            },
            NewsItem::default(),
        ];
        let lines = news_lines(&items, true);
        assert_eq!(lines[0].title, "Gold hits record (Altın rekor kırdı)");
        assert_eq!(lines[0].meta, "• Reuters • 10:30");
        assert_eq!(lines[1].title, UNTITLED_PLACEHOLDER);
        assert_eq!(lines[1].link.as_deref(), Some("#"));
        assert_eq!(lines[1].meta, "");

        assert_eq!(news_lines(&items, false)[0].title, "Gold hits record");
    }

    #[test]
    fn calculator_ignores_garbage() {
        assert_eq!(gram_to_try(2.0, 3010.25), "6020.50");
        assert_eq!(gram_to_try(f64::NAN, 3010.25), "0.00");
    }
}
