//! Market commentary for the gram gold card.

use std::fmt;

use crate::snapshot::Quote;

const MOVE_THRESHOLD: f64 = 0.3;
const WIDE_SPREAD_PCT: f64 = 1.5;

/// Bucketed direction of a percent change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Change above `+0.3`.
    Up,
    /// Change below `-0.3`.
    Down,
    /// Anything in between, including the thresholds themselves and `NaN`.
    Flat,
}

impl Direction {
    /// Bucket a percent change with strict thresholds.
    pub fn of(change: f64) -> Self {
        if change > MOVE_THRESHOLD {
            Direction::Up
        } else if change < -MOVE_THRESHOLD {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    /// Turkish word used in the commentary.
    pub fn word(&self) -> &'static str {
        match self {
            Direction::Up => "yukarı",
            Direction::Down => "aşağı",
            Direction::Flat => "yatay",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Joint view on gram gold from the ounce and USD/TRY directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Both rising.
    Support,
    /// Both falling.
    Pressure,
    /// Ounce rising, USD/TRY falling.
    Mixed,
    /// Ounce falling, USD/TRY rising.
    Conflicted,
    /// At least one of them flat.
    Neutral,
}

impl Bias {
    /// Combine the ounce and USD/TRY buckets.
    pub fn of(ons: Direction, usdtry: Direction) -> Self {
        match (ons, usdtry) {
            (Direction::Up, Direction::Up) => Bias::Support,
            (Direction::Down, Direction::Down) => Bias::Pressure,
            (Direction::Up, Direction::Down) => Bias::Mixed,
            (Direction::Down, Direction::Up) => Bias::Conflicted,
            _ => Bias::Neutral,
        }
    }

    /// Label used in the "Gram görünümü" sentence.
    pub fn label(&self) -> &'static str {
        match self {
            Bias::Support => "yukarı yönlü destek",
            Bias::Pressure => "aşağı yönlü baskı",
            Bias::Mixed => "karışık görünüm",
            Bias::Conflicted => "karmaşık görünüm",
            Bias::Neutral => "nötr",
        }
    }

    fn rationale(&self) -> &'static str {
        match self {
            Bias::Support => {
                "Ons ve kur birlikte yükseldiği için gram altın tarafında ivme güçlü görünüyor ve alıcı iştahı artabilir."
            }
            Bias::Pressure => {
                "Ons ve kur birlikte gerilediği için gram altın tarafında baskı öne çıkıyor; kısa vadede geri çekilme görülebilir."
            }
            _ => {
                "Ons ile kur zıt yönlerde hareket ediyor; bu da gram fiyatında dalgalı ve kararsız bir görünüm yaratıyor."
            }
        }
    }

    fn outlook(&self) -> &'static str {
        match self {
            Bias::Support => "Bu tablo sürerse gram altında kademeli yükseliş devam edebilir.",
            Bias::Pressure => "Bu görünüm korunursa gram altında kısa vadeli düşüşler görülebilir.",
            _ => {
                "Karışık görünüm devam ederse gram altında sıkışık ve dalgalı bir bant hareketi beklenebilir."
            }
        }
    }

    /// Short-term direction the commentary ends on.
    pub fn direction(&self) -> Direction {
        match self {
            Bias::Support => Direction::Up,
            Bias::Pressure => Direction::Down,
            _ => Direction::Flat,
        }
    }
}

fn rate_rationale(us10y: Direction) -> &'static str {
    match us10y {
        Direction::Up => {
            "ABD 10Y faizindeki yükseliş, riskli varlıkları zayıflatıp altına karşı rekabeti artırabilir."
        }
        Direction::Down => {
            "ABD 10Y faizin gerilemesi, güvenli liman talebini destekleyerek altına alan açabilir."
        }
        Direction::Flat => {
            "Faiz tarafı net bir yön göstermediği için fiyatlamaya etkisi şimdilik sınırlı görünüyor."
        }
    }
}

fn spread_sentences(spread_pct: f64) -> (&'static str, &'static str) {
    if spread_pct > WIDE_SPREAD_PCT {
        (
            "Makas yüksek.",
            "Makas yüksek; bankadan işlem yapmak maliyetli ve hızlı al-sat için uygun değil.",
        )
    } else {
        (
            "Makas normal.",
            "Makas makul seviyede; işlem maliyeti kontrol altında ve al-sat için daha elverişli.",
        )
    }
}

/// One-paragraph commentary on the ounce, USD/TRY, the 10Y yield and the
/// bank spread.
///
/// Only the `change` of each quote matters. The paragraph always contains
/// every fragment: trend sentence, bias, bias rationale, rate rationale,
/// spread flag, spread rationale, outlook and the closing direction word.
pub fn market_commentary(ons: &Quote, usdtry: &Quote, us10y: &Quote, spread_pct: f64) -> String {
    let ons_dir = Direction::of(ons.change);
    let usd_dir = Direction::of(usdtry.change);
    let rate_dir = Direction::of(us10y.change);
    let bias = Bias::of(ons_dir, usd_dir);
    let (spread_flag, spread_detail) = spread_sentences(spread_pct);

    format!(
        "Ons {ons_dir} seyrediyor, USD/TRY {usd_dir} hareket ediyor ve 10Y faiz {rate_dir} görünümünde. \
         Gram görünümü: {bias}. {rationale} {rate} {spread_flag} {spread_detail} \
         Sonuç olarak, {outlook} Kısa vadede yön beklentisi: {direction}.",
        bias = bias.label(),
        rationale = bias.rationale(),
        rate = rate_rationale(rate_dir),
        outlook = bias.outlook(),
        direction = bias.direction(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(change: f64) -> Quote {
        Quote { price: 1.0, change }
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(Direction::of(0.3), Direction::Flat);
        assert_eq!(Direction::of(-0.3), Direction::Flat);
        assert_eq!(Direction::of(0.300_001), Direction::Up);
        assert_eq!(Direction::of(-0.31), Direction::Down);
        assert_eq!(Direction::of(f64::NAN), Direction::Flat);
    }

    #[test]
    fn joint_bias_table() {
        use Direction::*;
        assert_eq!(Bias::of(Up, Up), Bias::Support);
        assert_eq!(Bias::of(Down, Down), Bias::Pressure);
        assert_eq!(Bias::of(Up, Down), Bias::Mixed);
        assert_eq!(Bias::of(Down, Up), Bias::Conflicted);
        assert_eq!(Bias::of(Flat, Up), Bias::Neutral);
        assert_eq!(Bias::of(Up, Flat), Bias::Neutral);
    }

    #[test]
    fn bearish_pressure_with_wide_spread() {
        let text = market_commentary(&q(-0.8), &q(-0.5), &q(0.4), 2.0);
        assert!(text.starts_with("Ons aşağı seyrediyor, USD/TRY aşağı hareket ediyor"));
        assert!(text.contains("Gram görünümü: aşağı yönlü baskı."));
        assert!(text.contains("ABD 10Y faizindeki yükseliş"));
        assert!(text.contains("Makas yüksek. Makas yüksek; bankadan"));
        assert!(text.ends_with("Kısa vadede yön beklentisi: aşağı."));
    }

    #[test]
    fn spread_exactly_at_threshold_is_normal() {
        let text = market_commentary(&q(0.0), &q(0.0), &q(0.0), 1.5);
        assert!(text.contains("Makas normal."));
        assert!(text.contains("Gram görünümü: nötr."));
        assert!(text.ends_with("yön beklentisi: yatay."));
    }

    #[test]
    fn is_deterministic() {
        let a = market_commentary(&q(0.5), &q(-0.6), &q(-0.9), 0.7);
        let b = market_commentary(&q(0.5), &q(-0.6), &q(-0.9), 0.7);
        assert_eq!(a, b);
        assert!(a.contains("karışık görünüm"));
    }
}
