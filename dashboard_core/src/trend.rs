//! First-vs-last trend classification used to color each chart.

use std::fmt;

use crate::palette::{Color, Palette};

/// Direction of a series, judged only by its first and last finite samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Last sample strictly above the first.
    Up,
    /// Last sample strictly below the first.
    Down,
    /// Equal endpoints, or fewer than two finite samples.
    Flat,
}

impl Trend {
    /// Classify a series.
    ///
    /// Non-finite samples are skipped, so `[NaN, 1.0, NaN, 2.0]` compares
    /// `1.0` against `2.0`. Intermediate values never matter.
    pub fn of(values: &[f64]) -> Self {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let Some(first) = finite.next() else {
            return Trend::Flat;
        };
        let Some(last) = finite.last() else {
            return Trend::Flat;
        };

        if last > first {
            Trend::Up
        } else if last < first {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    /// Pick the palette entry for this direction.
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Trend::Up => palette.pos,
            Trend::Down => palette.neg,
            Trend::Flat => palette.neu,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Flat => write!(f, "flat"),
        }
    }
}

/// Display color for a series under `palette`.
#[inline]
pub fn classify(values: &[f64], palette: &Palette) -> Color {
    Trend::of(values).color(palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn palette() -> Palette {
        Palette {
            pos: Color::rgb(0, 255, 0),
            neg: Color::rgb(255, 0, 0),
            neu: Color::rgb(128, 128, 128),
        }
    }

    #[test]
    fn short_series_is_neutral() {
        let p = palette();
        assert_eq!(classify(&[], &p), p.neu);
        assert_eq!(classify(&[42.0], &p), p.neu);
    }

    #[test]
    fn compares_endpoints_not_extremes() {
        let p = palette();
        // dips far below the start but finishes higher
        assert_eq!(classify(&[10.0, 1.0, -50.0, 10.5], &p), p.pos);
        // spikes far above the start but finishes lower
        assert_eq!(classify(&[10.0, 99.0, 9.9], &p), p.neg);
        assert_eq!(classify(&[3.0, 7.0, 3.0], &p), p.neu);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        let p = palette();
        assert_eq!(classify(&[f64::NAN, 1.0, f64::NAN, 2.0, f64::NAN], &p), p.pos);
        assert_eq!(classify(&[f64::INFINITY, 5.0, 4.0], &p), p.neg);
        assert_eq!(classify(&[f64::NAN, f64::NAN], &p), p.neu);
        assert_eq!(classify(&[f64::NAN, 7.0], &p), p.neu);
    }

    proptest! {
        #[test]
        fn endpoint_rule_holds_for_any_interior(
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 2..64),
        ) {
            let p = palette();
            let first = values[0];
            let last = values[values.len() - 1];
            let expected = if last > first {
                p.pos
            } else if last < first {
                p.neg
            } else {
                p.neu
            };
            prop_assert_eq!(classify(&values, &p), expected);
        }

        #[test]
        fn short_inputs_are_always_neutral(values in proptest::collection::vec(any::<f64>(), 0..2)) {
            let p = palette();
            prop_assert_eq!(classify(&values, &p), p.neu);
        }
    }
}
