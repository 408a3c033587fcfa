//! Colors and the per-chart trend palettes.
//!
//! Colors travel as CSS-style hex strings (`"#16c784"`) in configuration and
//! are rendered either as hex (opaque) or `rgba(...)` (translucent).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::ChartKey;

/// Error returned when a color string is not `#rrggbb`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color {input:?}: expected #rrggbb")]
pub struct ColorParseError {
    /// The rejected input.
    pub input: String,
}

/// An sRGB color with a floating alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: f32,
}

impl Color {
    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb`; the leading `#` is optional.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            input: input.to_string(),
        };
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Same color with a different alpha (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self { a, ..self }
    }

    /// Alpha channel.
    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.hex()
    }
}

/// Colors used for a rising, falling and flat series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Last sample above the first.
    pub pos: Color,
    /// Last sample below the first.
    pub neg: Color,
    /// Flat, or not enough data.
    pub neu: Color,
}

impl Palette {
    const fn from_rgb(pos: (u8, u8, u8), neg: (u8, u8, u8), neu: (u8, u8, u8)) -> Self {
        Self {
            pos: Color::rgb(pos.0, pos.1, pos.2),
            neg: Color::rgb(neg.0, neg.1, neg.2),
            neu: Color::rgb(neu.0, neu.1, neu.2),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        PaletteSet::default().ons
    }
}

/// One palette per chart key. Every field falls back to its default when
/// omitted from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteSet {
    /// Ounce chart.
    pub ons: Palette,
    /// USD/TRY chart.
    pub usd: Palette,
    /// US 10Y chart.
    pub us10y: Palette,
    /// Gram gold chart.
    pub gram: Palette,
    /// Arbitrage chart.
    pub arbitrage: Palette,
}

impl PaletteSet {
    /// Palette for a chart key.
    pub fn get(&self, key: ChartKey) -> &Palette {
        match key {
            ChartKey::Ons => &self.ons,
            ChartKey::Usd => &self.usd,
            ChartKey::Us10y => &self.us10y,
            ChartKey::Gram => &self.gram,
            ChartKey::Arbitrage => &self.arbitrage,
        }
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self {
            ons: Palette::from_rgb((0x16, 0xc7, 0x84), (0xef, 0x44, 0x44), (0xf5, 0xc4, 0x51)),
            usd: Palette::from_rgb((0x22, 0xc5, 0x5e), (0xf8, 0x71, 0x71), (0xfb, 0xbf, 0x24)),
            us10y: Palette::from_rgb((0x10, 0xb9, 0x81), (0xdc, 0x26, 0x26), (0xf5, 0x9e, 0x0b)),
            gram: Palette::from_rgb((0x34, 0xd3, 0x99), (0xf8, 0x71, 0x71), (0xfb, 0xbf, 0x24)),
            arbitrage: Palette::from_rgb((0x14, 0xb8, 0xa6), (0xef, 0x44, 0x44), (0xf5, 0x9e, 0x0b)),
        }
    }
}
