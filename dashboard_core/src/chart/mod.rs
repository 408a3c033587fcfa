//! Chart instances, their lifecycle, styling and the min/max annotation.
//!
//! - [`lifecycle`] owns every chart instance and decides between in-place
//!   updates and full teardown.
//! - [`annotation`] places the min/max callouts after a series is drawn.
//! - [`surface`] is the drawing capability charts render through;
//!   [`svg`] is a headless implementation of it.

pub mod annotation;
pub mod geometry;
pub mod lifecycle;
pub mod style;
pub mod surface;
pub mod svg;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use annotation::{AnnotationConfig, MinMaxAnnotation};
pub use geometry::{Point, Rect};
pub use lifecycle::{ChartInstance, ChartLifecycleManager, ChartUpdate};
pub use style::{ChartStyle, DeferredFill, FillStyle};
pub use surface::{
    ChartPlugin, Dataset, DrawnFrame, LabelBox, LabelSide, RenderSurface, SurfaceProvider,
};

/// The charts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKey {
    /// Spot ounce price in USD.
    Ons,
    /// USD/TRY exchange rate.
    Usd,
    /// US 10 year yield.
    Us10y,
    /// Gram gold price in TRY.
    Gram,
    /// Bank vs. market arbitrage figure.
    Arbitrage,
}

impl ChartKey {
    /// Every chart key, in dashboard order.
    pub const ALL: [ChartKey; 5] = [
        ChartKey::Ons,
        ChartKey::Usd,
        ChartKey::Us10y,
        ChartKey::Gram,
        ChartKey::Arbitrage,
    ];

    /// Stable lowercase identifier (also used for file names and element ids).
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKey::Ons => "ons",
            ChartKey::Usd => "usd",
            ChartKey::Us10y => "us10y",
            ChartKey::Gram => "gram",
            ChartKey::Arbitrage => "arbitrage",
        }
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
