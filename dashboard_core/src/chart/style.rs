//! Decorative chart configuration and the deferred area fill.

use crate::palette::Color;

use super::geometry::Rect;

/// How the area under a line is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStyle {
    /// Leave the area unpainted.
    None,
    /// A single translucent color.
    Solid(Color),
    /// A vertical gradient spanning the plot area.
    VerticalGradient {
        /// Pixel row of the top stop.
        y_top: f64,
        /// Pixel row of the bottom stop.
        y_bottom: f64,
        /// Color at `y_top`.
        top: Color,
        /// Color at `y_bottom`.
        bottom: Color,
    },
}

/// A fill whose gradient can only be built once the plot area is known.
///
/// Until the surface has been laid out there is no area to span, so
/// [`DeferredFill::resolve`] falls back to a flat low-alpha fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeferredFill {
    base: Color,
    top_alpha: f32,
    bottom_alpha: f32,
    fallback_alpha: f32,
}

impl DeferredFill {
    /// Fill derived from a trend color with the dashboard's default stops.
    pub fn new(base: Color) -> Self {
        Self {
            base,
            top_alpha: 0.35,
            bottom_alpha: 0.02,
            fallback_alpha: 0.08,
        }
    }

    /// Trend color the stops are derived from.
    pub fn base(&self) -> Color {
        self.base
    }

    /// Swap the trend color, keeping the stops.
    pub fn recolor(&mut self, base: Color) {
        self.base = base;
    }

    /// Build the concrete fill for a draw.
    pub fn resolve(&self, area: Option<&Rect>) -> FillStyle {
        match area {
            Some(area) => FillStyle::VerticalGradient {
                y_top: area.top,
                y_bottom: area.bottom,
                top: self.base.with_alpha(self.top_alpha),
                bottom: self.base.with_alpha(self.bottom_alpha),
            },
            None => FillStyle::Solid(self.base.with_alpha(self.fallback_alpha)),
        }
    }
}

/// Axis appearance shared by both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    /// Draw grid lines.
    pub grid: bool,
    /// Tick label color.
    pub tick_color: Color,
    /// Upper bound on tick labels per axis.
    pub max_ticks: usize,
}

/// Hover tooltip appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipStyle {
    /// Panel background.
    pub background: Color,
    /// Panel border.
    pub border: Color,
    /// Title text color.
    pub title_color: Color,
    /// Body text color.
    pub body_color: Color,
    /// Show the series color swatch.
    pub display_colors: bool,
}

/// Everything about a chart that is not its data.
///
/// Set once at creation; in-place updates never touch it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Line width in pixels.
    pub border_width: f64,
    /// Bezier tension between samples.
    pub tension: f64,
    /// Marker radius at rest.
    pub point_radius: f64,
    /// Marker radius under the pointer.
    pub point_hover_radius: f64,
    /// Paint the area under the line.
    pub fill: bool,
    /// Axis appearance.
    pub axis: AxisStyle,
    /// Show the dataset legend.
    pub legend: bool,
    /// Animate transitions.
    pub animation: bool,
    /// Tooltip appearance.
    pub tooltip: TooltipStyle,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            border_width: 2.0,
            tension: 0.35,
            point_radius: 0.0,
            point_hover_radius: 3.0,
            fill: true,
            axis: AxisStyle {
                grid: false,
                tick_color: Color::rgb(0x8b, 0x94, 0x9e),
                max_ticks: 4,
            },
            legend: false,
            animation: false,
            tooltip: TooltipStyle {
                background: Color::rgb(0x0d, 0x11, 0x17).with_alpha(0.9),
                border: Color::rgb(0xf5, 0xc4, 0x51).with_alpha(0.35),
                title_color: Color::rgb(0xf5, 0xc4, 0x51),
                body_color: Color::rgb(0xe6, 0xed, 0xf3),
                display_colors: false,
            },
        }
    }
}
