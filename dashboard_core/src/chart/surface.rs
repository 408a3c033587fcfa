//! The drawing capability a chart renders through, and the plugin hook.
//!
//! A [`RenderSurface`] is deliberately small: it knows its plot area (once it
//! has been laid out), can draw one line series and report where each sample
//! landed, can measure text, and can paint a boxed label. Everything else,
//! including the min/max callouts, is built on top of those four calls.

use crate::palette::Color;

use super::{
    ChartKey,
    geometry::{Point, Rect},
    style::{ChartStyle, FillStyle},
};

/// The data half of a chart: what changes on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// X axis labels.
    pub labels: Vec<String>,
    /// Samples; non-finite values are gaps.
    pub values: Vec<f64>,
    /// Line color chosen by the trend classifier.
    pub color: Color,
}

/// Which edge of the plot area a label hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    /// Near the top edge (maximum).
    Top,
    /// Near the bottom edge (minimum).
    Bottom,
}

/// A positioned text box, ready to be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    /// Rendered text.
    pub text: String,
    /// Horizontal center of the box.
    pub center_x: f64,
    /// Top edge of the box.
    pub top: f64,
    /// Box width including padding.
    pub width: f64,
    /// Box height including padding.
    pub height: f64,
    /// Edge the box was anchored to.
    pub side: LabelSide,
}

impl LabelBox {
    /// Left edge.
    pub fn left(&self) -> f64 {
        self.center_x - self.width / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.center_x + self.width / 2.0
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Bounding rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.left(), self.top, self.right(), self.bottom())
    }
}

/// A drawing target for one chart.
pub trait RenderSurface {
    /// The plot area, or `None` until the surface has been laid out.
    fn chart_area(&self) -> Option<Rect>;

    /// Draw a line series and return the pixel position of each sample.
    ///
    /// The returned vector is index-aligned with `dataset.values`; a sample
    /// that was not plotted (a gap, or no layout yet) is `None`.
    fn draw_series(
        &mut self,
        dataset: &Dataset,
        style: &ChartStyle,
        fill: &FillStyle,
    ) -> Vec<Option<Point>>;

    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> f64;

    /// Paint a boxed label.
    fn draw_label(&mut self, label: &LabelBox);

    /// Free whatever the surface holds. Called when the chart is destroyed.
    fn release(&mut self) {}
}

/// Hands out a surface per chart key.
///
/// Returning `None` means the chart has nowhere to render; the lifecycle
/// manager then skips that key without error.
pub trait SurfaceProvider {
    /// Surface type handed to charts.
    type Surface: RenderSurface;

    /// A fresh surface for `key`, if one exists.
    fn surface_for(&mut self, key: ChartKey) -> Option<Self::Surface>;

    /// Called after a chart has rendered, so the provider can flush it.
    fn present(&mut self, _key: ChartKey, _surface: &Self::Surface) {}
}

/// What a plugin sees after the series has been drawn.
#[derive(Debug, Clone, Copy)]
pub struct DrawnFrame<'a> {
    /// The dataset that was drawn.
    pub dataset: &'a Dataset,
    /// Pixel position per sample index.
    pub points: &'a [Option<Point>],
    /// Plot area the series was drawn into.
    pub area: Rect,
}

/// A post-draw hook, run after the series has been painted.
pub trait ChartPlugin {
    /// Stable identifier.
    fn id(&self) -> &'static str;

    /// Paint on top of the drawn series.
    fn after_datasets_draw(&self, frame: &DrawnFrame<'_>, surface: &mut dyn RenderSurface);
}
