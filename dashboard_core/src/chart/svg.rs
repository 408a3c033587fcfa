//! A headless [`RenderSurface`] that records a chart as an SVG document.
//!
//! The surface starts without a size, so its first draw happens before
//! layout exactly like a freshly mounted canvas: no plot area, flat fill, no
//! annotations. Call [`SvgSurface::resize`] to lay it out.

use std::fmt::Write as _;

use crate::palette::Color;

use super::{
    geometry::{Point, Rect},
    style::{ChartStyle, FillStyle},
    surface::{Dataset, LabelBox, RenderSurface},
};

const PAD_LEFT: f64 = 40.0;
const PAD_TOP: f64 = 10.0;
const PAD_RIGHT: f64 = 10.0;
const PAD_BOTTOM: f64 = 24.0;
const FONT_SIZE: f64 = 11.0;
const CHAR_WIDTH: f64 = 0.6;

/// SVG recording surface for one chart.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    id: String,
    size: Option<(f64, f64)>,
    body: String,
    labels: Vec<LabelBox>,
}

impl SvgSurface {
    /// An unsized surface; [`chart_area`](RenderSurface::chart_area) is
    /// `None` until [`resize`](Self::resize).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            size: None,
            body: String::new(),
            labels: Vec::new(),
        }
    }

    /// A surface that is already laid out.
    pub fn with_size(id: impl Into<String>, width: f64, height: f64) -> Self {
        let mut surface = Self::new(id);
        surface.resize(width, height);
        surface
    }

    /// Lay the surface out at `width` x `height` pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.size = Some((width, height));
        }
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Labels painted since the last series draw.
    pub fn labels(&self) -> &[LabelBox] {
        &self.labels
    }

    /// The recorded drawing as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = self.size.unwrap_or((0.0, 0.0));
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            id = escape(&self.id),
            body = self.body,
        )
    }

    fn gradient_id(&self) -> String {
        format!("{}-fill", self.id)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn paint(color: &Color) -> String {
    format!(r#""{}" fill-opacity="{}""#, color.hex(), color.alpha())
}

/// Evenly spaced x positions and y scaled to the finite value range.
fn project(values: &[f64], area: &Rect) -> Vec<Option<Point>> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;
    let step = if values.len() > 1 {
        area.width() / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if !v.is_finite() {
                return None;
            }
            let x = if values.len() > 1 {
                area.left + step * i as f64
            } else {
                area.center_x()
            };
            let t = if span > 0.0 { (v - lo) / span } else { 0.5 };
            Some(Point::new(x, area.bottom - t * area.height()))
        })
        .collect()
}

/// Split plotted points into runs separated by gaps.
fn runs(points: &[Option<Point>]) -> Vec<Vec<Point>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for p in points {
        match p {
            Some(p) => current.push(*p),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

impl RenderSurface for SvgSurface {
    fn chart_area(&self) -> Option<Rect> {
        let (w, h) = self.size?;
        let area = Rect::new(PAD_LEFT, PAD_TOP, w - PAD_RIGHT, h - PAD_BOTTOM);
        (area.width() > 0.0 && area.height() > 0.0).then_some(area)
    }

    fn draw_series(
        &mut self,
        dataset: &Dataset,
        style: &ChartStyle,
        fill: &FillStyle,
    ) -> Vec<Option<Point>> {
        self.body.clear();
        self.labels.clear();

        let Some(area) = self.chart_area() else {
            return vec![None; dataset.values.len()];
        };
        let points = project(&dataset.values, &area);

        let fill_attr = match fill {
            FillStyle::None => None,
            FillStyle::Solid(c) => Some(paint(c)),
            FillStyle::VerticalGradient {
                y_top,
                y_bottom,
                top,
                bottom,
            } => {
                let id = self.gradient_id();
                let _ = write!(
                    self.body,
                    r#"<defs><linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="0" y1="{y_top}" x2="0" y2="{y_bottom}"><stop offset="0" stop-color="{}" stop-opacity="{}"/><stop offset="1" stop-color="{}" stop-opacity="{}"/></linearGradient></defs>"#,
                    top.hex(),
                    top.alpha(),
                    bottom.hex(),
                    bottom.alpha(),
                );
                Some(format!(r#""url(#{id})""#))
            }
        };

        for run in runs(&points) {
            let mut d = String::new();
            for (i, p) in run.iter().enumerate() {
                let _ = write!(d, "{}{:.2},{:.2} ", if i == 0 { 'M' } else { 'L' }, p.x, p.y);
            }
            if let (Some(fill_attr), Some(first), Some(last)) = (&fill_attr, run.first(), run.last())
            {
                let _ = write!(
                    self.body,
                    r#"<path d="{d}L{:.2},{:.2} L{:.2},{:.2} Z" fill={fill_attr} stroke="none"/>"#,
                    last.x, area.bottom, first.x, area.bottom,
                );
            }
            let _ = write!(
                self.body,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                d.trim_end(),
                dataset.color.hex(),
                style.border_width,
            );
        }

        let ticks = style.axis.max_ticks.min(dataset.labels.len());
        if ticks > 0 {
            let last = dataset.labels.len() - 1;
            for t in 0..ticks {
                let index = if ticks == 1 { 0 } else { t * last / (ticks - 1) };
                let Some(Some(point)) = points.get(index) else {
                    continue;
                };
                let _ = write!(
                    self.body,
                    r#"<text x="{:.2}" y="{:.2}" font-size="{FONT_SIZE}" fill="{}" text-anchor="middle">{}</text>"#,
                    point.x,
                    area.bottom + PAD_BOTTOM - 6.0,
                    style.axis.tick_color.hex(),
                    escape(&dataset.labels[index]),
                );
            }
        }

        points
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * FONT_SIZE * CHAR_WIDTH
    }

    fn draw_label(&mut self, label: &LabelBox) {
        let _ = write!(
            self.body,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="4" fill="#0d1117" fill-opacity="0.85"/><text x="{:.2}" y="{:.2}" font-size="{FONT_SIZE}" fill="#e6edf3" text-anchor="middle">{}</text>"##,
            label.left(),
            label.top,
            label.width,
            label.height,
            label.center_x,
            label.top + label.height / 2.0 + FONT_SIZE / 3.0,
            escape(&label.text),
        );
        self.labels.push(label.clone());
    }

    fn release(&mut self) {
        self.body.clear();
        self.labels.clear();
    }
}
