//! Min/max callouts drawn on top of each line chart.
//!
//! The maximum is labelled near the top edge of the plot area, the minimum
//! near the bottom edge, each at the x of its sample. A label is shifted
//! horizontally just enough to keep its whole box inside the plot area.

use super::{
    geometry::{Point, Rect},
    surface::{ChartPlugin, DrawnFrame, LabelBox, LabelSide, RenderSurface},
};

/// Position and value of the extreme samples of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    /// Index of the first smallest finite sample.
    pub min_index: usize,
    /// Smallest finite sample.
    pub min: f64,
    /// Index of the first largest finite sample.
    pub max_index: usize,
    /// Largest finite sample.
    pub max: f64,
}

/// Find the extreme finite samples. Ties keep the first occurrence.
///
/// Returns `None` for an empty or all non-finite series.
pub fn find_extrema(values: &[f64]) -> Option<Extrema> {
    let mut found: Option<Extrema> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match found.as_mut() {
            None => {
                found = Some(Extrema {
                    min_index: i,
                    min: v,
                    max_index: i,
                    max: v,
                })
            }
            Some(e) => {
                if v < e.min {
                    e.min = v;
                    e.min_index = i;
                }
                if v > e.max {
                    e.max = v;
                    e.max_index = i;
                }
            }
        }
    }
    found
}

/// Two-decimal label text; `None` for non-finite values.
pub fn format_value(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value:.2}"))
}

/// Horizontal center for a box of `width` anchored at `anchor_x`, kept
/// inside `area`. A box wider than the area, or one whose bounds are not
/// comparable (NaN width or area), is centered on it.
pub fn clamp_center(anchor_x: f64, width: f64, area: &Rect) -> f64 {
    let half = width / 2.0;
    let lo = area.left + half;
    let hi = area.right - half;
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return area.center_x();
    }
    anchor_x.clamp(lo, hi)
}

/// Label sizing and placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationConfig {
    /// Font size in pixels; also the text line height.
    pub font_size: f64,
    /// Horizontal padding on each side of the text.
    pub padding_x: f64,
    /// Vertical padding above and below the text.
    pub padding_y: f64,
    /// Gap between the box and the plot edge it hugs.
    pub edge_offset: f64,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            padding_x: 6.0,
            padding_y: 3.0,
            edge_offset: 4.0,
        }
    }
}

/// Build the box for one label.
pub fn place_label(
    anchor: Point,
    text: String,
    text_width: f64,
    area: &Rect,
    side: LabelSide,
    config: &AnnotationConfig,
) -> LabelBox {
    let width = text_width + 2.0 * config.padding_x;
    let height = config.font_size + 2.0 * config.padding_y;
    let top = match side {
        LabelSide::Top => area.top + config.edge_offset,
        LabelSide::Bottom => area.bottom - config.edge_offset - height,
    };
    LabelBox {
        text,
        center_x: clamp_center(anchor.x, width, area),
        top,
        width,
        height,
        side,
    }
}

/// Compute the min/max labels for a drawn series.
///
/// `measure` returns the rendered width of a string. When the minimum and
/// maximum are the same sample only the maximum is labelled; a sample without
/// a pixel position, or text the surface cannot measure, is not labelled.
pub fn layout_labels(
    values: &[f64],
    points: &[Option<Point>],
    area: &Rect,
    config: &AnnotationConfig,
    measure: impl Fn(&str) -> f64,
) -> Vec<LabelBox> {
    let Some(extrema) = find_extrema(values) else {
        return Vec::new();
    };

    let mut targets = vec![(extrema.max_index, extrema.max, LabelSide::Top)];
    if extrema.min_index != extrema.max_index {
        targets.push((extrema.min_index, extrema.min, LabelSide::Bottom));
    }

    targets
        .into_iter()
        .filter_map(|(index, value, side)| {
            let anchor = points.get(index).copied().flatten()?;
            if !anchor.is_finite() {
                return None;
            }
            let text = format_value(value)?;
            let width = measure(&text);
            if !width.is_finite() || width < 0.0 {
                return None;
            }
            Some(place_label(anchor, text, width, area, side, config))
        })
        .collect()
}

/// The min/max callout plugin.
#[derive(Debug, Clone, Default)]
pub struct MinMaxAnnotation {
    config: AnnotationConfig,
}

impl ChartPlugin for MinMaxAnnotation {
    fn id(&self) -> &'static str {
        "minMaxLabels"
    }

    fn after_datasets_draw(&self, frame: &DrawnFrame<'_>, surface: &mut dyn RenderSurface) {
        let labels = layout_labels(
            &frame.dataset.values,
            frame.points,
            &frame.area,
            &self.config,
            |text| surface.text_width(text),
        );
        for label in &labels {
            surface.draw_label(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const AREA: Rect = Rect::new(0.0, 0.0, 100.0, 50.0);

    fn points(n: usize) -> Vec<Option<Point>> {
        (0..n)
            .map(|i| Some(Point::new(i as f64 * 10.0, 25.0)))
            .collect()
    }

    fn fixed_width(_: &str) -> f64 {
        28.0
    }

    #[test]
    fn extrema_ignore_gaps_and_keep_first_tie() {
        let e = find_extrema(&[f64::NAN, 3.0, 1.0, 3.0, 1.0, f64::INFINITY]).unwrap();
        assert_eq!((e.max_index, e.max), (1, 3.0));
        assert_eq!((e.min_index, e.min), (2, 1.0));
        assert_eq!(find_extrema(&[]), None);
        assert_eq!(find_extrema(&[f64::NAN, f64::NAN]), None);
    }

    #[test]
    fn two_labels_for_distinct_extrema() {
        let labels = layout_labels(
            &[5.0, 9.5, 2.25],
            &points(3),
            &AREA,
            &AnnotationConfig::default(),
            fixed_width,
        );
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "9.50");
        assert_eq!(labels[0].side, LabelSide::Top);
        assert_eq!(labels[1].text, "2.25");
        assert_eq!(labels[1].side, LabelSide::Bottom);
        assert_eq!(labels[1].bottom(), AREA.bottom - 4.0);
    }

    #[test]
    fn single_sample_gets_only_max_label() {
        let labels = layout_labels(
            &[4.0],
            &points(1),
            &AREA,
            &AnnotationConfig::default(),
            fixed_width,
        );
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].side, LabelSide::Top);
        assert_eq!(labels[0].text, "4.00");
    }

    #[test]
    fn unplotted_sample_is_not_labelled() {
        let mut pts = points(3);
        pts[1] = None;
        let labels = layout_labels(
            &[1.0, 9.0, 5.0],
            &pts,
            &AREA,
            &AnnotationConfig::default(),
            fixed_width,
        );
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "1.00");

        let short = layout_labels(
            &[1.0, 9.0],
            &[],
            &AREA,
            &AnnotationConfig::default(),
            fixed_width,
        );
        assert!(short.is_empty());
    }

    #[test]
    fn edge_anchor_is_pulled_inside() {
        let label = place_label(
            Point::new(0.0, 10.0),
            "1.00".into(),
            28.0,
            &AREA,
            LabelSide::Top,
            &AnnotationConfig::default(),
        );
        assert_eq!(label.left(), AREA.left);
        assert_eq!(label.center_x, 20.0);
    }

    #[test]
    fn oversized_box_is_centered() {
        assert_eq!(clamp_center(3.0, 500.0, &AREA), AREA.center_x());
    }

    #[test]
    fn unmeasurable_width_is_centered() {
        assert_eq!(clamp_center(50.0, f64::NAN, &AREA), AREA.center_x());
        let nan_area = Rect::new(0.0, 0.0, f64::NAN, 50.0);
        assert!(clamp_center(50.0, 28.0, &nan_area).is_nan());
    }

    #[test]
    fn unmeasurable_text_is_not_labelled() {
        for width in [f64::NAN, f64::INFINITY, -1.0] {
            let labels = layout_labels(
                &[1.0, 2.0],
                &points(2),
                &AREA,
                &AnnotationConfig::default(),
                |_| width,
            );
            assert!(labels.is_empty(), "width {width} produced {labels:?}");
        }
    }

    proptest! {
        #[test]
        fn labels_stay_inside_area(
            anchor in -500.0f64..600.0,
            width in 0.0f64..100.0,
        ) {
            let center = clamp_center(anchor, width, &AREA);
            prop_assert!(center - width / 2.0 >= AREA.left - 1e-9);
            prop_assert!(center + width / 2.0 <= AREA.right + 1e-9);
        }

        #[test]
        fn label_text_has_two_decimals(v in -1.0e6f64..1.0e6) {
            let text = format_value(v).unwrap();
            let (_, frac) = text.rsplit_once('.').unwrap();
            prop_assert_eq!(frac.len(), 2);
        }
    }
}
