//! Chart instance ownership: create once, update in place, tear down on a
//! range change.
//!
//! Every chart key walks the same small state machine:
//!
//! ```text
//! absent --update (surface available)--> created
//! created/updated --update--> updated        (labels, values, color only)
//! any --reset_all--> absent
//! ```
//!
//! An update for a key whose surface is unavailable is skipped silently.

use indexmap::IndexMap;
use tracing::debug;

use crate::palette::Color;

use super::{
    ChartKey,
    annotation::MinMaxAnnotation,
    style::{ChartStyle, DeferredFill, FillStyle},
    surface::{ChartPlugin, Dataset, DrawnFrame, RenderSurface, SurfaceProvider},
};

/// What an [`ChartLifecycleManager::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartUpdate {
    /// No surface for the key; nothing happened.
    Skipped,
    /// A new instance was built and drawn.
    Created,
    /// The existing instance got new data and was redrawn.
    Updated,
}

/// Builds the plugin list for a freshly created chart.
pub type PluginFactory = fn() -> Vec<Box<dyn ChartPlugin>>;

fn default_plugins() -> Vec<Box<dyn ChartPlugin>> {
    vec![Box::new(MinMaxAnnotation::default())]
}

/// One live chart.
pub struct ChartInstance<S> {
    surface: S,
    dataset: Dataset,
    style: ChartStyle,
    fill: DeferredFill,
    plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<S: RenderSurface> ChartInstance<S> {
    fn new(
        surface: S,
        dataset: Dataset,
        style: ChartStyle,
        plugins: Vec<Box<dyn ChartPlugin>>,
    ) -> Self {
        let fill = DeferredFill::new(dataset.color);
        Self {
            surface,
            dataset,
            style,
            fill,
            plugins,
        }
    }

    /// Current data.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Decorative configuration fixed at creation.
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// The surface this chart draws on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Identifiers of the attached plugins, in run order.
    pub fn plugin_ids(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }

    fn replace_data(&mut self, labels: Vec<String>, values: Vec<f64>, color: Color) {
        self.dataset.labels = labels;
        self.dataset.values = values;
        self.dataset.color = color;
        self.fill.recolor(color);
    }

    /// Draw the series, then run the post-draw plugins.
    ///
    /// The fill is resolved against the current plot area; plugins only run
    /// once the surface has been laid out.
    fn render(&mut self) {
        let area = self.surface.chart_area();
        let fill = if self.style.fill {
            self.fill.resolve(area.as_ref())
        } else {
            FillStyle::None
        };
        let points = self.surface.draw_series(&self.dataset, &self.style, &fill);

        let Some(area) = area else {
            return;
        };
        let frame = DrawnFrame {
            dataset: &self.dataset,
            points: &points,
            area,
        };
        for plugin in &self.plugins {
            plugin.after_datasets_draw(&frame, &mut self.surface);
        }
    }

    fn destroy(mut self) {
        self.surface.release();
    }
}

/// Owns every chart instance, keyed by [`ChartKey`].
pub struct ChartLifecycleManager<S> {
    charts: IndexMap<ChartKey, ChartInstance<S>>,
    style: ChartStyle,
    plugins: PluginFactory,
}

impl<S: RenderSurface> Default for ChartLifecycleManager<S> {
    fn default() -> Self {
        Self::new(ChartStyle::default())
    }
}

impl<S: RenderSurface> ChartLifecycleManager<S> {
    /// Manager that gives new charts `style` and the min/max annotation.
    pub fn new(style: ChartStyle) -> Self {
        Self::with_plugins(style, default_plugins)
    }

    /// Manager with a custom plugin set for new charts.
    pub fn with_plugins(style: ChartStyle, plugins: PluginFactory) -> Self {
        Self {
            charts: IndexMap::new(),
            style,
            plugins,
        }
    }

    /// Create or update the chart for `key`.
    ///
    /// An existing chart keeps its surface, style and plugins; only labels,
    /// values and color are replaced. A missing chart is created if the
    /// provider has a surface for the key, and skipped otherwise.
    pub fn update<P>(
        &mut self,
        key: ChartKey,
        provider: &mut P,
        labels: Vec<String>,
        values: Vec<f64>,
        color: Color,
    ) -> ChartUpdate
    where
        P: SurfaceProvider<Surface = S>,
    {
        if let Some(chart) = self.charts.get_mut(&key) {
            chart.replace_data(labels, values, color);
            chart.render();
            provider.present(key, &chart.surface);
            debug!(chart = %key, samples = chart.dataset.values.len(), "chart updated in place");
            return ChartUpdate::Updated;
        }

        let Some(surface) = provider.surface_for(key) else {
            debug!(chart = %key, "no surface for chart; skipping");
            return ChartUpdate::Skipped;
        };

        let dataset = Dataset {
            labels,
            values,
            color,
        };
        let mut chart = ChartInstance::new(surface, dataset, self.style.clone(), (self.plugins)());
        chart.render();
        provider.present(key, &chart.surface);
        debug!(
            chart = %key,
            samples = chart.dataset.values.len(),
            plugins = ?chart.plugin_ids(),
            "chart created"
        );
        self.charts.insert(key, chart);
        ChartUpdate::Created
    }

    /// Destroy every chart. Returns how many were torn down.
    pub fn reset_all(&mut self) -> usize {
        let count = self.charts.len();
        for (key, chart) in self.charts.drain(..) {
            debug!(chart = %key, "destroying chart");
            chart.destroy();
        }
        count
    }

    /// The live chart for `key`.
    pub fn get(&self, key: ChartKey) -> Option<&ChartInstance<S>> {
        self.charts.get(&key)
    }

    /// True if `key` has a live chart.
    pub fn contains(&self, key: ChartKey) -> bool {
        self.charts.contains_key(&key)
    }

    /// Number of live charts.
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// True if no chart is live.
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Live charts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ChartKey, &ChartInstance<S>)> {
        self.charts.iter().map(|(k, v)| (*k, v))
    }
}
