//! Paired labels/values for one tracked quantity.

use tracing::warn;

/// An ordered series of samples with one label per sample.
///
/// Missing samples are stored as `NaN`; consumers treat any non-finite value
/// as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    /// Pair labels with values.
    ///
    /// If the lengths differ the longer side is truncated so that every value
    /// keeps its label.
    pub fn new(mut labels: Vec<String>, mut values: Vec<f64>) -> Self {
        if labels.len() != values.len() {
            warn!(
                labels = labels.len(),
                values = values.len(),
                "series labels and values differ in length; truncating"
            );
            let n = labels.len().min(values.len());
            labels.truncate(n);
            values.truncate(n);
        }
        Self { labels, values }
    }

    /// Build from wire samples where `None` marks a missing value.
    pub fn from_optional(labels: Vec<String>, values: Vec<Option<f64>>) -> Self {
        let values = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        Self::new(labels, values)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample labels (dates).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Sample values, possibly containing `NaN`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Split into owned labels and values.
    pub fn into_parts(self) -> (Vec<String>, Vec<f64>) {
        (self.labels, self.values)
    }
}
