//! Chart Datasets
//! Validated inputs for the line/bar (`Dataset`) and pie (`CategoryDataset`) charts.

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Ordered numeric series with optional per-point labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset", into = "RawDataset")]
pub struct Dataset {
    values: Vec<f64>,
    labels: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize)]
struct RawDataset {
    values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = ChartError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        match raw.labels {
            Some(labels) => Dataset::with_labels(raw.values, labels),
            None => Dataset::new(raw.values),
        }
    }
}

impl From<Dataset> for RawDataset {
    fn from(d: Dataset) -> Self {
        RawDataset {
            values: d.values,
            labels: d.labels,
        }
    }
}

impl Dataset {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ChartError::validation("dataset is empty"));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ChartError::validation(format!(
                "value at index {} is not finite ({})",
                i, values[i]
            )));
        }
        Ok(Self {
            values,
            labels: None,
        })
    }

    pub fn with_labels<S: Into<String>>(values: Vec<f64>, labels: Vec<S>) -> Result<Self> {
        let mut dataset = Self::new(values)?;
        if labels.len() != dataset.values.len() {
            return Err(ChartError::validation(format!(
                "{} labels given for {} values",
                labels.len(),
                dataset.values.len()
            )));
        }
        dataset.labels = Some(labels.into_iter().map(Into::into).collect());
        Ok(dataset)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Label for point `index`; falls back to the 1-based position.
    pub fn label(&self, index: usize) -> Cow<'_, str> {
        match self.labels.as_ref().and_then(|l| l.get(index)) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Owned((index + 1).to_string()),
        }
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// One named slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub value: f64,
}

/// Ordered (name, value) pairs whose values sum to a positive total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategoryDataset {
    entries: Vec<Category>,
}

impl TryFrom<Vec<Category>> for CategoryDataset {
    type Error = ChartError;

    fn try_from(entries: Vec<Category>) -> Result<Self> {
        CategoryDataset::new(entries)
    }
}

impl From<CategoryDataset> for Vec<Category> {
    fn from(d: CategoryDataset) -> Self {
        d.entries
    }
}

impl CategoryDataset {
    pub fn new(entries: Vec<Category>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ChartError::validation("category dataset is empty"));
        }
        for entry in &entries {
            if !entry.value.is_finite() || entry.value < 0.0 {
                return Err(ChartError::validation(format!(
                    "category '{}' has invalid value {}",
                    entry.name, entry.value
                )));
            }
        }
        // values are non-negative, so the sum is positive iff the largest is;
        // testing the largest also holds when the sum itself overflows
        if largest(&entries) <= 0.0 {
            return Err(ChartError::validation("category values sum to zero"));
        }
        Ok(Self { entries })
    }

    /// Build from `(name, value)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, value)| Category {
                    name: name.into(),
                    value,
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain sum of the values. May be `+inf` for values near `f64::MAX`;
    /// use [`shares`](Self::shares) for proportions.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Each entry's fraction of the whole, in entry order. The fractions are
    /// finite and sum to 1 even when [`total`](Self::total) overflows.
    pub fn shares(&self) -> Vec<f64> {
        let largest = largest(&self.entries);
        let scaled: Vec<f64> = self.entries.iter().map(|e| e.value / largest).collect();
        let scaled_total: f64 = scaled.iter().sum();
        scaled.into_iter().map(|v| v / scaled_total).collect()
    }
}

fn largest(entries: &[Category]) -> f64 {
    entries.iter().map(|e| e.value).fold(0.0, f64::max)
}
