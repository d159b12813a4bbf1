//! Label values and the segment selection table.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Voxel value identifying one anatomical structure in a label volume.
///
/// Always finite. Whole values display with one decimal place (`2.0`), which
/// is also how they appear in derived artifact file names.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct LabelValue(f64);

impl LabelValue {
    /// Creates a label value, rejecting NaN and infinities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLabel`] for NaN or infinite values.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::InvalidLabel(value))
        }
    }

    /// Returns the raw voxel value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for LabelValue {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<LabelValue> for f64 {
    fn from(label: LabelValue) -> Self {
        label.0
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl std::str::FromStr for LabelValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|e| Error::ConfigError(format!("label `{s}`: {e}")))?;
        Self::new(value)
    }
}

/// One selectable entry of the segment table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Display name shown in the segment selector.
    pub name: String,
    /// Label value isolated when this segment is viewed or exported.
    pub label: LabelValue,
}

impl Segment {
    /// Creates a segment entry.
    #[must_use]
    pub fn new(name: impl Into<String>, label: LabelValue) -> Self {
        Self {
            name: name.into(),
            label,
        }
    }
}

/// Ordered mapping from selector index to segment.
///
/// Indices without an entry resolve to the fallback label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentTable {
    segments: Vec<Segment>,
    fallback: LabelValue,
}

impl Default for SegmentTable {
    fn default() -> Self {
        let segments = [2.0, 1.0, 7.0, 3.0]
            .into_iter()
            .map(|v| {
                let label = LabelValue(v);
                Segment::new(format!("Label {label}"), label)
            })
            .collect();
        Self {
            segments,
            fallback: LabelValue(1.0),
        }
    }
}

impl SegmentTable {
    /// Creates a table from explicit entries.
    #[must_use]
    pub fn new(segments: Vec<Segment>, fallback: LabelValue) -> Self {
        Self { segments, fallback }
    }

    /// Returns the segment at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Label for the selector index, falling back for unknown indices.
    #[must_use]
    pub fn label_for(&self, index: usize) -> LabelValue {
        self.get(index).map_or(self.fallback, |s| s.label)
    }

    /// Display name for the selector index.
    ///
    /// Unknown indices are named after the fallback label.
    #[must_use]
    pub fn name_for(&self, index: usize) -> String {
        self.get(index)
            .map_or_else(|| format!("Label {}", self.fallback), |s| s.name.clone())
    }

    /// Label used for unknown indices.
    #[must_use]
    pub fn fallback(&self) -> LabelValue {
        self.fallback
    }

    /// Iterates over the configured segments in selector order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns the number of configured segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if no segments are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
