//! Map configuration: canvas geometry, dataset columns, styling and data sources.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::io::Source;

/// Percentile bucket selecting the "overall" rows of the dataset.
pub const OVERALL_PERCENTILE: i32 = -9;

/// Category shown first and selected by default when present.
pub const POOLED: &str = "Pooled";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub canvas: Canvas,
    pub percentile: i32,
    pub default_category: String,
    pub columns: Columns,
    pub style: Style,
    pub sources: Sources,
}

/// Logical drawing surface; shapes are fit to the area inside the margin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

/// Column names of the tabular dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub state: String,
    pub county: String,
    pub category: String,
    pub percentile: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Style {
    pub no_data_fill: String,
    pub state_stroke: Stroke,
    pub county_stroke: Stroke,
    pub outline_stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// Where the dataset and the two boundary topologies come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub dataset: Source,
    pub states: Source,
    pub counties: Source,
    /// Object names inside the two topologies.
    pub states_object: String,
    pub counties_object: String,
}

impl Canvas {
    /// Drawable width inside the margins.
    #[inline] pub fn inner_width(&self) -> f64 { self.width - 2.0 * self.margin }

    /// Drawable height inside the margins.
    #[inline] pub fn inner_height(&self) -> f64 { self.height - 2.0 * self.margin }
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 800.0, height: 500.0, margin: 20.0 }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            state: "par_state".into(),
            county: "par_county".into(),
            category: "kid_race".into(),
            percentile: "par_pctile".into(),
            name: "county_name".into(),
            value: "shrunk_xkid_stubalance2020".into(),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            no_data_fill: "#eee".into(),
            state_stroke: Stroke { color: "#fff".into(), width: 0.7 },
            county_stroke: Stroke { color: "#fff".into(), width: 0.6 },
            outline_stroke: Stroke { color: "#111".into(), width: 1.0 },
        }
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            dataset: Source::Path("avg_student_loan_balance_2020_cty.csv".into()),
            states: Source::Url("https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json".into()),
            counties: Source::Url("https://cdn.jsdelivr.net/npm/us-atlas@3/counties-10m.json".into()),
            states_object: "states".into(),
            counties_object: "counties".into(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            percentile: OVERALL_PERCENTILE,
            default_category: POOLED.into(),
            columns: Columns::default(),
            style: Style::default(),
            sources: Sources::default(),
        }
    }
}

impl MapConfig {
    /// Read a JSON config file; keys that are not present keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("[config] Invalid config in {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("[config] Failed to parse config JSON")
    }
}
