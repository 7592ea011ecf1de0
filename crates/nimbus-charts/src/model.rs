//! Declarative chart configuration.
//!
//! The structures here serialize to the JSON shape Chart.js expects for its
//! `new Chart(canvas, config)` constructor. Two things Chart.js can only take
//! as live objects are expressed as data and resolved by the engine binding:
//!
//! - [`Paint::Gradient`]: a vertical gradient, turned into a canvas gradient
//! - [`TooltipFormat`]: label formatting, turned into a tooltip callback that
//!   appends each dataset's `unitSuffix`

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;

/// Chart or dataset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
}

/// A fill or background color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    /// A CSS color string.
    Solid(String),
    /// Vertical gradient from `top` to `bottom` over the chart area.
    Gradient { top: String, bottom: String },
}

/// Complete configuration handed to the render engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Render as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Category labels plus the series drawn against them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Render as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Find a dataset by label.
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

/// One series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Per-dataset type override for mixed charts.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: Paint,
    pub border_width: f64,
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: String,
    /// Drawing order; lower values are drawn on top.
    pub order: u32,
    /// Appended to values in tooltip labels, e.g. `"°C"` or `" mm"`.
    pub unit_suffix: String,
}

/// Chart-wide options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub interaction: Interaction,
    pub plugins: Plugins,
    pub scales: BTreeMap<String, Axis>,
}

/// Hover behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

/// Legend and tooltip settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: String,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub color: String,
    pub use_point_style: bool,
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub background_color: String,
    pub title_color: String,
    pub body_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub padding: f64,
    pub label_format: TooltipFormat,
}

/// How tooltip values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TooltipFormat {
    /// Digits after the decimal point.
    pub decimals: u8,
}

impl TooltipFormat {
    /// Format one tooltip line, e.g. `"Max Temp: 21.4°C"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_charts::TooltipFormat;
    ///
    /// let format = TooltipFormat { decimals: 1 };
    /// assert_eq!(format.format_label("Max Temp", 21.44, "°C"), "Max Temp: 21.4°C");
    /// assert_eq!(format.format_label("Rain", 3.0, " mm"), "Rain: 3.0 mm");
    /// ```
    #[must_use]
    pub fn format_label(&self, series: &str, value: f64, suffix: &str) -> String {
        format!(
            "{}: {:.*}{}",
            series,
            usize::from(self.decimals),
            value,
            suffix
        )
    }
}

/// Axis position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
    Bottom,
}

/// One axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub position: AxisPosition,
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub title: AxisTitle,
    pub grid: Grid,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub display: bool,
    pub color: String,
    /// `false` keeps the axis' grid lines out of the plot area (used by the
    /// secondary axis so two grids don't overlap).
    pub draw_on_chart_area: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub color: String,
}
