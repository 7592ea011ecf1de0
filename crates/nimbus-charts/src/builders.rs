//! Chart configuration builders for each forecast chart kind.
//!
//! Each builder projects the forecast into per-series arrays in input order
//! and dresses them with the palette. Values are passed through unchanged.

use std::collections::BTreeMap;

use nimbus_types::{ForecastDay, TemperatureUnit};

use crate::model::{
    Axis, AxisPosition, AxisTitle, ChartConfig, ChartData, ChartOptions, ChartType, Dataset,
    Grid, Interaction, Legend, LegendLabels, Paint, Plugins, Ticks, Tooltip, TooltipFormat,
};
use crate::palette::ChartPalette;

const LINE_TENSION: f64 = 0.4;
const POINT_RADIUS: f64 = 4.0;
const POINT_HOVER_RADIUS: f64 = 6.0;

/// The kinds of forecast chart the presenter can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Max, average (gradient filled) and min temperature lines.
    Temperature,
    /// Humidity bars on the left axis, precipitation line on the right axis.
    Precipitation,
    /// A single filled wind speed line.
    Wind,
}

impl ChartKind {
    /// Build the full configuration for this kind.
    #[must_use]
    pub fn config(
        self,
        days: &[ForecastDay],
        dark_mode: bool,
        unit: TemperatureUnit,
    ) -> ChartConfig {
        let palette = ChartPalette::for_mode(dark_mode);
        match self {
            ChartKind::Temperature => temperature_chart(days, &palette, unit),
            ChartKind::Precipitation => precipitation_chart(days, &palette),
            ChartKind::Wind => wind_chart(days, &palette, unit),
        }
    }

    /// Build only the data part, e.g. for [`update_chart`](crate::ChartPresenter::update_chart).
    #[must_use]
    pub fn data(self, days: &[ForecastDay], dark_mode: bool, unit: TemperatureUnit) -> ChartData {
        self.config(days, dark_mode, unit).data
    }
}

/// Temperature trend chart: max, average and min lines.
#[must_use]
pub fn temperature_chart(
    days: &[ForecastDay],
    palette: &ChartPalette,
    unit: TemperatureUnit,
) -> ChartConfig {
    let suffix = unit.symbol();
    let datasets = vec![
        Dataset {
            fill: false,
            ..line_dataset(
                "Max Temp",
                days.iter().map(|d| d.max_temp).collect(),
                palette.max_temp.css(),
                Paint::Solid(palette.max_temp.alpha(palette.opacity.fill)),
                palette,
                suffix,
            )
        },
        Dataset {
            fill: true,
            ..line_dataset(
                "Avg Temp",
                days.iter().map(|d| d.avg_temp).collect(),
                palette.avg_temp.css(),
                Paint::Gradient {
                    top: palette.avg_temp.alpha(palette.opacity.gradient),
                    bottom: palette.avg_temp.alpha(palette.opacity.clear),
                },
                palette,
                suffix,
            )
        },
        Dataset {
            fill: false,
            ..line_dataset(
                "Min Temp",
                days.iter().map(|d| d.min_temp).collect(),
                palette.min_temp.css(),
                Paint::Solid(palette.min_temp.alpha(palette.opacity.fill)),
                palette,
                suffix,
            )
        },
    ];

    let mut scales = BTreeMap::new();
    scales.insert("x".to_string(), category_axis(palette));
    scales.insert(
        "y".to_string(),
        value_axis(
            palette,
            AxisPosition::Left,
            format!("Temperature ({})", suffix),
        ),
    );

    ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: labels(days),
            datasets,
        },
        options: options(palette, scales, 1),
    }
}

/// Humidity and precipitation chart with dual y-axes.
#[must_use]
pub fn precipitation_chart(days: &[ForecastDay], palette: &ChartPalette) -> ChartConfig {
    let humidity = Dataset {
        chart_type: Some(ChartType::Bar),
        label: "Humidity".to_string(),
        data: days.iter().map(|d| d.humidity).collect(),
        border_color: palette.humidity.css(),
        background_color: Paint::Solid(palette.humidity.alpha(palette.opacity.bar)),
        border_width: 1.0,
        fill: false,
        tension: None,
        point_radius: None,
        point_hover_radius: None,
        point_background_color: None,
        point_border_color: None,
        border_radius: Some(4.0),
        y_axis_id: "y".to_string(),
        order: 2,
        unit_suffix: "%".to_string(),
    };

    let precipitation = Dataset {
        chart_type: Some(ChartType::Line),
        y_axis_id: "y1".to_string(),
        order: 1,
        ..line_dataset(
            "Precipitation",
            days.iter().map(ForecastDay::precipitation_or_zero).collect(),
            palette.precipitation.css(),
            Paint::Solid(palette.precipitation.alpha(palette.opacity.fill)),
            palette,
            " mm",
        )
    };

    let mut humidity_axis = value_axis(palette, AxisPosition::Left, "Humidity (%)".to_string());
    humidity_axis.min = Some(0.0);
    humidity_axis.max = Some(100.0);

    let mut precipitation_axis = value_axis(
        palette,
        AxisPosition::Right,
        "Precipitation (mm)".to_string(),
    );
    precipitation_axis.grid.draw_on_chart_area = false;

    let mut scales = BTreeMap::new();
    scales.insert("x".to_string(), category_axis(palette));
    scales.insert("y".to_string(), humidity_axis);
    scales.insert("y1".to_string(), precipitation_axis);

    ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: labels(days),
            datasets: vec![humidity, precipitation],
        },
        options: options(palette, scales, 1),
    }
}

/// Wind speed chart: one filled line.
#[must_use]
pub fn wind_chart(
    days: &[ForecastDay],
    palette: &ChartPalette,
    unit: TemperatureUnit,
) -> ChartConfig {
    let speed = unit.speed_symbol();
    let wind = Dataset {
        fill: true,
        ..line_dataset(
            "Wind Speed",
            days.iter().map(|d| d.wind_speed).collect(),
            palette.wind.css(),
            Paint::Solid(palette.wind.alpha(palette.opacity.fill)),
            palette,
            &format!(" {}", speed),
        )
    };

    let mut scales = BTreeMap::new();
    scales.insert("x".to_string(), category_axis(palette));
    scales.insert(
        "y".to_string(),
        value_axis(palette, AxisPosition::Left, format!("Wind Speed ({})", speed)),
    );

    ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: labels(days),
            datasets: vec![wind],
        },
        options: options(palette, scales, 1),
    }
}

fn labels(days: &[ForecastDay]) -> Vec<String> {
    days.iter().map(ForecastDay::label).collect()
}

fn line_dataset(
    label: &str,
    data: Vec<f64>,
    border_color: String,
    background_color: Paint,
    palette: &ChartPalette,
    unit_suffix: &str,
) -> Dataset {
    Dataset {
        chart_type: None,
        label: label.to_string(),
        data,
        point_background_color: Some(border_color.clone()),
        border_color,
        background_color,
        border_width: 2.0,
        fill: false,
        tension: Some(LINE_TENSION),
        point_radius: Some(POINT_RADIUS),
        point_hover_radius: Some(POINT_HOVER_RADIUS),
        point_border_color: Some(palette.surface.css()),
        border_radius: None,
        y_axis_id: "y".to_string(),
        order: 0,
        unit_suffix: unit_suffix.to_string(),
    }
}

fn category_axis(palette: &ChartPalette) -> Axis {
    Axis {
        position: AxisPosition::Bottom,
        begin_at_zero: false,
        min: None,
        max: None,
        title: AxisTitle {
            display: false,
            text: String::new(),
            color: palette.text.css(),
        },
        grid: Grid {
            display: false,
            color: palette.grid.clone(),
            draw_on_chart_area: true,
        },
        ticks: Ticks {
            color: palette.text_muted.css(),
        },
    }
}

fn value_axis(palette: &ChartPalette, position: AxisPosition, title: String) -> Axis {
    Axis {
        position,
        begin_at_zero: true,
        min: None,
        max: None,
        title: AxisTitle {
            display: true,
            text: title,
            color: palette.text.css(),
        },
        grid: Grid {
            display: true,
            color: palette.grid.clone(),
            draw_on_chart_area: true,
        },
        ticks: Ticks {
            color: palette.text_muted.css(),
        },
    }
}

fn options(palette: &ChartPalette, scales: BTreeMap<String, Axis>, decimals: u8) -> ChartOptions {
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        interaction: Interaction {
            mode: "index".to_string(),
            intersect: false,
        },
        plugins: Plugins {
            legend: Legend {
                display: true,
                position: "top".to_string(),
                labels: LegendLabels {
                    color: palette.text.css(),
                    use_point_style: true,
                    padding: 16.0,
                },
            },
            tooltip: Tooltip {
                background_color: palette.tooltip_background.alpha(palette.opacity.tooltip),
                title_color: palette.tooltip_text.css(),
                body_color: palette.tooltip_text.css(),
                border_color: palette.tooltip_border.css(),
                border_width: 1.0,
                padding: 12.0,
                label_format: TooltipFormat { decimals },
            },
        },
        scales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn days() -> Vec<ForecastDay> {
        vec![
            ForecastDay {
                date: date!(2026 - 10 - 19),
                max_temp: 18.2,
                min_temp: 9.1,
                avg_temp: 13.4,
                humidity: 71.0,
                precipitation: Some(4.2),
                wind_speed: 22.0,
            },
            ForecastDay {
                date: date!(2026 - 10 - 20),
                max_temp: 16.0,
                min_temp: 7.5,
                avg_temp: 11.9,
                humidity: 80.0,
                precipitation: None,
                wind_speed: 31.5,
            },
        ]
    }

    #[test]
    fn test_temperature_series_follow_input_order() {
        let config = ChartKind::Temperature.config(&days(), false, TemperatureUnit::Celsius);

        assert_eq!(config.chart_type, ChartType::Line);
        assert_eq!(config.data.labels, vec!["Mon, Oct 19", "Tue, Oct 20"]);
        let labels: Vec<_> = config.data.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Max Temp", "Avg Temp", "Min Temp"]);
        assert_eq!(config.data.dataset("Max Temp").unwrap().data, vec![18.2, 16.0]);
        assert_eq!(config.data.dataset("Avg Temp").unwrap().data, vec![13.4, 11.9]);
        assert_eq!(config.data.dataset("Min Temp").unwrap().data, vec![9.1, 7.5]);
    }

    #[test]
    fn test_average_series_has_gradient_fill() {
        let config = ChartKind::Temperature.config(&days(), false, TemperatureUnit::Celsius);
        let avg = config.data.dataset("Avg Temp").unwrap();
        assert!(avg.fill);
        assert!(matches!(avg.background_color, Paint::Gradient { .. }));
        assert!(!config.data.dataset("Max Temp").unwrap().fill);
    }

    #[test]
    fn test_temperature_unit_only_changes_labels() {
        let celsius = ChartKind::Temperature.config(&days(), false, TemperatureUnit::Celsius);
        let fahrenheit = ChartKind::Temperature.config(&days(), false, TemperatureUnit::Fahrenheit);

        assert_eq!(celsius.options.scales["y"].title.text, "Temperature (°C)");
        assert_eq!(fahrenheit.options.scales["y"].title.text, "Temperature (°F)");
        assert_eq!(fahrenheit.data.datasets[0].unit_suffix, "°F");
        assert_eq!(
            celsius.data.datasets[0].data,
            fahrenheit.data.datasets[0].data
        );
    }

    #[test]
    fn test_precipitation_chart_uses_dual_axes() {
        let config = ChartKind::Precipitation.config(&days(), false, TemperatureUnit::Celsius);

        assert_eq!(config.chart_type, ChartType::Bar);
        let humidity = config.data.dataset("Humidity").unwrap();
        let rain = config.data.dataset("Precipitation").unwrap();
        assert_eq!(humidity.chart_type, Some(ChartType::Bar));
        assert_eq!(humidity.y_axis_id, "y");
        assert_eq!(rain.chart_type, Some(ChartType::Line));
        assert_eq!(rain.y_axis_id, "y1");

        // Missing precipitation is drawn as zero
        assert_eq!(rain.data, vec![4.2, 0.0]);

        let y = &config.options.scales["y"];
        let y1 = &config.options.scales["y1"];
        assert_eq!(y.position, AxisPosition::Left);
        assert_eq!(y.max, Some(100.0));
        assert_eq!(y1.position, AxisPosition::Right);
        assert!(!y1.grid.draw_on_chart_area);
    }

    #[test]
    fn test_wind_chart_single_filled_series() {
        let config = ChartKind::Wind.config(&days(), true, TemperatureUnit::Fahrenheit);
        assert_eq!(config.data.datasets.len(), 1);
        let wind = &config.data.datasets[0];
        assert!(wind.fill);
        assert_eq!(wind.data, vec![22.0, 31.5]);
        assert_eq!(wind.unit_suffix, " mph");
        assert_eq!(config.options.scales["y"].title.text, "Wind Speed (mph)");
    }

    #[test]
    fn test_dark_mode_changes_presentation_only() {
        for kind in [ChartKind::Temperature, ChartKind::Precipitation, ChartKind::Wind] {
            let light = kind.config(&days(), false, TemperatureUnit::Celsius);
            let dark = kind.config(&days(), true, TemperatureUnit::Celsius);

            assert_eq!(light.data.labels, dark.data.labels);
            for (l, d) in light.data.datasets.iter().zip(&dark.data.datasets) {
                assert_eq!(l.data, d.data);
                assert_ne!(l.border_color, d.border_color);
            }
            assert_ne!(
                light.options.plugins.legend.labels.color,
                dark.options.plugins.legend.labels.color
            );
            assert_ne!(
                light.options.scales["y"].grid.color,
                dark.options.scales["y"].grid.color
            );
        }
    }

    #[test]
    fn test_empty_forecast_builds_empty_series() {
        let config = ChartKind::Wind.config(&[], false, TemperatureUnit::Celsius);
        assert!(config.data.labels.is_empty());
        assert!(config.data.datasets[0].data.is_empty());
    }

    #[test]
    fn test_serializes_to_chartjs_shape() {
        let config = ChartKind::Precipitation.config(&days(), false, TemperatureUnit::Celsius);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "bar");
        assert_eq!(json["data"]["datasets"][0]["type"], "bar");
        assert_eq!(json["data"]["datasets"][1]["yAxisID"], "y1");
        assert_eq!(json["data"]["datasets"][1]["unitSuffix"], " mm");
        assert_eq!(json["options"]["maintainAspectRatio"], false);
        assert_eq!(json["options"]["interaction"]["mode"], "index");
        assert_eq!(json["options"]["scales"]["y1"]["grid"]["drawOnChartArea"], false);
        assert_eq!(json["options"]["plugins"]["tooltip"]["labelFormat"]["decimals"], 1);
        assert!(json["data"]["datasets"][0].get("tension").is_none());
    }
}
