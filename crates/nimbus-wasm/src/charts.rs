//! Chart.js render engine and the `WeatherCharts` JavaScript class.
//!
//! Expects the Chart.js UMD build to be loaded, exposing a global `Chart`.

use js_sys::{Object, Reflect};
use nimbus_charts::{
    ChartConfig, ChartData, ChartHandle, ChartKind, ChartPresenter, Dataset, Error, Paint,
    RenderEngine, Result, TooltipFormat,
};
use nimbus_types::{ForecastDay, TemperatureUnit};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::storage::js_error_message;
use crate::to_js;

#[wasm_bindgen]
extern "C" {
    /// The global Chart.js constructor.
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> std::result::Result<ChartJs, JsValue>;

    #[wasm_bindgen(method, setter = data, js_class = "Chart")]
    fn set_data(this: &ChartJs, data: &JsValue);

    #[wasm_bindgen(method, js_class = "Chart")]
    fn update(this: &ChartJs);

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &ChartJs);
}

type TooltipCallback = Closure<dyn Fn(JsValue) -> String>;

/// [`RenderEngine`] drawing on `<canvas>` elements with Chart.js.
pub struct ChartJsEngine {
    document: Option<Document>,
}

impl ChartJsEngine {
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }
}

impl Default for ChartJsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for ChartJsEngine {
    type Surface = HtmlCanvasElement;
    type Handle = ChartJsHandle;

    fn surface(&self, identifier: &str) -> Option<HtmlCanvasElement> {
        self.document
            .as_ref()?
            .get_element_by_id(identifier)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    fn render(
        &mut self,
        identifier: &str,
        surface: HtmlCanvasElement,
        config: &ChartConfig,
    ) -> Result<ChartJsHandle> {
        let fail = |reason: String| Error::render(identifier, reason);

        let js_config = to_js(config).map_err(|e| fail(e.to_string()))?;
        let js_data = get(&js_config, "data").map_err(&fail)?;
        resolve_paints(&surface, &config.data.datasets, &js_data).map_err(&fail)?;
        let tooltip = install_tooltip(&js_config, config.options.plugins.tooltip.label_format)
            .map_err(&fail)?;

        let chart = ChartJs::new(&surface, &js_config).map_err(|e| fail(js_error_message(&e)))?;
        Ok(ChartJsHandle {
            chart,
            canvas: surface,
            _tooltip: tooltip,
        })
    }
}

/// A live Chart.js chart.
pub struct ChartJsHandle {
    chart: ChartJs,
    canvas: HtmlCanvasElement,
    // Referenced from the chart's options; must outlive it.
    _tooltip: TooltipCallback,
}

impl ChartHandle for ChartJsHandle {
    fn update(&mut self, data: &ChartData) {
        let js_data = match to_js(data) {
            Ok(js_data) => js_data,
            Err(e) => {
                warn!("Failed to convert chart data: {}", e);
                return;
            }
        };
        if let Err(e) = resolve_paints(&self.canvas, &data.datasets, &js_data) {
            warn!("Failed to resolve chart fills: {}", e);
        }
        self.chart.set_data(&js_data);
        self.chart.update();
    }

    fn destroy(self) {
        self.chart.destroy();
    }
}

fn get(target: &JsValue, key: &str) -> std::result::Result<JsValue, String> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| js_error_message(&e))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> std::result::Result<(), String> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| js_error_message(&e))
}

fn string_field(target: &JsValue, key: &str) -> String {
    get(target, key)
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

/// Replace every [`Paint::Gradient`] background in `js_data.datasets` with
/// a vertical canvas gradient spanning the canvas height.
fn resolve_paints(
    canvas: &HtmlCanvasElement,
    datasets: &[Dataset],
    js_data: &JsValue,
) -> std::result::Result<(), String> {
    if !datasets
        .iter()
        .any(|d| matches!(d.background_color, Paint::Gradient { .. }))
    {
        return Ok(());
    }

    let context = canvas
        .get_context("2d")
        .map_err(|e| js_error_message(&e))?
        .ok_or("canvas has no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| "unexpected 2d context type".to_string())?;
    let js_datasets = get(js_data, "datasets")?;

    for (i, dataset) in datasets.iter().enumerate() {
        let Paint::Gradient { top, bottom } = &dataset.background_color else {
            continue;
        };
        let gradient = context.create_linear_gradient(0.0, 0.0, 0.0, f64::from(canvas.height()));
        gradient
            .add_color_stop(0.0, top)
            .map_err(|e| js_error_message(&e))?;
        gradient
            .add_color_stop(1.0, bottom)
            .map_err(|e| js_error_message(&e))?;

        let js_dataset =
            Reflect::get_u32(&js_datasets, i as u32).map_err(|e| js_error_message(&e))?;
        set(&js_dataset, "backgroundColor", &gradient)?;
    }
    Ok(())
}

/// Install `options.plugins.tooltip.callbacks.label`, printing each value
/// with `format` and the dataset's `unitSuffix`.
fn install_tooltip(
    js_config: &JsValue,
    format: TooltipFormat,
) -> std::result::Result<TooltipCallback, String> {
    let label = Closure::<dyn Fn(JsValue) -> String>::new(move |ctx: JsValue| {
        let dataset = get(&ctx, "dataset").unwrap_or(JsValue::UNDEFINED);
        let value = get(&ctx, "parsed")
            .and_then(|parsed| get(&parsed, "y"))
            .ok()
            .and_then(|y| y.as_f64())
            .unwrap_or(0.0);
        format.format_label(
            &string_field(&dataset, "label"),
            value,
            &string_field(&dataset, "unitSuffix"),
        )
    });

    let options = get(js_config, "options")?;
    let plugins = get(&options, "plugins")?;
    let tooltip = get(&plugins, "tooltip")?;
    let callbacks = Object::new();
    set(&callbacks, "label", label.as_ref())?;
    set(&tooltip, "callbacks", &callbacks)?;
    Ok(label)
}

fn parse_kind(kind: &str) -> Option<ChartKind> {
    match kind.to_ascii_lowercase().as_str() {
        "temperature" => Some(ChartKind::Temperature),
        "precipitation" | "humidity" => Some(ChartKind::Precipitation),
        "wind" => Some(ChartKind::Wind),
        _ => None,
    }
}

/// Forecast charts, exported to JavaScript.
///
/// ```js
/// const charts = new WeatherCharts();
/// charts.createTemperatureChart("temperatureChart", forecast.days, prefs.getTheme() === "dark");
/// charts.destroyAllCharts();
/// ```
#[wasm_bindgen]
pub struct WeatherCharts {
    presenter: ChartPresenter<ChartJsEngine>,
}

#[wasm_bindgen]
impl WeatherCharts {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WeatherCharts {
        WeatherCharts {
            presenter: ChartPresenter::new(ChartJsEngine::new()),
        }
    }

    /// Set the unit (`"celsius"` or `"fahrenheit"`) used for new charts.
    ///
    /// Returns `false` and keeps the current unit if `unit` is unknown.
    #[wasm_bindgen(js_name = setUnit)]
    pub fn set_unit(&mut self, unit: &str) -> bool {
        match unit.parse::<TemperatureUnit>() {
            Ok(unit) => {
                self.presenter.set_unit(unit);
                true
            }
            Err(e) => {
                warn!("Ignoring chart unit {:?}: {}", unit, e);
                false
            }
        }
    }

    /// Returns whether the chart was drawn.
    #[wasm_bindgen(js_name = createTemperatureChart)]
    pub fn create_temperature_chart(
        &mut self,
        canvas_id: &str,
        forecast: JsValue,
        dark_mode: bool,
    ) -> std::result::Result<bool, JsError> {
        self.create(ChartKind::Temperature, canvas_id, forecast, dark_mode)
    }

    #[wasm_bindgen(js_name = createPrecipitationChart)]
    pub fn create_precipitation_chart(
        &mut self,
        canvas_id: &str,
        forecast: JsValue,
        dark_mode: bool,
    ) -> std::result::Result<bool, JsError> {
        self.create(ChartKind::Precipitation, canvas_id, forecast, dark_mode)
    }

    #[wasm_bindgen(js_name = createWindChart)]
    pub fn create_wind_chart(
        &mut self,
        canvas_id: &str,
        forecast: JsValue,
        dark_mode: bool,
    ) -> std::result::Result<bool, JsError> {
        self.create(ChartKind::Wind, canvas_id, forecast, dark_mode)
    }

    /// Rebind the chart on `canvas_id` to a new forecast.
    ///
    /// `kind` is `"temperature"`, `"precipitation"` or `"wind"`. Returns
    /// `false` if no chart is live there.
    #[wasm_bindgen(js_name = updateChart)]
    pub fn update_chart(
        &mut self,
        canvas_id: &str,
        kind: &str,
        forecast: JsValue,
        dark_mode: bool,
    ) -> std::result::Result<bool, JsError> {
        let kind = parse_kind(kind)
            .ok_or_else(|| JsError::new(&format!("Unknown chart kind: {}", kind)))?;
        let days: Vec<ForecastDay> = serde_wasm_bindgen::from_value(forecast)?;
        let data = kind.data(&days, dark_mode, self.presenter.unit());
        Ok(self.presenter.update_chart(canvas_id, &data))
    }

    #[wasm_bindgen(js_name = destroyChart)]
    pub fn destroy_chart(&mut self, canvas_id: &str) -> bool {
        self.presenter.destroy_chart(canvas_id)
    }

    /// Returns how many charts were destroyed.
    #[wasm_bindgen(js_name = destroyAllCharts)]
    pub fn destroy_all_charts(&mut self) -> u32 {
        u32::try_from(self.presenter.destroy_all_charts()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = isLive)]
    pub fn is_live(&self, canvas_id: &str) -> bool {
        self.presenter.is_live(canvas_id)
    }

    fn create(
        &mut self,
        kind: ChartKind,
        canvas_id: &str,
        forecast: JsValue,
        dark_mode: bool,
    ) -> std::result::Result<bool, JsError> {
        let days: Vec<ForecastDay> = serde_wasm_bindgen::from_value(forecast)?;
        Ok(self
            .presenter
            .create_chart(kind, canvas_id, &days, dark_mode)
            .is_some())
    }
}

impl Default for WeatherCharts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("temperature"), Some(ChartKind::Temperature));
        assert_eq!(parse_kind("Wind"), Some(ChartKind::Wind));
        assert_eq!(parse_kind("humidity"), Some(ChartKind::Precipitation));
        assert_eq!(parse_kind("pressure"), None);
    }
}
