//! WebAssembly bindings for the Nimbus weather dashboard.
//!
//! Exposes two classes to JavaScript:
//!
//! - `WeatherStorage`: search history, favorites, theme and unit persisted
//!   in `localStorage`
//! - `WeatherCharts`: temperature, precipitation and wind charts drawn with
//!   Chart.js
//!
//! Diagnostics from every crate are routed to the browser console.

mod charts;
mod storage;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;

pub use charts::{ChartJsEngine, ChartJsHandle, WeatherCharts};
pub use storage::{LocalStorageBackend, WeatherStorage};

/// Initialize the WASM module (called automatically).
///
/// Forwards Rust panics to `console.error` and installs a console `tracing`
/// subscriber filtered at the default logging level.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_logging(&nimbus_store::LoggingConfig::default().filter);
    info!("Nimbus WASM module initialized");
}

/// Route `tracing` output to the console with an `EnvFilter` directive such
/// as `"debug"` or `"nimbus_store=debug,info"`.
///
/// Only the first call installs a subscriber; later calls are ignored.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(MakeWebConsoleWriter::new())
        .with_ansi(false)
        .without_time()
        .try_init();
}

/// Convert a value to a plain JS object (no `Map`s, no `BigInt`s).
pub(crate) fn to_js<T: Serialize + ?Sized>(
    value: &T,
) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
