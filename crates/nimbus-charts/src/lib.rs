//! Forecast chart presentation for the Nimbus weather dashboard.
//!
//! This crate turns a multi-day forecast into declarative chart
//! configurations and manages the lifecycle of the charts drawn from them.
//!
//! # Features
//!
//! - Temperature, humidity/precipitation and wind chart builders
//! - Light and dark palettes that change presentation only
//! - A [`RenderEngine`] seam with a recording [`MockEngine`] for tests
//! - [`ChartPresenter`]: at most one live chart per identifier
//!
//! # Example
//!
//! ```
//! use nimbus_charts::{ChartPresenter, MockEngine};
//! use nimbus_types::ForecastDay;
//! use time::macros::date;
//!
//! let days = vec![ForecastDay {
//!     date: date!(2026 - 10 - 19),
//!     max_temp: 18.0,
//!     min_temp: 9.0,
//!     avg_temp: 13.5,
//!     humidity: 70.0,
//!     precipitation: Some(2.5),
//!     wind_speed: 12.0,
//! }];
//!
//! let mut presenter = ChartPresenter::new(MockEngine::with_surfaces(["temperatureChart"]));
//! let handle = presenter.create_temperature_chart("temperatureChart", &days, true);
//! assert!(handle.is_some());
//! assert!(presenter.is_live("temperatureChart"));
//!
//! presenter.destroy_all_charts();
//! assert!(presenter.is_empty());
//! ```

pub mod builders;
pub mod engine;
pub mod error;
pub mod mock;
pub mod model;
pub mod palette;
mod presenter;

pub use builders::{ChartKind, precipitation_chart, temperature_chart, wind_chart};
pub use engine::{ChartHandle, RenderEngine};
pub use error::{Error, Result};
pub use mock::{EngineEvent, MockEngine, MockHandle};
pub use model::{
    Axis, AxisPosition, ChartConfig, ChartData, ChartOptions, ChartType, Dataset, Paint,
    TooltipFormat,
};
pub use palette::{ChartPalette, Rgb};
pub use presenter::ChartPresenter;
