//! Platform-agnostic types for the Nimbus weather dashboard.
//!
//! This crate provides shared types used by both the preference store
//! (nimbus-store) and the chart presenter (nimbus-charts), native and
//! WebAssembly alike.
//!
//! # Features
//!
//! - Forecast input data ([`ForecastDay`])
//! - Favorite locations ([`NewFavorite`], [`FavoriteLocation`])
//! - Display preferences ([`Theme`], [`TemperatureUnit`])
//! - Error types for preference parsing
//!
//! # Example
//!
//! ```
//! use nimbus_types::{Theme, TemperatureUnit};
//!
//! let theme: Theme = "dark".parse().unwrap();
//! assert!(theme.is_dark());
//! assert_eq!(TemperatureUnit::default().symbol(), "°C");
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    FavoriteLocation, ForecastDay, NewFavorite, TemperatureUnit, Theme, names_match,
};
