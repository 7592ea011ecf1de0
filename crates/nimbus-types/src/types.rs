//! Core types for weather dashboard data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::ParseError;

/// Color scheme of the dashboard.
///
/// Serialized as the lowercase name (`"light"`, `"dark"`), which is also the
/// form persisted by the preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    /// Light background, dark text.
    #[default]
    Light,
    /// Dark background, light text.
    Dark,
}

impl Theme {
    /// Returns `true` for [`Theme::Dark`].
    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// The lowercase name of the theme.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    /// Parse a theme name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_types::Theme;
    ///
    /// assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
    /// assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
    /// assert!("sepia".parse::<Theme>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseError::UnknownTheme(s.to_string())),
        }
    }
}

/// Temperature unit preference.
///
/// The unit also decides the wind speed unit shown next to it
/// (metric km/h for Celsius, imperial mph for Fahrenheit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// The lowercase name of the unit.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Degree symbol used in axis titles and tooltips.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Wind speed unit paired with this temperature unit.
    #[must_use]
    pub fn speed_symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "km/h",
            TemperatureUnit::Fahrenheit => "mph",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ParseError;

    /// Parse a unit name (case-insensitive). `"c"` and `"f"` are accepted as
    /// short forms.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_types::TemperatureUnit;
    ///
    /// assert_eq!("fahrenheit".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
    /// assert_eq!("C".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
    /// assert!("kelvin".parse::<TemperatureUnit>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(ParseError::UnknownUnit(s.to_string())),
        }
    }
}

/// A location the user asked to add to their favorites.
///
/// The store stamps it with the time of insertion to produce a
/// [`FavoriteLocation`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewFavorite {
    /// City name, used as the identity of the favorite (case-insensitive).
    pub name: String,
    /// Country name or code.
    pub country: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl NewFavorite {
    /// Create a new favorite request.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }

    /// Stamp the location with the time it was added.
    #[must_use]
    pub fn added_at(self, added_at: OffsetDateTime) -> FavoriteLocation {
        FavoriteLocation {
            name: self.name,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
            added_at,
        }
    }
}

/// A persisted favorite location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FavoriteLocation {
    /// City name, unique among favorites ignoring case.
    pub name: String,
    /// Country name or code.
    pub country: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// When the favorite was added.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub added_at: OffsetDateTime,
}

impl FavoriteLocation {
    /// Check whether this favorite is the location called `name`, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Case-insensitive comparison used for city names throughout the crates.
///
/// # Examples
///
/// ```
/// use nimbus_types::names_match;
///
/// assert!(names_match("Paris", "PARIS"));
/// assert!(names_match("São Paulo", "são paulo"));
/// assert!(!names_match("Paris", "Parish"));
/// ```
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// One day of forecast data, as supplied by the forecast provider.
///
/// Temperatures and wind speed must already be in the unit the charts are
/// drawn with. Chart builders relabel axes and tooltips for
/// [`TemperatureUnit::Fahrenheit`] (°F, mph) but never convert values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ForecastDay {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    #[cfg_attr(feature = "serde", serde(with = "iso_date"))]
    pub date: Date,
    /// Daily maximum temperature, in °C or °F to match the chart unit.
    pub max_temp: f64,
    /// Daily minimum temperature, in °C or °F to match the chart unit.
    pub min_temp: f64,
    /// Daily average temperature, in °C or °F to match the chart unit.
    pub avg_temp: f64,
    /// Average relative humidity in percent.
    pub humidity: f64,
    /// Total precipitation in millimeters, when reported.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub precipitation: Option<f64>,
    /// Maximum wind speed, in km/h for Celsius charts or mph for Fahrenheit.
    pub wind_speed: f64,
}

impl ForecastDay {
    /// Short category label for chart axes, e.g. `"Mon, Oct 19"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_types::ForecastDay;
    /// use time::macros::date;
    ///
    /// let day = ForecastDay {
    ///     date: date!(2026 - 10 - 19),
    ///     max_temp: 18.0,
    ///     min_temp: 9.0,
    ///     avg_temp: 13.5,
    ///     humidity: 70.0,
    ///     precipitation: None,
    ///     wind_speed: 12.0,
    /// };
    /// assert_eq!(day.label(), "Mon, Oct 19");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        let weekday = self.date.weekday().to_string();
        let month = self.date.month().to_string();
        format!("{}, {} {}", &weekday[..3], &month[..3], self.date.day())
    }

    /// Precipitation with a missing report counted as none.
    #[must_use]
    pub fn precipitation_or_zero(&self) -> f64 {
        self.precipitation.unwrap_or(0.0)
    }
}

#[cfg(feature = "serde")]
mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::Date;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Some providers send a full timestamp; only the date part matters.
        let date_part = raw.get(..10).unwrap_or(&raw);
        Date::parse(date_part, FORMAT).map_err(de::Error::custom)
    }
}
