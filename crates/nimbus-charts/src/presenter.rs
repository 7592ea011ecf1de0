//! Chart handle registry.
//!
//! [`ChartPresenter`] owns at most one live chart per identifier. Creating a
//! chart under an identifier that already has one destroys the old chart
//! first, so engine resources are never leaked by re-rendering.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use nimbus_types::{ForecastDay, TemperatureUnit};

use crate::builders::ChartKind;
use crate::engine::{ChartHandle, RenderEngine};
use crate::model::ChartData;

/// Creates, updates and destroys forecast charts on a [`RenderEngine`].
///
/// None of the operations fail: a missing surface, a render failure or an
/// update of an unknown chart is reported through `tracing` and otherwise
/// ignored.
pub struct ChartPresenter<E: RenderEngine> {
    engine: E,
    charts: HashMap<String, E::Handle>,
    unit: TemperatureUnit,
}

impl<E: RenderEngine> ChartPresenter<E> {
    /// Create a presenter with Celsius labels.
    pub fn new(engine: E) -> Self {
        Self::with_unit(engine, TemperatureUnit::default())
    }

    /// Create a presenter labelling axes and tooltips in `unit`.
    pub fn with_unit(engine: E, unit: TemperatureUnit) -> Self {
        Self {
            engine,
            charts: HashMap::new(),
            unit,
        }
    }

    /// Change the unit used for charts created from now on.
    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// The unit used for axis titles and tooltip suffixes.
    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// The engine charts are rendered with.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to register surfaces.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Draw the temperature trend chart on `identifier`.
    pub fn create_temperature_chart(
        &mut self,
        identifier: &str,
        days: &[ForecastDay],
        dark_mode: bool,
    ) -> Option<&E::Handle> {
        self.create_chart(ChartKind::Temperature, identifier, days, dark_mode)
    }

    /// Draw the humidity and precipitation chart on `identifier`.
    pub fn create_precipitation_chart(
        &mut self,
        identifier: &str,
        days: &[ForecastDay],
        dark_mode: bool,
    ) -> Option<&E::Handle> {
        self.create_chart(ChartKind::Precipitation, identifier, days, dark_mode)
    }

    /// Draw the wind speed chart on `identifier`.
    pub fn create_wind_chart(
        &mut self,
        identifier: &str,
        days: &[ForecastDay],
        dark_mode: bool,
    ) -> Option<&E::Handle> {
        self.create_chart(ChartKind::Wind, identifier, days, dark_mode)
    }

    /// Draw a chart of `kind` on `identifier`, replacing any live chart there.
    ///
    /// Returns `None` if the surface does not exist or rendering failed.
    pub fn create_chart(
        &mut self,
        kind: ChartKind,
        identifier: &str,
        days: &[ForecastDay],
        dark_mode: bool,
    ) -> Option<&E::Handle> {
        let Some(surface) = self.engine.surface(identifier) else {
            error!("Chart surface {} not found", identifier);
            return None;
        };

        if let Some(previous) = self.charts.remove(identifier) {
            debug!("Destroying previous chart on {}", identifier);
            previous.destroy();
        }

        let config = kind.config(days, dark_mode, self.unit);
        match self.engine.render(identifier, surface, &config) {
            Ok(handle) => {
                debug!(
                    "Rendered {:?} chart on {} with {} days",
                    kind,
                    identifier,
                    days.len()
                );
                self.charts.insert(identifier.to_string(), handle);
                self.charts.get(identifier)
            }
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    /// Replace the data of the live chart on `identifier` and redraw it.
    ///
    /// Returns `false` (with a warning) if there is no such chart.
    pub fn update_chart(&mut self, identifier: &str, data: &ChartData) -> bool {
        match self.charts.get_mut(identifier) {
            Some(handle) => {
                handle.update(data);
                true
            }
            None => {
                warn!("Chart {} not found", identifier);
                false
            }
        }
    }

    /// Destroy the chart on `identifier`. Returns `false` if there was none.
    pub fn destroy_chart(&mut self, identifier: &str) -> bool {
        match self.charts.remove(identifier) {
            Some(handle) => {
                handle.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every live chart. Returns how many were destroyed.
    pub fn destroy_all_charts(&mut self) -> usize {
        let count = self.charts.len();
        for (_, handle) in self.charts.drain() {
            handle.destroy();
        }
        count
    }

    /// The live chart on `identifier`, if any.
    pub fn chart(&self, identifier: &str) -> Option<&E::Handle> {
        self.charts.get(identifier)
    }

    /// Whether a chart is currently drawn on `identifier`.
    pub fn is_live(&self, identifier: &str) -> bool {
        self.charts.contains_key(identifier)
    }

    /// Number of live charts.
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Whether no charts are live.
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Identifiers of all live charts, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.charts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
