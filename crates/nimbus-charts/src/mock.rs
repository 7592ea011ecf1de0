//! Mock render engine for testing.
//!
//! This module provides a render engine that records what it is asked to do
//! instead of drawing, so the presenter's handle lifecycle can be tested
//! without a browser.
//!
//! The [`MockEngine`] implements the [`RenderEngine`] trait, allowing it to be
//! used interchangeably with the real engine in generic code.
//!
//! # Features
//!
//! - **Surface registry**: Only registered identifiers resolve to a surface
//! - **Failure injection**: Make every render fail
//! - **Event log**: Every render, update and destroy is recorded in order

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::engine::{ChartHandle, RenderEngine};
use crate::error::{Error, Result};
use crate::model::{ChartConfig, ChartData};

/// Something that happened to a mock chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A chart was drawn on the surface `identifier`.
    Rendered { handle: u32, identifier: String },
    /// A chart's data was replaced.
    Updated { handle: u32 },
    /// A chart was torn down.
    Destroyed { handle: u32 },
}

/// A render engine that records events.
///
/// # Example
///
/// ```
/// use nimbus_charts::{ChartPresenter, EngineEvent, MockEngine};
///
/// let mut presenter = ChartPresenter::new(MockEngine::with_surfaces(["cv1"]));
/// presenter.create_wind_chart("cv1", &[], false);
/// presenter.destroy_chart("cv1");
///
/// assert_eq!(
///     presenter.engine().events(),
///     vec![
///         EngineEvent::Rendered { handle: 1, identifier: "cv1".into() },
///         EngineEvent::Destroyed { handle: 1 },
///     ]
/// );
/// ```
#[derive(Debug, Default)]
pub struct MockEngine {
    surfaces: HashSet<String>,
    events: Rc<RefCell<Vec<EngineEvent>>>,
    next_handle: u32,
    fail_render: bool,
}

impl MockEngine {
    /// Create an engine with no surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given surfaces registered.
    pub fn with_surfaces<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            surfaces: identifiers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Register a surface.
    pub fn add_surface(&mut self, identifier: impl Into<String>) {
        self.surfaces.insert(identifier.into());
    }

    /// Unregister a surface, as if its element had been removed from the page.
    pub fn remove_surface(&mut self, identifier: &str) {
        self.surfaces.remove(identifier);
    }

    /// Make subsequent renders fail (or succeed again).
    pub fn set_fail_render(&mut self, fail: bool) {
        self.fail_render = fail;
    }

    /// All events so far, oldest first.
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    /// Number of charts rendered and not yet destroyed.
    pub fn live_count(&self) -> usize {
        let events = self.events.borrow();
        let rendered = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Rendered { .. }))
            .count();
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Destroyed { .. }))
            .count();
        rendered - destroyed
    }
}

impl RenderEngine for MockEngine {
    type Surface = String;
    type Handle = MockHandle;

    fn surface(&self, identifier: &str) -> Option<String> {
        self.surfaces.get(identifier).cloned()
    }

    fn render(
        &mut self,
        identifier: &str,
        _surface: String,
        config: &ChartConfig,
    ) -> Result<MockHandle> {
        if self.fail_render {
            return Err(Error::render(identifier, "mock render failure"));
        }

        self.next_handle += 1;
        let id = self.next_handle;
        self.events.borrow_mut().push(EngineEvent::Rendered {
            handle: id,
            identifier: identifier.to_string(),
        });

        Ok(MockHandle {
            id,
            config: config.clone(),
            update_count: 0,
            events: Rc::clone(&self.events),
        })
    }
}

/// A chart "drawn" by [`MockEngine`].
#[derive(Debug)]
pub struct MockHandle {
    id: u32,
    config: ChartConfig,
    update_count: u32,
    events: Rc<RefCell<Vec<EngineEvent>>>,
}

impl MockHandle {
    /// Engine-assigned id, starting at 1.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The configuration as last rendered or updated.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// How many times [`ChartHandle::update`] was called.
    pub fn update_count(&self) -> u32 {
        self.update_count
    }
}

impl ChartHandle for MockHandle {
    fn update(&mut self, data: &ChartData) {
        self.config.data = data.clone();
        self.update_count += 1;
        self.events
            .borrow_mut()
            .push(EngineEvent::Updated { handle: self.id });
    }

    fn destroy(self) {
        self.events
            .borrow_mut()
            .push(EngineEvent::Destroyed { handle: self.id });
    }
}
