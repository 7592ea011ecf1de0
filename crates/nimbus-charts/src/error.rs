//! Error types for nimbus-charts.

/// Result type for nimbus-charts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while drawing charts.
///
/// The presenter reports these through `tracing` and never returns them to
/// its callers; they surface only from [`RenderEngine`](crate::RenderEngine)
/// implementations and JSON rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The render engine rejected the configuration.
    #[error("Failed to render chart {identifier}: {reason}")]
    Render { identifier: String, reason: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::Render`].
    pub fn render(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Render {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}
