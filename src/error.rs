//! Error types for the theme-sizing library

use thiserror::Error;

/// Result type alias using SizingError
pub type Result<T> = std::result::Result<T, SizingError>;

/// Errors that can occur while deriving sizing defaults
#[derive(Debug, Error)]
pub enum SizingError {
    /// The rendering backend could not produce a raster or load the font
    #[error("Font metric probe failed: {0}")]
    MetricProbe(String),

    /// A measured width cannot be used to derive column sizing
    #[error("Invalid font metric: {0}")]
    InvalidMetric(String),

    /// Negative, non-finite or otherwise unusable input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Embedded theme part could not be read
    #[error("Invalid theme part: {0}")]
    Theme(String),

    /// A loadable override table failed to parse
    #[error("Invalid override table: {0}")]
    OverrideTable(#[from] serde_json::Error),
}
