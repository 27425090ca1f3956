//! Error types for series validation, viewport updates and compositor setup.

use specline_render::GraphicsError;
use std::fmt;

/// A series that cannot be decimated.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// `xs` and `ys` have different lengths.
    LengthMismatch { xs: usize, ys: usize },
    /// The series has no samples.
    Empty,
    /// A sample at `index` is NaN or infinite.
    NonFinite { index: usize },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::LengthMismatch { xs, ys } => {
                write!(f, "x/y length mismatch: {} x values, {} y values", xs, ys)
            }
            SeriesError::Empty => write!(f, "series has no samples"),
            SeriesError::NonFinite { index } => {
                write!(f, "non-finite sample at index {}", index)
            }
        }
    }
}

impl std::error::Error for SeriesError {}

/// A rejected viewport update. The previous window stays in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportError {
    /// A bound is NaN or infinite.
    NonFinite,
    /// `min >= max`.
    Inverted { min: f64, max: f64 },
    /// The window leaves the full data range.
    OutOfBounds { min: f64, max: f64 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportError::NonFinite => write!(f, "viewport bound is not finite"),
            ViewportError::Inverted { min, max } => {
                write!(f, "viewport is inverted or empty: [{}, {}]", min, max)
            }
            ViewportError::OutOfBounds { min, max } => {
                write!(f, "viewport [{}, {}] lies outside the data range", min, max)
            }
        }
    }
}

impl std::error::Error for ViewportError {}

/// Compositor construction and surface errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The GPU backend is missing a capability the line pipeline needs.
    CapabilityUnavailable(String),
    /// A surface with no drawable area.
    InvalidSurface { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::CapabilityUnavailable(msg) => {
                write!(f, "GPU capability unavailable: {}", msg)
            }
            RenderError::InvalidSurface { width, height } => {
                write!(f, "invalid surface size {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl From<GraphicsError> for RenderError {
    fn from(err: GraphicsError) -> Self {
        RenderError::CapabilityUnavailable(err.to_string())
    }
}
