//! Error types for table setup.
//!
//! Only construction can fail. Once a table is running, bad per-body state
//! is isolated inside the tick and never surfaces as an error.

use std::fmt;

/// Errors that can occur while loading or validating a table layout.
#[derive(Debug)]
pub enum ConfigError {
    /// Layout JSON could not be parsed or written.
    Json(serde_json::Error),
    /// Layout file could not be read.
    Io(std::io::Error),
    /// Surface width or height is not a positive finite number.
    InvalidSurface { width: f32, height: f32 },
    /// A body radius is zero, negative or not finite.
    InvalidRadius { index: usize, radius: f32 },
    /// A body does not start fully inside the surface.
    OutOfBounds { index: usize },
    /// The layout has no bodies.
    NoBodies,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Invalid table layout JSON: {}", e),
            ConfigError::Io(e) => write!(f, "Failed to read table layout: {}", e),
            ConfigError::InvalidSurface { width, height } => {
                write!(f, "Surface size must be positive, got {}x{}", width, height)
            }
            ConfigError::InvalidRadius { index, radius } => {
                write!(f, "Body {} has invalid radius {}", index, radius)
            }
            ConfigError::OutOfBounds { index } => {
                write!(f, "Body {} does not fit inside the surface", index)
            }
            ConfigError::NoBodies => write!(f, "Table layout has no bodies"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
