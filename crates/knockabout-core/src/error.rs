//! Error types for session configuration.

use std::fmt;

/// Result type for sandbox setup.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A settings value that violates the sandbox's configuration contract.
///
/// Raised once by [`crate::SandboxSettings::validate`]; the per-frame math
/// never produces errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A speed, step or distance that must be finite and non-negative.
    InvalidValue {
        /// The setting that was rejected.
        field: &'static str,
        /// The offending value.
        value: f32,
    },
    /// A value that must be strictly positive.
    NotPositive {
        /// The setting that was rejected.
        field: &'static str,
        /// The offending value.
        value: f32,
    },
    /// Minimum zoom distance exceeds the maximum.
    ZoomRange {
        /// Configured minimum distance.
        min: f32,
        /// Configured maximum distance.
        max: f32,
    },
    /// Initial camera distance lies outside the zoom range.
    InitialDistance {
        /// Configured starting distance.
        distance: f32,
        /// Configured minimum distance.
        min: f32,
        /// Configured maximum distance, if bounded.
        max: Option<f32>,
    },
    /// Pitch bounds are inverted or exceed straight up/down.
    PitchRange {
        /// Lower pitch bound in degrees.
        min: f32,
        /// Upper pitch bound in degrees.
        max: f32,
    },
    /// Initial pitch lies outside the pitch bounds.
    InitialPitch {
        /// Configured starting pitch in degrees.
        pitch: f32,
        /// Lower pitch bound in degrees.
        min: f32,
        /// Upper pitch bound in degrees.
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            ConfigError::ZoomRange { min, max } => {
                write!(f, "minimum zoom distance {min} exceeds maximum {max}")
            }
            ConfigError::InitialDistance { distance, min, max } => match max {
                Some(max) => write!(
                    f,
                    "initial camera distance {distance} is outside zoom range {min}..={max}"
                ),
                None => write!(
                    f,
                    "initial camera distance {distance} is below minimum zoom distance {min}"
                ),
            },
            ConfigError::PitchRange { min, max } => {
                write!(f, "pitch bounds {min}..={max} must be ordered and within -90..=90")
            }
            ConfigError::InitialPitch { pitch, min, max } => {
                write!(f, "initial pitch {pitch} is outside pitch bounds {min}..={max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
