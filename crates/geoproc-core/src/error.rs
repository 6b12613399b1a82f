//! Error types for geoproc

use crate::models::Operation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoprocError {
    // Engine errors
    #[error("Geometry engine is not available: {reason}")]
    EngineUnavailable { reason: String },

    // Input envelope errors
    #[error("Empty FeatureCollection")]
    EmptyFeatureCollection,

    #[error("Feature has no geometry")]
    FeatureWithoutGeometry,

    #[error("FeatureCollection contains no geometry")]
    NoGeometry,

    #[error("Invalid GeoJSON: {reason}")]
    InvalidGeoJson { reason: String },

    #[error("Cannot convert geometry: {reason}")]
    Conversion { reason: String },

    // Geometry errors
    #[error("Invalid input geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("{} failed: {reason}", .operation.failure_label())]
    OperationFailed { operation: Operation, reason: String },

    // Dispatch errors
    #[error("Unknown operation: {name}. Available: {available:?}")]
    UnknownOperation { name: String, available: Vec<String> },

    #[error("Invalid parameter {key}: {reason}")]
    InvalidParameter { key: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

impl GeoprocError {
    /// Whether the error was caused by the caller's payload rather than the
    /// engine or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GeoprocError::EmptyFeatureCollection
                | GeoprocError::FeatureWithoutGeometry
                | GeoprocError::NoGeometry
                | GeoprocError::InvalidGeoJson { .. }
                | GeoprocError::Conversion { .. }
                | GeoprocError::UnknownOperation { .. }
                | GeoprocError::InvalidParameter { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeoprocError>;
