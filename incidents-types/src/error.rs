//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum IncidentsTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// The geometry kind cannot be shown by the overlay.
    #[error("unsupported geometry type: {0}")]
    Unsupported(String),
}
