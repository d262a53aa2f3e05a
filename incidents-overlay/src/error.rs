//! Error types used by the crate.

use image::ImageError;
use thiserror::Error;

/// Overlay error type.
#[derive(Debug, Error)]
pub enum IncidentsError {
    /// I/O error (network or file).
    #[error("failed to load data")]
    IO,
    /// Loading of an icon image failed. Symbol layers are not registered in this case.
    #[error("failed to load icon {url}: {reason}")]
    IconLoad {
        /// Url of the icon.
        url: String,
        /// Description of the underlying failure.
        reason: String,
    },
    /// Image decoding error.
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] ImageError),
    /// The incident feed is not a valid GeoJSON document.
    #[error("invalid incident feed: {0}")]
    Feed(#[from] geojson::Error),
    /// Overlay options are not valid JSON.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
    /// The popup template could not be rendered.
    #[error("failed to render popup template: {0}")]
    Template(String),
    /// Source, layer or image with the given id is already registered in the map.
    #[error("{0} is already registered")]
    AlreadyExists(String),
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
    /// Error reading data from the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

impl From<reqwest::Error> for IncidentsError {
    fn from(_value: reqwest::Error) -> Self {
        Self::IO
    }
}

impl From<strfmt::FmtError> for IncidentsError {
    fn from(value: strfmt::FmtError) -> Self {
        Self::Template(value.to_string())
    }
}
