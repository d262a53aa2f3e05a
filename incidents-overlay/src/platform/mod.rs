//! Provides platform specific logic and [`PlatformService`] to access it.

use async_trait::async_trait;
use bytes::Bytes;

use crate::decoded_image::DecodedImage;
use crate::error::IncidentsError;

pub mod native;

/// Service providing resource loading in a generic way.
///
/// The overlay loads its icons through this trait, so hosts can plug in their own transport (or a
/// fixture in tests).
#[async_trait]
pub trait PlatformService {
    /// Loads and decodes an image from the given url.
    async fn load_image_url(&self, url: &str) -> Result<DecodedImage, IncidentsError>;
    /// Loads a byte array from the given url.
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, IncidentsError>;
}

/// Default implementation of the [`PlatformService`] for the current platform.
pub type PlatformServiceImpl = native::NativePlatformService;
