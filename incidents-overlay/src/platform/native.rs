//! Native [`PlatformService`](super::PlatformService) backed by `reqwest` and the `image` crate.

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, info};

use crate::decoded_image::DecodedImage;
use crate::error::IncidentsError;
use crate::platform::PlatformService;

/// Loads resources over HTTP with `reqwest`, or from the file system for urls without an HTTP
/// scheme (relative icon paths like `icons/non-fire.png`).
#[derive(Debug, Clone)]
pub struct NativePlatformService {
    http_client: reqwest::Client,
}

impl NativePlatformService {
    /// Creates a new service.
    pub fn new() -> Result<Self, IncidentsError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("incidents-overlay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client })
    }

    async fn load_from_web(&self, url: &str) -> Result<Bytes, IncidentsError> {
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            info!(
                "Failed to load {url}: {}, {:?}",
                response.status(),
                response.text().await
            );
            return Err(IncidentsError::IO);
        }

        Ok(response.bytes().await?)
    }

    async fn load_from_file(&self, url: &str) -> Result<Bytes, IncidentsError> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        debug!("Reading {path}");
        Ok(Bytes::from(tokio::fs::read(path).await?))
    }
}

fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[async_trait]
impl PlatformService for NativePlatformService {
    async fn load_image_url(&self, url: &str) -> Result<DecodedImage, IncidentsError> {
        let bytes = self.load_bytes_from_url(url).await?;
        DecodedImage::decode(&bytes)
    }

    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, IncidentsError> {
        if is_web_url(url) {
            self.load_from_web(url).await
        } else {
            self.load_from_file(url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn detects_web_urls() {
        assert!(is_web_url("https://www.beyondtracks.com/contrib/a.geojson"));
        assert!(is_web_url("http://localhost:8000/icons/non-fire.png"));
        assert!(!is_web_url("icons/non-fire.png"));
        assert!(!is_web_url("file:///tmp/non-fire.png"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let service = NativePlatformService::new().unwrap();
        let result = tokio_test::block_on(
            service.load_bytes_from_url("file:///definitely/not/here/non-fire.png"),
        );
        assert_matches!(result, Err(IncidentsError::FsIo(_)));
    }
}
