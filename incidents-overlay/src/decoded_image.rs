//! This module contains utilities for loading icon images to be registered in the map.

use crate::error::IncidentsError;

/// An image that has been loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Raw bytes of the image, in RGBA order.
    pub(crate) bytes: Vec<u8>,
    /// Width and height of the image.
    pub(crate) dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decode an image from a byte slice.
    ///
    /// Attempts to guess the format of the image from the data. Non-RGBA images
    /// will be converted to RGBA.
    pub fn decode(bytes: &[u8]) -> Result<Self, IncidentsError> {
        use image::GenericImageView;
        let decoded = image::load_from_memory(bytes)?;
        let bytes = decoded.to_rgba8();
        let dimensions = decoded.dimensions();

        Ok(Self {
            bytes: bytes.into_vec(),
            dimensions,
        })
    }

    /// Creates an image from raw RGBA bytes.
    ///
    /// Returns an error if the byte count does not match the dimensions.
    pub fn from_raw(bytes: Vec<u8>, dimensions: (u32, u32)) -> Result<Self, IncidentsError> {
        if bytes.len() != dimensions.0 as usize * dimensions.1 as usize * 4 {
            return Err(IncidentsError::Generic(format!(
                "expected {}x{} RGBA image, got {} bytes",
                dimensions.0,
                dimensions.1,
                bytes.len()
            )));
        }

        Ok(Self { bytes, dimensions })
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    /// RGBA pixel data.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn from_raw_checks_size() {
        let image = DecodedImage::from_raw(vec![0; 16], (2, 2)).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);

        assert_matches!(
            DecodedImage::from_raw(vec![0; 15], (2, 2)),
            Err(IncidentsError::Generic(_))
        );
    }

    #[test]
    fn decode_garbage_fails() {
        assert_matches!(
            DecodedImage::decode(b"not an image"),
            Err(IncidentsError::ImageDecode(_))
        );
    }
}
