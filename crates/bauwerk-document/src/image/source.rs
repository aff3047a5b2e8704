// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source image: decode the uploaded photo, validate it, and encode annotated
// results for download. Uses the `image` crate.

use bauwerk_core::error::BauwerkError;
use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::{debug, info, instrument};

/// A decoded, non-empty photo of the building.
///
/// The wrapped image is never modified; annotation always works on a copy
/// obtained from [`SourceImage::to_rgb`].
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, BauwerkError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            BauwerkError::InvalidImage(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Self::from_dynamic(img)
    }

    /// Decode raw encoded bytes (JPEG, PNG).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BauwerkError> {
        let img = image::load_from_memory(data).map_err(|err| {
            BauwerkError::InvalidImage(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Self::from_dynamic(img)
    }

    /// Wrap an already-decoded `DynamicImage`, rejecting empty ones.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, BauwerkError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(BauwerkError::InvalidImage(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// A fresh 3-channel copy of the pixels, ready to draw on.
    pub fn to_rgb(&self) -> RgbImage {
        self.image.to_rgb8()
    }
}

// -- Encoding -----------------------------------------------------------------

/// Encode an RGB image as JPEG bytes with the given quality (1-100).
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, BauwerkError> {
    let mut buffer = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    image
        .write_with_encoder(encoder)
        .map_err(|err| BauwerkError::ImageError(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode an RGB image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, BauwerkError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| BauwerkError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}
