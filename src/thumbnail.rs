//! Image downscaling to a small fixed-size PNG.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use serde::Deserialize;

/// Default thumbnail width in pixels.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 64;

/// Default thumbnail height in pixels.
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 64;

/// File name used when sending thumbnails.
pub const THUMBNAIL_FILE_NAME: &str = "emoji.png";

/// MIME type of encoded thumbnails.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/png";

/// Errors that can occur while producing a thumbnail.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Could not encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Thumbnail dimensions must be non-zero, got {width}x{height}")]
    EmptySize { width: u32, height: u32 },
}

/// Target thumbnail size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_WIDTH,
            height: DEFAULT_THUMBNAIL_HEIGHT,
        }
    }
}

/// Decode `bytes`, resize to exactly `width x height` with Lanczos3 and
/// encode the result as PNG.
///
/// The input is normalised to RGBA8 first, so the output has the same
/// layout whatever the source colour mode. Aspect ratio is not kept.
pub fn downscale(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ThumbnailError> {
    if width == 0 || height == 0 {
        return Err(ThumbnailError::EmptySize { width, height });
    }

    let img = image::load_from_memory(bytes).map_err(ThumbnailError::Decode)?;
    let rgba = img.to_rgba8();
    let resized = image::imageops::resize(&rgba, width, height, FilterType::Lanczos3);

    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(resized)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(ThumbnailError::Encode)?;

    log::debug!("Encoded {}x{} thumbnail ({} bytes)", width, height, buf.len());
    Ok(buf)
}

/// [`downscale`] with the sizes from `settings`.
pub fn downscale_with(bytes: &[u8], settings: &ThumbnailSettings) -> Result<Vec<u8>, ThumbnailError> {
    downscale(bytes, settings.width, settings.height)
}
