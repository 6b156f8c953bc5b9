//! Pixel sampling: raw image bytes to a fixed-size brightness grid.

use image::DynamicImage;

use super::dimensions::fit_grid;
use super::downsample::downsample;
use super::grayscale::to_luma;
use super::MosaicError;

/// Brightness samples laid out row-major, `width * height` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessGrid {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<u8>,
}

impl BrightnessGrid {
    /// Iterate over the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks(self.width.max(1) as usize)
    }
}

/// Decode raw image bytes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, MosaicError> {
    image::load_from_memory(bytes).map_err(MosaicError::Decode)
}

/// Sample an already-decoded image into exactly `width x height` cells.
pub fn sample_image(img: &DynamicImage, width: u32, height: u32) -> Result<BrightnessGrid, MosaicError> {
    if width == 0 || height == 0 {
        return Err(MosaicError::EmptyGrid { width, height });
    }

    let luma = to_luma(img);
    let samples = downsample(&luma, width, height);
    if samples.len() != (width as usize) * (height as usize) {
        // Only reachable for a zero-sized decoded image.
        return Err(MosaicError::EmptyGrid {
            width: luma.width(),
            height: luma.height(),
        });
    }

    Ok(BrightnessGrid {
        width,
        height,
        samples,
    })
}

/// Decode `bytes` and sample it into exactly `width x height` cells.
///
/// The image is stretched to the grid; its aspect ratio is not kept.
pub fn sample_brightness(bytes: &[u8], width: u32, height: u32) -> Result<BrightnessGrid, MosaicError> {
    let img = decode(bytes)?;
    sample_image(&img, width, height)
}

/// Decode `bytes` and sample it into the largest grid that fits inside
/// `max_width x max_height` while keeping the image's aspect ratio.
pub fn sample_brightness_fitted(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
) -> Result<BrightnessGrid, MosaicError> {
    let img = decode(bytes)?;
    let (width, height) = fit_grid(img.width(), img.height(), max_width, max_height);
    sample_image(&img, width, height)
}
