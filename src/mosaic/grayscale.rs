//! Decoded image to luminance conversion using the ITU-R BT.601 formula.

use image::{DynamicImage, GrayImage};

/// Convert an RGB triplet to luminance.
///
/// The luminance formula is: Y = 0.299*R + 0.587*G + 0.114*B, using integer
/// math with coefficients scaled by 1000 (299 + 587 + 114 = 1000).
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Convert a decoded image to a single-channel luminance image.
///
/// The alpha channel, if any, is discarded first, so transparent pixels
/// contribute their stored colour as if fully opaque.
pub fn to_luma(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let data = rgb
        .pixels()
        .map(|p| luminance(p[0], p[1], p[2]))
        .collect::<Vec<u8>>();

    // Length is width * height by construction of `data`.
    GrayImage::from_raw(width, height, data).unwrap_or_else(|| GrayImage::new(width, height))
}
