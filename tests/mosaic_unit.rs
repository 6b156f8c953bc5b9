//! Tests for the image to mosaic pipeline and the thumbnail downscaler.
//!
//! These tests verify:
//! - Symbol mapping stays in range and is monotonic
//! - Sampling always yields the configured grid size
//! - Black and white images map to the palette ends
//! - Oversized grids are rejected instead of truncated
//! - Thumbnails always decode to the configured size

use std::io::Cursor;

use emoji_mosaic::mosaic::*;
use emoji_mosaic::thumbnail::{downscale, ThumbnailError};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use proptest::prelude::*;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb))),
        ImageFormat::Png,
    )
}

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let v = ((x as f32 / width as f32) * 255.0) as u8;
        Rgb([v, v, v])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

fn expected_uniform(symbol: &str, width: usize, height: usize) -> String {
    format!("{}\n", symbol.repeat(width)).repeat(height)
}

// ==================== Scenario Tests ====================

#[test]
fn test_black_image_is_all_darkest_symbol() {
    let pipeline = MosaicPipeline::default();
    let text = pipeline.run(&solid_png(64, 48, [0, 0, 0])).unwrap();
    assert_eq!(text, expected_uniform("⬛", 30, 30));
}

#[test]
fn test_white_image_is_all_lightest_symbol() {
    let pipeline = MosaicPipeline::default();
    let text = pipeline.run(&solid_png(100, 100, [255, 255, 255])).unwrap();
    assert_eq!(text, expected_uniform("⬜", 30, 30));
}

#[test]
fn test_inverted_white_image_is_darkest() {
    let pipeline = MosaicPipeline::new(MosaicSettings {
        invert: true,
        ..MosaicSettings::default()
    });
    let text = pipeline.run(&solid_png(10, 10, [255, 255, 255])).unwrap();
    assert_eq!(text, expected_uniform("⬛", 30, 30));
}

#[test]
fn test_jpeg_input_is_accepted() {
    let jpeg = encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([0, 0, 0]))),
        ImageFormat::Jpeg,
    );
    let text = MosaicPipeline::default().run(&jpeg).unwrap();
    assert_eq!(text.lines().count(), 30);
}

#[test]
fn test_transparent_pixels_are_flattened() {
    // Fully transparent but white: alpha is dropped, so it reads as white.
    let png = encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 0]))),
        ImageFormat::Png,
    );
    let text = MosaicPipeline::default().run(&png).unwrap();
    assert_eq!(text, expected_uniform("⬜", 30, 30));
}

#[test]
fn test_gradient_uses_both_palette_ends() {
    let pipeline = MosaicPipeline::new(MosaicSettings {
        palette: Palette::Ascii,
        ..MosaicSettings::default()
    });
    let text = pipeline.run(&gradient_png(300, 30)).unwrap();
    let first_row = text.lines().next().unwrap();
    assert!(first_row.starts_with('.'));
    assert!(first_row.ends_with('@') || first_row.ends_with('%'));
}

#[test]
fn test_oversized_grid_is_size_exceeded() {
    // Mid grey maps to a two-unit emoji: 60 rows of 121 units.
    let pipeline = MosaicPipeline::new(MosaicSettings {
        width: 60,
        height: 60,
        ..MosaicSettings::default()
    });
    let result = pipeline.run(&solid_png(10, 10, [128, 128, 128]));
    match result {
        Err(MosaicError::SizeExceeded { length, limit }) => {
            assert_eq!(length, 60 * 121);
            assert_eq!(limit, TELEGRAM_MAX_MESSAGE_LEN);
        }
        other => panic!("expected SizeExceeded, got {:?}", other),
    }
}

#[test]
fn test_large_black_grid_fits_when_symbols_are_narrow() {
    // "⬛" is one UTF-16 unit, so 50 rows of 51 units fit in one message.
    let pipeline = MosaicPipeline::new(MosaicSettings {
        width: 50,
        height: 50,
        ..MosaicSettings::default()
    });
    let text = pipeline.run(&solid_png(50, 50, [0, 0, 0])).unwrap();
    assert_eq!(text, expected_uniform("⬛", 50, 50));
    assert_eq!(utf16_len(&text), 2550);
}

#[test]
fn test_grid_too_large_for_any_symbol_is_rejected_before_decoding() {
    let pipeline = MosaicPipeline::new(MosaicSettings {
        width: 80,
        height: 80,
        ..MosaicSettings::default()
    });
    let result = pipeline.run(b"not even an image");
    assert!(matches!(
        result,
        Err(MosaicError::SizeExceeded { length: 6480, .. })
    ));
}

#[test]
fn test_ascii_palette_allows_larger_grid() {
    // One UTF-16 unit per symbol: 60 rows of 61 units = 3660.
    let pipeline = MosaicPipeline::new(MosaicSettings {
        width: 60,
        height: 60,
        palette: Palette::Ascii,
        ..MosaicSettings::default()
    });
    let text = pipeline.run(&solid_png(10, 10, [0, 0, 0])).unwrap();
    assert!(utf16_len(&text) <= TELEGRAM_MAX_MESSAGE_LEN);
}

#[test]
fn test_garbage_bytes_are_decode_error() {
    let result = MosaicPipeline::default().run(b"<html>not a photo</html>");
    assert!(matches!(result, Err(MosaicError::Decode(_))));
}

#[test]
fn test_truncated_png_is_decode_error() {
    let png = solid_png(50, 50, [10, 20, 30]);
    let result = MosaicPipeline::default().run(&png[..png.len() / 2]);
    assert!(matches!(result, Err(MosaicError::Decode(_))));
}

#[test]
fn test_pipeline_is_idempotent() {
    let png = gradient_png(123, 77);
    let pipeline = MosaicPipeline::default();
    assert_eq!(pipeline.run(&png).unwrap(), pipeline.run(&png).unwrap());
}

#[test]
fn test_preserve_aspect_fits_landscape() {
    let pipeline = MosaicPipeline::new(MosaicSettings {
        preserve_aspect: true,
        ..MosaicSettings::default()
    });
    let grid = pipeline.sample(&solid_png(200, 100, [0, 0, 0])).unwrap();
    assert_eq!((grid.width, grid.height), (30, 15));
}

#[test]
fn test_stretch_ignores_aspect() {
    let grid = MosaicPipeline::default()
        .sample(&solid_png(200, 100, [0, 0, 0]))
        .unwrap();
    assert_eq!((grid.width, grid.height), (30, 30));
}

#[test]
fn test_zero_grid_is_rejected() {
    let result = sample_brightness(&solid_png(4, 4, [0, 0, 0]), 0, 10);
    assert!(matches!(result, Err(MosaicError::EmptyGrid { .. })));
}

#[test]
fn test_thumbnail_rejects_garbage() {
    assert!(matches!(
        downscale(b"GIF89a but not really", 64, 64),
        Err(ThumbnailError::Decode(_))
    ));
}

// ==================== Property Tests ====================

proptest! {
    #[test]
    fn prop_symbol_index_in_range(v in any::<u8>(), levels in 1usize..64) {
        prop_assert!(symbol_index(v, levels) < levels);
    }

    #[test]
    fn prop_symbol_index_monotonic(a in any::<u8>(), b in any::<u8>(), levels in 1usize..64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(symbol_index(lo, levels) <= symbol_index(hi, levels));
    }

    #[test]
    fn prop_symbol_index_hits_ends(levels in 1usize..64) {
        prop_assert_eq!(symbol_index(0, levels), 0);
        prop_assert_eq!(symbol_index(255, levels), levels - 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_sample_has_exact_grid_size(
        img_w in 1u32..120,
        img_h in 1u32..120,
        grid_w in 1u32..48,
        grid_h in 1u32..48,
    ) {
        let png = solid_png(img_w, img_h, [120, 60, 200]);
        let grid = sample_brightness(&png, grid_w, grid_h).unwrap();
        prop_assert_eq!(grid.width, grid_w);
        prop_assert_eq!(grid.height, grid_h);
        prop_assert_eq!(grid.samples.len(), (grid_w * grid_h) as usize);
    }

    #[test]
    fn prop_thumbnail_has_exact_size(
        img_w in 1u32..200,
        img_h in 1u32..200,
        out_w in 1u32..96,
        out_h in 1u32..96,
    ) {
        let png = solid_png(img_w, img_h, [5, 150, 90]);
        let out = downscale(&png, out_w, out_h).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        prop_assert_eq!((decoded.width(), decoded.height()), (out_w, out_h));
    }

    #[test]
    fn prop_rendered_mosaic_matches_grid(grid_w in 1u32..40, grid_h in 1u32..40) {
        let pipeline = MosaicPipeline::new(MosaicSettings {
            width: grid_w,
            height: grid_h,
            ..MosaicSettings::default()
        });
        match pipeline.run(&gradient_png(80, 80)) {
            Ok(text) => {
                prop_assert_eq!(text.lines().count(), grid_h as usize);
                for line in text.lines() {
                    prop_assert_eq!(line.chars().count(), grid_w as usize);
                    for symbol in line.chars() {
                        let s = symbol.to_string();
                        prop_assert!(SQUARES_PALETTE.contains(&s.as_str()));
                    }
                }
            }
            Err(MosaicError::SizeExceeded { length, limit }) => {
                prop_assert!(length > limit);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
