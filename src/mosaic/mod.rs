//! Image to emoji mosaic conversion.
//!
//! The pipeline turns uploaded image bytes into a block of text that a chat
//! client can display:
//!
//! 1. **Decoding** - any raster format the `image` crate is built with
//! 2. **Grayscale conversion** - alpha dropped, RGB to luminance using BT.601
//! 3. **Downsampling** - area average down (or up) to a fixed grid
//! 4. **Symbol mapping** - bucket brightness into a [`Palette`]
//! 5. **Rendering** - rows joined with newlines, checked against the
//!    transport's message size limit

mod dimensions;
mod downsample;
mod grayscale;
mod mapping;
mod palette;
mod render;
mod sample;

pub use dimensions::{fit_grid, fit_grid_with_aspect, SYMBOL_ASPECT_RATIO};
pub use downsample::downsample;
pub use grayscale::{luminance, to_luma};
pub use mapping::{map_to_symbols, symbol_index};
pub use palette::{Palette, ASCII_PALETTE, BLOCKS_PALETTE, CIRCLES_PALETTE, SQUARES_PALETTE};
pub use render::{min_rendered_len, render, utf16_len, ROW_TERMINATOR};
pub use sample::{decode, sample_brightness, sample_brightness_fitted, sample_image, BrightnessGrid};

use serde::Deserialize;

/// Telegram's maximum text message length, in UTF-16 code units.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// Default mosaic grid width in symbols.
pub const DEFAULT_GRID_WIDTH: u32 = 30;

/// Default mosaic grid height in symbols.
pub const DEFAULT_GRID_HEIGHT: u32 = 30;

/// Errors produced while turning an image into a mosaic.
#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Mosaic of {length} characters exceeds the {limit} character limit")]
    SizeExceeded {
        /// Rendered length in UTF-16 code units, or its lower bound when the
        /// grid was rejected before decoding
        length: usize,
        /// Configured maximum message length
        limit: usize,
    },

    #[error("Grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Palette has no symbols")]
    EmptyPalette,
}

/// Settings for the mosaic pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MosaicSettings {
    /// Grid width in symbols
    pub width: u32,
    /// Grid height in symbols
    pub height: u32,
    pub palette: Palette,
    /// Invert brightness (for light chat themes)
    pub invert: bool,
    /// Fit the grid to the image's aspect ratio instead of stretching
    pub preserve_aspect: bool,
    /// Largest message the transport accepts, in UTF-16 code units
    pub max_message_len: usize,
}

impl Default for MosaicSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            palette: Palette::default(),
            invert: false,
            preserve_aspect: false,
            max_message_len: TELEGRAM_MAX_MESSAGE_LEN,
        }
    }
}

/// Runs sampling, mapping and rendering with fixed settings.
///
/// Stateless: running it twice on the same bytes yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MosaicPipeline {
    settings: MosaicSettings,
}

impl MosaicPipeline {
    pub fn new(settings: MosaicSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MosaicSettings {
        &self.settings
    }

    /// Sample the image bytes into a brightness grid.
    pub fn sample(&self, bytes: &[u8]) -> Result<BrightnessGrid, MosaicError> {
        let s = &self.settings;
        if s.preserve_aspect {
            sample_brightness_fitted(bytes, s.width, s.height)
        } else {
            sample_brightness(bytes, s.width, s.height)
        }
    }

    /// Convert image bytes into mosaic text.
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::Decode` for unreadable images and
    /// `MosaicError::SizeExceeded` when the rendered text does not fit in
    /// one message.
    pub fn run(&self, bytes: &[u8]) -> Result<String, MosaicError> {
        let s = &self.settings;
        // Grids that cannot fit even with the narrowest symbol skip the decode.
        let shortest = min_rendered_len(s.width, s.height, s.palette.symbols());
        if shortest > s.max_message_len {
            return Err(MosaicError::SizeExceeded {
                length: shortest,
                limit: s.max_message_len,
            });
        }

        let grid = self.sample(bytes)?;
        log::debug!(
            "Sampled {}x{} grid with {} palette",
            grid.width,
            grid.height,
            s.palette
        );
        render(&grid, s.palette.symbols(), s.invert, s.max_message_len)
    }
}
