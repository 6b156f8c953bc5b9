//! Mosaic text rendering with a transport size limit.

use super::mapping::map_to_symbols;
use super::sample::BrightnessGrid;
use super::MosaicError;

/// Row terminator appended after every mosaic row.
pub const ROW_TERMINATOR: char = '\n';

/// Length of `text` in UTF-16 code units, the unit Telegram counts
/// message length in.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Shortest possible rendered length of a `width x height` grid.
///
/// Every cell is counted at the narrowest symbol of the palette. A grid
/// whose minimum already exceeds the limit can never fit, whatever the image.
pub fn min_rendered_len(width: u32, height: u32, symbols: &[&str]) -> usize {
    let narrowest = symbols.iter().map(|s| utf16_len(s)).min().unwrap_or(0);
    (height as usize) * ((width as usize) * narrowest + ROW_TERMINATOR.len_utf16())
}

/// Render a brightness grid as text, one palette symbol per cell.
///
/// Returns [`MosaicError::SizeExceeded`] instead of truncating when the
/// rendered text is longer than `max_len` UTF-16 units.
pub fn render(
    grid: &BrightnessGrid,
    symbols: &[&str],
    invert: bool,
    max_len: usize,
) -> Result<String, MosaicError> {
    if symbols.is_empty() {
        return Err(MosaicError::EmptyPalette);
    }

    let mut text = String::with_capacity(min_rendered_len(grid.width, grid.height, symbols));
    for row in grid.rows() {
        for symbol in map_to_symbols(row, symbols, invert) {
            text.push_str(symbol);
        }
        text.push(ROW_TERMINATOR);
    }

    let length = utf16_len(&text);
    if length > max_len {
        return Err(MosaicError::SizeExceeded {
            length,
            limit: max_len,
        });
    }

    Ok(text)
}
