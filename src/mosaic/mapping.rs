//! Brightness to palette symbol mapping.

/// Bucket a brightness value into one of `levels` palette positions.
///
/// Computes `floor(brightness * (levels - 1) / 255)`, so 0 always maps to
/// the first entry and 255 to the last. A `levels` of zero is treated as a
/// single-entry palette.
#[inline]
pub fn symbol_index(brightness: u8, levels: usize) -> usize {
    let last = levels.max(1) - 1;
    ((brightness as usize * last) / 255).min(last)
}

/// Map brightness values to palette symbols.
///
/// Lower brightness maps to earlier (darker) symbols, higher brightness to
/// later (lighter) symbols.
///
/// # Arguments
/// * `brightness` - Brightness values (0-255), one per grid cell
/// * `symbols` - Palette ordered from darkest to lightest
/// * `invert` - If true, invert brightness before mapping
///
/// # Returns
/// One symbol per input value, or an empty vector if the palette is empty.
pub fn map_to_symbols<'a>(brightness: &[u8], symbols: &[&'a str], invert: bool) -> Vec<&'a str> {
    if symbols.is_empty() {
        return Vec::new();
    }

    let levels = symbols.len();
    brightness
        .iter()
        .map(|&b| {
            let b = if invert { 255 - b } else { b };
            symbols[symbol_index(b, levels)]
        })
        .collect()
}
