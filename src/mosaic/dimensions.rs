//! Grid dimension calculation for aspect-preserving mosaics.

/// Aspect ratio (height / width) of one emoji symbol.
/// Emoji glyphs render roughly square in chat clients.
pub const SYMBOL_ASPECT_RATIO: f32 = 1.0;

/// Fit a grid inside `max_width x max_height` cells while keeping the
/// image's aspect ratio.
///
/// Tries the full width first and falls back to the full height when the
/// width-constrained grid would be too tall. Returns at least 1x1 for
/// non-empty inputs and `(0, 0)` if any input dimension is zero.
///
/// # Example
/// ```ignore
/// // A 2:1 landscape photo in a 30x30 grid keeps its shape.
/// assert_eq!(fit_grid(200, 100, 30, 30), (30, 15));
/// ```
pub fn fit_grid(img_width: u32, img_height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    fit_grid_with_aspect(img_width, img_height, max_width, max_height, SYMBOL_ASPECT_RATIO)
}

/// Same as [`fit_grid`] with a custom symbol aspect ratio (height / width).
pub fn fit_grid_with_aspect(
    img_width: u32,
    img_height: u32,
    max_width: u32,
    max_height: u32,
    symbol_aspect: f32,
) -> (u32, u32) {
    if img_width == 0 || img_height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }

    // Symbols `symbol_aspect` times taller than wide need that many fewer rows.
    let target_aspect = (img_width as f32 / img_height as f32) * symbol_aspect;

    let width = max_width;
    let height = ((width as f32 / target_aspect).round() as u32).max(1);

    if height <= max_height {
        (width, height)
    } else {
        let height = max_height;
        let width = ((height as f32 * target_aspect).round() as u32).min(max_width);
        (width.max(1), height.max(1))
    }
}
