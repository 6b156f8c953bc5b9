//! Area-average downsampling from pixels to a mosaic grid.

use image::GrayImage;

/// Pixel span `[start, end)` covered by cell `index` when `len` pixels are
/// divided into `cells` cells. Always covers at least one pixel, so grids
/// larger than the image repeat source pixels instead of going dark.
fn cell_span(index: u32, cells: u32, len: u32) -> (u32, u32) {
    let size = len as f32 / cells as f32;
    let start = ((index as f32 * size) as u32).min(len - 1);
    let end = (((index + 1) as f32 * size) as u32).clamp(start + 1, len);
    (start, end)
}

/// Downsample a luminance image to a grid of brightness values.
///
/// Each grid cell is the average brightness of all pixels inside that
/// cell's area of the source image.
///
/// # Arguments
/// * `gray` - Luminance image
/// * `grid_width` - Desired output width in cells
/// * `grid_height` - Desired output height in cells
///
/// # Returns
/// Brightness values (0-255) in row-major order, `grid_width * grid_height`
/// long. Empty if either the grid or the image has a zero dimension.
pub fn downsample(gray: &GrayImage, grid_width: u32, grid_height: u32) -> Vec<u8> {
    let (img_width, img_height) = gray.dimensions();
    if grid_width == 0 || grid_height == 0 || img_width == 0 || img_height == 0 {
        return Vec::new();
    }

    let pixels = gray.as_raw();
    let mut result = Vec::with_capacity((grid_width as usize) * (grid_height as usize));

    for cy in 0..grid_height {
        let (start_y, end_y) = cell_span(cy, grid_height, img_height);
        for cx in 0..grid_width {
            let (start_x, end_x) = cell_span(cx, grid_width, img_width);

            let mut sum = 0u64;
            let mut count = 0u64;
            for py in start_y..end_y {
                let row = (py * img_width) as usize;
                for px in start_x..end_x {
                    sum += pixels[row + px as usize] as u64;
                    count += 1;
                }
            }

            result.push((sum / count.max(1)) as u8);
        }
    }

    result
}
