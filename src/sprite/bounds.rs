use image::{Rgba, RgbaImage};

use super::Rect;

/// A pixel is content unless it is fully transparent or exactly the key color.
pub fn is_visible(pixel: &Rgba<u8>, transparent_key: [u8; 3]) -> bool {
    pixel[3] > 0 && pixel.0[..3] != transparent_key
}

/// Bounding box of the visible pixels of a frame, `None` when there are none
pub fn content_bounds(image: &RgbaImage, transparent_key: [u8; 3]) -> Option<Rect> {
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if is_visible(pixel, transparent_key) {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
