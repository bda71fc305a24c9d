//! HP bar fill estimation.

use crate::hsv::{mask_in_ranges, red_ranges};
use homeward_core::{Rect, Size};
use image::RgbImage;
use tracing::debug;

/// A column is part of the bar when it has more red pixels than this.
const MIN_RED_PER_COLUMN: usize = 2;

/// Percentage of the bar filled with red, 0..=100.
///
/// The bar is measured as the longest run of red columns, so stray red
/// pixels elsewhere in the ROI do not inflate the reading. `roi` is in
/// frame coordinates and is clipped to the image.
pub fn hp_bar_percent(image: &RgbImage, roi: Rect) -> u8 {
    let roi = roi.clip_to(Size::new(image.width() as i32, image.height() as i32));
    if roi.is_empty() {
        return 0;
    }

    let mask = mask_in_ranges(image, roi, &red_ranges(50, 20));
    debug!(
        red_pixels = mask.pixels().filter(|p| p[0] > 0).count(),
        "HP bar mask"
    );

    let mut longest = 0u32;
    let mut current = 0u32;
    for x in 0..mask.width() {
        let red = (0..mask.height())
            .filter(|&y| mask.get_pixel(x, y)[0] > 0)
            .count();
        if red > MIN_RED_PER_COLUMN {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    let percent = (longest as f64 / mask.width() as f64 * 100.0) as i32;
    percent.clamp(0, 100) as u8
}
