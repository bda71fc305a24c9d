//! Counting monsters (red dots) on the minimap.

use crate::hsv::{mask_in_ranges, red_ranges};
use homeward_core::{Rect, Size};
use image::RgbImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};
use tracing::debug;

/// Minimap location at the reference resolution.
pub const DEFAULT_MINIMAP: Rect = Rect::new(640, 20, 140, 140);

/// Blobs whose outline encloses an area outside this range (exclusive) are
/// noise or terrain.
const MIN_DOT_AREA: f64 = 3.0;
const MAX_DOT_AREA: f64 = 100.0;

/// Number of red dots inside `roi` (frame coordinates, clipped to the image).
pub fn count_red_dots(image: &RgbImage, roi: Rect) -> usize {
    let roi = roi.clip_to(Size::new(image.width() as i32, image.height() as i32));
    if roi.is_empty() {
        return 0;
    }

    let mask = mask_in_ranges(image, roi, &red_ranges(70, 50));
    let mask = erode(&mask, Norm::LInf, 1);
    let mask = dilate(&mask, Norm::LInf, 2);

    let blobs: Vec<Contour<i32>> = find_contours(&mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .collect();

    let dots = blobs
        .iter()
        .map(contour_area)
        .filter(|&area| area > MIN_DOT_AREA && area < MAX_DOT_AREA)
        .count();
    debug!(blobs = blobs.len(), dots, "Minimap scan");
    dots
}

/// Polygon area enclosed by the border pixel centers (shoelace formula).
///
/// A filled `w x h` block measures `(w - 1) * (h - 1)`.
fn contour_area(contour: &Contour<i32>) -> f64 {
    let points = &contour.points;
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    (twice.abs() as f64) / 2.0
}
