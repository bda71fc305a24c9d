//! HSV thresholding with 8-bit OpenCV conventions.
//!
//! Hue is halved to fit a byte (0..=180), saturation and value span 0..=255.
//! Red wraps around hue 0, so red masks are built from two ranges.

use homeward_core::Rect;
use image::{GrayImage, Luma, Rgb, RgbImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn from_rgb(Rgb([r, g, b]): Rgb<u8>) -> Self {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

        let mut h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        if h < 0.0 {
            h += 360.0;
        }

        Self {
            h: (h / 2.0).round() as u8,
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// Inclusive HSV bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: (u8, u8, u8), upper: (u8, u8, u8)) -> Self {
        Self {
            lower: Hsv {
                h: lower.0,
                s: lower.1,
                v: lower.2,
            },
            upper: Hsv {
                h: upper.0,
                s: upper.1,
                v: upper.2,
            },
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&hsv.h)
            && (self.lower.s..=self.upper.s).contains(&hsv.s)
            && (self.lower.v..=self.upper.v).contains(&hsv.v)
    }
}

/// Both red hue bands with the given minimum saturation and value.
pub const fn red_ranges(min_s: u8, min_v: u8) -> [HsvRange; 2] {
    [
        HsvRange::new((0, min_s, min_v), (10, 255, 255)),
        HsvRange::new((160, min_s, min_v), (180, 255, 255)),
    ]
}

/// Binary mask (255 = match) of `roi`, which must lie inside `image`.
pub fn mask_in_ranges(image: &RgbImage, roi: Rect, ranges: &[HsvRange]) -> GrayImage {
    let (x0, y0) = (roi.x.max(0) as u32, roi.y.max(0) as u32);
    GrayImage::from_fn(roi.width.max(0) as u32, roi.height.max(0) as u32, |x, y| {
        let hsv = Hsv::from_rgb(*image.get_pixel(x0 + x, y0 + y));
        if ranges.iter().any(|r| r.contains(hsv)) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(Hsv::from_rgb(Rgb([255, 0, 0])), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb(Rgb([0, 255, 0])), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb(Rgb([0, 0, 255])), Hsv { h: 120, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb(Rgb([0, 0, 0])), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(Hsv::from_rgb(Rgb([128, 128, 128])), Hsv { h: 0, s: 0, v: 128 });
    }

    #[test]
    fn test_red_bands() {
        let [low, high] = red_ranges(50, 20);
        // Dark red still counts.
        assert!(low.contains(Hsv::from_rgb(Rgb([90, 10, 10]))));
        // Magenta-ish red sits in the upper band (hue ~170).
        assert!(high.contains(Hsv::from_rgb(Rgb([200, 0, 40]))));
        assert!(!low.contains(Hsv::from_rgb(Rgb([128, 128, 128]))));
        assert!(!high.contains(Hsv::from_rgb(Rgb([0, 200, 0]))));
    }

    #[test]
    fn test_mask_in_ranges() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        image.put_pixel(2, 1, Rgb([255, 0, 0]));
        let mask = mask_in_ranges(&image, Rect::new(1, 1, 2, 2), &red_ranges(50, 20));
        assert_eq!(mask.dimensions(), (2, 2));
        assert_eq!(mask.get_pixel(1, 0), &Luma([255]));
        assert_eq!(mask.get_pixel(0, 0), &Luma([0]));
    }
}
