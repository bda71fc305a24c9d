//! Screen geometry: points, sizes, rectangles and reference-resolution scaling.

use serde::{Deserialize, Serialize};

/// Resolution every configured rectangle is authored against.
pub const REFERENCE_SIZE: Size = Size {
    width: 800,
    height: 600,
};

/// A pixel or logical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// `{0,0}`, also the "position unreadable" sentinel.
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A frame resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, used as ROI and as detection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Overlap of two rectangles; empty (zero-sized) when they do not touch.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);

        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Clip to a frame of the given size.
    pub fn clip_to(&self, size: Size) -> Rect {
        self.intersect(&Rect::new(0, 0, size.width, size.height))
    }
}

/// Scale a rectangle authored at `from` onto a frame of `to`.
///
/// Each component is multiplied by the matching axis ratio and truncated.
///
/// # Panics
///
/// Panics if `from` has a zero dimension. Reference sizes are fixed
/// configuration, so a zero here is a programming error.
pub fn scale_rect(rect: Rect, from: Size, to: Size) -> Rect {
    assert_reference(from);
    let sx = to.width as f64 / from.width as f64;
    let sy = to.height as f64 / from.height as f64;
    Rect::new(
        (rect.x as f64 * sx) as i32,
        (rect.y as f64 * sy) as i32,
        (rect.width as f64 * sx) as i32,
        (rect.height as f64 * sy) as i32,
    )
}

/// Scale a click target from `from` coordinates onto a frame of `to`.
///
/// # Panics
///
/// Panics if `from` has a zero dimension.
pub fn scale_point(point: Point, from: Size, to: Size) -> Point {
    assert_reference(from);
    Point::new(
        (point.x as i64 * to.width as i64 / from.width as i64) as i32,
        (point.y as i64 * to.height as i64 / from.height as i64) as i32,
    )
}

fn assert_reference(from: Size) {
    assert!(
        from.width != 0 && from.height != 0,
        "reference size must be non-zero, got {}x{}",
        from.width,
        from.height
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scale() {
        for rect in [
            Rect::new(74, 24, 112, 10),
            Rect::new(0, 0, 800, 600),
            Rect::new(659, 155, 64, 17),
        ] {
            assert_eq!(scale_rect(rect, REFERENCE_SIZE, REFERENCE_SIZE), rect);
        }
    }

    #[test]
    fn test_scale_up_and_down() {
        let rect = Rect::new(74, 24, 112, 10);
        assert_eq!(
            scale_rect(rect, REFERENCE_SIZE, Size::new(1600, 1200)),
            Rect::new(148, 48, 224, 20)
        );
        // 1024/800 = 1.28, 768/600 = 1.28
        assert_eq!(
            scale_rect(rect, REFERENCE_SIZE, Size::new(1024, 768)),
            Rect::new(94, 30, 143, 12)
        );
        assert_eq!(
            scale_rect(rect, REFERENCE_SIZE, Size::new(400, 300)),
            Rect::new(37, 12, 56, 5)
        );
    }

    #[test]
    #[should_panic(expected = "reference size must be non-zero")]
    fn test_zero_reference_panics() {
        scale_rect(Rect::new(1, 1, 1, 1), Size::new(0, 600), REFERENCE_SIZE);
    }

    #[test]
    fn test_scale_point() {
        let p = Point::new(420, 250);
        assert_eq!(scale_point(p, REFERENCE_SIZE, REFERENCE_SIZE), p);
        assert_eq!(
            scale_point(p, REFERENCE_SIZE, Size::new(1920, 1080)),
            Point::new(1008, 450)
        );
    }

    #[test]
    fn test_intersect_and_clip() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
        assert!(a.intersect(&Rect::new(20, 20, 2, 2)).is_empty());

        let roi = Rect::new(780, 590, 40, 40);
        assert_eq!(roi.clip_to(REFERENCE_SIZE), Rect::new(780, 590, 20, 10));
    }

    #[test]
    fn test_center() {
        assert_eq!(Rect::new(100, 50, 31, 20).center(), Point::new(115, 60));
    }
}
