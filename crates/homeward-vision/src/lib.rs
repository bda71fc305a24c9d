//! homeward-vision: pixel heuristics on captured frames.
//!
//! - `hp_bar` - HP bar fill percentage from red column runs
//! - `minimap` - red dot (monster) counting on the minimap
//! - `hsv` - OpenCV-style HSV conversion and range masks

mod error;
mod hp_bar;
mod hsv;
mod minimap;

use std::path::Path;

pub use error::{VisionError, VisionResult};
pub use hp_bar::hp_bar_percent;
pub use hsv::{mask_in_ranges, red_ranges, Hsv, HsvRange};
pub use minimap::{count_red_dots, DEFAULT_MINIMAP};

use homeward_core::Size;
use image::RgbImage;

/// Load a screenshot as an RGB frame.
pub fn load_frame(path: impl AsRef<Path>) -> VisionResult<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Size of a frame in the units the core crate uses.
pub fn frame_size(image: &RgbImage) -> Size {
    Size::new(image.width() as i32, image.height() as i32)
}
