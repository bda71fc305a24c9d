//! Error types for homeward-vision.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type VisionResult<T> = Result<T, VisionError>;
