//! Coordinate extraction from OCR text.
//!
//! The position readout is recognized as `"x,y"`, but OCR frequently drops
//! the separator and returns one long digit run. Runs of 8 digits are split
//! 4/4 and runs of 7 digits are split 3/4.

use crate::geometry::Point;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no digits in OCR text")]
    NoDigits,
    #[error("cannot split a {len}-digit run into x and y")]
    UnsplittableToken { len: usize },
    #[error("coordinate out of range: {0}")]
    OutOfRange(String),
}

/// Parse a coordinate pair, reporting why it failed.
pub fn try_parse_point(text: &str) -> Result<Point, ParseError> {
    let tokens = digit_runs(text);

    match tokens.as_slice() {
        [] => Err(ParseError::NoDigits),
        [single] => {
            let split = match single.len() {
                8 => 4,
                7 => 3,
                len => return Err(ParseError::UnsplittableToken { len }),
            };
            let (x, y) = single.split_at(split);
            Ok(Point::new(to_coord(x)?, to_coord(y)?))
        }
        [x, y, ..] => Ok(Point::new(to_coord(x)?, to_coord(y)?)),
    }
}

/// Parse a coordinate pair, falling back to [`Point::ORIGIN`].
///
/// Callers cannot tell a failed parse from a reading of `(0, 0)`; both mean
/// "position unreadable" to the planner.
pub fn parse_point(text: &str) -> Point {
    match try_parse_point(text) {
        Ok(point) => point,
        Err(e) => {
            warn!(text, "Failed to parse OCR point: {}", e);
            Point::ORIGIN
        }
    }
}

/// Split a configured anchor list (`"x,y;x,y"`) into its entries.
pub fn split_anchors(input: &str) -> Vec<&str> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn digit_runs(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect()
}

fn to_coord(digits: &str) -> Result<i32, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::OutOfRange(digits.to_string()))
}
