//! Return-to-anchor click planner.
//!
//! Once per detection cycle the bot reads its position from the minimap
//! readout and asks the planner where to click so the character walks back
//! toward its anchor. Clicks are issued relative to the screen center, at a
//! distance that grows with how far away the anchor is, plus a little jitter.

use crate::detail::best_text;
use crate::geometry::Point;
use crate::parse::{parse_point, split_anchors, try_parse_point, ParseError};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Tunables of the planner. Distances are in logical units unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Readings farther than `max_offset_threshold * logic_to_pixel_scale`
    /// units from the anchor are treated as misreads.
    pub max_offset_threshold: f64,
    /// Pixels per logical unit.
    pub logic_to_pixel_scale: f64,
    /// At or below this distance the character counts as arrived.
    pub arrive_distance: f64,
    /// Shortest click distance from the screen center.
    pub min_click_units: f64,
    /// Longest click distance from the screen center.
    pub max_click_units: f64,
    /// Half-width of the uniform click distance jitter, in pixels.
    pub jitter_px: f64,
    /// Center clicks tried on an unreadable position before repeating the last click.
    pub seating_retry_limit: u32,
    /// Consecutive rests before switching to the next anchor.
    pub rest_rotate_threshold: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_offset_threshold: 1000.0,
            logic_to_pixel_scale: 38.0,
            arrive_distance: 4.0,
            min_click_units: 3.0,
            max_click_units: 6.0,
            jitter_px: 10.0,
            seating_retry_limit: 3,
            rest_rotate_threshold: 5,
        }
    }
}

impl PlannerConfig {
    fn min_click_px(&self) -> f64 {
        self.min_click_units * self.logic_to_pixel_scale
    }

    fn max_click_px(&self) -> f64 {
        self.max_click_units * self.logic_to_pixel_scale
    }

    fn max_offset(&self) -> f64 {
        self.max_offset_threshold * self.logic_to_pixel_scale
    }
}

/// State carried between cycles of the bot loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerState {
    pub last_click_point: Point,
    pub seating_retry_count: u32,
    pub reset_counter: u32,
    pub attack_retry_count: u32,
    pub is_seated: bool,
    pub active_anchor_index: usize,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a cycle that ended in a rest.
    ///
    /// Returns the new anchor index when the rest threshold was reached and
    /// the route moved on to the next anchor.
    pub fn record_rest(&mut self, threshold: u32, anchor_count: usize) -> Option<usize> {
        self.reset_counter += 1;
        if self.reset_counter < threshold {
            return None;
        }

        self.reset_counter = 0;
        self.active_anchor_index = (self.active_anchor_index + 1) % anchor_count.max(1);
        Some(self.active_anchor_index)
    }

    /// Count a cycle that ended in a movement click.
    pub fn record_click(&mut self) {
        self.reset_counter = 0;
    }
}

/// Decide where to click to move from `current` back toward `anchor`.
///
/// `current == Point::ORIGIN` means the position could not be read: the
/// first few times the center of the screen is clicked to shake the
/// character loose, then the last movement click is repeated. `None` means
/// no click: either the character has arrived or the reading is too far off
/// to trust.
pub fn plan_return<R: RandomSource + ?Sized>(
    config: &PlannerConfig,
    state: &mut PlannerState,
    current: Point,
    anchor: Point,
    screen_center: Point,
    rng: &mut R,
) -> Option<Point> {
    if current.is_origin() {
        if state.seating_retry_count < config.seating_retry_limit {
            state.seating_retry_count += 1;
            debug!(
                retry = state.seating_retry_count,
                "Position unreadable, clicking screen center"
            );
            return Some(screen_center);
        }
        state.seating_retry_count = 0;
        debug!(point = %state.last_click_point, "Position unreadable, repeating last click");
        return Some(state.last_click_point);
    }

    let dx = anchor.x as f64 - current.x as f64;
    let dy = anchor.y as f64 - current.y as f64;
    let len = (dx * dx + dy * dy).sqrt();

    if len <= config.arrive_distance {
        debug!(%current, %anchor, len, "Close enough to anchor");
        return None;
    }
    if len > config.max_offset() {
        warn!(%current, %anchor, len, "Implausible distance to anchor, ignoring reading");
        return None;
    }

    let len_px = len * config.logic_to_pixel_scale;
    let (nx, ny) = (dx / len, dy / len);

    let cx = screen_center.x as f64;
    let cy = screen_center.y as f64;
    let screen_diagonal = (cx * cx + cy * cy).sqrt();

    let min = config.min_click_px();
    let max = config.max_click_px();
    let ratio = if screen_diagonal > 0.0 {
        (len_px / screen_diagonal).min(1.0)
    } else {
        1.0
    };
    let base = min + (max - min) * ratio;

    let distance = rng.uniform(base - config.jitter_px, base + config.jitter_px);

    let target = Point::new(
        (cx + nx * distance).round() as i32,
        (cy + ny * distance).round() as i32,
    );
    state.last_click_point = target;

    debug!(%current, %anchor, %target, distance, "Planned return click");
    Some(target)
}

#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("no anchors configured")]
    NoAnchors,
    #[error("invalid anchor '{anchor}': {source}")]
    InvalidAnchor {
        anchor: String,
        #[source]
        source: ParseError,
    },
}

/// Outcome of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Click here (reference coordinates).
    Click(Point),
    /// Stay put. `rotated_to` is set when the route advanced to another anchor.
    Rest { rotated_to: Option<usize> },
}

/// Planner bound to an anchor route and a random source.
pub struct Navigator<R> {
    config: PlannerConfig,
    anchors: Vec<Point>,
    rng: R,
}

impl<R: RandomSource> Navigator<R> {
    pub fn new(config: PlannerConfig, anchors: Vec<Point>, rng: R) -> Result<Self, NavigatorError> {
        if anchors.is_empty() {
            return Err(NavigatorError::NoAnchors);
        }
        Ok(Self {
            config,
            anchors,
            rng,
        })
    }

    /// Build from a `;`-separated anchor list such as `"442,1594;2158,2782"`.
    pub fn from_anchor_list(
        config: PlannerConfig,
        anchors: &str,
        rng: R,
    ) -> Result<Self, NavigatorError> {
        let anchors = split_anchors(anchors)
            .into_iter()
            .map(|a| {
                try_parse_point(a).map_err(|source| NavigatorError::InvalidAnchor {
                    anchor: a.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config, anchors, rng)
    }

    /// The anchor the route is currently heading for.
    pub fn active_anchor(&self, state: &PlannerState) -> Point {
        self.anchors[state.active_anchor_index % self.anchors.len()]
    }

    /// Plan from a raw OCR detail payload and update the rest bookkeeping.
    ///
    /// A payload without readable text ends the cycle in a rest.
    pub fn step(&mut self, state: &mut PlannerState, detail: &str, screen_center: Point) -> Decision {
        let planned = match best_text(detail) {
            Ok(text) => self.plan_text(state, &text, screen_center),
            Err(e) => {
                warn!("Position OCR unusable: {}", e);
                None
            }
        };
        self.settle(state, planned)
    }

    /// Plan from already extracted OCR text.
    pub fn plan_text(
        &mut self,
        state: &mut PlannerState,
        text: &str,
        screen_center: Point,
    ) -> Option<Point> {
        let current = parse_point(text);
        let anchor = self.active_anchor(state);
        plan_return(
            &self.config,
            state,
            current,
            anchor,
            screen_center,
            &mut self.rng,
        )
    }

    fn settle(&self, state: &mut PlannerState, planned: Option<Point>) -> Decision {
        match planned {
            Some(point) => {
                state.record_click();
                Decision::Click(point)
            }
            None => {
                let rotated_to =
                    state.record_rest(self.config.rest_rotate_threshold, self.anchors.len());
                if let Some(index) = rotated_to {
                    info!(
                        index,
                        anchor = %self.anchors[index],
                        "Rested too long, switching to next anchor"
                    );
                }
                Decision::Rest { rotated_to }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the middle of the requested range.
    struct Midpoint;

    impl RandomSource for Midpoint {
        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            (low + high) / 2.0
        }
    }

    /// Always returns the low end of the requested range.
    struct Low;

    impl RandomSource for Low {
        fn uniform(&mut self, low: f64, _high: f64) -> f64 {
            low
        }
    }

    const CENTER: Point = Point::new(400, 300);

    fn plan(state: &mut PlannerState, current: Point, anchor: Point) -> Option<Point> {
        plan_return(
            &PlannerConfig::default(),
            state,
            current,
            anchor,
            CENTER,
            &mut Midpoint,
        )
    }

    fn detail(text: &str) -> String {
        format!(r#"{{"best":{{"text":"{}"}}}}"#, text)
    }

    #[test]
    fn test_at_anchor_returns_none() {
        let mut state = PlannerState::new();
        let p = Point::new(442, 1594);
        assert_eq!(plan(&mut state, p, p), None);
        assert_eq!(plan(&mut state, p, Point::new(446, 1594)), None);
    }

    #[test]
    fn test_interpolated_distance() {
        let mut state = PlannerState::new();
        // len 10 -> 380 px of a 500 px diagonal: 114 + 114 * 0.76 = 200.64
        let target = plan(&mut state, Point::new(100, 100), Point::new(110, 100));
        assert_eq!(target, Some(Point::new(601, 300)));
        assert_eq!(state.last_click_point, Point::new(601, 300));

        let target = plan(&mut state, Point::new(110, 100), Point::new(100, 100));
        assert_eq!(target, Some(Point::new(199, 300)));
    }

    #[test]
    fn test_diagonal_direction() {
        let mut state = PlannerState::new();
        // len 5 -> 190 px: 114 + 114 * 0.38 = 157.32 along (0.6, 0.8)
        let target = plan(&mut state, Point::new(100, 100), Point::new(103, 104));
        assert_eq!(target, Some(Point::new(494, 426)));
    }

    #[test]
    fn test_distance_saturates_at_max() {
        let mut state = PlannerState::new();
        let target = plan_return(
            &PlannerConfig::default(),
            &mut state,
            Point::new(100, 100),
            Point::new(100, 130),
            CENTER,
            &mut Low,
        );
        // 228 - 10 jitter
        assert_eq!(target, Some(Point::new(400, 518)));
    }

    #[test]
    fn test_implausible_distance_returns_none() {
        let mut state = PlannerState::new();
        let current = Point::new(1500, 1500);
        // Cap is 1000 * 38 = 38000 units.
        for anchor in [
            Point::new(40_000, 1500),
            Point::new(-37_000, 1500),
            Point::new(1500, 39_501),
            Point::new(30_000, 30_000),
        ] {
            assert_eq!(plan(&mut state, current, anchor), None);
        }

        let config = PlannerConfig {
            max_offset_threshold: 0.5,
            ..PlannerConfig::default()
        };
        // len 20 > 0.5 * 38
        let target = plan_return(
            &config,
            &mut state,
            Point::new(100, 100),
            Point::new(100, 120),
            CENTER,
            &mut Midpoint,
        );
        assert_eq!(target, None);
        assert_eq!(state, PlannerState::new());
    }

    #[test]
    fn test_far_but_plausible_distance_clicks() {
        let mut state = PlannerState::new();
        let target = plan_return(
            &PlannerConfig::default(),
            &mut state,
            Point::new(1500, 1500),
            Point::new(2600, 1500),
            CENTER,
            &mut Low,
        );
        // len 1100 saturates: 228 - 10 jitter to the right of center
        assert_eq!(target, Some(Point::new(618, 300)));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let mut state = PlannerState::new();
        let target = plan(&mut state, Point::new(-1, 0), Point::new(i32::MAX, 0));
        assert_eq!(target, None);
        let target = plan(&mut state, Point::new(i32::MIN, 5), Point::new(i32::MAX, 5));
        assert_eq!(target, None);
    }

    #[test]
    fn test_unreadable_position_sequence() {
        let mut state = PlannerState::new();
        state.last_click_point = Point::new(520, 310);
        let anchor = Point::new(442, 1594);

        for i in 1..=3 {
            assert_eq!(plan(&mut state, Point::ORIGIN, anchor), Some(CENTER));
            assert_eq!(state.seating_retry_count, i);
        }
        assert_eq!(
            plan(&mut state, Point::ORIGIN, anchor),
            Some(Point::new(520, 310))
        );
        assert_eq!(state.seating_retry_count, 0);
        assert_eq!(plan(&mut state, Point::ORIGIN, anchor), Some(CENTER));
    }

    #[test]
    fn test_record_rest_rotates() {
        let mut state = PlannerState::new();
        for _ in 0..4 {
            assert_eq!(state.record_rest(5, 3), None);
        }
        assert_eq!(state.record_rest(5, 3), Some(1));
        assert_eq!(state.reset_counter, 0);

        state.active_anchor_index = 2;
        for _ in 0..4 {
            state.record_rest(5, 3);
        }
        assert_eq!(state.record_rest(5, 3), Some(0));

        state.record_rest(5, 3);
        state.record_click();
        assert_eq!(state.reset_counter, 0);
    }

    #[test]
    fn test_navigator_step() {
        let mut nav =
            Navigator::from_anchor_list(PlannerConfig::default(), "110,100;500,500", Midpoint)
                .unwrap();
        let mut state = PlannerState::new();

        let decision = nav.step(&mut state, &detail("100,100"), CENTER);
        assert_eq!(decision, Decision::Click(Point::new(601, 300)));

        // Arrived: five rests move the route to the second anchor.
        for _ in 0..4 {
            assert_eq!(
                nav.step(&mut state, &detail("110,100"), CENTER),
                Decision::Rest { rotated_to: None }
            );
        }
        assert_eq!(
            nav.step(&mut state, &detail("110,100"), CENTER),
            Decision::Rest {
                rotated_to: Some(1)
            }
        );
        assert_eq!(nav.active_anchor(&state), Point::new(500, 500));
    }

    #[test]
    fn test_navigator_unreadable_detail_rests() {
        let mut nav =
            Navigator::from_anchor_list(PlannerConfig::default(), "442,1594", Midpoint).unwrap();
        let mut state = PlannerState::new();

        assert_eq!(
            nav.step(&mut state, r#"{"best":null}"#, CENTER),
            Decision::Rest { rotated_to: None }
        );
        assert_eq!(state.reset_counter, 1);

        // Garbage text parses to the origin sentinel and nudges from the center.
        assert_eq!(
            nav.step(&mut state, &detail("??"), CENTER),
            Decision::Click(CENTER)
        );
        assert_eq!(state.reset_counter, 0);
    }

    #[test]
    fn test_navigator_rejects_bad_anchors() {
        assert!(matches!(
            Navigator::from_anchor_list(PlannerConfig::default(), ";;", Midpoint),
            Err(NavigatorError::NoAnchors)
        ));
        assert!(matches!(
            Navigator::from_anchor_list(PlannerConfig::default(), "12345", Midpoint),
            Err(NavigatorError::InvalidAnchor { .. })
        ));
    }
}
