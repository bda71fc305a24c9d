//! One cycle of the hunting bot.
//!
//! Each tick runs the checks in priority order: heal when HP is low, keep
//! still while an attack is in progress, engage a visible target, and only
//! then walk back toward the anchor or rest. Recognition and input are
//! provided by the host automation framework through [`Recognizer`] and
//! [`Controller`].

use crate::geometry::{scale_point, scale_rect, Point, Rect, Size, REFERENCE_SIZE};
use crate::planner::{Decision, Navigator, PlannerState};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Frame analysis provided by the host. ROIs are already scaled to the frame.
pub trait Recognizer {
    /// Size of the frame being analysed.
    fn frame_size(&self) -> Size;

    /// HP bar fill, 0..=100.
    fn hp_percent(&mut self, roi: Rect) -> u8;

    /// Whether the "attacking" banner is shown.
    fn is_attacking(&mut self, roi: Rect) -> bool;

    /// Bounding box of the best target candidate, in frame coordinates.
    fn find_target(&mut self, roi: Rect) -> Option<Rect>;

    /// OCR detail JSON for the position readout.
    fn read_position(&mut self, roi: Rect) -> Option<String>;
}

/// Input injection provided by the host.
pub trait Controller {
    fn click(&mut self, point: Point) -> Result<(), String>;
    fn press_key(&mut self, key: u16) -> Result<(), String>;
}

/// Regions (at the reference resolution), keys and thresholds of a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub hp_bar: Rect,
    pub attack_banner: Rect,
    pub search_area: Rect,
    pub position_text: Rect,
    /// Heal at or below this HP percentage.
    pub hp_threshold: u8,
    pub heal_key: u16,
    pub stand_key: u16,
    /// Key that makes the character sit down; `None` to rest without input.
    pub rest_key: Option<u16>,
    /// Consecutive "attacking" ticks before the banner is ignored once.
    pub attack_retry_limit: u32,
    /// Screen center at the reference resolution.
    pub screen_center: Point,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            hp_bar: Rect::new(74, 24, 112, 10),
            attack_banner: Rect::new(340, 1, 120, 20),
            search_area: Rect::new(0, 0, 750, 560),
            position_text: Rect::new(659, 155, 64, 17),
            hp_threshold: 60,
            heal_key: 114,
            stand_key: 113,
            rest_key: Some(45),
            attack_retry_limit: 5,
            screen_center: Point::new(400, 300),
        }
    }
}

/// What a tick ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// An attack is in progress; nothing else was done.
    Attacking,
    /// Clicked a target at this frame position.
    Engaged(Point),
    /// Clicked toward the anchor; reference coordinates.
    Returning(Point),
    /// Resting in place.
    Resting { rotated_to: Option<usize> },
}

/// Runs bot cycles against a recognizer and controller.
pub struct BattleTick<R> {
    config: BattleConfig,
    navigator: Navigator<R>,
}

impl<R: RandomSource> BattleTick<R> {
    pub fn new(config: BattleConfig, navigator: Navigator<R>) -> Self {
        Self { config, navigator }
    }

    pub fn run(
        &mut self,
        state: &mut PlannerState,
        recognizer: &mut impl Recognizer,
        controller: &mut impl Controller,
    ) -> TickOutcome {
        let frame = recognizer.frame_size();
        let roi = |rect: Rect| scale_rect(rect, REFERENCE_SIZE, frame);

        let hp = recognizer.hp_percent(roi(self.config.hp_bar));
        if hp <= self.config.hp_threshold {
            info!(hp, "HP is low, healing");
            press(controller, self.config.heal_key);
        }

        if state.attack_retry_count < self.config.attack_retry_limit {
            if recognizer.is_attacking(roi(self.config.attack_banner)) {
                state.attack_retry_count += 1;
                debug!(retry = state.attack_retry_count, "Attack in progress");
                return TickOutcome::Attacking;
            }
        } else {
            state.attack_retry_count = 0;
        }

        if let Some(target) = recognizer.find_target(roi(self.config.search_area)) {
            if state.is_seated {
                press(controller, self.config.stand_key);
                state.is_seated = false;
            }
            let point = target.center();
            info!(%point, "Target found");
            click(controller, point);
            return TickOutcome::Engaged(point);
        }

        let detail = recognizer
            .read_position(roi(self.config.position_text))
            .unwrap_or_default();
        match self
            .navigator
            .step(state, &detail, self.config.screen_center)
        {
            Decision::Click(point) => {
                click(controller, scale_point(point, REFERENCE_SIZE, frame));
                TickOutcome::Returning(point)
            }
            Decision::Rest { rotated_to } => {
                info!("Near the anchor or position unreliable, resting");
                if !state.is_seated {
                    if let Some(key) = self.config.rest_key {
                        press(controller, key);
                    }
                    state.is_seated = true;
                }
                TickOutcome::Resting { rotated_to }
            }
        }
    }
}

fn press(controller: &mut impl Controller, key: u16) {
    if let Err(e) = controller.press_key(key) {
        warn!(key, "Key press failed: {}", e);
    }
}

fn click(controller: &mut impl Controller, point: Point) {
    if let Err(e) = controller.click(point) {
        warn!(%point, "Click failed: {}", e);
    }
}
