//! homeward-core: position parsing, ROI scaling and the return-to-anchor planner.
//!
//! Design goal: keep this crate free of imaging and platform code.
//! Pixel heuristics live in `homeward-vision`; recognition and input
//! injection belong to the host automation framework.

mod battle;
mod config;
mod detail;
mod geometry;
mod parse;
mod planner;
mod random;

pub use battle::{BattleConfig, BattleTick, Controller, Recognizer, TickOutcome};
pub use config::{
    default_config_path, get_app_data_dir, load_yaml, parse_yaml, save_yaml, BotConfig,
    ConfigError, ConfigResult,
};
pub use detail::{best_text, has_text, DetailError};
pub use geometry::{scale_point, scale_rect, Point, Rect, Size, REFERENCE_SIZE};
pub use parse::{parse_point, split_anchors, try_parse_point, ParseError};
pub use planner::{
    plan_return, Decision, Navigator, NavigatorError, PlannerConfig, PlannerState,
};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
