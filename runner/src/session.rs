//! Scripted sessions: recorded observations replayed through the bot tick.

use homeward_core::{has_text, Controller, Point, Rect, Recognizer, Size, REFERENCE_SIZE};
use serde::Deserialize;
use tracing::info;

/// What the recognizers reported on one cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Observation {
    pub hp: u8,
    pub attacking: bool,
    /// Raw OCR detail of the attack banner; any text means an attack is on.
    /// Overrides `attacking` when present.
    pub attack_detail: Option<String>,
    pub target: Option<Rect>,
    /// Position readout text; wrapped into an OCR detail payload.
    pub position: Option<String>,
    /// Raw OCR detail payload; takes precedence over `position`.
    pub detail: Option<String>,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            hp: 100,
            attacking: false,
            attack_detail: None,
            target: None,
            position: None,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default = "default_frame")]
    pub frame: Size,
    pub ticks: Vec<Observation>,
}

fn default_frame() -> Size {
    REFERENCE_SIZE
}

/// Serves one observation at a time to the bot tick.
pub struct ScriptedRecognizer {
    frame: Size,
    current: Observation,
}

impl ScriptedRecognizer {
    pub fn new(frame: Size) -> Self {
        Self {
            frame,
            current: Observation::default(),
        }
    }

    pub fn load(&mut self, observation: Observation) {
        self.current = observation;
    }
}

impl Recognizer for ScriptedRecognizer {
    fn frame_size(&self) -> Size {
        self.frame
    }

    fn hp_percent(&mut self, _roi: Rect) -> u8 {
        self.current.hp
    }

    fn is_attacking(&mut self, _roi: Rect) -> bool {
        match &self.current.attack_detail {
            Some(detail) => has_text(detail),
            None => self.current.attacking,
        }
    }

    fn find_target(&mut self, _roi: Rect) -> Option<Rect> {
        self.current.target
    }

    fn read_position(&mut self, _roi: Rect) -> Option<String> {
        if let Some(detail) = &self.current.detail {
            return Some(detail.clone());
        }
        let best = match &self.current.position {
            Some(text) => serde_json::json!({ "text": text }),
            None => serde_json::Value::Null,
        };
        Some(serde_json::json!({ "best": best }).to_string())
    }
}

/// Input the bot would have sent to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Click(Point),
    Key(u16),
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Click(p) => write!(f, "click {}", p),
            Input::Key(k) => write!(f, "key {}", k),
        }
    }
}

/// Logs and records input instead of injecting it.
#[derive(Debug, Default)]
pub struct DryRunController {
    inputs: Vec<Input>,
}

impl DryRunController {
    /// Inputs sent since the last call.
    pub fn drain(&mut self) -> Vec<Input> {
        std::mem::take(&mut self.inputs)
    }
}

impl Controller for DryRunController {
    fn click(&mut self, point: Point) -> Result<(), String> {
        info!(%point, "click");
        self.inputs.push(Input::Click(point));
        Ok(())
    }

    fn press_key(&mut self, key: u16) -> Result<(), String> {
        info!(key, "press key");
        self.inputs.push(Input::Key(key));
        Ok(())
    }
}
