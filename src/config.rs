use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Color;

/// Session options, loadable from JSON or a JS object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Colour to move in a new or reset session.
    pub first_player: Color,
    /// When set, a required pass also hands the turn to the opponent.
    pub auto_pass: bool,
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
