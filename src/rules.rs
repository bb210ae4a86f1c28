//! Rule-set configuration.
//!
//! The classic rules recruit on the home row only. The advanced rules add
//! recalls: pulling a friendly unit back to an empty cell next to the king.

use serde::{Deserialize, Serialize};

/// Default cap on units per player.
pub const DEFAULT_MAX_UNITS: usize = 20;

/// Errors from applying an engine option.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option '{0}'")]
    Unknown(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Tunable rules for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Most units a player may have on the board.
    pub max_units: usize,
    /// Whether recall moves are legal.
    pub recall: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { max_units: DEFAULT_MAX_UNITS, recall: false }
    }
}

impl Rules {
    /// The advanced rule set, with recalls.
    pub fn advanced() -> Self {
        Rules { recall: true, ..Rules::default() }
    }

    /// Applies a protocol option (`MaxUnits`, `Recall`).
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionError> {
        let invalid = || OptionError::InvalidValue {
            name: name.to_string(),
            value: value.unwrap_or_default().to_string(),
        };
        match name {
            "MaxUnits" => {
                let n: usize = value.and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
                if n == 0 {
                    return Err(invalid());
                }
                self.max_units = n;
            }
            "Recall" => {
                self.recall = match value {
                    Some("true") | None => true,
                    Some("false") => false,
                    Some(_) => return Err(invalid()),
                };
            }
            other => return Err(OptionError::Unknown(other.to_string())),
        }
        Ok(())
    }
}
