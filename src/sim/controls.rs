//! Control inputs supplied by the host UI each frame

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A navigation direction as pressed in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Directional flags held by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ControlInput {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn active_count(&self) -> usize {
        [self.up, self.down, self.left, self.right]
            .iter()
            .filter(|held| **held)
            .count()
    }
}

/// Rule-based steering applied to the spacecraft
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    #[default]
    Off,
    /// Steer away from the nearest in-range particle
    Avoid,
    /// Steer towards the nearest in-range particle
    Follow,
}

impl AiMode {
    pub fn is_active(&self) -> bool {
        !matches!(self, AiMode::Off)
    }

    /// Status line shown in the system telemetry panel
    pub fn status_label(&self) -> &'static str {
        match self {
            AiMode::Off => "Inactive",
            AiMode::Avoid => "Avoidance Active",
            AiMode::Follow => "Tracking Active",
        }
    }

    /// Name used in the mode-change notification
    pub fn display_name(&self) -> &'static str {
        match self {
            AiMode::Off => "Disabled",
            AiMode::Avoid => "Avoidance",
            AiMode::Follow => "Tracking",
        }
    }
}

impl fmt::Display for AiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AiMode::Off => "off",
            AiMode::Avoid => "avoid",
            AiMode::Follow => "follow",
        };
        f.write_str(name)
    }
}

/// Returned when parsing an unknown AI mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown AI mode '{0}' (expected off, avoid or follow)")]
pub struct ParseAiModeError(pub String);

impl FromStr for AiMode {
    type Err = ParseAiModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(AiMode::Off),
            "avoid" => Ok(AiMode::Avoid),
            "follow" => Ok(AiMode::Follow),
            other => Err(ParseAiModeError(other.to_string())),
        }
    }
}
