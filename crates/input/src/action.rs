use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six translation directions of the fly camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Movement {
    /// Along the view direction.
    Forward,
    /// Against the view direction.
    Backward,
    StrafeLeft,
    StrafeRight,
    /// Down the camera's up axis.
    Descend,
    /// Up the camera's up axis.
    Ascend,
}

impl Movement {
    pub const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::StrafeLeft,
        Movement::StrafeRight,
        Movement::Descend,
        Movement::Ascend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Movement::Forward => "forward",
            Movement::Backward => "backward",
            Movement::StrafeLeft => "strafe-left",
            Movement::StrafeRight => "strafe-right",
            Movement::Descend => "descend",
            Movement::Ascend => "ascend",
        }
    }

    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from parsing textual input descriptions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown movement: {0:?} (expected one of forward, backward, strafe-left, strafe-right, descend, ascend)")]
    UnknownMovement(String),
}

impl FromStr for Movement {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Movement::ALL
            .into_iter()
            .find(|m| m.name() == normalized)
            .ok_or_else(|| InputError::UnknownMovement(s.to_string()))
    }
}

/// A high-level action produced from a discrete key press.
///
/// Continuous input (pointer position, scroll) is delivered to the navigation
/// state directly; only discrete commands go through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start or stop translating in a direction.
    Move(Movement),
    /// Return the camera to its home pose.
    ResetCamera,
    /// Request the window to close.
    Quit,
    /// Show or hide the on-screen overlay.
    ToggleHud,
    /// Key with no binding.
    Noop,
}

impl Action {
    /// Movement carried by this action, if any.
    pub fn movement(self) -> Option<Movement> {
        match self {
            Action::Move(m) => Some(m),
            _ => None,
        }
    }
}
