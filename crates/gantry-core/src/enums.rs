//! Agent-facing enums and their serialized integer boundary.
//!
//! Action-space kind, termination status, and training mode all cross the
//! external boundary as flat integers (alongside the `f64` vectors). Each
//! enum therefore carries an explicit `as_i32` / [`try_from_i32`] pair.
//! Conversion from an out-of-range integer is an error, never a clamp —
//! a caller handing the bridge an unknown mode must find out at the
//! boundary, not deep inside a scene.
//!
//! [`try_from_i32`]: AgentMode::try_from_i32

use std::error::Error;
use std::fmt;

/// Normalization-group tag for dimensions that are normalized
/// independently of every other dimension.
pub const NORM_GROUP_SINGLE: i32 = 0;

/// Normalization-group tag for dimensions excluded from normalizer
/// updates entirely (e.g. constant or already-normalized features).
pub const NORM_GROUP_NONE: i32 = -1;

/// An integer was outside the enumerated range of its target type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumRangeError {
    /// Name of the target enum.
    pub what: &'static str,
    /// The rejected value.
    pub value: i32,
    /// Largest valid discriminant.
    pub max: i32,
}

impl fmt::Display for EnumRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} value {} out of range [0, {}]",
            self.what, self.value, self.max
        )
    }
}

impl Error for EnumRangeError {}

/// How the action vector for an agent is to be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionSpace {
    /// No action space; the neutral value for scenes without the RL
    /// capability or agents that take no actions.
    #[default]
    None,
    /// Actions are real-valued vectors, clamped per-dimension to the
    /// scene's action bounds.
    Continuous,
    /// Actions select one of `num_actions` discrete choices.
    Discrete,
}

impl ActionSpace {
    /// Serialized form for the flat integer boundary.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Continuous => 1,
            Self::Discrete => 2,
        }
    }

    /// Checked deserialization from the flat integer boundary.
    pub fn try_from_i32(v: i32) -> Result<Self, EnumRangeError> {
        match v {
            0 => Ok(Self::None),
            1 => Ok(Self::Continuous),
            2 => Ok(Self::Discrete),
            _ => Err(EnumRangeError {
                what: "ActionSpace",
                value: v,
                max: 2,
            }),
        }
    }
}

impl fmt::Display for ActionSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Continuous => write!(f, "continuous"),
            Self::Discrete => write!(f, "discrete"),
        }
    }
}

/// Per-agent, per-step termination signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Terminate {
    /// The episode continues for this agent.
    #[default]
    None,
    /// The agent terminated by failing (e.g. left the arena).
    Fail,
    /// The agent terminated by reaching its objective.
    Success,
}

impl Terminate {
    /// Serialized form for the flat integer boundary.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Fail => 1,
            Self::Success => 2,
        }
    }

    /// Checked deserialization from the flat integer boundary.
    pub fn try_from_i32(v: i32) -> Result<Self, EnumRangeError> {
        match v {
            0 => Ok(Self::None),
            1 => Ok(Self::Fail),
            2 => Ok(Self::Success),
            _ => Err(EnumRangeError {
                what: "Terminate",
                value: v,
                max: 2,
            }),
        }
    }

    /// Whether this signal ends the episode for the agent.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Terminate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Fail => write!(f, "fail"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// Training-lifecycle mode, applied scene-wide through the RL capability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgentMode {
    /// Training: exploration enabled, stochastic behavior permitted.
    #[default]
    Train,
    /// Evaluation: deterministic behavior, no exploration.
    Test,
}

impl AgentMode {
    /// Serialized form for the flat integer boundary.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Train => 0,
            Self::Test => 1,
        }
    }

    /// Checked deserialization from the flat integer boundary.
    pub fn try_from_i32(v: i32) -> Result<Self, EnumRangeError> {
        match v {
            0 => Ok(Self::Train),
            1 => Ok(Self::Test),
            _ => Err(EnumRangeError {
                what: "AgentMode",
                value: v,
                max: 1,
            }),
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => write!(f, "train"),
            Self::Test => write!(f, "test"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_space_round_trips() {
        for space in [ActionSpace::None, ActionSpace::Continuous, ActionSpace::Discrete] {
            assert_eq!(ActionSpace::try_from_i32(space.as_i32()), Ok(space));
        }
    }

    #[test]
    fn terminate_round_trips() {
        for term in [Terminate::None, Terminate::Fail, Terminate::Success] {
            assert_eq!(Terminate::try_from_i32(term.as_i32()), Ok(term));
        }
    }

    #[test]
    fn mode_round_trips() {
        for mode in [AgentMode::Train, AgentMode::Test] {
            assert_eq!(AgentMode::try_from_i32(mode.as_i32()), Ok(mode));
        }
    }

    #[test]
    fn out_of_range_mode_is_rejected_not_clamped() {
        let err = AgentMode::try_from_i32(2).unwrap_err();
        assert_eq!(err.what, "AgentMode");
        assert_eq!(err.value, 2);
        let err = AgentMode::try_from_i32(-1).unwrap_err();
        assert_eq!(err.value, -1);
    }

    #[test]
    fn out_of_range_action_space_is_rejected() {
        assert!(ActionSpace::try_from_i32(3).is_err());
        assert!(Terminate::try_from_i32(17).is_err());
    }

    #[test]
    fn terminate_terminal_flags() {
        assert!(!Terminate::None.is_terminal());
        assert!(Terminate::Fail.is_terminal());
        assert!(Terminate::Success.is_terminal());
    }

    #[test]
    fn range_error_display_names_the_enum() {
        let msg = AgentMode::try_from_i32(9).unwrap_err().to_string();
        assert!(msg.contains("AgentMode"));
        assert!(msg.contains('9'));
    }
}
