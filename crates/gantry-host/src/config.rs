//! Host configuration and startup validation.

use std::error::Error;
use std::fmt;

/// Errors detected during [`HostConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostError {
    /// `num_update_substeps` is zero.
    ZeroSubsteps,
    /// `playback_speed` is NaN, infinite, or zero.
    InvalidPlaybackSpeed {
        /// The invalid value.
        value: f64,
    },
    /// A viewport dimension is zero.
    EmptyViewport {
        /// Configured width in pixels.
        width: u32,
        /// Configured height in pixels.
        height: u32,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSubsteps => write!(f, "num_update_substeps must be at least 1"),
            Self::InvalidPlaybackSpeed { value } => {
                write!(f, "playback_speed must be finite and nonzero, got {value}")
            }
            Self::EmptyViewport { width, height } => {
                write!(f, "viewport must be nonempty, got {width}x{height}")
            }
        }
    }
}

impl Error for HostError {}

/// Construction-time configuration for a [`SceneHost`](crate::SceneHost).
///
/// Draw-enablement is explicit configuration threaded through
/// construction — there is no process-wide toggle. The substep count and
/// playback speed are informational knobs for the external stepping loop;
/// the host itself enforces no ratio between `update` and `draw` calls.
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// Whether an offscreen render target is created and `draw` renders.
    pub draw_enabled: bool,
    /// Substeps an external loop should divide each frame's elapsed time
    /// into. Positive; overridable by the `num_update_substeps` argument.
    pub num_update_substeps: u32,
    /// Playback-speed multiplier an external loop applies to wall time.
    /// Negative values play in reverse.
    pub playback_speed: f64,
    /// Initial viewport width in pixels.
    pub viewport_width: u32,
    /// Initial viewport height in pixels.
    pub viewport_height: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            draw_enabled: false,
            num_update_substeps: 1,
            playback_speed: 1.0,
            viewport_width: 1024,
            viewport_height: 576,
        }
    }
}

impl HostConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), HostError> {
        if self.num_update_substeps == 0 {
            return Err(HostError::ZeroSubsteps);
        }
        if !self.playback_speed.is_finite() || self.playback_speed == 0.0 {
            return Err(HostError::InvalidPlaybackSpeed {
                value: self.playback_speed,
            });
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(HostError::EmptyViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }
}
