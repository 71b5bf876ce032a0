//! The two capability contracts: [`Scene`] and [`RlScene`].

use crate::args::{ArgError, ArgSet};
use crate::enums::{ActionSpace, AgentMode, Terminate};
use crate::id::AgentId;
use crate::input::{ButtonState, DeviceCoord, MouseButton};

/// Minimal contract every simulation must satisfy.
///
/// A scene is the owned, steppable world model: the host drives its
/// lifecycle (`parse_args → init → update*/reset* → shutdown`) and
/// forwards rendering and input entry points at fixed call sites. The
/// host never looks inside — body dynamics, collision, and integration
/// are entirely the scene's business.
///
/// # Object safety
///
/// This trait is used exclusively as `dyn Scene` (boxed inside
/// [`SceneInstance`](crate::instance::SceneInstance)). All methods are
/// object-safe, and everything beyond the steppable core has a no-op
/// default so non-interactive scenes stay small.
///
/// # Threading
///
/// Scenes are driven from a single control thread; every mutating method
/// takes `&mut self` and no method suspends. `Send` is required so a host
/// can be moved onto a worker thread, but scenes are never shared.
pub trait Scene: Send {
    /// Human-readable scene name, stable for the instance's lifetime.
    fn name(&self) -> &str;

    /// Consume startup arguments before `init`.
    ///
    /// The default accepts anything; scenes with required arguments
    /// return [`ArgError`] to fail the host's setup.
    fn parse_args(&mut self, args: &ArgSet) -> Result<(), ArgError> {
        let _ = args;
        Ok(())
    }

    /// One-time initialization, called after `parse_args` and before the
    /// first `update`.
    fn init(&mut self) {}

    /// Advance the simulation by exactly `timestep` seconds.
    fn update(&mut self, timestep: f64);

    /// Restore the initial condition without reconstruction.
    ///
    /// Time and any episode accumulators return to their post-`init`
    /// values; randomized scenes may draw a fresh initial state.
    fn reset(&mut self);

    /// Simulation time in seconds since `init` or the last `reset`.
    fn time(&self) -> f64;

    /// Whether the scene has nothing further to simulate.
    fn is_done(&self) -> bool;

    /// Scene-level episode boundary signal.
    ///
    /// Available with or without the RL capability; drivers poll it once
    /// per step to decide when to reset.
    fn is_episode_end(&self) -> bool;

    /// Whether the episode that just ended should be kept.
    ///
    /// Episodes invalidated by numerical blow-ups or out-of-bounds
    /// excursions return `false` so learners can discard them.
    fn check_valid_episode(&self) -> bool {
        true
    }

    /// Render the current state. Only called while an offscreen target
    /// is bound; headless hosts never call it.
    fn draw(&mut self) {}

    /// Viewport dimensions changed.
    fn reshape(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Release simulation resources. The instance stays owned (and may
    /// be dropped later); no other method is called after `shutdown`.
    fn shutdown(&mut self) {}

    /// Key press at a device-space position.
    fn keyboard(&mut self, key: char, pos: DeviceCoord) {
        let _ = (key, pos);
    }

    /// Mouse button transition at a device-space position.
    fn mouse_click(&mut self, button: MouseButton, state: ButtonState, pos: DeviceCoord) {
        let _ = (button, state, pos);
    }

    /// Pointer motion in device space.
    fn mouse_move(&mut self, pos: DeviceCoord) {
        let _ = pos;
    }
}

/// Optional extended contract for scenes that support multi-agent
/// reinforcement learning.
///
/// Every query is indexed by a dense [`AgentId`] in `[0, num_agents)`.
/// Callers above the adapter are responsible for staying in range; scene
/// implementations may assume valid ids.
///
/// Vector outputs use fill-style out-params: the scene clears and fills
/// the provided buffer, and the length it produces must equal the
/// corresponding `*_size` query. The adapter validates this at the
/// boundary — a scene that announces one size and produces another is
/// broken, and the mismatch surfaces immediately rather than as a
/// corrupted learner input.
pub trait RlScene: Scene {
    /// Number of independently acting entities.
    fn num_agents(&self) -> usize;

    /// Whether `agent` is at a decision point and needs a fresh action.
    fn need_new_action(&self, agent: AgentId) -> bool;

    /// Fill `out` with the agent's state vector (length `state_size`).
    fn record_state(&self, agent: AgentId, out: &mut Vec<f64>);

    /// Fill `out` with the agent's goal vector (length `goal_size`).
    fn record_goal(&self, agent: AgentId, out: &mut Vec<f64>);

    /// Apply an action vector of length `action_size` for `agent`.
    ///
    /// The action takes effect on subsequent `update` calls, until
    /// replaced.
    fn set_action(&mut self, agent: AgentId, action: &[f64]);

    /// Telemetry hook: record a caller-side scalar (e.g. value-function
    /// output) against `agent`.
    fn log_val(&mut self, agent: AgentId, val: f64) {
        let _ = (agent, val);
    }

    /// How this agent's action vector is interpreted.
    fn action_space(&self, agent: AgentId) -> ActionSpace;

    /// Dimensionality of the agent's state vector.
    fn state_size(&self, agent: AgentId) -> usize;

    /// Dimensionality of the agent's goal vector (0 for goal-free tasks).
    fn goal_size(&self, agent: AgentId) -> usize;

    /// Dimensionality of the agent's action vector.
    fn action_size(&self, agent: AgentId) -> usize;

    /// Number of discrete choices; meaningful only when
    /// [`action_space`](Self::action_space) is
    /// [`Discrete`](ActionSpace::Discrete), 0 otherwise.
    fn num_actions(&self, agent: AgentId) -> usize;

    /// Fill per-dimension affine normalization parameters for the state
    /// vector: learners apply `(x - offset) * scale` before consumption.
    /// Both outputs have length `state_size`.
    fn build_state_offset_scale(&self, agent: AgentId, offset: &mut Vec<f64>, scale: &mut Vec<f64>);

    /// Goal analog of [`build_state_offset_scale`](Self::build_state_offset_scale).
    fn build_goal_offset_scale(&self, agent: AgentId, offset: &mut Vec<f64>, scale: &mut Vec<f64>);

    /// Action analog of [`build_state_offset_scale`](Self::build_state_offset_scale).
    fn build_action_offset_scale(
        &self,
        agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    );

    /// Fill per-dimension clamping bounds for continuous actions. Both
    /// outputs have length `action_size`, with `min[i] <= max[i]`.
    fn build_action_bounds(&self, agent: AgentId, min: &mut Vec<f64>, max: &mut Vec<f64>);

    /// Fill one normalization-group tag per state dimension.
    ///
    /// Dimensions sharing a tag share one scale/offset pair during
    /// external normalization; see
    /// [`NORM_GROUP_SINGLE`](crate::enums::NORM_GROUP_SINGLE) and
    /// [`NORM_GROUP_NONE`](crate::enums::NORM_GROUP_NONE).
    fn build_state_norm_groups(&self, agent: AgentId, out: &mut Vec<i32>);

    /// Goal analog of [`build_state_norm_groups`](Self::build_state_norm_groups).
    fn build_goal_norm_groups(&self, agent: AgentId, out: &mut Vec<i32>);

    /// Reward for the agent's most recent step.
    fn calc_reward(&self, agent: AgentId) -> f64;

    /// Lower bound of the reward range. Must satisfy
    /// `reward_min(a) <= reward_max(a)`.
    fn reward_min(&self, agent: AgentId) -> f64;

    /// Upper bound of the reward range.
    fn reward_max(&self, agent: AgentId) -> f64;

    /// Reward substituted when an episode ends in failure.
    fn reward_fail(&self, agent: AgentId) -> f64;

    /// Reward substituted when an episode ends in success.
    fn reward_succ(&self, agent: AgentId) -> f64;

    /// Per-agent termination signal for the current step.
    fn check_terminate(&self, agent: AgentId) -> Terminate;

    /// Switch the scene between training and evaluation behavior.
    fn set_mode(&mut self, mode: AgentMode);

    /// Informational sample counter from the learner, e.g. for
    /// curriculum schedules or logging.
    fn set_sample_count(&mut self, count: u64) {
        let _ = count;
    }
}
