//! The [`RlAdapter`]: a capability-checked, agent-indexed RL view.

use gantry_core::{ActionSpace, AgentId, AgentMode, RlScene, SceneInstance, Terminate};

use crate::marshal::{fill_exact, fill_pair_exact};
use crate::telemetry::{TelemetrySink, ValRecord};

/// Uniform multi-agent RL surface over whatever scene is live.
///
/// Obtained from [`SceneHost::adapter`](crate::SceneHost::adapter); the
/// borrow ties the view to the host, so the scene cannot be replaced
/// while an adapter exists. The capability itself was resolved once at
/// setup — every call here reduces to a match on the
/// [`SceneInstance`] tag, never a dynamic type check.
///
/// # Graceful degradation
///
/// When no scene is live, or the live scene lacks the RL capability,
/// every query returns a well-defined neutral value — `0`, `false`,
/// empty vectors, [`ActionSpace::None`], [`Terminate::None`] — and
/// every mutator is a no-op. A driver can run a non-RL scene through
/// this surface without branching.
///
/// # Contract enforcement
///
/// While the capability is present, the adapter fails fast on caller
/// errors instead of forwarding them into the scene:
///
/// - any per-agent call with `agent` outside `[0, num_agents)` panics;
/// - [`set_action`](Self::set_action) panics on a length mismatch;
/// - every `record_*`/`build_*` output is validated against the
///   corresponding `*_size` announcement and panics on disagreement.
///
/// Nothing is memoized: each query re-reads the live scene, so results
/// always reflect the most recent `update`.
pub struct RlAdapter<'h> {
    scene: Option<&'h mut SceneInstance>,
    telemetry: &'h mut dyn TelemetrySink,
}

impl<'h> RlAdapter<'h> {
    pub(crate) fn new(
        scene: Option<&'h mut SceneInstance>,
        telemetry: &'h mut dyn TelemetrySink,
    ) -> Self {
        Self { scene, telemetry }
    }

    /// Whether the live scene carries the RL capability.
    pub fn has_capability(&self) -> bool {
        self.rl().is_some()
    }

    /// Number of independently acting entities; 0 without the capability.
    pub fn num_agents(&self) -> usize {
        self.rl().map_or(0, RlScene::num_agents)
    }

    /// Whether `agent` is at a decision point; `false` without the
    /// capability.
    pub fn need_new_action(&self, agent: AgentId) -> bool {
        self.checked_rl(agent)
            .is_some_and(|rl| rl.need_new_action(agent))
    }

    /// The agent's state vector, produced fresh, of length
    /// [`state_size`](Self::state_size); empty without the capability.
    pub fn record_state(&self, agent: AgentId) -> Vec<f64> {
        match self.checked_rl(agent) {
            Some(rl) => fill_exact("state", rl.state_size(agent), |out| {
                rl.record_state(agent, out);
            }),
            None => Vec::new(),
        }
    }

    /// The agent's goal vector, produced fresh, of length
    /// [`goal_size`](Self::goal_size); empty without the capability.
    pub fn record_goal(&self, agent: AgentId) -> Vec<f64> {
        match self.checked_rl(agent) {
            Some(rl) => fill_exact("goal", rl.goal_size(agent), |out| {
                rl.record_goal(agent, out);
            }),
            None => Vec::new(),
        }
    }

    /// Apply an action vector for `agent`; no-op without the capability.
    ///
    /// # Panics
    ///
    /// Panics if `action.len() != action_size(agent)`.
    pub fn set_action(&mut self, agent: AgentId, action: &[f64]) {
        let Some(rl) = self.checked_rl_mut(agent) else {
            return;
        };
        let expected = rl.action_size(agent);
        assert_eq!(
            action.len(),
            expected,
            "action for agent {agent}: got {} dimensions, expected {expected}",
            action.len(),
        );
        rl.set_action(agent, action);
    }

    /// Record a caller-side scalar against `agent`, forwarding to the
    /// scene's telemetry hook and mirroring into the host sink.
    pub fn log_val(&mut self, agent: AgentId, val: f64) {
        if self.checked_rl(agent).is_none() {
            return;
        }
        let time = self.scene.as_deref().map_or(0.0, |s| s.scene().time());
        if let Some(rl) = self.rl_mut() {
            rl.log_val(agent, val);
        }
        self.telemetry.record_val(&ValRecord { time, agent, val });
    }

    /// The agent's action-space kind; [`ActionSpace::None`] without the
    /// capability.
    pub fn action_space(&self, agent: AgentId) -> ActionSpace {
        self.checked_rl(agent)
            .map_or(ActionSpace::None, |rl| rl.action_space(agent))
    }

    /// State dimensionality; 0 without the capability.
    pub fn state_size(&self, agent: AgentId) -> usize {
        self.checked_rl(agent).map_or(0, |rl| rl.state_size(agent))
    }

    /// Goal dimensionality; 0 without the capability.
    pub fn goal_size(&self, agent: AgentId) -> usize {
        self.checked_rl(agent).map_or(0, |rl| rl.goal_size(agent))
    }

    /// Action dimensionality; 0 without the capability.
    pub fn action_size(&self, agent: AgentId) -> usize {
        self.checked_rl(agent).map_or(0, |rl| rl.action_size(agent))
    }

    /// Discrete-choice count; 0 without the capability or for
    /// non-discrete spaces.
    pub fn num_actions(&self, agent: AgentId) -> usize {
        self.checked_rl(agent).map_or(0, |rl| rl.num_actions(agent))
    }

    /// Per-dimension `(offset, scale)` normalization parameters for the
    /// state vector, both of length [`state_size`](Self::state_size).
    pub fn build_state_offset_scale(&self, agent: AgentId) -> (Vec<f64>, Vec<f64>) {
        match self.checked_rl(agent) {
            Some(rl) => fill_pair_exact("state offset/scale", rl.state_size(agent), |o, s| {
                rl.build_state_offset_scale(agent, o, s);
            }),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// Goal analog of [`build_state_offset_scale`](Self::build_state_offset_scale).
    pub fn build_goal_offset_scale(&self, agent: AgentId) -> (Vec<f64>, Vec<f64>) {
        match self.checked_rl(agent) {
            Some(rl) => fill_pair_exact("goal offset/scale", rl.goal_size(agent), |o, s| {
                rl.build_goal_offset_scale(agent, o, s);
            }),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// Action analog of [`build_state_offset_scale`](Self::build_state_offset_scale).
    pub fn build_action_offset_scale(&self, agent: AgentId) -> (Vec<f64>, Vec<f64>) {
        match self.checked_rl(agent) {
            Some(rl) => fill_pair_exact("action offset/scale", rl.action_size(agent), |o, s| {
                rl.build_action_offset_scale(agent, o, s);
            }),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// Per-dimension `(min, max)` clamping bounds for continuous
    /// actions, both of length [`action_size`](Self::action_size).
    pub fn build_action_bounds(&self, agent: AgentId) -> (Vec<f64>, Vec<f64>) {
        match self.checked_rl(agent) {
            Some(rl) => fill_pair_exact("action bounds", rl.action_size(agent), |min, max| {
                rl.build_action_bounds(agent, min, max);
            }),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// One normalization-group tag per state dimension.
    pub fn build_state_norm_groups(&self, agent: AgentId) -> Vec<i32> {
        match self.checked_rl(agent) {
            Some(rl) => fill_exact("state norm groups", rl.state_size(agent), |out| {
                rl.build_state_norm_groups(agent, out);
            }),
            None => Vec::new(),
        }
    }

    /// One normalization-group tag per goal dimension.
    pub fn build_goal_norm_groups(&self, agent: AgentId) -> Vec<i32> {
        match self.checked_rl(agent) {
            Some(rl) => fill_exact("goal norm groups", rl.goal_size(agent), |out| {
                rl.build_goal_norm_groups(agent, out);
            }),
            None => Vec::new(),
        }
    }

    /// Reward for the agent's most recent step; 0 without the capability.
    pub fn calc_reward(&self, agent: AgentId) -> f64 {
        self.checked_rl(agent).map_or(0.0, |rl| rl.calc_reward(agent))
    }

    /// Lower reward bound; 0 without the capability.
    pub fn reward_min(&self, agent: AgentId) -> f64 {
        self.checked_rl(agent).map_or(0.0, |rl| rl.reward_min(agent))
    }

    /// Upper reward bound; 0 without the capability.
    pub fn reward_max(&self, agent: AgentId) -> f64 {
        self.checked_rl(agent).map_or(0.0, |rl| rl.reward_max(agent))
    }

    /// Failure-termination reward; 0 without the capability.
    pub fn reward_fail(&self, agent: AgentId) -> f64 {
        self.checked_rl(agent).map_or(0.0, |rl| rl.reward_fail(agent))
    }

    /// Success-termination reward; 0 without the capability.
    pub fn reward_succ(&self, agent: AgentId) -> f64 {
        self.checked_rl(agent).map_or(0.0, |rl| rl.reward_succ(agent))
    }

    /// Scene-level episode boundary, forwarded from the base contract —
    /// available without the RL capability. `false` when no scene is
    /// live.
    pub fn is_episode_end(&self) -> bool {
        self.scene
            .as_deref()
            .is_some_and(|s| s.scene().is_episode_end())
    }

    /// Scene-level episode validity, forwarded from the base contract.
    /// `true` when no scene is live — there is nothing to discard.
    pub fn check_valid_episode(&self) -> bool {
        self.scene
            .as_deref()
            .map_or(true, |s| s.scene().check_valid_episode())
    }

    /// Per-agent termination signal; [`Terminate::None`] without the
    /// capability.
    pub fn check_terminate(&self, agent: AgentId) -> Terminate {
        self.checked_rl(agent)
            .map_or(Terminate::None, |rl| rl.check_terminate(agent))
    }

    /// Switch the scene between training and evaluation behavior; no-op
    /// without the capability.
    ///
    /// Out-of-range serialized modes cannot reach this method: boundary
    /// callers go through [`AgentMode::try_from_i32`], which rejects
    /// them.
    pub fn set_mode(&mut self, mode: AgentMode) {
        if let Some(rl) = self.rl_mut() {
            rl.set_mode(mode);
        }
    }

    /// Forward the learner's sample counter; no-op without the
    /// capability.
    pub fn set_sample_count(&mut self, count: u64) {
        if let Some(rl) = self.rl_mut() {
            rl.set_sample_count(count);
        }
    }

    fn rl(&self) -> Option<&dyn RlScene> {
        self.scene.as_deref().and_then(SceneInstance::rl)
    }

    fn rl_mut(&mut self) -> Option<&mut dyn RlScene> {
        self.scene.as_deref_mut().and_then(SceneInstance::rl_mut)
    }

    /// Borrow the capability with the agent id validated against the
    /// current agent count.
    ///
    /// # Panics
    ///
    /// Panics if the capability is present and `agent` is out of range.
    fn checked_rl(&self, agent: AgentId) -> Option<&dyn RlScene> {
        let rl = self.rl()?;
        let num_agents = rl.num_agents();
        assert!(
            agent.0 < num_agents,
            "agent id {agent} out of range [0, {num_agents})",
        );
        Some(rl)
    }

    fn checked_rl_mut(&mut self, agent: AgentId) -> Option<&mut dyn RlScene> {
        self.checked_rl(agent)?;
        self.rl_mut()
    }
}
