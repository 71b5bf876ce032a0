//! Observable mock scenes.
//!
//! Both mocks share their observation state through `Arc`ed probes,
//! because a scene is moved into its host at setup time and tests need
//! to watch it from outside:
//!
//! - [`NullScene`] + [`SceneProbe`] — lifecycle and input forwarding.
//! - [`ScriptedRlScene`] + [`RlProbe`] — the full RL surface with
//!   configurable sizes, rewards, and deliberately broken variants for
//!   boundary-validation tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gantry_core::{
    ActionSpace, AgentId, AgentMode, ArgError, ArgSet, ButtonState, DeviceCoord, MouseButton,
    RlScene, Scene, Terminate, NORM_GROUP_SINGLE,
};

/// Shared observation state for [`NullScene`].
#[derive(Debug, Default)]
pub struct SceneProbe {
    pub init_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub reset_calls: AtomicUsize,
    pub shutdown_calls: AtomicUsize,
    pub draw_calls: AtomicUsize,
    pub drops: AtomicUsize,
    pub last_key: Mutex<Option<(char, DeviceCoord)>>,
    pub last_click: Mutex<Option<(MouseButton, ButtonState, DeviceCoord)>>,
    pub last_move: Mutex<Option<DeviceCoord>>,
    pub last_reshape: Mutex<Option<(u32, u32)>>,
}

impl SceneProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn updates(&self) -> usize {
        self.update_calls.load(Ordering::Relaxed)
    }

    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::Relaxed)
    }
}

/// Minimal non-RL scene that records every lifecycle interaction.
pub struct NullScene {
    name: String,
    time: f64,
    episode_len: f64,
    require_arg: Option<String>,
    probe: Arc<SceneProbe>,
}

impl NullScene {
    /// Create a scene with its own (inaccessible) probe.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_probe(name, SceneProbe::new())
    }

    /// Create a scene reporting into a shared probe.
    pub fn with_probe(name: impl Into<String>, probe: Arc<SceneProbe>) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            episode_len: f64::INFINITY,
            require_arg: None,
            probe,
        }
    }

    /// End episodes once `time` reaches `len` seconds.
    pub fn with_episode_len(mut self, len: f64) -> Self {
        self.episode_len = len;
        self
    }

    /// Make `parse_args` fail unless `key` is present.
    pub fn with_required_arg(mut self, key: impl Into<String>) -> Self {
        self.require_arg = Some(key.into());
        self
    }
}

impl Scene for NullScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse_args(&mut self, args: &ArgSet) -> Result<(), ArgError> {
        if let Some(key) = &self.require_arg {
            args.parse_string(key)?;
        }
        Ok(())
    }

    fn init(&mut self) {
        self.probe.init_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn update(&mut self, timestep: f64) {
        self.time += timestep;
        self.probe.update_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.probe.reset_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn is_done(&self) -> bool {
        false
    }

    fn is_episode_end(&self) -> bool {
        self.time >= self.episode_len
    }

    fn draw(&mut self) {
        self.probe.draw_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn reshape(&mut self, width: u32, height: u32) {
        *self.probe.last_reshape.lock().unwrap() = Some((width, height));
    }

    fn shutdown(&mut self) {
        self.probe.shutdown_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn keyboard(&mut self, key: char, pos: DeviceCoord) {
        *self.probe.last_key.lock().unwrap() = Some((key, pos));
    }

    fn mouse_click(&mut self, button: MouseButton, state: ButtonState, pos: DeviceCoord) {
        *self.probe.last_click.lock().unwrap() = Some((button, state, pos));
    }

    fn mouse_move(&mut self, pos: DeviceCoord) {
        *self.probe.last_move.lock().unwrap() = Some(pos);
    }
}

impl Drop for NullScene {
    fn drop(&mut self) {
        self.probe.drops.fetch_add(1, Ordering::Relaxed);
    }
}

/// Shared observation state for [`ScriptedRlScene`].
#[derive(Debug, Default)]
pub struct RlProbe {
    pub actions: Mutex<Vec<(AgentId, Vec<f64>)>>,
    pub logged: Mutex<Vec<(AgentId, f64)>>,
    pub modes: Mutex<Vec<AgentMode>>,
    pub sample_counts: Mutex<Vec<u64>>,
}

impl RlProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// RL-capable mock with fully configurable sizes and signals.
///
/// State values are deterministic (`agent * 100 + dim`), so tests can
/// assert both lengths and content. The `produced_state_size` override
/// makes the scene announce one state size while filling another, to
/// exercise the adapter's boundary validation.
pub struct ScriptedRlScene {
    time: f64,
    num_agents: usize,
    state_size: usize,
    goal_size: usize,
    action_size: usize,
    num_actions: usize,
    action_space: ActionSpace,
    reward: f64,
    reward_range: (f64, f64),
    terminate: Terminate,
    produced_state_size: Option<usize>,
    probe: Arc<RlProbe>,
}

impl ScriptedRlScene {
    pub fn new(num_agents: usize, state_size: usize, goal_size: usize, action_size: usize) -> Self {
        Self {
            time: 0.0,
            num_agents,
            state_size,
            goal_size,
            action_size,
            num_actions: 0,
            action_space: ActionSpace::Continuous,
            reward: 0.5,
            reward_range: (0.0, 1.0),
            terminate: Terminate::None,
            produced_state_size: None,
            probe: RlProbe::new(),
        }
    }

    pub fn with_probe(mut self, probe: Arc<RlProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Switch to a discrete action space with `num_actions` choices.
    pub fn with_discrete(mut self, num_actions: usize) -> Self {
        self.action_space = ActionSpace::Discrete;
        self.num_actions = num_actions;
        self
    }

    pub fn with_reward(mut self, reward: f64, min: f64, max: f64) -> Self {
        self.reward = reward;
        self.reward_range = (min, max);
        self
    }

    pub fn with_terminate(mut self, terminate: Terminate) -> Self {
        self.terminate = terminate;
        self
    }

    /// Announce `state_size` but fill `produced` dimensions instead.
    pub fn with_produced_state_size(mut self, produced: usize) -> Self {
        self.produced_state_size = Some(produced);
        self
    }
}

impl Scene for ScriptedRlScene {
    fn name(&self) -> &str {
        "scripted_rl"
    }

    fn update(&mut self, timestep: f64) {
        self.time += timestep;
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn is_done(&self) -> bool {
        false
    }

    fn is_episode_end(&self) -> bool {
        false
    }
}

impl RlScene for ScriptedRlScene {
    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn need_new_action(&self, _agent: AgentId) -> bool {
        true
    }

    fn record_state(&self, agent: AgentId, out: &mut Vec<f64>) {
        let produced = self.produced_state_size.unwrap_or(self.state_size);
        out.clear();
        out.extend((0..produced).map(|i| (agent.0 * 100 + i) as f64));
    }

    fn record_goal(&self, agent: AgentId, out: &mut Vec<f64>) {
        out.clear();
        out.extend((0..self.goal_size).map(|i| (agent.0 * 100 + i) as f64 + 0.5));
    }

    fn set_action(&mut self, agent: AgentId, action: &[f64]) {
        self.probe
            .actions
            .lock()
            .unwrap()
            .push((agent, action.to_vec()));
    }

    fn log_val(&mut self, agent: AgentId, val: f64) {
        self.probe.logged.lock().unwrap().push((agent, val));
    }

    fn action_space(&self, _agent: AgentId) -> ActionSpace {
        self.action_space
    }

    fn state_size(&self, _agent: AgentId) -> usize {
        self.state_size
    }

    fn goal_size(&self, _agent: AgentId) -> usize {
        self.goal_size
    }

    fn action_size(&self, _agent: AgentId) -> usize {
        self.action_size
    }

    fn num_actions(&self, _agent: AgentId) -> usize {
        self.num_actions
    }

    fn build_state_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.resize(self.state_size, 0.0);
        scale.clear();
        scale.resize(self.state_size, 1.0);
    }

    fn build_goal_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.resize(self.goal_size, 0.0);
        scale.clear();
        scale.resize(self.goal_size, 1.0);
    }

    fn build_action_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.resize(self.action_size, 0.0);
        scale.clear();
        scale.resize(self.action_size, 1.0);
    }

    fn build_action_bounds(&self, _agent: AgentId, min: &mut Vec<f64>, max: &mut Vec<f64>) {
        min.clear();
        min.resize(self.action_size, -1.0);
        max.clear();
        max.resize(self.action_size, 1.0);
    }

    fn build_state_norm_groups(&self, _agent: AgentId, out: &mut Vec<i32>) {
        out.clear();
        out.resize(self.state_size, NORM_GROUP_SINGLE);
    }

    fn build_goal_norm_groups(&self, _agent: AgentId, out: &mut Vec<i32>) {
        out.clear();
        out.resize(self.goal_size, NORM_GROUP_SINGLE);
    }

    fn calc_reward(&self, _agent: AgentId) -> f64 {
        self.reward
    }

    fn reward_min(&self, _agent: AgentId) -> f64 {
        self.reward_range.0
    }

    fn reward_max(&self, _agent: AgentId) -> f64 {
        self.reward_range.1
    }

    fn reward_fail(&self, _agent: AgentId) -> f64 {
        self.reward_range.0
    }

    fn reward_succ(&self, _agent: AgentId) -> f64 {
        self.reward_range.1
    }

    fn check_terminate(&self, _agent: AgentId) -> Terminate {
        self.terminate
    }

    fn set_mode(&mut self, mode: AgentMode) {
        self.probe.modes.lock().unwrap().push(mode);
    }

    fn set_sample_count(&mut self, count: u64) {
        self.probe.sample_counts.lock().unwrap().push(count);
    }
}
