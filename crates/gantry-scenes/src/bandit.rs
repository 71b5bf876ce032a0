//! Discrete-action reference scene: per-agent K-armed bandits.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use gantry_core::{
    ActionSpace, AgentId, AgentMode, ArgError, ArgSet, RlScene, Scene, Terminate,
    NORM_GROUP_NONE,
};

const STATE_SIZE: usize = 1;
const ACTION_SIZE: usize = 1;

/// Sample count at which the payout-noise schedule reaches zero.
const SCHEDULE_SAMPLES: u64 = 50_000;

/// Each agent pulls one of K arms per decision; arms pay a fixed mean in
/// `[0, 1]` plus training noise.
///
/// The discrete counterpart to [`ReachScene`](crate::ReachScene): the
/// action vector has length 1 and carries an arm index in
/// `[0, num_actions)`. In `Train` mode payouts are perturbed by noise
/// that decays as the learner reports samples; `Test` mode pays the
/// exact means. `Train` resets redraw the arm means, `Test` resets keep
/// them.
pub struct BanditScene {
    num_agents: usize,
    num_arms: usize,
    noise_scale: f64,
    episode_len: f64,
    seed: u64,
    mode: AgentMode,
    sample_count: u64,
    time: f64,
    rng: ChaCha8Rng,
    arm_means: Vec<Vec<f64>>,
    selected: Vec<Option<usize>>,
    last_payout: Vec<f64>,
    pulls: Vec<u64>,
}

impl Default for BanditScene {
    fn default() -> Self {
        Self::new()
    }
}

impl BanditScene {
    /// Create the scene with default parameters (2 agents, 5 arms, 10 s
    /// episodes). `parse_args` can override all of them.
    pub fn new() -> Self {
        Self {
            num_agents: 2,
            num_arms: 5,
            noise_scale: 0.2,
            episode_len: 10.0,
            seed: 1337,
            mode: AgentMode::Train,
            sample_count: 0,
            time: 0.0,
            rng: ChaCha8Rng::seed_from_u64(1337),
            arm_means: Vec::new(),
            selected: Vec::new(),
            last_payout: Vec::new(),
            pulls: Vec::new(),
        }
    }

    /// Number of pulls `agent` has made this episode.
    pub fn pulls(&self, agent: AgentId) -> u64 {
        self.pulls[agent.0]
    }

    /// Mean payout of `arm` for `agent`.
    pub fn arm_mean(&self, agent: AgentId, arm: usize) -> f64 {
        self.arm_means[agent.0][arm]
    }

    fn draw_means(&mut self) {
        self.arm_means = (0..self.num_agents)
            .map(|_| (0..self.num_arms).map(|_| self.rng.random::<f64>()).collect())
            .collect();
    }

    fn scheduled_noise(&self) -> f64 {
        let fraction = (self.sample_count as f64 / SCHEDULE_SAMPLES as f64).min(1.0);
        self.noise_scale * (1.0 - fraction)
    }

    fn clear_episode(&mut self) {
        self.selected = vec![None; self.num_agents];
        self.last_payout = vec![0.0; self.num_agents];
        self.pulls = vec![0; self.num_agents];
        self.time = 0.0;
    }
}

impl Scene for BanditScene {
    fn name(&self) -> &str {
        "bandit"
    }

    fn parse_args(&mut self, args: &ArgSet) -> Result<(), ArgError> {
        let agents = args.parse_int_or("num_agents", self.num_agents as i64)?;
        if agents < 1 {
            return Err(ArgError::BadValue {
                key: "num_agents".to_string(),
                value: agents.to_string(),
                expected: "positive int",
            });
        }
        self.num_agents = agents as usize;

        let arms = args.parse_int_or("num_arms", self.num_arms as i64)?;
        if arms < 2 {
            return Err(ArgError::BadValue {
                key: "num_arms".to_string(),
                value: arms.to_string(),
                expected: "int >= 2",
            });
        }
        self.num_arms = arms as usize;

        self.seed = args.parse_int_or("rand_seed", self.seed as i64)? as u64;
        self.episode_len = args.parse_f64_or("episode_len", self.episode_len)?;
        Ok(())
    }

    fn init(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.draw_means();
        self.clear_episode();
    }

    fn update(&mut self, timestep: f64) {
        let noise = self.scheduled_noise();
        for i in 0..self.num_agents {
            let Some(arm) = self.selected[i].take() else {
                continue;
            };
            let mean = self.arm_means[i][arm];
            let payout = match self.mode {
                AgentMode::Train => {
                    let jitter = (self.rng.random::<f64>() - 0.5) * 2.0 * noise;
                    (mean + jitter).clamp(0.0, 1.0)
                }
                AgentMode::Test => mean,
            };
            self.last_payout[i] = payout;
            self.pulls[i] += 1;
        }
        self.time += timestep;
    }

    fn reset(&mut self) {
        if self.mode == AgentMode::Train {
            self.draw_means();
        }
        self.clear_episode();
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
}

impl RlScene for BanditScene {
    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn need_new_action(&self, agent: AgentId) -> bool {
        self.selected[agent.0].is_none()
    }

    fn record_state(&self, agent: AgentId, out: &mut Vec<f64>) {
        out.clear();
        out.push(self.last_payout[agent.0]);
    }

    fn record_goal(&self, _agent: AgentId, out: &mut Vec<f64>) {
        out.clear();
    }

    /// Select an arm for `agent`.
    ///
    /// # Panics
    ///
    /// Panics if the carried arm index is outside `[0, num_actions)`.
    fn set_action(&mut self, agent: AgentId, action: &[f64]) {
        let arm = action[0].round();
        assert!(
            arm >= 0.0 && (arm as usize) < self.num_arms,
            "arm {arm} for agent {agent} out of range [0, {})",
            self.num_arms,
        );
        self.selected[agent.0] = Some(arm as usize);
    }

    fn action_space(&self, _agent: AgentId) -> ActionSpace {
        ActionSpace::Discrete
    }

    fn state_size(&self, _agent: AgentId) -> usize {
        STATE_SIZE
    }

    fn goal_size(&self, _agent: AgentId) -> usize {
        0
    }

    fn action_size(&self, _agent: AgentId) -> usize {
        ACTION_SIZE
    }

    fn num_actions(&self, _agent: AgentId) -> usize {
        self.num_arms
    }

    fn build_state_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        // Payouts live in [0, 1]; map to [-1, 1].
        offset.clear();
        offset.push(0.5);
        scale.clear();
        scale.push(2.0);
    }

    fn build_goal_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        scale.clear();
    }

    fn build_action_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.push(0.0);
        scale.clear();
        scale.push(1.0);
    }

    fn build_action_bounds(&self, _agent: AgentId, min: &mut Vec<f64>, max: &mut Vec<f64>) {
        min.clear();
        min.push(0.0);
        max.clear();
        max.push((self.num_arms - 1) as f64);
    }

    fn build_state_norm_groups(&self, _agent: AgentId, out: &mut Vec<i32>) {
        // Already normalized by offset/scale; exclude from normalizer
        // updates.
        out.clear();
        out.push(NORM_GROUP_NONE);
    }

    fn build_goal_norm_groups(&self, _agent: AgentId, out: &mut Vec<i32>) {
        out.clear();
    }

    fn calc_reward(&self, agent: AgentId) -> f64 {
        self.last_payout[agent.0]
    }

    fn reward_min(&self, _agent: AgentId) -> f64 {
        0.0
    }

    fn reward_max(&self, _agent: AgentId) -> f64 {
        1.0
    }

    fn reward_fail(&self, _agent: AgentId) -> f64 {
        0.0
    }

    fn reward_succ(&self, _agent: AgentId) -> f64 {
        1.0
    }

    fn check_terminate(&self, _agent: AgentId) -> Terminate {
        Terminate::None
    }

    fn set_mode(&mut self, mode: AgentMode) {
        self.mode = mode;
    }

    fn set_sample_count(&mut self, count: u64) {
        self.sample_count = count;
    }
}
