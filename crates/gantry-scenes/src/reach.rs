//! Continuous-action reference scene: point-mass agents steering toward
//! per-agent goals.
//!
//! Respects the determinism contract: all randomization flows through a
//! seeded ChaCha8 RNG (`rand_seed` argument), so identical seeds produce
//! identical episodes.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use gantry_core::{
    ActionSpace, AgentId, AgentMode, ArgError, ArgSet, RlScene, Scene, Terminate,
};

const STATE_SIZE: usize = 4;
const GOAL_SIZE: usize = 2;
const ACTION_SIZE: usize = 2;

/// Position dimensions (state and goal) share one normalization group.
const POS_GROUP: i32 = 1;
/// Velocity dimensions share another.
const VEL_GROUP: i32 = 2;

/// Sample count at which the goal-distance curriculum saturates.
const CURRICULUM_SAMPLES: u64 = 100_000;

struct AgentBody {
    pos: (f64, f64),
    vel: (f64, f64),
    goal: (f64, f64),
    force: (f64, f64),
    needs_action: bool,
}

/// N point-mass agents steering toward per-agent goal positions.
///
/// State per agent is `[x, y, vx, vy]`, goal `[gx, gy]`, action
/// `[fx, fy]` clamped to symmetric force bounds. Reward is shaped by
/// goal distance into `[0, 1]`. An agent terminates with `Success`
/// inside the goal radius and `Fail` on leaving the arena.
///
/// In `Train` mode resets randomize starts and goals, with the goal
/// spawn distance growing as the learner reports samples (a distance
/// curriculum). In `Test` mode resets use a fixed ring layout.
pub struct ReachScene {
    num_agents: usize,
    arena_half: f64,
    max_force: f64,
    max_speed: f64,
    goal_radius: f64,
    decision_dt: f64,
    episode_len: f64,
    seed: u64,
    mode: AgentMode,
    sample_count: u64,
    time: f64,
    decision_timer: f64,
    rng: ChaCha8Rng,
    agents: Vec<AgentBody>,
    logged: Vec<Vec<f64>>,
}

impl Default for ReachScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ReachScene {
    /// Create the scene with default parameters (4 agents, 4×4 arena,
    /// 20 s episodes). `parse_args` can override agent count, seed, and
    /// episode length.
    pub fn new() -> Self {
        Self {
            num_agents: 4,
            arena_half: 4.0,
            max_force: 1.0,
            max_speed: 2.0,
            goal_radius: 0.25,
            decision_dt: 0.1,
            episode_len: 20.0,
            seed: 1337,
            mode: AgentMode::Train,
            sample_count: 0,
            time: 0.0,
            decision_timer: 0.0,
            rng: ChaCha8Rng::seed_from_u64(1337),
            agents: Vec::new(),
            logged: Vec::new(),
        }
    }

    /// Values logged against `agent` via the telemetry hook.
    pub fn logged_vals(&self, agent: AgentId) -> &[f64] {
        &self.logged[agent.0]
    }

    /// Distance from `agent` to its goal.
    pub fn goal_distance(&self, agent: AgentId) -> f64 {
        let body = &self.agents[agent.0];
        let dx = body.pos.0 - body.goal.0;
        let dy = body.pos.1 - body.goal.1;
        dx.hypot(dy)
    }

    fn curriculum_spawn_radius(&self) -> f64 {
        let fraction = (self.sample_count as f64 / CURRICULUM_SAMPLES as f64).min(1.0);
        let near = 4.0 * self.goal_radius;
        near + fraction * (self.arena_half - near)
    }

    fn uniform(&mut self, half_range: f64) -> f64 {
        (self.rng.random::<f64>() - 0.5) * 2.0 * half_range
    }

    fn respawn(&mut self) {
        let spawn_radius = self.curriculum_spawn_radius();
        for i in 0..self.num_agents {
            let (pos, goal) = match self.mode {
                AgentMode::Train => {
                    let pos = (self.uniform(self.arena_half * 0.5), self.uniform(self.arena_half * 0.5));
                    let goal = (
                        (pos.0 + self.uniform(spawn_radius)).clamp(-self.arena_half, self.arena_half),
                        (pos.1 + self.uniform(spawn_radius)).clamp(-self.arena_half, self.arena_half),
                    );
                    (pos, goal)
                }
                AgentMode::Test => {
                    // Fixed ring layout: agents evenly spaced, goals
                    // diametrically opposite.
                    let angle = i as f64 * std::f64::consts::TAU / self.num_agents.max(1) as f64;
                    let r = self.arena_half * 0.5;
                    ((r * angle.cos(), r * angle.sin()), (-r * angle.cos(), -r * angle.sin()))
                }
            };
            self.agents[i] = AgentBody {
                pos,
                vel: (0.0, 0.0),
                goal,
                force: (0.0, 0.0),
                needs_action: true,
            };
        }
    }

    fn max_goal_distance(&self) -> f64 {
        // Opposite corners of the arena.
        2.0 * std::f64::consts::SQRT_2 * self.arena_half
    }
}

impl Scene for ReachScene {
    fn name(&self) -> &str {
        "reach"
    }

    fn parse_args(&mut self, args: &ArgSet) -> Result<(), ArgError> {
        let count = args.parse_int_or("num_agents", self.num_agents as i64)?;
        if count < 1 {
            return Err(ArgError::BadValue {
                key: "num_agents".to_string(),
                value: count.to_string(),
                expected: "positive int",
            });
        }
        self.num_agents = count as usize;
        self.seed = args.parse_int_or("rand_seed", self.seed as i64)? as u64;
        self.episode_len = args.parse_f64_or("episode_len", self.episode_len)?;
        Ok(())
    }

    fn init(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.agents = (0..self.num_agents)
            .map(|_| AgentBody {
                pos: (0.0, 0.0),
                vel: (0.0, 0.0),
                goal: (0.0, 0.0),
                force: (0.0, 0.0),
                needs_action: true,
            })
            .collect();
        self.logged = vec![Vec::new(); self.num_agents];
        self.time = 0.0;
        self.decision_timer = 0.0;
        self.respawn();
    }

    fn update(&mut self, timestep: f64) {
        for body in &mut self.agents {
            body.vel.0 += body.force.0 * timestep;
            body.vel.1 += body.force.1 * timestep;
            let speed = body.vel.0.hypot(body.vel.1);
            if speed > self.max_speed {
                let k = self.max_speed / speed;
                body.vel.0 *= k;
                body.vel.1 *= k;
            }
            body.pos.0 += body.vel.0 * timestep;
            body.pos.1 += body.vel.1 * timestep;
        }

        self.time += timestep;
        self.decision_timer += timestep;
        if self.decision_timer >= self.decision_dt {
            self.decision_timer -= self.decision_dt;
            for body in &mut self.agents {
                body.needs_action = true;
            }
        }
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.decision_timer = 0.0;
        for log in &mut self.logged {
            log.clear();
        }
        self.respawn();
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn is_done(&self) -> bool {
        false
    }

    fn is_episode_end(&self) -> bool {
        if self.time >= self.episode_len {
            return true;
        }
        (0..self.num_agents).any(|i| self.check_terminate(AgentId(i)).is_terminal())
    }

    fn check_valid_episode(&self) -> bool {
        self.agents.iter().all(|b| {
            b.pos.0.is_finite() && b.pos.1.is_finite() && b.vel.0.is_finite() && b.vel.1.is_finite()
        })
    }
}

impl RlScene for ReachScene {
    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn need_new_action(&self, agent: AgentId) -> bool {
        self.agents[agent.0].needs_action
    }

    fn record_state(&self, agent: AgentId, out: &mut Vec<f64>) {
        let body = &self.agents[agent.0];
        out.clear();
        out.extend([body.pos.0, body.pos.1, body.vel.0, body.vel.1]);
    }

    fn record_goal(&self, agent: AgentId, out: &mut Vec<f64>) {
        let body = &self.agents[agent.0];
        out.clear();
        out.extend([body.goal.0, body.goal.1]);
    }

    fn set_action(&mut self, agent: AgentId, action: &[f64]) {
        let body = &mut self.agents[agent.0];
        body.force = (
            action[0].clamp(-self.max_force, self.max_force),
            action[1].clamp(-self.max_force, self.max_force),
        );
        body.needs_action = false;
    }

    fn log_val(&mut self, agent: AgentId, val: f64) {
        self.logged[agent.0].push(val);
    }

    fn action_space(&self, _agent: AgentId) -> ActionSpace {
        ActionSpace::Continuous
    }

    fn state_size(&self, _agent: AgentId) -> usize {
        STATE_SIZE
    }

    fn goal_size(&self, _agent: AgentId) -> usize {
        GOAL_SIZE
    }

    fn action_size(&self, _agent: AgentId) -> usize {
        ACTION_SIZE
    }

    fn num_actions(&self, _agent: AgentId) -> usize {
        0
    }

    fn build_state_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.resize(STATE_SIZE, 0.0);
        scale.clear();
        scale.extend([
            1.0 / self.arena_half,
            1.0 / self.arena_half,
            1.0 / self.max_speed,
            1.0 / self.max_speed,
        ]);
    }

    fn build_goal_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.resize(GOAL_SIZE, 0.0);
        scale.clear();
        scale.resize(GOAL_SIZE, 1.0 / self.arena_half);
    }

    fn build_action_offset_scale(
        &self,
        _agent: AgentId,
        offset: &mut Vec<f64>,
        scale: &mut Vec<f64>,
    ) {
        offset.clear();
        offset.resize(ACTION_SIZE, 0.0);
        scale.clear();
        scale.resize(ACTION_SIZE, 1.0 / self.max_force);
    }

    fn build_action_bounds(&self, _agent: AgentId, min: &mut Vec<f64>, max: &mut Vec<f64>) {
        min.clear();
        min.resize(ACTION_SIZE, -self.max_force);
        max.clear();
        max.resize(ACTION_SIZE, self.max_force);
    }

    fn build_state_norm_groups(&self, _agent: AgentId, out: &mut Vec<i32>) {
        out.clear();
        out.extend([POS_GROUP, POS_GROUP, VEL_GROUP, VEL_GROUP]);
    }

    fn build_goal_norm_groups(&self, _agent: AgentId, out: &mut Vec<i32>) {
        out.clear();
        out.extend([POS_GROUP, POS_GROUP]);
    }

    fn calc_reward(&self, agent: AgentId) -> f64 {
        let normalized = self.goal_distance(agent) / self.max_goal_distance();
        1.0 - normalized.min(1.0)
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

    fn check_terminate(&self, agent: AgentId) -> Terminate {
        let body = &self.agents[agent.0];
        if body.pos.0.abs() > self.arena_half || body.pos.1.abs() > self.arena_half {
            return Terminate::Fail;
        }
        if self.goal_distance(agent) <= self.goal_radius {
            return Terminate::Success;
        }
        Terminate::None
    }

    fn set_mode(&mut self, mode: AgentMode) {
        self.mode = mode;
    }

    fn set_sample_count(&mut self, count: u64) {
        self.sample_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scene(num_agents: usize, seed: u64) -> ReachScene {
        let mut scene = ReachScene::new();
        let mut args = ArgSet::new();
        args.load_args(&[
            format!("--num_agents={num_agents}"),
            format!("--rand_seed={seed}"),
        ])
        .unwrap();
        scene.parse_args(&args).unwrap();
        scene.init();
        scene
    }

    #[test]
    fn sizes_are_announced_consistently() {
        let scene = scene(3, 7);
        let agent = AgentId(0);
        let mut out = Vec::new();
        scene.record_state(agent, &mut out);
        assert_eq!(out.len(), scene.state_size(agent));
        scene.record_goal(agent, &mut out);
        assert_eq!(out.len(), scene.goal_size(agent));

        let (mut offset, mut scale) = (Vec::new(), Vec::new());
        scene.build_state_offset_scale(agent, &mut offset, &mut scale);
        assert_eq!(offset.len(), STATE_SIZE);
        assert_eq!(scale.len(), STATE_SIZE);
        scene.build_action_bounds(agent, &mut offset, &mut scale);
        assert_eq!(offset.len(), ACTION_SIZE);
        assert_eq!(scale.len(), ACTION_SIZE);

        let mut groups = Vec::new();
        scene.build_state_norm_groups(agent, &mut groups);
        assert_eq!(groups, vec![POS_GROUP, POS_GROUP, VEL_GROUP, VEL_GROUP]);
    }

    #[test]
    fn same_seed_same_episode() {
        let mut a = scene(4, 99);
        let mut b = scene(4, 99);
        let mut state_a = Vec::new();
        let mut state_b = Vec::new();
        for _ in 0..50 {
            a.update(0.05);
            b.update(0.05);
        }
        for i in 0..4 {
            a.record_state(AgentId(i), &mut state_a);
            b.record_state(AgentId(i), &mut state_b);
            assert_eq!(state_a, state_b);
        }
    }

    #[test]
    fn decision_cadence_follows_the_interval() {
        let mut scene = scene(2, 1);
        let agent = AgentId(0);
        assert!(scene.need_new_action(agent));
        scene.set_action(agent, &[0.5, 0.0]);
        assert!(!scene.need_new_action(agent));
        // decision_dt is 0.1; two 0.06 s steps cross it.
        scene.update(0.06);
        assert!(!scene.need_new_action(agent));
        scene.update(0.06);
        assert!(scene.need_new_action(agent));
    }

    #[test]
    fn force_drives_the_agent_toward_positive_x() {
        let mut scene = scene(1, 5);
        let agent = AgentId(0);
        let mut before = Vec::new();
        scene.record_state(agent, &mut before);
        scene.set_action(agent, &[1.0, 0.0]);
        for _ in 0..20 {
            scene.update(0.05);
        }
        let mut after = Vec::new();
        scene.record_state(agent, &mut after);
        assert!(after[0] > before[0], "agent did not move +x: {before:?} -> {after:?}");
        assert!(after[2] > 0.0, "velocity not positive: {after:?}");
    }

    #[test]
    fn oversized_action_is_clamped_to_bounds() {
        let mut scene = scene(1, 5);
        let agent = AgentId(0);
        scene.set_action(agent, &[100.0, -100.0]);
        assert_eq!(scene.agents[0].force, (1.0, -1.0));
    }

    #[test]
    fn escaping_the_arena_fails_the_agent() {
        let mut scene = scene(1, 5);
        scene.agents[0].pos = (5.0, 0.0);
        assert_eq!(scene.check_terminate(AgentId(0)), Terminate::Fail);
        assert!(scene.is_episode_end());
    }

    #[test]
    fn reaching_the_goal_succeeds() {
        let mut scene = scene(1, 5);
        scene.agents[0].pos = scene.agents[0].goal;
        assert_eq!(scene.check_terminate(AgentId(0)), Terminate::Success);
    }

    #[test]
    fn nan_position_invalidates_the_episode() {
        let mut scene = scene(1, 5);
        assert!(scene.check_valid_episode());
        scene.agents[0].pos.0 = f64::NAN;
        assert!(!scene.check_valid_episode());
    }

    #[test]
    fn test_mode_reset_is_deterministic_without_seed() {
        let mut a = scene(3, 11);
        let mut b = scene(3, 222);
        a.set_mode(AgentMode::Test);
        b.set_mode(AgentMode::Test);
        a.reset();
        b.reset();
        let mut state_a = Vec::new();
        let mut state_b = Vec::new();
        for i in 0..3 {
            a.record_state(AgentId(i), &mut state_a);
            b.record_state(AgentId(i), &mut state_b);
            assert_eq!(state_a, state_b);
        }
    }

    #[test]
    fn curriculum_radius_grows_with_samples() {
        let mut scene = scene(1, 5);
        let near = scene.curriculum_spawn_radius();
        scene.set_sample_count(CURRICULUM_SAMPLES);
        let far = scene.curriculum_spawn_radius();
        assert!(far > near);
        assert!((far - scene.arena_half).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn reward_stays_within_announced_bounds(
            x in -4.0f64..4.0,
            y in -4.0f64..4.0,
            gx in -4.0f64..4.0,
            gy in -4.0f64..4.0,
        ) {
            let mut scene = scene(1, 5);
            scene.agents[0].pos = (x, y);
            scene.agents[0].goal = (gx, gy);
            let agent = AgentId(0);
            let r = scene.calc_reward(agent);
            prop_assert!(r >= scene.reward_min(agent));
            prop_assert!(r <= scene.reward_max(agent));
        }
    }
}
