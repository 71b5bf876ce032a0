//! Non-RL reference scene: particles drifting under constant velocity.

use gantry_core::{ArgError, ArgSet, Scene};

/// Particles translating at fixed velocities inside a unit box, wrapping
/// at the edges.
///
/// Carries no RL capability at all — hosts and adapters must degrade
/// gracefully when driving it. Episodes end on elapsed time.
pub struct DriftScene {
    positions: Vec<(f64, f64)>,
    velocities: Vec<(f64, f64)>,
    num_particles: usize,
    episode_len: f64,
    time: f64,
}

impl Default for DriftScene {
    fn default() -> Self {
        Self::new()
    }
}

impl DriftScene {
    /// Create the scene with default parameters (8 particles, 10 s
    /// episodes). `parse_args` can override both.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            velocities: Vec::new(),
            num_particles: 8,
            episode_len: 10.0,
            time: 0.0,
        }
    }

    /// Particle positions after the most recent update.
    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    fn seed_particles(&mut self) {
        // Deterministic fan of headings; no RNG needed for a demo field.
        self.positions = (0..self.num_particles)
            .map(|i| {
                let t = i as f64 / self.num_particles.max(1) as f64;
                (t - 0.5, 0.5 - t)
            })
            .collect();
        self.velocities = (0..self.num_particles)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / self.num_particles.max(1) as f64;
                (0.2 * angle.cos(), 0.2 * angle.sin())
            })
            .collect();
    }
}

impl Scene for DriftScene {
    fn name(&self) -> &str {
        "drift"
    }

    fn parse_args(&mut self, args: &ArgSet) -> Result<(), ArgError> {
        let count = args.parse_int_or("num_particles", self.num_particles as i64)?;
        if count < 1 {
            return Err(ArgError::BadValue {
                key: "num_particles".to_string(),
                value: count.to_string(),
                expected: "positive int",
            });
        }
        self.num_particles = count as usize;
        self.episode_len = args.parse_f64_or("episode_len", self.episode_len)?;
        Ok(())
    }

    fn init(&mut self) {
        self.seed_particles();
        self.time = 0.0;
    }

    fn update(&mut self, timestep: f64) {
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            pos.0 += vel.0 * timestep;
            pos.1 += vel.1 * timestep;
            // Wrap into [-0.5, 0.5] on both axes.
            pos.0 = (pos.0 + 0.5).rem_euclid(1.0) - 0.5;
            pos.1 = (pos.1 + 0.5).rem_euclid(1.0) - 0.5;
        }
        self.time += timestep;
    }

    fn reset(&mut self) {
        self.seed_particles();
        self.time = 0.0;
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
