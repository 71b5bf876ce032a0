//! Criterion micro-benchmarks for the hot adapter queries.

use criterion::{criterion_group, criterion_main, Criterion};
use gantry_core::{AgentId, SceneInstance};
use gantry_host::{HostConfig, SceneHost, SceneRegistry};
use gantry_scenes::ReachScene;

fn reach_host(num_agents: usize) -> SceneHost {
    let mut registry = SceneRegistry::new();
    registry.register_fn("reach", || SceneInstance::Rl(Box::new(ReachScene::new())));
    let mut host = SceneHost::new(HostConfig::default(), registry).unwrap();
    host.parse_args(&[
        "--scene=reach".to_string(),
        format!("--num_agents={num_agents}"),
    ])
    .unwrap();
    host.setup().unwrap();
    host
}

/// Benchmark: one full decision read (state + goal + reward) per agent.
fn bench_decision_read_16_agents(c: &mut Criterion) {
    let mut host = reach_host(16);
    c.bench_function("decision_read_16_agents", |b| {
        b.iter(|| {
            let adapter = host.adapter();
            for id in 0..16 {
                let agent = AgentId(id);
                let state = adapter.record_state(agent);
                let goal = adapter.record_goal(agent);
                let reward = adapter.calc_reward(agent);
                std::hint::black_box((&state, &goal, reward));
            }
        });
    });
}

/// Benchmark: capability check plus size queries, the per-call overhead
/// every forwarded operation pays.
fn bench_size_queries(c: &mut Criterion) {
    let mut host = reach_host(4);
    c.bench_function("size_queries", |b| {
        b.iter(|| {
            let adapter = host.adapter();
            let agent = AgentId(0);
            std::hint::black_box((
                adapter.num_agents(),
                adapter.state_size(agent),
                adapter.goal_size(agent),
                adapter.action_size(agent),
            ));
        });
    });
}

/// Benchmark: set_action with length validation, 16 agents.
fn bench_set_action_16_agents(c: &mut Criterion) {
    let mut host = reach_host(16);
    let action = [0.5, -0.5];
    c.bench_function("set_action_16_agents", |b| {
        b.iter(|| {
            let mut adapter = host.adapter();
            for id in 0..16 {
                adapter.set_action(AgentId(id), &action);
            }
        });
    });
}

/// Benchmark: a whole act → step → observe tick, 4 agents.
fn bench_full_tick_4_agents(c: &mut Criterion) {
    let mut host = reach_host(4);
    c.bench_function("full_tick_4_agents", |b| {
        b.iter(|| {
            for id in 0..4 {
                let agent = AgentId(id);
                if host.adapter().need_new_action(agent) {
                    let state = host.adapter().record_state(agent);
                    let goal = host.adapter().record_goal(agent);
                    let action = [
                        (goal[0] - state[0]).clamp(-1.0, 1.0),
                        (goal[1] - state[1]).clamp(-1.0, 1.0),
                    ];
                    host.adapter().set_action(agent, &action);
                }
            }
            host.update(1.0 / 60.0);
            let reward: f64 = (0..4)
                .map(|id| host.adapter().calc_reward(AgentId(id)))
                .sum();
            std::hint::black_box(reward);
        });
    });
}

criterion_group!(
    benches,
    bench_decision_read_16_agents,
    bench_size_queries,
    bench_set_action_16_agents,
    bench_full_tick_4_agents,
);
criterion_main!(benches);
