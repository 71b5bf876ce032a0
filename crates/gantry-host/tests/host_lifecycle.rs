//! End-to-end host lifecycle tests using the observable mock scenes.

use std::sync::Arc;

use gantry_core::{ButtonState, MouseButton, SceneInstance};
use gantry_host::{HostConfig, SceneHost, SceneRegistry, SetupError};
use gantry_test_utils::{NullScene, SceneProbe};

fn strs(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

fn probed_registry(probe: Arc<SceneProbe>) -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    registry.register(
        "null",
        Box::new(move || {
            SceneInstance::Plain(Box::new(NullScene::with_probe("null", probe.clone())))
        }),
    );
    registry
}

fn probed_host(config: HostConfig) -> (SceneHost, Arc<SceneProbe>) {
    let probe = SceneProbe::new();
    let mut host = SceneHost::new(config, probed_registry(probe.clone())).unwrap();
    host.parse_args(&strs(&["--scene=null"])).unwrap();
    host.setup().unwrap();
    (host, probe)
}

// ── Setup and replacement ────────────────────────────────────

#[test]
fn setup_initializes_exactly_once() {
    let (host, probe) = probed_host(HostConfig::default());
    assert!(host.has_scene());
    assert!(!host.is_rl_scene());
    assert_eq!(host.name(), "null");
    assert_eq!(
        probe.init_calls.load(std::sync::atomic::Ordering::Relaxed),
        1
    );
}

#[test]
fn second_setup_leaves_exactly_one_live_instance() {
    let (mut host, probe) = probed_host(HostConfig::default());
    host.update(0.1);
    assert_eq!(probe.updates(), 1);
    assert_eq!(probe.drops(), 0);

    host.setup().unwrap();
    // The first instance was destroyed before the second was built.
    assert_eq!(probe.drops(), 1);
    assert!(host.has_scene());

    // Further stepping reaches only the second instance.
    host.update(0.1);
    host.update(0.1);
    assert_eq!(probe.updates(), 3);
    assert_eq!(host.metrics().total_updates, 2);
    assert_eq!(host.time(), 0.2);
}

#[test]
fn failed_setup_leaves_host_sceneless() {
    let (mut host, probe) = probed_host(HostConfig::default());
    host.parse_args(&strs(&["--scene=missing"])).unwrap();
    let err = host.setup().unwrap_err();
    assert!(matches!(err, SetupError::UnknownScene { .. }));
    assert!(!host.has_scene());
    // The previous instance was still destroyed.
    assert_eq!(probe.drops(), 1);
}

#[test]
fn missing_scene_argument_is_reported() {
    let registry = SceneRegistry::new();
    let mut host = SceneHost::new(HostConfig::default(), registry).unwrap();
    let err = host.setup().unwrap_err();
    assert!(matches!(err, SetupError::MissingSceneArg));
}

#[test]
fn scene_arg_rejection_fails_setup() {
    let mut registry = SceneRegistry::new();
    registry.register(
        "picky",
        Box::new(|| {
            SceneInstance::Plain(Box::new(
                NullScene::new("picky").with_required_arg("character_file"),
            ))
        }),
    );
    let mut host = SceneHost::new(HostConfig::default(), registry).unwrap();
    host.parse_args(&strs(&["--scene=picky"])).unwrap();
    let err = host.setup().unwrap_err();
    assert!(matches!(err, SetupError::SceneArgs(_)));
    assert!(!host.has_scene());
}

#[test]
#[should_panic(expected = "no live scene")]
fn updating_a_sceneless_host_panics() {
    let registry = SceneRegistry::new();
    let mut host = SceneHost::new(HostConfig::default(), registry).unwrap();
    host.update(0.1);
}

// ── Argument flow ────────────────────────────────────────────

#[test]
fn arg_file_entries_yield_to_command_line() {
    let dir = std::env::temp_dir().join("gantry_host_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("host.args");
    std::fs::write(&path, "--scene other\n--num_update_substeps 8\n").unwrap();

    let probe = SceneProbe::new();
    let mut host =
        SceneHost::new(HostConfig::default(), probed_registry(probe.clone())).unwrap();
    host.parse_args(&[
        "--scene=null".to_string(),
        format!("--arg_file={}", path.display()),
    ])
    .unwrap();
    host.setup().unwrap();

    // Command line won for `scene`; the file supplied the substeps.
    assert_eq!(host.name(), "null");
    assert_eq!(host.num_update_substeps(), 8);
}

#[test]
fn missing_arg_file_is_surfaced_not_fatal() {
    let probe = SceneProbe::new();
    let mut host = SceneHost::new(HostConfig::default(), probed_registry(probe)).unwrap();
    let err = host
        .parse_args(&strs(&["--scene=null", "--arg_file=/nonexistent/run.args"]))
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/run.args"));
}

#[test]
fn substeps_and_playback_speed_are_overridable() {
    let (mut host, _probe) = probed_host(HostConfig::default());
    assert_eq!(host.num_update_substeps(), 1);
    assert_eq!(host.playback_speed(), 1.0);

    host.parse_args(&strs(&["--num_update_substeps=4", "--playback_speed=0.5"]))
        .unwrap();
    assert_eq!(host.num_update_substeps(), 4);
    assert_eq!(host.playback_speed(), 0.5);

    host.set_playback_speed(2.0);
    assert_eq!(host.playback_speed(), 2.0);
}

#[test]
fn zero_substeps_argument_is_rejected() {
    let (mut host, _probe) = probed_host(HostConfig::default());
    assert!(host
        .parse_args(&strs(&["--num_update_substeps=0"]))
        .is_err());
}

// ── Stepping, reset, metrics ─────────────────────────────────

#[test]
fn reset_restores_time_and_clears_rate() {
    let (mut host, probe) = probed_host(HostConfig::default());
    host.update(0.5);
    host.set_updates_per_sec(60.0);
    assert_eq!(host.metrics().updates_per_sec, 60.0);

    host.reset();
    assert_eq!(host.time(), 0.0);
    assert_eq!(host.metrics().updates_per_sec, 0.0);
    assert_eq!(probe.reset_calls.load(std::sync::atomic::Ordering::Relaxed), 1);
}

#[test]
fn shutdown_forwards_to_scene() {
    let (mut host, probe) = probed_host(HostConfig::default());
    host.shutdown();
    assert_eq!(
        probe.shutdown_calls.load(std::sync::atomic::Ordering::Relaxed),
        1
    );
    // The instance remains owned after shutdown.
    assert!(host.has_scene());
}

// ── Rendering ────────────────────────────────────────────────

#[test]
fn draw_renders_only_when_enabled() {
    let (mut host, probe) = probed_host(HostConfig {
        draw_enabled: true,
        ..HostConfig::default()
    });
    host.draw();
    host.draw();
    assert_eq!(probe.draw_calls.load(std::sync::atomic::Ordering::Relaxed), 2);

    let (mut headless, headless_probe) = probed_host(HostConfig::default());
    headless.draw();
    assert_eq!(
        headless_probe
            .draw_calls
            .load(std::sync::atomic::Ordering::Relaxed),
        0
    );
}

#[test]
fn drawing_and_stepping_are_independent() {
    let (mut host, probe) = probed_host(HostConfig {
        draw_enabled: true,
        ..HostConfig::default()
    });
    host.update(0.1);
    host.update(0.1);
    host.update(0.1);
    host.draw();
    assert_eq!(probe.updates(), 3);
    assert_eq!(probe.draw_calls.load(std::sync::atomic::Ordering::Relaxed), 1);
}

// ── Input mapping ────────────────────────────────────────────

#[test]
fn keyboard_positions_arrive_in_device_space() {
    let (mut host, probe) = probed_host(HostConfig {
        viewport_width: 200,
        viewport_height: 100,
        ..HostConfig::default()
    });

    host.keyboard('r', 0, 0);
    let (key, pos) = probe.last_key.lock().unwrap().unwrap();
    assert_eq!(key, 'r');
    assert_eq!((pos.x, pos.y), (-1.0, 1.0));

    host.keyboard('r', 200, 100);
    let (_, pos) = probe.last_key.lock().unwrap().unwrap();
    assert_eq!((pos.x, pos.y), (1.0, -1.0));

    host.keyboard('r', 100, 50);
    let (_, pos) = probe.last_key.lock().unwrap().unwrap();
    assert_eq!((pos.x, pos.y), (0.0, 0.0));
}

#[test]
fn mouse_events_forward_with_mapping() {
    let (mut host, probe) = probed_host(HostConfig {
        viewport_width: 200,
        viewport_height: 100,
        ..HostConfig::default()
    });

    host.mouse_click(MouseButton::Left, ButtonState::Pressed, 100, 0);
    let (button, state, pos) = probe.last_click.lock().unwrap().unwrap();
    assert_eq!(button, MouseButton::Left);
    assert_eq!(state, ButtonState::Pressed);
    assert_eq!((pos.x, pos.y), (0.0, 1.0));

    host.mouse_move(0, 50);
    let pos = probe.last_move.lock().unwrap().unwrap();
    assert_eq!((pos.x, pos.y), (-1.0, 0.0));
}

#[test]
fn reshape_updates_viewport_and_mapping() {
    let (mut host, probe) = probed_host(HostConfig {
        viewport_width: 200,
        viewport_height: 100,
        ..HostConfig::default()
    });

    host.reshape(400, 400);
    assert_eq!(*probe.last_reshape.lock().unwrap(), Some((400, 400)));
    assert_eq!(host.win_width(), 400);
    assert_eq!(host.win_height(), 400);
    assert_eq!(host.aspect_ratio(), 1.0);

    // The new viewport governs the mapping.
    host.mouse_move(400, 0);
    let pos = probe.last_move.lock().unwrap().unwrap();
    assert_eq!((pos.x, pos.y), (1.0, 1.0));
}
