//! The [`SceneHost`]: owns and drives one simulation instance end-to-end.

use std::path::PathBuf;

use gantry_core::{ArgError, ArgSet, SceneInstance};

use crate::adapter::RlAdapter;
use crate::config::{HostConfig, HostError};
use crate::coords::device_coord;
use crate::metrics::HostMetrics;
use crate::registry::{SceneRegistry, SetupError};
use crate::render::OffscreenBuffer;
use crate::telemetry::{NoopSink, TelemetrySink};

/// Owns exactly one live simulation instance and drives its lifecycle.
///
/// The host is constructed once with a validated [`HostConfig`] and a
/// [`SceneRegistry`]; scenes come and go through [`setup`](Self::setup).
/// Stepping ([`update`](Self::update)), rendering ([`draw`](Self::draw)),
/// and input forwarding are independent entry points for an external
/// loop — the host enforces no ratio between them, it only exposes the
/// configured substep count and playback speed for the loop to apply.
///
/// # Panics
///
/// Methods that require a live scene (`update`, `reset`, `time`, `name`,
/// `is_done`, input forwarding) panic when called before a successful
/// [`setup`](Self::setup). Driving a sceneless host is a programming
/// error, not a runtime condition; [`has_scene`](Self::has_scene) exists
/// for callers that genuinely do not know.
pub struct SceneHost {
    config: HostConfig,
    registry: SceneRegistry,
    args: ArgSet,
    scene: Option<SceneInstance>,
    framebuffer: Option<OffscreenBuffer>,
    viewport: (u32, u32),
    num_update_substeps: u32,
    playback_speed: f64,
    metrics: HostMetrics,
    telemetry: Box<dyn TelemetrySink>,
}

impl SceneHost {
    /// Create a host with no live scene.
    ///
    /// Validates `config`; when draw is enabled the offscreen render
    /// target is created here, sized to the configured viewport.
    pub fn new(config: HostConfig, registry: SceneRegistry) -> Result<Self, HostError> {
        config.validate()?;
        let framebuffer = config
            .draw_enabled
            .then(|| OffscreenBuffer::new(config.viewport_width, config.viewport_height));
        Ok(Self {
            viewport: (config.viewport_width, config.viewport_height),
            num_update_substeps: config.num_update_substeps,
            playback_speed: config.playback_speed,
            framebuffer,
            registry,
            config,
            args: ArgSet::new(),
            scene: None,
            metrics: HostMetrics::default(),
            telemetry: Box::new(NoopSink),
        })
    }

    /// Load startup arguments.
    ///
    /// Command-line tokens are loaded first; if they name an `arg_file`,
    /// its entries are appended without overriding command-line keys.
    /// The `num_update_substeps` and `playback_speed` arguments override
    /// the configured defaults. A failed file load is returned to the
    /// caller — aborting on a misconfigured startup is the caller's
    /// decision, not the host's.
    pub fn parse_args(&mut self, args: &[String]) -> Result<(), ArgError> {
        self.args.load_args(args)?;

        let arg_file = self.args.get("arg_file").map(PathBuf::from);
        if let Some(path) = arg_file {
            self.args.load_file(&path)?;
        }

        let substeps = self
            .args
            .parse_int_or("num_update_substeps", i64::from(self.config.num_update_substeps))?;
        if substeps < 1 || substeps > i64::from(u32::MAX) {
            return Err(ArgError::BadValue {
                key: "num_update_substeps".to_string(),
                value: substeps.to_string(),
                expected: "positive int",
            });
        }
        self.num_update_substeps = substeps as u32;

        self.playback_speed = self
            .args
            .parse_f64_or("playback_speed", self.config.playback_speed)?;
        Ok(())
    }

    /// Construct the scene named by the `scene` argument.
    ///
    /// Any current instance is dropped before the factory runs, so two
    /// instances are never live for the same host. On success the new
    /// scene has consumed the argument set and completed `init`; its
    /// capability tag is cached in the [`SceneInstance`] for the
    /// adapter. On failure the host holds no instance.
    pub fn setup(&mut self) -> Result<(), SetupError> {
        self.scene = None;

        let name = self
            .args
            .parse_string("scene")
            .map_err(|_| SetupError::MissingSceneArg)?;
        let mut instance = self.registry.build(&name, self.config.draw_enabled)?;
        instance.scene_mut().parse_args(&self.args)?;
        instance.scene_mut().init();

        self.metrics = HostMetrics::default();
        self.scene = Some(instance);
        Ok(())
    }

    /// Advance the live scene by exactly `timestep` seconds.
    pub fn update(&mut self, timestep: f64) {
        self.expect_scene_mut().scene_mut().update(timestep);
        self.metrics.total_updates += 1;
    }

    /// Restore the live scene to its initial condition without
    /// reconstruction, clearing host-level rate accumulators.
    pub fn reset(&mut self) {
        self.expect_scene_mut().scene_mut().reset();
        self.metrics.updates_per_sec = 0.0;
    }

    /// Render the live scene into the offscreen target.
    ///
    /// No-op when draw is disabled. Rendering and stepping are
    /// independent; callers may draw never, once per step, or at any
    /// other cadence.
    pub fn draw(&mut self) {
        let Some(fb) = self.framebuffer.as_mut() else {
            return;
        };
        let scene = self
            .scene
            .as_mut()
            .expect("no live scene (setup() must succeed before driving the host)");
        fb.bind();
        scene.scene_mut().draw();
        fb.unbind();
    }

    /// Forward a key press, mapping pixel to device coordinates.
    pub fn keyboard(&mut self, key: char, pixel_x: i32, pixel_y: i32) {
        let pos = self.to_device(pixel_x, pixel_y);
        self.expect_scene_mut().scene_mut().keyboard(key, pos);
    }

    /// Forward a mouse button transition, mapping pixel to device
    /// coordinates.
    pub fn mouse_click(
        &mut self,
        button: gantry_core::MouseButton,
        state: gantry_core::ButtonState,
        pixel_x: i32,
        pixel_y: i32,
    ) {
        let pos = self.to_device(pixel_x, pixel_y);
        self.expect_scene_mut()
            .scene_mut()
            .mouse_click(button, state, pos);
    }

    /// Forward pointer motion, mapping pixel to device coordinates.
    pub fn mouse_move(&mut self, pixel_x: i32, pixel_y: i32) {
        let pos = self.to_device(pixel_x, pixel_y);
        self.expect_scene_mut().scene_mut().mouse_move(pos);
    }

    /// Viewport dimensions changed.
    ///
    /// Usable before the first `setup` — a window can be resized before
    /// any scene exists.
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if let Some(fb) = self.framebuffer.as_mut() {
            fb.reshape(width, height);
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.scene_mut().reshape(width, height);
        }
    }

    /// Release scene resources and flush telemetry. The instance stays
    /// owned until the next `setup` or host destruction.
    pub fn shutdown(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.scene_mut().shutdown();
        }
        self.telemetry.flush();
    }

    /// The capability-checked RL view over the live instance.
    ///
    /// Total even when no scene is live or the scene lacks the RL
    /// capability — queries then return neutral values.
    pub fn adapter(&mut self) -> RlAdapter<'_> {
        RlAdapter::new(self.scene.as_mut(), self.telemetry.as_mut())
    }

    /// Replace the telemetry sink logged values are mirrored into.
    pub fn set_telemetry_sink(&mut self, sink: Box<dyn TelemetrySink>) {
        self.telemetry = sink;
    }

    /// Simulation time of the live scene.
    pub fn time(&self) -> f64 {
        self.expect_scene().scene().time()
    }

    /// Name of the live scene.
    pub fn name(&self) -> &str {
        self.expect_scene().scene().name()
    }

    /// Whether the live scene has nothing further to simulate.
    pub fn is_done(&self) -> bool {
        self.expect_scene().scene().is_done()
    }

    /// Whether a scene is currently live.
    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Whether the live scene carries the RL capability. `false` when no
    /// scene is live.
    pub fn is_rl_scene(&self) -> bool {
        self.scene.as_ref().is_some_and(SceneInstance::is_rl)
    }

    /// Substep count for the external stepping loop.
    pub fn num_update_substeps(&self) -> u32 {
        self.num_update_substeps
    }

    /// Playback-speed multiplier for the external stepping loop.
    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    /// Adjust the playback-speed multiplier.
    pub fn set_playback_speed(&mut self, speed: f64) {
        self.playback_speed = speed;
    }

    /// Report the externally measured update rate.
    pub fn set_updates_per_sec(&mut self, updates_per_sec: f64) {
        self.metrics.updates_per_sec = updates_per_sec;
    }

    /// Stepping metrics for the current scene instance.
    pub fn metrics(&self) -> &HostMetrics {
        &self.metrics
    }

    /// Current viewport width in pixels.
    pub fn win_width(&self) -> u32 {
        self.viewport.0
    }

    /// Current viewport height in pixels.
    pub fn win_height(&self) -> u32 {
        self.viewport.1
    }

    /// Width over height of the current viewport.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.viewport.0) / f64::from(self.viewport.1)
    }

    /// Loaded startup arguments.
    pub fn args(&self) -> &ArgSet {
        &self.args
    }

    fn to_device(&self, pixel_x: i32, pixel_y: i32) -> gantry_core::DeviceCoord {
        device_coord(
            f64::from(pixel_x),
            f64::from(pixel_y),
            self.viewport.0,
            self.viewport.1,
        )
    }

    fn expect_scene(&self) -> &SceneInstance {
        self.scene
            .as_ref()
            .expect("no live scene (setup() must succeed before driving the host)")
    }

    fn expect_scene_mut(&mut self) -> &mut SceneInstance {
        self.scene
            .as_mut()
            .expect("no live scene (setup() must succeed before driving the host)")
    }
}

impl std::fmt::Debug for SceneHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneHost")
            .field("scene", &self.scene.as_ref().map(|s| s.scene().name()))
            .field("rl", &self.is_rl_scene())
            .field("draw", &self.framebuffer.is_some())
            .field("viewport", &self.viewport)
            .field("total_updates", &self.metrics.total_updates)
            .finish()
    }
}
