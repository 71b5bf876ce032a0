//! Gantry: a scene host and reinforcement-learning bridge for steppable
//! simulations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Gantry sub-crates. For most users, adding `gantry` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gantry::prelude::*;
//! use gantry::scenes::ReachScene;
//!
//! // Register a scene and build a headless host.
//! let mut registry = SceneRegistry::new();
//! registry.register_fn("reach", || {
//!     SceneInstance::Rl(Box::new(ReachScene::new()))
//! });
//! let mut host = SceneHost::new(HostConfig::default(), registry).unwrap();
//! host.parse_args(&["--scene=reach".to_string(), "--num_agents=2".to_string()])
//!     .unwrap();
//! host.setup().unwrap();
//!
//! // Drive one decision step through the uniform RL surface.
//! let num_agents = host.adapter().num_agents();
//! for id in 0..num_agents {
//!     let agent = AgentId(id);
//!     let action = vec![0.0; host.adapter().action_size(agent)];
//!     host.adapter().set_action(agent, &action);
//! }
//! host.update(0.1);
//! let state = host.adapter().record_state(AgentId(0));
//! assert_eq!(state.len(), host.adapter().state_size(AgentId(0)));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `gantry-core` | Capability traits, enums, `ArgSet`, input types |
//! | [`host`] | `gantry-host` | `SceneHost`, `RlAdapter`, registry, telemetry |
//! | [`scenes`] | `gantry-scenes` | Reference scenes (drift, reach, bandit) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Capability contracts and boundary types (`gantry-core`).
///
/// Contains the [`core::Scene`] and [`core::RlScene`] traits, the
/// [`core::SceneInstance`] tagged variant, agent-facing enums, and the
/// [`core::ArgSet`] argument store.
pub use gantry_core as core;

/// Scene host and RL adapter (`gantry-host`).
///
/// [`host::SceneHost`] owns and drives the live scene;
/// [`host::RlAdapter`] is the uniform agent-indexed RL surface over it.
pub use gantry_host as host;

/// Reference scene implementations (`gantry-scenes`).
///
/// Includes [`scenes::DriftScene`] (non-RL), [`scenes::ReachScene`]
/// (continuous actions), and [`scenes::BanditScene`] (discrete actions).
pub use gantry_scenes as scenes;

/// Common imports for typical Gantry usage.
///
/// ```rust
/// use gantry::prelude::*;
/// ```
///
/// This imports the host, adapter, registry, configuration, capability
/// traits, and the agent-facing value types.
pub mod prelude {
    // Core contracts and value types
    pub use gantry_core::{
        ActionSpace, AgentId, AgentMode, ArgSet, ButtonState, DeviceCoord, MouseButton, RlScene,
        Scene, SceneInstance, Terminate,
    };

    // Errors
    pub use gantry_core::{ArgError, EnumRangeError};

    // Host
    pub use gantry_host::{
        FileSink, HostConfig, HostError, HostMetrics, NoopSink, RlAdapter, SceneFactory,
        SceneHost, SceneRegistry, SetupError, TelemetrySink,
    };
}
