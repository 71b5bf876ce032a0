//! Scene host and RL adapter for the Gantry framework.
//!
//! [`SceneHost`] owns exactly one live simulation instance at a time and
//! drives its full lifecycle: construction through the [`SceneRegistry`],
//! argument loading, stepping, optional offscreen rendering, input
//! forwarding, and teardown. [`RlAdapter`] is a capability-checked view
//! over the live instance that presents a uniform, agent-indexed
//! reinforcement-learning surface whether or not the underlying scene
//! implements the RL contract.
//!
//! # Ownership model
//!
//! `SceneHost` is `Send` but all mutation goes through `&mut self`; host,
//! scene, and adapter are driven from a single control thread and nothing
//! suspends internally. Replacing a scene destroys the previous instance
//! before the factory constructs the next one, so two instances are never
//! live for the same host.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod config;
pub mod coords;
pub mod host;
pub mod marshal;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod telemetry;

pub use adapter::RlAdapter;
pub use config::{HostConfig, HostError};
pub use coords::device_coord;
pub use host::SceneHost;
pub use metrics::HostMetrics;
pub use registry::{SceneFactory, SceneRegistry, SetupError};
pub use render::OffscreenBuffer;
pub use telemetry::{FileSink, NoopSink, TelemetrySink, ValRecord};
