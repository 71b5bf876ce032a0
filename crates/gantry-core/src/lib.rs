//! Core contracts and boundary types for the Gantry scene host.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! two capability contracts every simulation interacts through — the base
//! [`Scene`] lifecycle and the optional [`RlScene`] reinforcement-learning
//! surface — plus the [`SceneInstance`] tagged variant that records which
//! of the two a live simulation satisfies, the agent-facing enums that
//! cross the serialized integer boundary, and the argument store used at
//! startup.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod enums;
pub mod id;
pub mod input;
pub mod instance;
pub mod scene;

pub use args::{ArgError, ArgSet};
pub use enums::{
    ActionSpace, AgentMode, EnumRangeError, Terminate, NORM_GROUP_NONE, NORM_GROUP_SINGLE,
};
pub use id::AgentId;
pub use input::{ButtonState, DeviceCoord, MouseButton};
pub use instance::SceneInstance;
pub use scene::{RlScene, Scene};
