//! Test utilities and mock scenes for Gantry development.
//!
//! Provides observable mock implementations of the two capability
//! contracts: [`NullScene`] (base [`Scene`] only) and [`ScriptedRlScene`]
//! (full [`RlScene`] surface with configurable sizes and signals). Both
//! report their interactions through shared probe structs so tests can
//! inspect a scene after it has been moved into a host.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{NullScene, RlProbe, SceneProbe, ScriptedRlScene};
