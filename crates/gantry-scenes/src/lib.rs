//! Reference scenes for the Gantry scene host.
//!
//! Three scenes exercising the full host surface:
//!
//! - [`DriftScene`] — non-RL particle drift; the base [`Scene`] contract
//!   only, for drivers that run simulations without a learner attached.
//! - [`ReachScene`] — continuous-action point-mass steering; the
//!   canonical multi-agent RL scene with goals, shaped rewards, action
//!   bounds, and normalization groups.
//! - [`BanditScene`] — discrete-action K-armed bandit; exercises the
//!   discrete half of the action surface and mode-dependent behavior.
//!
//! [`Scene`]: gantry_core::Scene

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bandit;
pub mod drift;
pub mod reach;

pub use bandit::BanditScene;
pub use drift::DriftScene;
pub use reach::ReachScene;
