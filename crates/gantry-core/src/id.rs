//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one independently acting entity within an RL-capable scene.
///
/// Agent ids are dense indices in `[0, num_agents)` for the currently
/// live scene instance. They carry no state of their own — every
/// agent-indexed query re-reads the scene — and they are not stable
/// across scene replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for AgentId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
