//! Host-level stepping metrics.

/// Update-rate accounting for the host's stepping loop.
///
/// `total_updates` counts `update` calls since the last scene setup;
/// `updates_per_sec` is a measured rate reported by the external loop
/// (the host has no wall clock of its own) and is cleared on reset.
#[derive(Clone, Debug, Default)]
pub struct HostMetrics {
    /// Number of `update` calls on the current scene instance.
    pub total_updates: u64,
    /// Externally measured update rate, 0 until first reported.
    pub updates_per_sec: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = HostMetrics::default();
        assert_eq!(m.total_updates, 0);
        assert_eq!(m.updates_per_sec, 0.0);
    }
}
