//! Per-call planning statistics.

use std::time::Duration;

/// Counters collected during one planning call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningStatistics {
    /// Partial plans taken off the frontier.
    pub expansions: u64,
    /// Child partial plans pushed onto the frontier.
    pub children_generated: u64,
    /// Partial plans discarded because their next subgoal conflicted with a
    /// protected goal.
    pub pruned: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
    /// Wall-clock time spent searching.
    pub duration: Duration,
}

impl PlanningStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Average number of children per expansion.
    pub fn branching_factor(&self) -> f64 {
        if self.expansions == 0 {
            0.0
        } else {
            self.children_generated as f64 / self.expansions as f64
        }
    }

    pub(crate) fn observe_frontier(&mut self, len: usize) {
        self.peak_frontier = self.peak_frontier.max(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branching_factor() {
        let mut stats = PlanningStatistics::new();
        assert_eq!(stats.branching_factor(), 0.0);

        stats.expansions = 4;
        stats.children_generated = 6;
        assert_eq!(stats.branching_factor(), 1.5);
    }

    #[test]
    fn test_observe_frontier_keeps_peak() {
        let mut stats = PlanningStatistics::new();
        stats.observe_frontier(3);
        stats.observe_frontier(1);
        assert_eq!(stats.peak_frontier, 3);
    }
}
