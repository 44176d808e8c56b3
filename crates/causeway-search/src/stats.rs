// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::time::Duration;

/// Statistics collected during one run of the uniform-cost engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// States popped from the frontier and finalized.
    pub states_expanded: u64,
    /// Successor candidates produced by the transition generator.
    pub successors_generated: u64,
    /// Successors whose tentative cost improved the best known cost and
    /// were (re)enqueued.
    pub successors_enqueued: u64,
    /// Frontier entries discarded because their state was already
    /// finalized at an equal or better cost.
    pub stale_entries_skipped: u64,
    /// Solutions found during the search. At most one: the engine stops
    /// at the first goal popped from the cost-ordered frontier.
    pub solutions_found: u64,
    /// The largest frontier size observed.
    pub max_frontier_len: usize,
    /// Total time spent in the engine.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_state_expanded(&mut self) {
        self.states_expanded = self.states_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_successor_generated(&mut self) {
        self.successors_generated = self.successors_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_successor_enqueued(&mut self) {
        self.successors_enqueued = self.successors_enqueued.saturating_add(1);
    }

    #[inline]
    pub fn on_stale_entry_skipped(&mut self) {
        self.stale_entries_skipped = self.stale_entries_skipped.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    /// Records the frontier length after a push.
    #[inline]
    pub fn on_frontier_observed(&mut self, frontier_len: usize) {
        self.max_frontier_len = self.max_frontier_len.max(frontier_len);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Causeway Search Statistics:")?;
        writeln!(f, "  States expanded:      {}", self.states_expanded)?;
        writeln!(f, "  Successors generated: {}", self.successors_generated)?;
        writeln!(f, "  Successors enqueued:  {}", self.successors_enqueued)?;
        writeln!(f, "  Stale entries:        {}", self.stale_entries_skipped)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Max frontier length:  {}", self.max_frontier_len)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SearchStatistics;
    use std::time::Duration;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = SearchStatistics::default();
        assert_eq!(stats.states_expanded, 0);
        assert_eq!(stats.successors_generated, 0);
        assert_eq!(stats.successors_enqueued, 0);
        assert_eq!(stats.stale_entries_skipped, 0);
        assert_eq!(stats.solutions_found, 0);
        assert_eq!(stats.max_frontier_len, 0);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_increment_methods_advance_counters() {
        let mut stats = SearchStatistics::default();
        stats.on_state_expanded();
        stats.on_state_expanded();
        stats.on_successor_generated();
        stats.on_successor_enqueued();
        stats.on_stale_entry_skipped();
        stats.on_solution_found();

        assert_eq!(stats.states_expanded, 2);
        assert_eq!(stats.successors_generated, 1);
        assert_eq!(stats.successors_enqueued, 1);
        assert_eq!(stats.stale_entries_skipped, 1);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_frontier_observation_tracks_maximum() {
        let mut stats = SearchStatistics::default();
        stats.on_frontier_observed(3);
        stats.on_frontier_observed(10);
        stats.on_frontier_observed(5);
        assert_eq!(stats.max_frontier_len, 10);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let mut stats = SearchStatistics::default();
        stats.on_state_expanded();
        stats.on_solution_found();
        stats.set_total_time(Duration::from_millis(12));

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Causeway Search Statistics:"));
        assert!(rendered.contains("States expanded:      1"));
        assert!(rendered.contains("Solutions found:      1"));
    }
}
