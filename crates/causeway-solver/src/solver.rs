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

//! # Crossing Solver Facade
//!
//! A high-level entry point that validates a configuration, assembles
//! the monitor stack, and delegates to the uniform-cost engine.
//!
//! ## Motivation
//!
//! The engine accepts any model and reports unreachable goals as an
//! outcome, which is the right behavior for a search component but the
//! wrong interface for callers: an instance with one seat or a
//! non-positive cost is a configuration mistake that deserves an error
//! before any work is done. The facade draws that line, and it owns the
//! assembly of optional time and step limits so callers configure
//! limits once instead of wiring monitors by hand.
//!
//! ## Usage
//!
//! ```rust
//! use causeway_model::{index::AgentIndex, model::CrossingModelBuilder};
//! use causeway_solver::solver::SolverBuilder;
//!
//! let mut builder = CrossingModelBuilder::<i64>::new(4);
//! builder
//!     .set_agent_cost(AgentIndex::new(0), 1)
//!     .set_agent_cost(AgentIndex::new(1), 2)
//!     .set_agent_cost(AgentIndex::new(2), 5)
//!     .set_agent_cost(AgentIndex::new(3), 8);
//! let model = builder.build();
//!
//! let solver = SolverBuilder::new().build();
//! let outcome = solver.solve(&model).expect("valid configuration");
//! assert!(outcome.is_optimal());
//! assert_eq!(outcome.plan().unwrap().total_cost(), 15);
//! ```

use causeway_model::{index::AgentIndex, model::CrossingModel};
use causeway_search::{
    engine::UniformCostEngine,
    monitor::{
        composite::CompositeMonitor, step_limit::StepLimitMonitor, time_limit::TimeLimitMonitor,
    },
    num::CostNumeric,
    result::SearchOutcome,
};

/// The error type for configuration validation.
///
/// A configuration error is the caller's mistake, surfaced before the
/// search begins; it is fatal to that call and not recoverable locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The transfer capacity is below two, so no agent could ever bring
    /// the resource back for the others.
    CapacityTooSmall { capacity: usize },
    /// The model holds no agents.
    EmptyAgentSet,
    /// The specified agent has a non-positive transfer cost.
    NonPositiveAgentCost { agent: AgentIndex },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityTooSmall { capacity } => {
                write!(f, "Transfer capacity must be at least 2, got {}", capacity)
            }
            Self::EmptyAgentSet => write!(f, "The agent set must not be empty"),
            Self::NonPositiveAgentCost { agent } => {
                write!(f, "Agent {} has a non-positive cost", agent.get())
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Validates a model for solving: capacity of at least two, a non-empty
/// agent set, and strictly positive costs.
fn validate_configuration<T>(model: &CrossingModel<T>) -> Result<(), ConfigurationError>
where
    T: CostNumeric,
{
    if model.capacity() < 2 {
        return Err(ConfigurationError::CapacityTooSmall {
            capacity: model.capacity(),
        });
    }
    if model.num_agents() == 0 {
        return Err(ConfigurationError::EmptyAgentSet);
    }
    for (index, &cost) in model.agent_costs().iter().enumerate() {
        if cost <= T::zero() {
            return Err(ConfigurationError::NonPositiveAgentCost {
                agent: AgentIndex::new(index),
            });
        }
    }
    Ok(())
}

/// The high-level solver: validates the configuration, assembles the
/// configured monitors, and runs the uniform-cost engine.
///
/// The solver holds no per-run state, so one instance may serve any
/// number of independent solve calls, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct CrossingSolver {
    time_limit: Option<std::time::Duration>,
    step_limit: Option<u64>,
}

impl CrossingSolver {
    /// Creates a new `CrossingSolver` without limits. Use
    /// `SolverBuilder` to configure time or step budgets.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured wall-clock limit, if any.
    #[inline]
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        self.time_limit
    }

    /// Returns `true` if a wall-clock limit is configured.
    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    /// Returns the configured step budget, if any.
    #[inline]
    pub fn step_limit(&self) -> Option<u64> {
        self.step_limit
    }

    /// Returns `true` if a step budget is configured.
    #[inline]
    pub fn has_step_limit(&self) -> bool {
        self.step_limit.is_some()
    }

    /// Solves the given model to proven optimality.
    ///
    /// Validates the configuration first and fails without searching if
    /// the capacity is below two, the agent set is empty, or any cost
    /// is non-positive. On success the engine's outcome is returned
    /// unmodified: the search is deterministic and exhaustive, so there
    /// is nothing to retry.
    pub fn solve<T>(&self, model: &CrossingModel<T>) -> Result<SearchOutcome<T>, ConfigurationError>
    where
        T: CostNumeric,
    {
        validate_configuration(model)?;

        let mut monitor = CompositeMonitor::new();
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(limit) = self.step_limit {
            monitor.add_monitor(StepLimitMonitor::new(limit));
        }

        let engine = UniformCostEngine::new();
        Ok(engine.search_with_monitor(model, &mut monitor))
    }
}

/// Builder for `CrossingSolver`.
#[derive(Debug, Clone, Default)]
pub struct SolverBuilder {
    time_limit: Option<std::time::Duration>,
    step_limit: Option<u64>,
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the wall-clock time of each solve call.
    #[inline]
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Caps the number of frontier pops of each solve call.
    #[inline]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    #[inline]
    pub fn build(self) -> CrossingSolver {
        CrossingSolver {
            time_limit: self.time_limit,
            step_limit: self.step_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_model::{model::CrossingModelBuilder, plan::Direction};
    use causeway_search::result::TerminationReason;

    type IntegerType = i64;

    fn ai(i: usize) -> AgentIndex {
        AgentIndex::new(i)
    }

    fn build_model(costs: &[IntegerType], capacity: usize) -> CrossingModel<IntegerType> {
        let mut builder = CrossingModelBuilder::new(costs.len());
        for (i, &cost) in costs.iter().enumerate() {
            builder.set_agent_cost(ai(i), cost);
        }
        builder.set_transfer_capacity(capacity);
        builder.build()
    }

    fn solve(costs: &[IntegerType], capacity: usize) -> IntegerType {
        let outcome = CrossingSolver::new()
            .solve(&build_model(costs, capacity))
            .expect("valid configuration");
        assert!(outcome.is_optimal());
        outcome.plan().unwrap().total_cost()
    }

    #[test]
    fn test_rejects_capacity_below_two() {
        let model = build_model(&[1, 2], 1);
        assert_eq!(
            CrossingSolver::new().solve(&model),
            Err(ConfigurationError::CapacityTooSmall { capacity: 1 })
        );
    }

    #[test]
    fn test_rejects_empty_agent_set() {
        let model = build_model(&[], 2);
        assert_eq!(
            CrossingSolver::new().solve(&model),
            Err(ConfigurationError::EmptyAgentSet)
        );
    }

    #[test]
    fn test_rejects_non_positive_costs() {
        let zero_cost = build_model(&[1, 0], 2);
        assert_eq!(
            CrossingSolver::new().solve(&zero_cost),
            Err(ConfigurationError::NonPositiveAgentCost { agent: ai(1) })
        );

        let negative_cost = build_model(&[-3, 1], 2);
        assert_eq!(
            CrossingSolver::new().solve(&negative_cost),
            Err(ConfigurationError::NonPositiveAgentCost { agent: ai(0) })
        );
    }

    #[test]
    fn test_two_agents_cross_in_one_move() {
        let model = build_model(&[1, 2], 2);
        let outcome = CrossingSolver::new().solve(&model).unwrap();

        let plan = outcome.plan().unwrap();
        assert_eq!(plan.total_cost(), 2);
        assert_eq!(plan.num_moves(), 1);
        assert_eq!(plan.moves()[0].direction(), Direction::Forward);
        assert_eq!(plan.moves()[0].agents(), &[ai(0), ai(1)]);
    }

    #[test]
    fn test_classic_four_agent_instance_costs_fifteen() {
        assert_eq!(solve(&[1, 2, 5, 8], 2), 15);
    }

    #[test]
    fn test_three_unit_cost_agents_cost_three() {
        assert_eq!(solve(&[1, 1, 1], 2), 3);
    }

    #[test]
    fn test_capacity_matching_agent_count_costs_the_maximum() {
        assert_eq!(solve(&[3, 1, 4, 1, 5], 5), 5);
    }

    #[test]
    fn test_returned_plans_replay_cleanly() {
        for (costs, capacity) in [
            (vec![1, 2, 5, 8], 2),
            (vec![1, 1, 1], 2),
            (vec![2, 3, 7, 11, 13], 3),
            (vec![10, 20, 25], 3),
        ] {
            let model = build_model(&costs, capacity);
            let outcome = CrossingSolver::new().solve(&model).unwrap();
            let plan = outcome.plan().unwrap();

            assert_eq!(plan.validate(&model), Ok(()));

            let sum: IntegerType = plan.moves().iter().map(|step| step.cost()).sum();
            assert_eq!(plan.total_cost(), sum);
        }
    }

    #[test]
    fn test_solving_twice_yields_the_identical_plan() {
        let model = build_model(&[1, 2, 5, 8], 2);
        let solver = CrossingSolver::new();

        let first = solver.solve(&model).unwrap();
        let second = solver.solve(&model).unwrap();
        assert_eq!(first.plan(), second.plan());
        assert_eq!(first.reason(), second.reason());
    }

    #[test]
    fn test_raising_one_cost_never_lowers_the_optimum() {
        let baseline_costs = [1, 2, 5, 8];
        let baseline = solve(&baseline_costs, 2);

        for agent in 0..baseline_costs.len() {
            for bump in [1, 3, 10] {
                let mut raised = baseline_costs;
                raised[agent] += bump;
                assert!(
                    solve(&raised, 2) >= baseline,
                    "raising the cost of agent {} by {} lowered the optimum",
                    agent,
                    bump
                );
            }
        }
    }

    #[test]
    fn test_step_limit_surfaces_as_aborted_outcome() {
        let model = build_model(&[1, 2, 5, 8], 2);
        let solver = SolverBuilder::new().with_step_limit(1).build();
        assert!(solver.has_step_limit());

        let outcome = solver.solve(&model).unwrap();
        assert!(outcome.is_aborted());
        match outcome.reason() {
            TerminationReason::Aborted(reason) => {
                assert!(reason.contains("step limit"), "unexpected: {reason}");
            }
            other => panic!("expected Aborted, got {:?}", other),
        }
    }

    #[test]
    fn test_generous_limits_do_not_disturb_the_search() {
        let model = build_model(&[1, 2, 5, 8], 2);
        let solver = SolverBuilder::new()
            .with_time_limit(std::time::Duration::from_secs(3600))
            .with_step_limit(1_000_000)
            .build();

        let outcome = solver.solve(&model).unwrap();
        assert!(outcome.is_optimal());
        assert_eq!(outcome.plan().unwrap().total_cost(), 15);
    }

    #[test]
    fn test_builder_defaults_have_no_limits() {
        let solver = SolverBuilder::new().build();
        assert!(!solver.has_time_limit());
        assert!(!solver.has_step_limit());
        assert_eq!(solver.time_limit(), None);
        assert_eq!(solver.step_limit(), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", ConfigurationError::CapacityTooSmall { capacity: 1 }),
            "Transfer capacity must be at least 2, got 1"
        );
        assert_eq!(
            format!("{}", ConfigurationError::EmptyAgentSet),
            "The agent set must not be empty"
        );
        assert_eq!(
            format!("{}", ConfigurationError::NonPositiveAgentCost { agent: ai(2) }),
            "Agent 2 has a non-positive cost"
        );
    }
}
