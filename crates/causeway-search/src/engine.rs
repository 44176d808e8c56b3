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

//! Uniform-cost search engine for the crossing scheduler.
//!
//! This module implements the cost-ordered expansion that finds a
//! provably minimum-cost plan. Because batch costs vary, a plain
//! breadth-first traversal only minimizes the number of moves, not
//! their cost; the engine instead maintains a frontier ordered by
//! accumulated cost and a best-known-cost record per state, in the
//! Dijkstra fashion. The first goal state popped from such a frontier
//! is globally optimal, so the search stops there and reconstructs the
//! plan by walking back-pointers.
//!
//! A search session object encapsulates per-run state: the frontier,
//! the record table, statistics, and timing. Each call to the engine
//! constructs its own session, so independent solves may run
//! concurrently without any shared mutable state. A `SearchMonitor` is
//! consulted at the top of every frontier-pop iteration, which is where
//! step budgets, deadlines, and external interrupts hook in.
//!
//! Termination is guaranteed: the state space is finite (at most
//! `2^n` source-side sets times two resource positions) and edge costs
//! are non-negative, so the engine either proves an optimum or runs the
//! frontier dry and reports the goal unreachable. The latter cannot
//! happen for a validated configuration (capacity of at least two and a
//! non-empty agent set), but the engine detects it for robustness when
//! driven directly.

use crate::{
    expand::Successors,
    monitor::{
        no_op::NoOperationMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    },
    num::CostNumeric,
    result::{SearchOutcome, TerminationReason},
    stats::SearchStatistics,
};
use causeway_model::{
    model::CrossingModel,
    plan::{CrossingPlan, Move},
    state::CrossingState,
};
use rustc_hash::FxHashMap;
use std::{cmp::Reverse, collections::BinaryHeap};

/// A uniform-cost search engine over crossing states.
///
/// The engine itself is stateless; every call to [`UniformCostEngine::search`]
/// or [`UniformCostEngine::search_with_monitor`] owns its frontier and
/// record table for exactly one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCostEngine;

impl UniformCostEngine {
    /// Creates a new `UniformCostEngine`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Searches for a minimum-cost plan without external monitoring.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use causeway_model::{index::AgentIndex, model::CrossingModelBuilder};
    /// use causeway_search::engine::UniformCostEngine;
    ///
    /// let mut builder = CrossingModelBuilder::<i64>::new(2);
    /// builder
    ///     .set_agent_cost(AgentIndex::new(0), 1)
    ///     .set_agent_cost(AgentIndex::new(1), 2);
    /// let model = builder.build();
    ///
    /// let outcome = UniformCostEngine::new().search(&model);
    /// assert!(outcome.is_optimal());
    /// assert_eq!(outcome.plan().unwrap().total_cost(), 2);
    /// ```
    #[inline]
    pub fn search<T>(&self, model: &CrossingModel<T>) -> SearchOutcome<T>
    where
        T: CostNumeric,
    {
        let mut monitor = NoOperationMonitor::new();
        self.search_with_monitor(model, &mut monitor)
    }

    /// Searches for a minimum-cost plan, consulting the given monitor
    /// at the top of every frontier-pop iteration.
    #[inline]
    pub fn search_with_monitor<T, M>(
        &self,
        model: &CrossingModel<T>,
        monitor: &mut M,
    ) -> SearchOutcome<T>
    where
        T: CostNumeric,
        M: SearchMonitor<T>,
    {
        SearchSession::new(model, monitor).run()
    }
}

/// An entry awaiting expansion on the frontier.
///
/// Entries are ordered by accumulated cost first and insertion sequence
/// second. The sequence number makes the order total and deterministic,
/// so equal-cost states are expanded in the order they were discovered.
#[derive(Debug, Clone)]
struct FrontierEntry<T> {
    cost: T,
    seq: u64,
    state: CrossingState,
}

impl<T> PartialEq for FrontierEntry<T>
where
    T: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl<T> Eq for FrontierEntry<T> where T: Ord {}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// The engine-owned record of one discovered state: the best known
/// accumulated cost, whether the state has been finalized, and the
/// back-pointer used for path reconstruction.
#[derive(Debug, Clone)]
struct NodeRecord<T> {
    best_cost: T,
    finalized: bool,
    parent: Option<(CrossingState, Move<T>)>,
}

/// A search session for the uniform-cost engine. This struct
/// encapsulates the state and logic of a single run.
struct SearchSession<'a, T, M>
where
    T: CostNumeric,
{
    model: &'a CrossingModel<T>,
    monitor: &'a mut M,
    frontier: BinaryHeap<Reverse<FrontierEntry<T>>>,
    records: FxHashMap<CrossingState, NodeRecord<T>>,
    stats: SearchStatistics,
    next_seq: u64,
    best_plan: Option<CrossingPlan<T>>,
    start_time: std::time::Instant,
}

impl<'a, T, M> SearchSession<'a, T, M>
where
    T: CostNumeric,
    M: SearchMonitor<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(model: &'a CrossingModel<T>, monitor: &'a mut M) -> Self {
        Self {
            model,
            monitor,
            frontier: BinaryHeap::new(),
            records: FxHashMap::default(),
            stats: SearchStatistics::default(),
            next_seq: 0,
            best_plan: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> SearchOutcome<T> {
        self.monitor.on_enter_search(self.model);

        let initial = CrossingState::initial(self.model.num_agents());
        self.records.insert(
            initial.clone(),
            NodeRecord {
                best_cost: T::zero(),
                finalized: false,
                parent: None,
            },
        );
        self.push_frontier(T::zero(), initial);

        let termination_reason = loop {
            self.monitor.on_step();
            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                break TerminationReason::Aborted(reason);
            }

            let entry = match self.frontier.pop() {
                Some(Reverse(entry)) => entry,
                None => break TerminationReason::UnreachabilityProven,
            };

            let record = self
                .records
                .get_mut(&entry.state)
                .expect("frontier entry without a search record");
            if record.finalized || entry.cost > record.best_cost {
                self.stats.on_stale_entry_skipped();
                continue;
            }
            record.finalized = true;

            if entry.state.is_goal() {
                let plan = self.reconstruct_plan(&entry.state, entry.cost);
                self.stats.on_solution_found();
                self.monitor.on_solution_found(&plan);
                self.best_plan = Some(plan);
                break TerminationReason::OptimalityProven;
            }

            self.expand(entry);
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search();
        self.finalize_result(termination_reason)
    }

    /// Expand the given finalized frontier entry: generate every legal
    /// successor and (re)enqueue the ones whose tentative cost improves
    /// on the best known cost for their state.
    fn expand(&mut self, entry: FrontierEntry<T>) {
        self.stats.on_state_expanded();

        for (next_state, step) in Successors::new(self.model, &entry.state) {
            self.stats.on_successor_generated();
            let tentative = entry.cost.saturating_add(step.cost());

            let improved = match self.records.get_mut(&next_state) {
                Some(record) => {
                    if !record.finalized && tentative < record.best_cost {
                        record.best_cost = tentative;
                        record.parent = Some((entry.state.clone(), step));
                        true
                    } else {
                        false
                    }
                }
                None => {
                    self.records.insert(
                        next_state.clone(),
                        NodeRecord {
                            best_cost: tentative,
                            finalized: false,
                            parent: Some((entry.state.clone(), step)),
                        },
                    );
                    true
                }
            };

            if improved {
                self.stats.on_successor_enqueued();
                self.push_frontier(tentative, next_state);
            }
        }
    }

    /// Push a state onto the frontier with the given accumulated cost.
    #[inline]
    fn push_frontier(&mut self, cost: T, state: CrossingState) {
        let entry = FrontierEntry {
            cost,
            seq: self.next_seq,
            state,
        };
        self.next_seq += 1;
        self.frontier.push(Reverse(entry));
        self.stats.on_frontier_observed(self.frontier.len());
    }

    /// Reconstruct the plan reaching the given goal state by walking
    /// the back-pointers up to the initial state and reversing.
    fn reconstruct_plan(&self, goal: &CrossingState, total_cost: T) -> CrossingPlan<T> {
        let mut moves = Vec::new();
        let mut current = goal.clone();

        loop {
            let record = self
                .records
                .get(&current)
                .expect("path reconstruction hit a state without a search record");
            match &record.parent {
                Some((previous, step)) => {
                    moves.push(step.clone());
                    current = previous.clone();
                }
                None => break,
            }
        }

        moves.reverse();
        CrossingPlan::new(moves, total_cost)
    }

    /// Finalize the outcome based on the termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(self, reason: TerminationReason) -> SearchOutcome<T> {
        match reason {
            TerminationReason::OptimalityProven => {
                let plan = self
                    .best_plan
                    .expect("expected a plan when termination is OptimalityProven");
                SearchOutcome::optimal(plan, self.stats)
            }
            TerminationReason::UnreachabilityProven => SearchOutcome::unreachable(self.stats),
            TerminationReason::Aborted(reason) => SearchOutcome::aborted(reason, self.stats),
        }
    }
}
