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

use crate::stats::SearchStatistics;
use causeway_model::plan::CrossingPlan;
use num_traits::{PrimInt, Signed};

/// The result of one run of the uniform-cost engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<T> {
    /// We have found a plan and proven its optimality.
    Optimal(CrossingPlan<T>),
    /// We have exhausted the frontier without reaching the goal; no
    /// plan exists for this configuration.
    Unreachable,
    /// The engine terminated (e.g., via a monitor) without finding a
    /// plan and without proving unreachability.
    Unknown,
}

impl<T> std::fmt::Display for SearchResult<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Optimal(plan) => {
                write!(f, "Optimal(total_cost={})", plan.total_cost())
            }
            SearchResult::Unreachable => write!(f, "Unreachable"),
            SearchResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The reason the engine stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The engine popped the goal from the cost-ordered frontier, which
    /// proves global optimality of the reconstructed plan.
    OptimalityProven,
    /// The engine exhausted the frontier, which proves the goal cannot
    /// be reached from the initial state.
    UnreachabilityProven,
    /// The engine aborted due to a search limit (time, steps, external
    /// interrupt). The string describes the trigger.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::UnreachabilityProven => write!(f, "Unreachability Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The complete outcome of one engine run: the result, the reason the
/// engine stopped, and the statistics it collected along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    result: SearchResult<T>,
    reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> SearchOutcome<T>
where
    T: PrimInt + Signed,
{
    /// Creates an outcome for a proven-optimal plan.
    #[inline]
    pub fn optimal(plan: CrossingPlan<T>, statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Optimal(plan),
            reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// Creates an outcome for a proven-unreachable goal.
    #[inline]
    pub fn unreachable(statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Unreachable,
            reason: TerminationReason::UnreachabilityProven,
            statistics,
        }
    }

    /// Creates an outcome for an aborted run.
    #[inline]
    pub fn aborted(reason: String, statistics: SearchStatistics) -> Self {
        Self {
            result: SearchResult::Unknown,
            reason: TerminationReason::Aborted(reason),
            statistics,
        }
    }

    /// Returns the search result.
    #[inline]
    pub fn result(&self) -> &SearchResult<T> {
        &self.result
    }

    /// Returns the reason the engine stopped.
    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    /// Returns the statistics collected during the run.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the plan if the run proved one optimal.
    #[inline]
    pub fn plan(&self) -> Option<&CrossingPlan<T>> {
        match &self.result {
            SearchResult::Optimal(plan) => Some(plan),
            _ => None,
        }
    }

    /// Consumes the outcome and returns the plan if the run proved one
    /// optimal.
    #[inline]
    pub fn into_plan(self) -> Option<CrossingPlan<T>> {
        match self.result {
            SearchResult::Optimal(plan) => Some(plan),
            _ => None,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SearchResult::Optimal(_))
    }

    #[inline]
    pub fn is_unreachable(&self) -> bool {
        matches!(self.result, SearchResult::Unreachable)
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.reason, TerminationReason::Aborted(_))
    }
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchOutcome(result: {}, reason: {})",
            self.result, self.reason
        )
    }
}
