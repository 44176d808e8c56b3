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

//! # Step Limit Monitor
//!
//! Caps the number of frontier-pop iterations the engine may perform.
//! The crossing state space is bounded by `2^n` source-side sets, so a
//! step budget is the natural defensive hook for large agent counts:
//! it bounds work deterministically, independent of machine speed.
//!
//! The monitor counts engine steps in `on_step()` and requests
//! termination once the count exceeds the configured budget; a budget
//! of `k` therefore allows exactly `k` frontier pops.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use causeway_model::{model::CrossingModel, plan::CrossingPlan};
use num_traits::{PrimInt, Signed};

/// A search monitor that terminates the search once the engine has
/// performed a fixed number of frontier-pop iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLimitMonitor<T> {
    step_limit: u64,
    steps: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> StepLimitMonitor<T> {
    /// Creates a new `StepLimitMonitor` allowing `step_limit` frontier
    /// pops.
    #[inline]
    pub fn new(step_limit: u64) -> Self {
        Self {
            step_limit,
            steps: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured step budget.
    #[inline]
    pub fn step_limit(&self) -> u64 {
        self.step_limit
    }
}

impl<T> SearchMonitor<T> for StepLimitMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "StepLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &CrossingModel<T>) {
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _plan: &CrossingPlan<T>) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.steps > self.step_limit {
            return SearchCommand::Terminate(format!(
                "step limit of {} reached",
                self.step_limit
            ));
        }
        SearchCommand::Continue
    }
}
