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

//! # Time Limit Monitor
//!
//! A lightweight monitor that enforces a wall-clock time budget on the
//! search. It periodically checks elapsed time (using a bitmask-based
//! step filter) and requests termination once the configured `Duration`
//! has been exceeded.
//!
//! Reading the clock on every frontier pop would dominate the cost of
//! expanding small states, so the monitor only checks when
//! `(steps & clock_check_mask) == 0`. The default mask (`0x3FF`)
//! checks approximately every 1,024 steps.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use causeway_model::{model::CrossingModel, plan::CrossingPlan};
use num_traits::{PrimInt, Signed};

/// A search monitor that terminates the search once a wall-clock time
/// budget has been exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask: check every 1,024 steps (2^10).
    /// 1024 - 1 = 1023 = 0x3FF
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FF;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &CrossingModel<T>) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _plan: &CrossingPlan<T>) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
