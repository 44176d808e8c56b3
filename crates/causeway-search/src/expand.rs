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

//! # Transition Generator
//!
//! Enumerates the legal successor states of a `CrossingState` together
//! with the move producing each of them. `Successors` is a lazy
//! iterator: nothing is materialized up front, and a fresh iterator
//! recomputes the enumeration from the origin state (no hidden state
//! survives between calls).
//!
//! ## Rules
//!
//! - Resource on the source side: every subset of the source-side
//!   agents of size `1..=capacity` crosses forward; the resource
//!   crosses with it.
//! - Resource on the destination side: every subset of the
//!   destination-side agents of size `1..=capacity - 1` returns; one
//!   seat fewer, because the resource never moves alone and a
//!   full-capacity return would undo an entire forward crossing.
//!
//! Enumerating all subset sizes up to capacity generalizes the classic
//! "two forward, one back" rule while preserving it as the special case
//! `capacity = 2`.
//!
//! ## Determinism
//!
//! Batches are produced with subset sizes ascending and in
//! lexicographic agent order within a size. The engine's tie-breaking
//! (and therefore reproducible plans) rests on this order.
//!
//! ## Usage
//!
//! ```rust
//! use causeway_model::{model::CrossingModelBuilder, state::CrossingState};
//! use causeway_search::expand::Successors;
//!
//! let model = CrossingModelBuilder::<i64>::new(3).build();
//! let state = CrossingState::initial(3);
//!
//! // Three singletons and three pairs cross forward.
//! assert_eq!(Successors::new(&model, &state).count(), 6);
//! ```

use causeway_model::{
    index::AgentIndex,
    model::CrossingModel,
    plan::{Direction, Move, MoveBatch},
    state::{CrossingState, Side},
};
use num_traits::{PrimInt, Signed};
use smallvec::SmallVec;
use std::iter::FusedIterator;

/// A lazy iterator over the legal `(next_state, move)` pairs of one
/// origin state.
#[derive(Debug, Clone)]
pub struct Successors<'a, T>
where
    T: PrimInt + Signed,
{
    model: &'a CrossingModel<T>,
    origin: &'a CrossingState,
    direction: Direction,
    /// Agents on the moving side, in ascending index order.
    pool: Vec<AgentIndex>,
    /// The largest admissible batch size for this direction, clamped to
    /// the pool size.
    max_batch_size: usize,
    /// Positions into `pool` forming the next batch to emit.
    positions: SmallVec<[usize; 8]>,
    exhausted: bool,
}

impl<'a, T> Successors<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new successor iterator for the given origin state.
    pub fn new(model: &'a CrossingModel<T>, origin: &'a CrossingState) -> Self {
        debug_assert_eq!(
            model.num_agents(),
            origin.num_agents(),
            "called `Successors::new` with a state of {} agents against a model of {}",
            origin.num_agents(),
            model.num_agents()
        );

        let direction = match origin.resource_side() {
            Side::Source => Direction::Forward,
            Side::Dest => Direction::Return,
        };
        let pool: Vec<AgentIndex> = match direction {
            Direction::Forward => origin.source_agents().collect(),
            Direction::Return => origin.dest_agents().collect(),
        };
        let direction_capacity = match direction {
            Direction::Forward => model.capacity(),
            Direction::Return => model.capacity().saturating_sub(1),
        };
        let max_batch_size = direction_capacity.min(pool.len());

        let mut positions = SmallVec::new();
        positions.push(0);

        Self {
            model,
            origin,
            direction,
            pool,
            exhausted: max_batch_size == 0,
            max_batch_size,
            positions,
        }
    }

    /// Returns the direction every emitted move travels in.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Advances `positions` to the next combination: lexicographic
    /// stepping within the current batch size, then the smallest
    /// combination of the next size.
    fn advance(&mut self) {
        let pool_len = self.pool.len();
        let size = self.positions.len();

        let mut cursor = size;
        while cursor > 0 {
            cursor -= 1;
            if self.positions[cursor] != cursor + pool_len - size {
                self.positions[cursor] += 1;
                for follower in cursor + 1..size {
                    self.positions[follower] = self.positions[follower - 1] + 1;
                }
                return;
            }
        }

        if size + 1 > self.max_batch_size {
            self.exhausted = true;
            return;
        }
        self.positions.clear();
        self.positions.extend(0..size + 1);
    }
}

impl<'a, T> Iterator for Successors<'a, T>
where
    T: PrimInt + Signed,
{
    type Item = (CrossingState, Move<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let batch: MoveBatch = self
            .positions
            .iter()
            .map(|&position| self.pool[position])
            .collect();
        let cost = self.model.batch_cost(&batch);
        let next_state = match self.direction {
            Direction::Forward => self.origin.after_forward(&batch),
            Direction::Return => self.origin.after_return(&batch),
        };
        let step = Move::new(batch, self.direction, cost);

        self.advance();
        Some((next_state, step))
    }
}

impl<'a, T> FusedIterator for Successors<'a, T> where T: PrimInt + Signed {}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_model::model::CrossingModelBuilder;

    type IntegerType = i64;

    fn ai(i: usize) -> AgentIndex {
        AgentIndex::new(i)
    }

    fn classic_model() -> CrossingModel<IntegerType> {
        let mut builder = CrossingModelBuilder::new(4);
        builder
            .set_agent_cost(ai(0), 1)
            .set_agent_cost(ai(1), 2)
            .set_agent_cost(ai(2), 5)
            .set_agent_cost(ai(3), 8);
        builder.build()
    }

    fn batches(model: &CrossingModel<IntegerType>, state: &CrossingState) -> Vec<Vec<usize>> {
        Successors::new(model, state)
            .map(|(_, step)| step.agents().iter().map(|a| a.get()).collect())
            .collect()
    }

    #[test]
    fn test_forward_enumeration_order_and_count() {
        let model = classic_model();
        let state = CrossingState::initial(4);

        // Sizes ascending, lexicographic within a size.
        assert_eq!(
            batches(&model, &state),
            vec![
                vec![0],
                vec![1],
                vec![2],
                vec![3],
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_forward_moves_flip_the_resource_side() {
        let model = classic_model();
        let state = CrossingState::initial(4);

        for (next_state, step) in Successors::new(&model, &state) {
            assert_eq!(step.direction(), Direction::Forward);
            assert_eq!(next_state.resource_side(), Side::Dest);
            assert_eq!(next_state.num_on_source(), 4 - step.num_agents());
        }
    }

    #[test]
    fn test_return_batches_are_capped_one_below_capacity() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(4);
        builder.set_transfer_capacity(3);
        let model = builder.build();

        // Agents 0 and 1 already crossed; the resource sits on the
        // destination side.
        let state = CrossingState::initial(4).after_forward(&[ai(0), ai(1)]);

        // Return batches of size 1..=2 over the pool {0, 1}.
        assert_eq!(
            batches(&model, &state),
            vec![vec![0], vec![1], vec![0, 1]]
        );
        for (next_state, step) in Successors::new(&model, &state) {
            assert_eq!(step.direction(), Direction::Return);
            assert_eq!(next_state.resource_side(), Side::Source);
        }
    }

    #[test]
    fn test_move_cost_is_the_batch_maximum() {
        let model = classic_model();
        let state = CrossingState::initial(4);

        for (_, step) in Successors::new(&model, &state) {
            let expected = step
                .agents()
                .iter()
                .map(|&a| model.agent_cost(a))
                .max()
                .unwrap();
            assert_eq!(step.cost(), expected);
        }
    }

    #[test]
    fn test_capacity_larger_than_pool_is_clamped() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(3);
        builder.set_transfer_capacity(5);
        let model = builder.build();
        let state = CrossingState::initial(3);

        // All 2^3 - 1 non-empty subsets qualify.
        assert_eq!(Successors::new(&model, &state).count(), 7);
    }

    #[test]
    fn test_no_return_moves_under_capacity_one() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(2);
        builder.set_transfer_capacity(1);
        let model = builder.build();

        let crossed = CrossingState::initial(2).after_forward(&[ai(0)]);
        assert_eq!(Successors::new(&model, &crossed).count(), 0);
    }

    #[test]
    fn test_empty_source_side_yields_no_forward_moves() {
        let model = CrossingModelBuilder::<IntegerType>::new(0).build();
        let state = CrossingState::initial(0);
        assert_eq!(Successors::new(&model, &state).count(), 0);
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let model = classic_model();
        let state = CrossingState::initial(4);

        let first: Vec<_> = Successors::new(&model, &state).collect();
        let second: Vec<_> = Successors::new(&model, &state).collect();
        assert_eq!(first, second);
    }
}
