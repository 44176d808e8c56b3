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

//! Immutable search states for the crossing scheduler.
//!
//! A `CrossingState` captures the full configuration of an instance at
//! one point in time: which agents are still on the source side, and
//! which side currently holds the enabling resource. The destination
//! side is always the complement of the source side and is never stored
//! separately, so the two can never desynchronize.
//!
//! States are value objects. The search engine deduplicates them
//! structurally, so equality and hashing cover exactly the pair
//! `(source_side, resource_side)` and nothing else; in particular the
//! cost or path accumulated to reach a state is not part of its
//! identity.

use crate::index::AgentIndex;
use fixedbitset::FixedBitSet;

/// One of the two sides of the crossing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    /// The side every agent starts on.
    Source,
    /// The side every agent must reach.
    Dest,
}

impl Side {
    /// Returns the other side.
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Side::Source => Side::Dest,
            Side::Dest => Side::Source,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "Source"),
            Side::Dest => write!(f, "Dest"),
        }
    }
}

/// An immutable value type describing the configuration of a crossing
/// instance: the set of agents on the source side plus the side holding
/// the enabling resource.
///
/// # Examples
///
/// ```rust
/// # use causeway_model::state::{CrossingState, Side};
///
/// let state = CrossingState::initial(3);
/// assert_eq!(state.num_on_source(), 3);
/// assert_eq!(state.resource_side(), Side::Source);
/// assert!(!state.is_goal());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CrossingState {
    source_side: FixedBitSet,
    resource_side: Side,
}

impl CrossingState {
    /// Creates the initial state: every agent on the source side, with
    /// the resource on the source side as well.
    pub fn initial(num_agents: usize) -> Self {
        let mut source_side = FixedBitSet::with_capacity(num_agents);
        source_side.insert_range(..);
        Self {
            source_side,
            resource_side: Side::Source,
        }
    }

    /// Creates a state from an explicit source-side set and resource
    /// position.
    ///
    /// The bit capacity of `source_side` must equal the number of
    /// agents in the instance; the destination side is implied as the
    /// complement.
    #[inline]
    pub fn new(source_side: FixedBitSet, resource_side: Side) -> Self {
        Self {
            source_side,
            resource_side,
        }
    }

    /// Returns the number of agents in the instance this state belongs to.
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.source_side.len()
    }

    /// Returns the number of agents currently on the source side.
    #[inline]
    pub fn num_on_source(&self) -> usize {
        self.source_side.count_ones(..)
    }

    /// Returns the side currently holding the enabling resource.
    #[inline]
    pub fn resource_side(&self) -> Side {
        self.resource_side
    }

    /// Checks whether this state satisfies the goal predicate: every
    /// agent on the destination side and the resource there with them.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.resource_side == Side::Dest && self.source_side.count_ones(..) == 0
    }

    /// Checks if the specified agent is on the source side.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `agent_index` is out of bounds
    /// `0..num_agents()`.
    #[inline]
    pub fn is_on_source(&self, agent_index: AgentIndex) -> bool {
        let index = agent_index.get();
        debug_assert!(
            index < self.num_agents(),
            "called `CrossingState::is_on_source` with agent index out of bounds: the len is {} but the index is {}",
            self.num_agents(),
            index
        );

        self.source_side.contains(index)
    }

    /// Returns an iterator over the agents on the source side, in
    /// ascending index order.
    #[inline]
    pub fn source_agents(&self) -> impl Iterator<Item = AgentIndex> + '_ {
        self.source_side.ones().map(AgentIndex::new)
    }

    /// Returns an iterator over the agents on the destination side, in
    /// ascending index order.
    #[inline]
    pub fn dest_agents(&self) -> impl Iterator<Item = AgentIndex> + '_ {
        (0..self.num_agents())
            .filter(|&index| !self.source_side.contains(index))
            .map(AgentIndex::new)
    }

    /// Returns the state after a forward move carrying the given batch
    /// from the source side to the destination side. The resource
    /// crosses with the batch.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the resource is not on the source
    /// side or if a batch member is not on the source side.
    pub fn after_forward(&self, batch: &[AgentIndex]) -> Self {
        debug_assert!(
            self.resource_side == Side::Source,
            "called `CrossingState::after_forward` with the resource on the destination side"
        );

        let mut source_side = self.source_side.clone();
        for &agent in batch {
            debug_assert!(
                source_side.contains(agent.get()),
                "called `CrossingState::after_forward` with agent {} not on the source side",
                agent
            );
            source_side.set(agent.get(), false);
        }

        Self {
            source_side,
            resource_side: Side::Dest,
        }
    }

    /// Returns the state after a return move carrying the given batch
    /// from the destination side back to the source side. The resource
    /// crosses back with the batch.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the resource is not on the
    /// destination side or if a batch member is not on the destination
    /// side.
    pub fn after_return(&self, batch: &[AgentIndex]) -> Self {
        debug_assert!(
            self.resource_side == Side::Dest,
            "called `CrossingState::after_return` with the resource on the source side"
        );

        let mut source_side = self.source_side.clone();
        for &agent in batch {
            debug_assert!(
                !source_side.contains(agent.get()),
                "called `CrossingState::after_return` with agent {} not on the destination side",
                agent
            );
            source_side.set(agent.get(), true);
        }

        Self {
            source_side,
            resource_side: Side::Source,
        }
    }
}

impl std::fmt::Display for CrossingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CrossingState(source: {{")?;
        for (position, agent) in self.source_side.ones().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", agent)?;
        }
        write!(f, "}}, resource: {})", self.resource_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ai(i: usize) -> AgentIndex {
        AgentIndex::new(i)
    }

    #[test]
    fn test_initial_state_has_everyone_on_source() {
        let state = CrossingState::initial(4);
        assert_eq!(state.num_agents(), 4);
        assert_eq!(state.num_on_source(), 4);
        assert_eq!(state.resource_side(), Side::Source);
        assert!((0..4).all(|i| state.is_on_source(ai(i))));
        assert_eq!(state.dest_agents().count(), 0);
    }

    #[test]
    fn test_goal_requires_empty_source_and_resource_on_dest() {
        let all_crossed = CrossingState::new(FixedBitSet::with_capacity(2), Side::Dest);
        assert!(all_crossed.is_goal());

        let resource_left_behind = CrossingState::new(FixedBitSet::with_capacity(2), Side::Source);
        assert!(!resource_left_behind.is_goal());

        assert!(!CrossingState::initial(2).is_goal());
    }

    #[test]
    fn test_after_forward_moves_batch_and_resource() {
        let state = CrossingState::initial(4);
        let next = state.after_forward(&[ai(0), ai(2)]);

        assert_eq!(next.resource_side(), Side::Dest);
        assert_eq!(next.num_on_source(), 2);
        assert!(!next.is_on_source(ai(0)));
        assert!(next.is_on_source(ai(1)));
        assert!(!next.is_on_source(ai(2)));
        assert!(next.is_on_source(ai(3)));

        // The origin state is untouched.
        assert_eq!(state.num_on_source(), 4);
    }

    #[test]
    fn test_after_return_brings_batch_back() {
        let crossed = CrossingState::initial(3).after_forward(&[ai(0), ai(1)]);
        let returned = crossed.after_return(&[ai(0)]);

        assert_eq!(returned.resource_side(), Side::Source);
        assert!(returned.is_on_source(ai(0)));
        assert!(!returned.is_on_source(ai(1)));
        assert!(returned.is_on_source(ai(2)));
    }

    #[test]
    fn test_dest_agents_is_complement_of_source() {
        let state = CrossingState::initial(4).after_forward(&[ai(1), ai(3)]);
        let dest: Vec<usize> = state.dest_agents().map(|a| a.get()).collect();
        let source: Vec<usize> = state.source_agents().map(|a| a.get()).collect();

        assert_eq!(dest, vec![1, 3]);
        assert_eq!(source, vec![0, 2]);
    }

    #[test]
    fn test_identity_ignores_the_path_taken() {
        // Two different move histories reaching the same configuration
        // must compare and hash as the same state.
        let via_zero = CrossingState::initial(3)
            .after_forward(&[ai(0), ai(1)])
            .after_return(&[ai(0)]);
        let via_one = CrossingState::initial(3)
            .after_forward(&[ai(0), ai(1)])
            .after_return(&[ai(1)])
            .after_forward(&[ai(1)])
            .after_return(&[ai(0)]);

        assert_eq!(via_zero, via_one);

        let mut table = HashMap::new();
        table.insert(via_zero, 7);
        assert_eq!(table.get(&via_one), Some(&7));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Source.opposite(), Side::Dest);
        assert_eq!(Side::Dest.opposite(), Side::Source);
    }

    #[test]
    fn test_display() {
        let state = CrossingState::initial(3).after_forward(&[ai(1)]);
        assert_eq!(
            format!("{}", state),
            "CrossingState(source: {0, 2}, resource: Dest)"
        );
    }
}
