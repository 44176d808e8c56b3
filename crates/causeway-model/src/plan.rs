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

//! Moves and crossing plans.
//!
//! A `Move` is one crossing of the shared channel: a batch of agents
//! travelling together in one direction, tagged with the batch cost
//! (the maximum of its members' individual costs). A `CrossingPlan` is
//! the final output of a solve: the ordered move sequence together with
//! its total cost.
//!
//! Plans can be replayed against a model via `CrossingPlan::validate`,
//! which re-checks direction alternation, batch bounds, side
//! membership, per-move costs, and the goal condition. The solver's
//! tests lean on this to assert the structural properties of every
//! returned plan.

use crate::{
    index::AgentIndex,
    model::CrossingModel,
    state::CrossingState,
};
use num_traits::{PrimInt, Signed};
use smallvec::SmallVec;

/// The direction of a single crossing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// From the source side to the destination side.
    Forward,
    /// From the destination side back to the source side.
    Return,
}

impl Direction {
    /// Returns the other direction.
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Return,
            Direction::Return => Direction::Forward,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "Forward"),
            Direction::Return => write!(f, "Return"),
        }
    }
}

/// The batch of agents carried by a single move.
///
/// Batches are small by construction (bounded by the transfer
/// capacity), so they are stored inline up to four agents.
pub type MoveBatch = SmallVec<[AgentIndex; 4]>;

/// A single crossing: a batch of agents, a direction, and the batch
/// cost.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Move<T> {
    agents: MoveBatch,
    direction: Direction,
    cost: T,
}

impl<T> Move<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new `Move`.
    ///
    /// The batch must be non-empty and hold agent indices in strictly
    /// ascending order; the transition generator produces batches in
    /// exactly this form.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the batch is empty or not strictly
    /// ascending.
    #[inline]
    pub fn new(agents: MoveBatch, direction: Direction, cost: T) -> Self {
        debug_assert!(
            !agents.is_empty(),
            "called `Move::new` with an empty batch"
        );
        debug_assert!(
            agents.windows(2).all(|pair| pair[0] < pair[1]),
            "called `Move::new` with agents not in strictly ascending order"
        );

        Self {
            agents,
            direction,
            cost,
        }
    }

    /// Returns the agents carried by this move, in ascending index
    /// order.
    #[inline]
    pub fn agents(&self) -> &[AgentIndex] {
        &self.agents
    }

    /// Returns the number of agents carried by this move.
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// Returns the direction of this move.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the cost of this move.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }
}

impl<T> std::fmt::Display for Move<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move(direction: {}, agents: [", self.direction)?;
        for (position, agent) in self.agents.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", agent.get())?;
        }
        write!(f, "], cost: {})", self.cost)
    }
}

/// The error type for plan validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanValidationError {
    /// The move at `index` does not continue the forward/return
    /// alternation (plans start with a forward move).
    NonAlternatingDirection { index: usize },
    /// The move at `index` carries a batch outside the size bounds of
    /// its direction.
    InvalidBatchSize {
        index: usize,
        size: usize,
        limit: usize,
    },
    /// The move at `index` names an agent the model does not know.
    UnknownAgent { index: usize, agent: AgentIndex },
    /// The move at `index` carries an agent that is not on the side the
    /// move departs from.
    AgentOnWrongSide { index: usize, agent: AgentIndex },
    /// The recorded cost of the move at `index` does not equal the
    /// batch cost under the model.
    MoveCostMismatch { index: usize },
    /// The recorded total cost does not equal the sum of the move
    /// costs.
    TotalCostMismatch,
    /// Replaying the plan does not end in the goal state.
    NotAtGoal,
}

impl std::fmt::Display for PlanValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonAlternatingDirection { index } => {
                write!(f, "Move {} breaks the forward/return alternation", index)
            }
            Self::InvalidBatchSize { index, size, limit } => write!(
                f,
                "Move {} carries {} agents but at most {} are allowed",
                index, size, limit
            ),
            Self::UnknownAgent { index, agent } => {
                write!(f, "Move {} names unknown agent {}", index, agent.get())
            }
            Self::AgentOnWrongSide { index, agent } => write!(
                f,
                "Move {} carries agent {} which is not on the departing side",
                index,
                agent.get()
            ),
            Self::MoveCostMismatch { index } => write!(
                f,
                "Move {} is tagged with a cost that differs from its batch cost",
                index
            ),
            Self::TotalCostMismatch => {
                write!(f, "The total cost does not equal the sum of the move costs")
            }
            Self::NotAtGoal => write!(f, "The plan does not end in the goal state"),
        }
    }
}

impl std::error::Error for PlanValidationError {}

/// The final solution to a crossing instance: the ordered move sequence
/// and its total cost.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CrossingPlan<T> {
    moves: Vec<Move<T>>,
    total_cost: T,
}

impl<T> CrossingPlan<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `CrossingPlan`.
    ///
    /// # Panics
    ///
    /// Panics if `total_cost` does not equal the sum of the move costs.
    pub fn new(moves: Vec<Move<T>>, total_cost: T) -> Self {
        let sum = moves
            .iter()
            .fold(T::zero(), |acc, step| acc.saturating_add(step.cost()));
        assert!(
            sum == total_cost,
            "called `CrossingPlan::new` with a total cost that does not equal the sum of the move costs"
        );

        Self { moves, total_cost }
    }

    /// Returns the ordered move sequence.
    #[inline]
    pub fn moves(&self) -> &[Move<T>] {
        &self.moves
    }

    /// Returns the number of moves in this plan.
    #[inline]
    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if this plan contains no moves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the total cost of this plan.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Replays this plan against the given model and checks every
    /// structural property: moves alternate starting with a forward
    /// move, batches respect the direction-specific size bounds, every
    /// carried agent departs from the side it is actually on, each move
    /// cost equals its batch cost, the total equals the sum, and the
    /// final state is the goal.
    pub fn validate(&self, model: &CrossingModel<T>) -> Result<(), PlanValidationError> {
        let mut state = CrossingState::initial(model.num_agents());
        let mut expected_direction = Direction::Forward;
        let mut accumulated = T::zero();

        for (index, step) in self.moves.iter().enumerate() {
            if step.direction() != expected_direction {
                return Err(PlanValidationError::NonAlternatingDirection { index });
            }

            let limit = match step.direction() {
                Direction::Forward => model.capacity(),
                Direction::Return => model.capacity().saturating_sub(1),
            };
            if step.num_agents() == 0 || step.num_agents() > limit {
                return Err(PlanValidationError::InvalidBatchSize {
                    index,
                    size: step.num_agents(),
                    limit,
                });
            }

            for &agent in step.agents() {
                if agent.get() >= model.num_agents() {
                    return Err(PlanValidationError::UnknownAgent { index, agent });
                }
                let departs_from_source = step.direction() == Direction::Forward;
                if state.is_on_source(agent) != departs_from_source {
                    return Err(PlanValidationError::AgentOnWrongSide { index, agent });
                }
            }

            if step.cost() != model.batch_cost(step.agents()) {
                return Err(PlanValidationError::MoveCostMismatch { index });
            }

            state = match step.direction() {
                Direction::Forward => state.after_forward(step.agents()),
                Direction::Return => state.after_return(step.agents()),
            };
            accumulated = accumulated.saturating_add(step.cost());
            expected_direction = expected_direction.opposite();
        }

        if accumulated != self.total_cost {
            return Err(PlanValidationError::TotalCostMismatch);
        }
        if !state.is_goal() {
            return Err(PlanValidationError::NotAtGoal);
        }
        Ok(())
    }
}

impl<T> std::fmt::Display for CrossingPlan<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Crossing Plan Summary")?;
        writeln!(f, "   Total cost: {}", self.total_cost)?;
        writeln!(f)?;

        if self.moves.is_empty() {
            writeln!(f, "   (No moves)")?;
            return Ok(());
        }

        writeln!(
            f,
            "   {:<6} | {:<10} | {:<16} | {:<10}",
            "Step", "Direction", "Agents", "Cost"
        )?;
        writeln!(f, "   {:-<6}-+-{:-<10}-+-{:-<16}-+-{:-<10}", "", "", "", "")?;
        for (position, step) in self.moves.iter().enumerate() {
            let agents = step
                .agents()
                .iter()
                .map(|agent| agent.get().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                f,
                "   {:<6} | {:<10} | {:<16} | {:<10}",
                position + 1,
                step.direction().to_string(),
                agents,
                step.cost()
            )?;
        }

        Ok(())
    }
}
