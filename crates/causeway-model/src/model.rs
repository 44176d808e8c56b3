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

use crate::index::AgentIndex;
use num_traits::{PrimInt, Signed};

/// The immutable data model describing a crossing instance.
///
/// This struct holds all pre-validated, queryable data:
/// - `agent_costs[agent]`: the individual transfer cost of each agent.
/// - `capacity`: the transfer capacity of the shared channel. A forward
///   move carries `1..=capacity` agents; a return move carries
///   `1..=capacity - 1` agents, since the enabling resource never moves
///   on its own.
///
/// The cost of moving a batch of agents together is the maximum of the
/// individual costs of its members (see [`CrossingModel::batch_cost`]).
///
/// Construction:
/// - Use `CrossingModelBuilder` and call `CrossingModelBuilder::build`
///   to obtain a `CrossingModel`.
#[derive(Clone)]
pub struct CrossingModel<T>
where
    T: PrimInt + Signed,
{
    agent_costs: Vec<T>, // len = num_agents
    capacity: usize,
}

impl<T> CrossingModel<T>
where
    T: PrimInt + Signed,
{
    /// Returns the number of agents in the model.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use causeway_model::model::CrossingModelBuilder;
    ///
    /// let builder = CrossingModelBuilder::<i64>::new(4);
    /// let model = builder.build();
    /// assert_eq!(model.num_agents(), 4);
    /// ```
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.agent_costs.len()
    }

    /// Returns the transfer capacity of the shared channel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use causeway_model::model::CrossingModelBuilder;
    ///
    /// let builder = CrossingModelBuilder::<i64>::new(4);
    /// let model = builder.build();
    /// assert_eq!(model.capacity(), 2);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a slice of all agent costs.
    #[inline]
    pub fn agent_costs(&self) -> &[T] {
        &self.agent_costs
    }

    /// Returns the individual transfer cost of the specified agent.
    ///
    /// # Panics
    ///
    /// Panics if `agent_index` is not in `0..num_agents()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use causeway_model::index::AgentIndex;
    /// # use causeway_model::model::CrossingModelBuilder;
    ///
    /// let mut builder = CrossingModelBuilder::<i64>::new(2);
    /// builder.set_agent_cost(AgentIndex::new(0), 10);
    /// builder.set_agent_cost(AgentIndex::new(1), 20);
    /// let model = builder.build();
    /// assert_eq!(model.agent_cost(AgentIndex::new(0)), 10);
    /// assert_eq!(model.agent_cost(AgentIndex::new(1)), 20);
    /// ```
    #[inline]
    pub fn agent_cost(&self, agent_index: AgentIndex) -> T {
        let index = agent_index.get();
        debug_assert!(
            index < self.num_agents(),
            "called `CrossingModel::agent_cost` with agent index out of bounds: the len is {} but the index is {}",
            self.num_agents(),
            index
        );

        self.agent_costs[index]
    }

    /// Returns the cost of transferring the given batch of agents in a
    /// single crossing, defined as the maximum of the individual costs
    /// of its members.
    ///
    /// # Panics
    ///
    /// Panics if the batch is empty or larger than the transfer
    /// capacity. Both conditions indicate a defect in the caller: the
    /// transition generator never constructs such batches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use causeway_model::index::AgentIndex;
    /// # use causeway_model::model::CrossingModelBuilder;
    ///
    /// let mut builder = CrossingModelBuilder::<i64>::new(2);
    /// builder.set_agent_cost(AgentIndex::new(0), 1);
    /// builder.set_agent_cost(AgentIndex::new(1), 2);
    /// let model = builder.build();
    /// assert_eq!(
    ///     model.batch_cost(&[AgentIndex::new(0), AgentIndex::new(1)]),
    ///     2
    /// );
    /// ```
    #[inline]
    pub fn batch_cost(&self, batch: &[AgentIndex]) -> T {
        assert!(
            !batch.is_empty(),
            "called `CrossingModel::batch_cost` with an empty batch"
        );
        assert!(
            batch.len() <= self.capacity,
            "called `CrossingModel::batch_cost` with a batch of {} agents but the transfer capacity is {}",
            batch.len(),
            self.capacity
        );

        let mut cost = self.agent_cost(batch[0]);
        for &agent in &batch[1..] {
            cost = cost.max(self.agent_cost(agent));
        }
        cost
    }

    /// Returns the maximum individual cost across all agents, or `None`
    /// if the model holds no agents.
    #[inline]
    pub fn max_agent_cost(&self) -> Option<T> {
        self.agent_costs.iter().copied().max()
    }
}

impl<T> std::fmt::Debug for CrossingModel<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossingModel")
            .field("agent_costs", &self.agent_costs)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> std::fmt::Display for CrossingModel<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CrossingModel(num_agents: {}, capacity: {})",
            self.num_agents(),
            self.capacity()
        )
    }
}

/// A builder for `CrossingModel`.
///
/// The builder initializes with permissive defaults: every agent costs
/// one unit and the channel carries the classic two seats. Constraints
/// of a concrete instance are added by overriding these defaults.
///
/// # Note on validation
///
/// The builder accepts any configuration, including ones the solver
/// facade later rejects (capacity below two, non-positive costs). This
/// keeps the model usable for driving the search engine directly in
/// tests and diagnostics; user-facing validation lives in the facade.
///
/// # Examples
///
/// ```rust
/// # use causeway_model::index::AgentIndex;
/// # use causeway_model::model::CrossingModelBuilder;
///
/// let mut builder = CrossingModelBuilder::<i64>::new(4);
/// builder
///     .set_agent_cost(AgentIndex::new(2), 5)
///     .set_agent_cost(AgentIndex::new(3), 8)
///     .set_transfer_capacity(2);
/// let model = builder.build();
/// assert_eq!(model.num_agents(), 4);
/// assert_eq!(model.agent_cost(AgentIndex::new(2)), 5);
/// ```
#[derive(Clone)]
pub struct CrossingModelBuilder<T>
where
    T: PrimInt + Signed,
{
    agent_costs: Vec<T>,
    capacity: usize,
}

impl<T> CrossingModelBuilder<T>
where
    T: PrimInt + Signed,
{
    /// The default transfer capacity of the shared channel.
    pub const DEFAULT_TRANSFER_CAPACITY: usize = 2;

    /// Creates a new `CrossingModelBuilder` for the given number of
    /// agents, with every cost set to one and the default capacity.
    pub fn new(num_agents: usize) -> Self {
        Self {
            agent_costs: vec![T::one(); num_agents],
            capacity: Self::DEFAULT_TRANSFER_CAPACITY,
        }
    }

    /// Returns the number of agents in the builder.
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.agent_costs.len()
    }

    /// Sets the individual transfer cost of the specified agent.
    ///
    /// # Panics
    ///
    /// Panics if `agent_index` is not in `0..num_agents()`.
    #[inline]
    pub fn set_agent_cost(&mut self, agent_index: AgentIndex, cost: T) -> &mut Self {
        let index = agent_index.get();
        debug_assert!(
            index < self.num_agents(),
            "called `CrossingModelBuilder::set_agent_cost` with agent index out of bounds: the len is {} but the index is {}",
            self.num_agents(),
            index
        );

        self.agent_costs[index] = cost;
        self
    }

    /// Sets the transfer capacity of the shared channel.
    #[inline]
    pub fn set_transfer_capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /// Builds the `CrossingModel` instance.
    #[inline]
    pub fn build(&self) -> CrossingModel<T> {
        CrossingModel {
            agent_costs: self.agent_costs.clone(),
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    fn ai(i: usize) -> AgentIndex {
        AgentIndex::new(i)
    }

    #[test]
    fn test_builder_defaults() {
        let model = CrossingModelBuilder::<IntegerType>::new(3).build();
        assert_eq!(model.num_agents(), 3);
        assert_eq!(
            model.capacity(),
            CrossingModelBuilder::<IntegerType>::DEFAULT_TRANSFER_CAPACITY
        );
        assert_eq!(model.agent_costs(), &[1, 1, 1]);
    }

    #[test]
    fn test_builder_overrides() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(4);
        builder
            .set_agent_cost(ai(0), 1)
            .set_agent_cost(ai(1), 2)
            .set_agent_cost(ai(2), 5)
            .set_agent_cost(ai(3), 8)
            .set_transfer_capacity(3);
        let model = builder.build();

        assert_eq!(model.agent_costs(), &[1, 2, 5, 8]);
        assert_eq!(model.capacity(), 3);
        assert_eq!(model.agent_cost(ai(3)), 8);
    }

    #[test]
    fn test_builder_is_reusable() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(2);
        let first = builder.build();
        builder.set_agent_cost(ai(0), 42);
        let second = builder.build();

        assert_eq!(first.agent_cost(ai(0)), 1);
        assert_eq!(second.agent_cost(ai(0)), 42);
    }

    #[test]
    fn test_batch_cost_is_maximum_of_members() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(4);
        builder
            .set_agent_cost(ai(0), 1)
            .set_agent_cost(ai(1), 2)
            .set_agent_cost(ai(2), 5)
            .set_agent_cost(ai(3), 8);
        let model = builder.build();

        assert_eq!(model.batch_cost(&[ai(0)]), 1);
        assert_eq!(model.batch_cost(&[ai(0), ai(1)]), 2);
        assert_eq!(model.batch_cost(&[ai(1), ai(3)]), 8);
    }

    #[test]
    #[should_panic(expected = "called `CrossingModel::batch_cost` with an empty batch")]
    fn test_batch_cost_panics_on_empty_batch() {
        let model = CrossingModelBuilder::<IntegerType>::new(2).build();
        let _ = model.batch_cost(&[]);
    }

    #[test]
    #[should_panic(expected = "the transfer capacity is")]
    fn test_batch_cost_panics_on_oversized_batch() {
        let model = CrossingModelBuilder::<IntegerType>::new(3).build();
        let _ = model.batch_cost(&[ai(0), ai(1), ai(2)]);
    }

    #[test]
    fn test_max_agent_cost() {
        let mut builder = CrossingModelBuilder::<IntegerType>::new(3);
        builder.set_agent_cost(ai(1), 9);
        let model = builder.build();
        assert_eq!(model.max_agent_cost(), Some(9));

        let empty = CrossingModelBuilder::<IntegerType>::new(0).build();
        assert_eq!(empty.max_agent_cost(), None);
    }

    #[test]
    fn test_display() {
        let model = CrossingModelBuilder::<IntegerType>::new(4).build();
        assert_eq!(
            format!("{}", model),
            "CrossingModel(num_agents: 4, capacity: 2)"
        );
    }
}
