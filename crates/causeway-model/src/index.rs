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

/// A strongly typed index identifying one agent in a crossing model.
///
/// This struct wraps a `usize` index to prevent accidental mixing with
/// unrelated counters or positions. It compiles down to a transparent
/// `usize` (no runtime overhead).
///
/// # Examples
///
/// ```rust
/// # use causeway_model::index::AgentIndex;
///
/// let agent = AgentIndex::new(3);
/// assert_eq!(agent.get(), 3);
/// assert_eq!(format!("{}", agent), "AgentIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentIndex {
    index: usize,
}

impl AgentIndex {
    /// Creates a new `AgentIndex` with the given `usize` index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use causeway_model::index::AgentIndex;
    ///
    /// let agent = AgentIndex::new(5);
    /// assert_eq!(agent.get(), 5);
    /// ```
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Checks if the index is zero.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }
}

impl std::fmt::Debug for AgentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AgentIndex({})", self.index)
    }
}

impl std::fmt::Display for AgentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AgentIndex({})", self.index)
    }
}

impl From<usize> for AgentIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<AgentIndex> for usize {
    #[inline(always)]
    fn from(index: AgentIndex) -> Self {
        index.get()
    }
}

#[cfg(test)]
mod tests {
    use super::AgentIndex;

    #[test]
    fn test_new_and_get() {
        let agent = AgentIndex::new(7);
        assert_eq!(agent.get(), 7);
        assert!(!agent.is_zero());
        assert!(AgentIndex::new(0).is_zero());
    }

    #[test]
    fn test_ordering_follows_underlying_index() {
        let a = AgentIndex::new(1);
        let b = AgentIndex::new(2);
        assert!(a < b);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_conversions() {
        let agent: AgentIndex = 4usize.into();
        assert_eq!(agent, AgentIndex::new(4));
        let raw: usize = agent.into();
        assert_eq!(raw, 4);
    }

    #[test]
    fn test_display_and_debug() {
        let agent = AgentIndex::new(9);
        assert_eq!(format!("{}", agent), "AgentIndex(9)");
        assert_eq!(format!("{:?}", agent), "AgentIndex(9)");
    }
}
