//! Every node in a treap carries a random priority, drawn once when the node
//! is created. The tree is kept in min-heap order on these priorities, and as
//! the priorities are independent of the keys, the resulting shape is that of
//! a binary search tree built from a random insertion order. Its expected
//! height is therefore `O(log(n))` regardless of the order in which keys are
//! actually inserted.
//!
//! The default [`Uniform`] generator should suffice in almost all cases, but
//! a custom generator can be supplied through
//! [`Treap::with_priority_generator`][crate::Treap::with_priority_generator].

pub mod uniform;

use std::ops::Range;

pub use uniform::{DEFAULT_PRIORITY_RANGE, Uniform, UniformError};

// ////////////////////////////////////////////////////////////////////////////
// Priority Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the treap, the node is assigned a
/// priority as determined by a [`PriorityGenerator`].
///
/// Priorities must be drawn independently of one another and of the keys.
/// Returning predictable priorities (for example, increasing ones) degrades
/// the treap into a linked list.
pub trait PriorityGenerator {
    /// The half-open range from which priorities are drawn.
    #[must_use]
    fn range(&self) -> Range<u32>;

    /// Draw a fresh priority for a new node.
    ///
    /// This function should _never_ return a value outside of
    /// [`range`][PriorityGenerator::range].
    #[must_use]
    fn priority(&mut self) -> u32;
}
