//! A treap is a binary search tree in which every node also carries a random
//! priority, and the tree is kept in min-heap order on those priorities. Keys
//! can be inserted, removed and looked up in `O(log(n))` expected time, and
//! enumerated in ascending order.
//!
//! Conceptually, each node is drawn at a height given by its priority:
//!
//! ```text
//!  priority
//!     3                 [5]
//!                      /   \
//!    17            [1]      \
//!                 /          \
//!    42        [-3]          [7]
//!                 \
//!    80           [0]
//! ```
//!
//! Read left to right the keys are sorted; read top to bottom the priorities
//! increase. Given a set of keys and their priorities there is exactly one
//! tree satisfying both orders, and because the priorities are random that
//! tree is shaped as if the keys had been inserted in random order. Its
//! height is therefore logarithmic in expectation, whatever order the keys
//! actually arrive in.
//!
//! The treap holds a set: inserting a key equal to one already present
//! fails. All keys in one treap must also be of the same
//! [`ScalarKind`]; for ordinary Rust types this holds by construction, while
//! the run-time tagged [`Scalar`] is checked on insertion.

mod iter;
mod key;
mod node;
pub mod priority_generator;
mod treap;

pub use crate::iter::{IntoIter, Iter};
pub use crate::key::{Key, Scalar, ScalarKind};
pub use crate::priority_generator::{
    DEFAULT_PRIORITY_RANGE, PriorityGenerator, Uniform, UniformError,
};
pub use crate::treap::{Treap, TreapError, sort};
