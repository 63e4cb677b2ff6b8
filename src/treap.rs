//! A randomized binary search tree.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::{fmt, hash, iter};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    iter::{IntoIter, Iter},
    key::{Key, ScalarKind},
    node::{Link, Node},
    priority_generator::{PriorityGenerator, Uniform},
};

// ////////////////////////////////////////////////////////////////////////////
// Errors
// ////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when inserting into a [`Treap`].
///
/// A failed insertion leaves the treap exactly as it was.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum TreapError {
    /// A key comparing equal to the new key is already present.
    #[error("key is already present in the treap.")]
    DuplicateKey,
    /// The new key is of a different kind than the keys already present.
    #[error("cannot insert a {found} key into a treap of {expected} keys.")]
    TypeMismatch {
        /// The kind of the keys already in the treap.
        expected: ScalarKind,
        /// The kind of the rejected key.
        found: ScalarKind,
    },
}

// ////////////////////////////////////////////////////////////////////////////
// Treap
// ////////////////////////////////////////////////////////////////////////////

/// A treap stores a set of unique keys such that they can be inserted,
/// removed and looked up in `O(log(n))` expected time, and enumerated in
/// ascending order.
///
/// The treap is a binary search tree ordered by key, in which every node
/// additionally carries a random priority. Rotations keep the tree in
/// min-heap order on these priorities: no node has a smaller priority than
/// its parent. As the priorities are independent of the keys, the shape of
/// the tree is that of a binary search tree built by inserting the keys in a
/// uniformly random order, whose expected height is logarithmic. No global
/// rebalancing pass is ever needed.
///
/// All keys in one treap are of the same [`ScalarKind`], and no two keys
/// compare equal.
///
/// # Examples
///
/// ```
/// use treap::Treap;
///
/// let mut treap = Treap::new();
/// for key in [5, 1, -3, 7, 0] {
///     treap.insert(key)?;
/// }
/// assert_eq!(treap.sorted_vec(), [-3, 0, 1, 5, 7]);
/// assert_eq!(treap.min(), Some(&-3));
/// assert_eq!(treap.max(), Some(&7));
///
/// assert!(treap.delete(&1));
/// assert_eq!(treap.len(), 4);
/// assert!(!treap.delete(&100));
/// # Ok::<(), treap::TreapError>(())
/// ```
pub struct Treap<T, G = Uniform> {
    root: Link<T>,
    len: usize,
    priority_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> Treap<T> {
    /// Create a new, empty treap using the default [`Uniform`] priority
    /// generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let treap: Treap<i64> = Treap::new();
    /// assert!(treap.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_priority_generator(Uniform::default())
    }
}

impl<T: Key> Treap<T> {
    /// Build a treap from the given keys.
    ///
    /// # Errors
    ///
    /// Fails on the first key which cannot be inserted, see
    /// [`insert`][Treap::insert].
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::{Treap, TreapError};
    ///
    /// let treap = Treap::try_from_iter([3, 1, 2])?;
    /// assert_eq!(treap.sorted_vec(), [1, 2, 3]);
    ///
    /// assert_eq!(
    ///     Treap::try_from_iter([1, 2, 1]).err(),
    ///     Some(TreapError::DuplicateKey)
    /// );
    /// # Ok::<(), TreapError>(())
    /// ```
    #[inline]
    pub fn try_from_iter<I>(iter: I) -> Result<Self, TreapError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut treap = Treap::new();
        treap.try_extend(iter)?;
        Ok(treap)
    }
}

impl<T, G> Treap<T, G> {
    /// Create a new, empty treap drawing node priorities from the given
    /// generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::{DEFAULT_PRIORITY_RANGE, Treap, Uniform};
    ///
    /// let generator = Uniform::with_seed(DEFAULT_PRIORITY_RANGE, 42)?;
    /// let mut treap = Treap::with_priority_generator(generator);
    /// treap.insert('a')?;
    /// assert_eq!(treap.len(), 1);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn with_priority_generator(priority_generator: G) -> Self {
        Treap {
            root: None,
            len: 0,
            priority_generator,
        }
    }

    /// Returns the number of keys in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let treap = Treap::try_from_iter(0..10)?;
    /// assert_eq!(treap.len(), 10);
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the treap contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all keys from the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let mut treap = Treap::try_from_iter(0..10)?;
    /// treap.clear();
    /// assert!(treap.is_empty());
    /// assert_eq!(treap.min(), None);
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        debug!("Clearing treap of {} keys", self.len);
        self.root = None;
        self.len = 0;
    }

    /// Returns the smallest key, or `None` if the treap is empty.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.root.as_deref().map(|root| &root.leftmost().key)
    }

    /// Returns the largest key, or `None` if the treap is empty.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.root.as_deref().map(|root| &root.rightmost().key)
    }

    /// Returns the number of levels in the tree; zero when empty.
    ///
    /// This is expected to be `O(log(n))`, and is mostly of interest for
    /// diagnostics.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Returns an iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let treap = Treap::try_from_iter([2, 3, 1])?;
    /// let mut iter = treap.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Returns all keys in ascending order.
    ///
    /// Every call builds a fresh vector; nothing is retained by the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let treap = Treap::try_from_iter(["Du", "Bb", "Ge", "Att"])?;
    /// assert_eq!(treap.sorted_vec(), ["Att", "Bb", "Du", "Ge"]);
    /// assert_eq!(treap.sorted_vec(), ["Att", "Bb", "Du", "Ge"]);
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    #[must_use]
    pub fn sorted_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.collect_into(&mut out);
        }
        out
    }

    /// Consumes the treap, returning all keys in ascending order.
    #[inline]
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<T, G> Treap<T, G>
where
    T: Key,
    G: PriorityGenerator,
{
    /// Insert a key into the treap.
    ///
    /// The key is placed as a leaf by binary search and then rotated upwards
    /// for as long as its priority is smaller than its parent's.
    ///
    /// # Errors
    ///
    /// - [`TreapError::TypeMismatch`] if the key is of a different
    ///   [`ScalarKind`] than the keys already present.
    /// - [`TreapError::DuplicateKey`] if an equal key is already present.
    ///
    /// The treap is left unchanged in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::{Scalar, ScalarKind, Treap, TreapError};
    ///
    /// let mut treap = Treap::new();
    /// treap.insert(Scalar::from(5))?;
    /// assert_eq!(treap.insert(Scalar::from(5)), Err(TreapError::DuplicateKey));
    /// assert_eq!(
    ///     treap.insert(Scalar::from("five")),
    ///     Err(TreapError::TypeMismatch {
    ///         expected: ScalarKind::Numeric,
    ///         found: ScalarKind::Textual,
    ///     })
    /// );
    /// assert_eq!(treap.len(), 1);
    /// # Ok::<(), TreapError>(())
    /// ```
    pub fn insert(&mut self, key: T) -> Result<(), TreapError> {
        // All keys share one kind, so the root speaks for the whole tree.
        if let Some(root) = self.root.as_deref() {
            let expected = root.key.kind();
            let found = key.kind();
            if expected != found {
                trace!("Rejecting {found} key in {expected} treap");
                return Err(TreapError::TypeMismatch { expected, found });
            }
        }
        Self::insert_at(&mut self.root, key, &mut self.priority_generator)?;
        self.len += 1;
        Ok(())
    }

    /// Insert all keys from the iterator, stopping at the first failure.
    ///
    /// Keys inserted before the failure remain in the treap.
    ///
    /// # Errors
    ///
    /// See [`insert`][Treap::insert].
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), TreapError>
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key)?;
        }
        Ok(())
    }

    /// Recursively insert `key` into the subtree at `link`, restoring the heap
    /// order on the way back up.
    ///
    /// Nothing is modified until the empty slot for the key has been found,
    /// so an error leaves the subtree untouched.
    fn insert_at(
        link: &mut Link<T>,
        key: T,
        priority_generator: &mut G,
    ) -> Result<(), TreapError> {
        let node = match *link {
            None => {
                *link = Some(Box::new(Node::new(key, priority_generator.priority())));
                return Ok(());
            }
            Some(ref mut node) => node,
        };

        let rotation = match key.cmp(&node.key) {
            Ordering::Equal => {
                trace!("Rejecting duplicate key");
                return Err(TreapError::DuplicateKey);
            }
            Ordering::Less => {
                Self::insert_at(&mut node.left, key, priority_generator)?;
                node.left_outranks().then_some(Rotation::Right)
            }
            Ordering::Greater => {
                Self::insert_at(&mut node.right, key, priority_generator)?;
                node.right_outranks().then_some(Rotation::Left)
            }
        };

        if let Some(rotation) = rotation {
            rotate(link, rotation);
        }
        Ok(())
    }
}

impl<T, G> Treap<T, G>
where
    T: Ord,
{
    /// Returns `true` if the treap contains a key equal to `key`.
    ///
    /// The key may be any borrowed form of the treap's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let treap = Treap::try_from_iter([String::from("Bb"), String::from("Besk")])?;
    /// assert!(treap.search("Besk"));
    /// assert!(!treap.search("D"));
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            node = match key.cmp(current.key.borrow()) {
                Ordering::Equal => return true,
                Ordering::Less => current.left.as_deref(),
                Ordering::Greater => current.right.as_deref(),
            };
        }
        false
    }

    /// Removes the key equal to `key` from the treap, returning `true` if it
    /// was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let mut treap = Treap::try_from_iter([5, 1, -3])?;
    /// assert!(treap.delete(&1));
    /// assert!(!treap.delete(&1));
    /// assert_eq!(treap.sorted_vec(), [-3, 5]);
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Removes the key equal to `key` from the treap and returns it, or
    /// returns `None` if no such key is present.
    ///
    /// The node holding the key is rotated down, always towards the child
    /// with the smaller priority so that the heap order is kept, until it has
    /// at most one child. It is then replaced by that child.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap::Treap;
    ///
    /// let mut treap = Treap::try_from_iter([String::from("hej"), String::from("då")])?;
    /// assert_eq!(treap.remove("hej"), Some(String::from("hej")));
    /// assert_eq!(treap.remove("hej"), None);
    /// # Ok::<(), treap::TreapError>(())
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = Self::remove_at(&mut self.root, key)?;
        self.len -= 1;
        Some(removed)
    }

    /// Locate `key` in the subtree at `link` and remove it.
    ///
    /// Nothing is modified if the key is absent.
    fn remove_at<Q>(link: &mut Link<T>, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = link.as_mut()?;
        match key.cmp(node.key.borrow()) {
            Ordering::Less => Self::remove_at(&mut node.left, key),
            Ordering::Greater => Self::remove_at(&mut node.right, key),
            Ordering::Equal => Self::remove_root(link),
        }
    }

    /// Remove the root of the subtree at `link`.
    fn remove_root(link: &mut Link<T>) -> Option<T> {
        let node = link.as_deref()?;
        let rotation = match (node.left.as_deref(), node.right.as_deref()) {
            // Equal priorities rotate left.
            (Some(left), Some(right)) if left.priority < right.priority => Some(Rotation::Right),
            (Some(_), Some(_)) => Some(Rotation::Left),
            _ => None,
        };

        let Some(rotation) = rotation else {
            let mut node = link.take()?;
            *link = node.left.take().or_else(|| node.right.take());
            return Some(node.key);
        };

        rotate(link, rotation);
        // The node to remove is now a child of the new subtree root.
        let top = link.as_mut()?;
        match rotation {
            Rotation::Right => Self::remove_root(&mut top.right),
            Rotation::Left => Self::remove_root(&mut top.left),
        }
    }

    /// Checks the integrity of the treap.
    #[cfg(test)]
    pub(crate) fn check(&self) {
        let count = self.root.as_ref().map_or(0, |root| root.check(None, None));
        assert_eq!(count, self.len, "Stored length does not match node count");
        if self.len == 0 {
            assert!(self.root.is_none());
        }
    }
}

// ///////////////////////////////////////////////
// Rotations
// ///////////////////////////////////////////////

/// Direction of a rotation at a subtree root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rotation {
    /// The right child moves up.
    Left,
    /// The left child moves up.
    Right,
}

/// Rotate the subtree at `link` in place.
fn rotate<T>(link: &mut Link<T>, rotation: Rotation) {
    if let Some(node) = link.take() {
        let child = match rotation {
            Rotation::Left => node.right.as_deref(),
            Rotation::Right => node.left.as_deref(),
        };
        trace!(
            "Rotating {rotation:?}: priority {} over {}",
            child.map_or(node.priority, |child| child.priority),
            node.priority
        );
        *link = Some(match rotation {
            Rotation::Left => node.rotate_left(),
            Rotation::Right => node.rotate_right(),
        });
    }
}

// ///////////////////////////////////////////////
// Free functions
// ///////////////////////////////////////////////

/// Sort the items by inserting them all into a treap and reading them back in
/// order.
///
/// As a treap is a set, the items must be distinct. Callers needing to sort a
/// multiset must remove or tag duplicates first.
///
/// # Errors
///
/// Fails as [`Treap::insert`] does if two items compare equal or the items
/// are of mixed [`ScalarKind`]s.
///
/// # Examples
///
/// ```
/// assert_eq!(treap::sort(["Du", "Bb", "Ge", "Att"])?, ["Att", "Bb", "Du", "Ge"]);
/// # Ok::<(), treap::TreapError>(())
/// ```
#[inline]
pub fn sort<T, I>(items: I) -> Result<Vec<T>, TreapError>
where
    T: Key,
    I: IntoIterator<Item = T>,
{
    Ok(Treap::try_from_iter(items)?.into_sorted_vec())
}

// ///////////////////////////////////////////////
// Trait implementations
// ///////////////////////////////////////////////

impl<T> Default for Treap<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq, G> PartialEq for Treap<T, G> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq, G> Eq for Treap<T, G> {}

impl<T: hash::Hash, G> hash::Hash for Treap<T, G> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for key in self {
            key.hash(state);
        }
    }
}

impl<T, G> fmt::Debug for Treap<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, key) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key:?}")?;
        }
        write!(f, "]")
    }
}

impl<T, G> fmt::Display for Treap<T, G>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, key) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, "]")
    }
}

impl<T, G> iter::IntoIterator for Treap<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.root, self.len)
    }
}

impl<'a, T, G> iter::IntoIterator for &'a Treap<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////


#[cfg(test)]
mod proptests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::{Treap, TreapError};
    use crate::key::{Scalar, ScalarKind};

    /// Distinct textual scalars in ascending order, alongside a shuffled copy
    /// and a number of deletions to perform.
    fn text_keys() -> impl Strategy<Value = (Vec<Scalar>, Vec<Scalar>, usize)> {
        prop::collection::btree_set("[a-zA-Z]{0,6}", 0..60).prop_flat_map(|set| {
            let keys: Vec<Scalar> = set.into_iter().map(Scalar::from).collect();
            let n = keys.len();
            (Just(keys.clone()), Just(keys).prop_shuffle(), 0..=n)
        })
    }

    proptest! {
        #[test]
        fn sorted_round_trip(keys in prop::collection::vec(any::<i32>(), 0..200)) {
            let mut unique = BTreeSet::new();
            let mut treap = Treap::new();
            for key in &keys {
                // Repeated keys are rejected, not stored twice.
                if unique.insert(*key) {
                    prop_assert_eq!(treap.insert(*key), Ok(()));
                } else {
                    prop_assert_eq!(treap.insert(*key), Err(TreapError::DuplicateKey));
                }
            }
            treap.check();
            prop_assert_eq!(treap.len(), unique.len());
            prop_assert_eq!(treap.sorted_vec(), unique.into_iter().collect::<Vec<_>>());
        }

        #[test]
        fn delete_in_any_order(
            keys in prop::collection::btree_set(any::<i16>(), 0..100)
                .prop_flat_map(|set| {
                    let keys: Vec<i16> = set.into_iter().collect();
                    let n = keys.len();
                    (Just(keys.clone()), Just(keys).prop_shuffle(), 0..=n)
                })
        ) {
            let (sorted, order, stop) = keys;
            let mut treap = Treap::try_from_iter(sorted.iter().copied())
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            let mut remaining: BTreeSet<i16> = sorted.into_iter().collect();
            for key in order.iter().take(stop) {
                prop_assert!(treap.delete(key));
                remaining.remove(key);
                treap.check();
                prop_assert_eq!(treap.len(), remaining.len());
                prop_assert_eq!(treap.sorted_vec(), remaining.iter().copied().collect::<Vec<_>>());
            }
        }

        #[test]
        fn mixed_operations(ops in prop::collection::vec((any::<bool>(), 0_u8..64), 0..300)) {
            let mut treap = Treap::new();
            let mut model = BTreeSet::new();
            for (insert, key) in ops {
                if insert {
                    prop_assert_eq!(treap.insert(key).is_ok(), model.insert(key));
                } else {
                    prop_assert_eq!(treap.delete(&key), model.remove(&key));
                }
                prop_assert_eq!(treap.len(), model.len());
                prop_assert_eq!(treap.min(), model.first());
                prop_assert_eq!(treap.max(), model.last());
            }
            treap.check();
            prop_assert_eq!(treap.into_sorted_vec(), model.into_iter().collect::<Vec<_>>());
        }

        #[test]
        fn text_round_trip_and_delete((sorted, order, stop) in text_keys()) {
            let mut treap = Treap::new();
            for key in order.iter().cloned() {
                prop_assert_eq!(treap.insert(key), Ok(()));
            }
            treap.check();
            prop_assert_eq!(treap.sorted_vec(), sorted.clone());

            let mut remaining: BTreeSet<Scalar> = sorted.into_iter().collect();
            for key in order.iter().take(stop) {
                prop_assert!(treap.delete(key));
                prop_assert!(!treap.search(key));
                remaining.remove(key);
                treap.check();
                prop_assert_eq!(treap.len(), remaining.len());
                prop_assert_eq!(treap.sorted_vec(), remaining.iter().cloned().collect::<Vec<_>>());
            }
        }

        #[test]
        fn numbers_rejected_from_text(
            (sorted, _order, _stop) in text_keys(),
            number in any::<f64>(),
        ) {
            prop_assume!(!sorted.is_empty());
            let mut treap = Treap::try_from_iter(sorted.iter().cloned())
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
            let before = treap.sorted_vec();
            prop_assert_eq!(
                treap.insert(Scalar::from(number)),
                Err(TreapError::TypeMismatch {
                    expected: ScalarKind::Textual,
                    found: ScalarKind::Numeric,
                })
            );
            treap.check();
            prop_assert_eq!(treap.len(), before.len());
            prop_assert_eq!(treap.sorted_vec(), before);
        }

        #[test]
        fn empty_lookups(key in any::<i64>()) {
            let treap: Treap<i64> = Treap::new();
            prop_assert!(!treap.search(&key));
            prop_assert_eq!(treap.min(), None);
            prop_assert_eq!(treap.max(), None);
        }
    }
}
