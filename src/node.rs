use std::cmp;

// ////////////////////////////////////////////////////////////////////////////
// Node
// ////////////////////////////////////////////////////////////////////////////

/// An owning link to a subtree. `None` is the empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Nodes make up the treap. The treap owns the root node, and each node has
/// exclusive ownership of its two children. There are no links back up the
/// tree, as all traversals start at the root.
///
/// Every key in the `left` subtree is less than `key`, and every key in the
/// `right` subtree is greater. The `priority` of a node is less than or equal
/// to the priorities of its children.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub key: T,
    // Drawn once at construction and never changed.
    pub priority: u32,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> Node<T> {
    /// Create a new leaf node.
    pub fn new(key: T, priority: u32) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
        }
    }

    /// Rotate the subtree counter-clockwise, making the right child the new
    /// root of the subtree:
    ///
    /// ```text
    ///     A                 B
    ///    / \               / \
    ///   x   B     -->     A   z
    ///      / \           / \
    ///     y   z         x   y
    /// ```
    ///
    /// The in-order sequence of keys is unchanged. If there is no right child
    /// the subtree is returned as is.
    pub fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            Some(mut right) => {
                self.right = right.left.take();
                right.left = Some(self);
                right
            }
            None => self,
        }
    }

    /// Rotate the subtree clockwise, making the left child the new root of
    /// the subtree:
    ///
    /// ```text
    ///       B             A
    ///      / \           / \
    ///     A   z   -->   x   B
    ///    / \               / \
    ///   x   y             y   z
    /// ```
    ///
    /// The in-order sequence of keys is unchanged. If there is no left child
    /// the subtree is returned as is.
    pub fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            Some(mut left) => {
                self.left = left.right.take();
                left.right = Some(self);
                left
            }
            None => self,
        }
    }

    /// Whether the left child has a strictly smaller priority than this node,
    /// violating the heap order.
    pub fn left_outranks(&self) -> bool {
        self.left
            .as_ref()
            .is_some_and(|left| left.priority < self.priority)
    }

    /// Whether the right child has a strictly smaller priority than this node,
    /// violating the heap order.
    pub fn right_outranks(&self) -> bool {
        self.right
            .as_ref()
            .is_some_and(|right| right.priority < self.priority)
    }

    /// The leftmost node of this subtree.
    pub fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node
    }

    /// The rightmost node of this subtree.
    pub fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }

    /// Number of nodes on the longest path from this node to a leaf,
    /// including this node.
    pub fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |left| left.height());
        let right = self.right.as_ref().map_or(0, |right| right.height());
        1 + cmp::max(left, right)
    }

    /// Append the keys of this subtree to `out`, in ascending order.
    pub fn collect_into(&self, out: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(left) = self.left.as_deref() {
            left.collect_into(out);
        }
        out.push(self.key.clone());
        if let Some(right) = self.right.as_deref() {
            right.collect_into(out);
        }
    }
}

impl<T: Ord> Node<T> {
    /// Checks the integrity of the subtree, returning the number of nodes.
    ///
    /// `lower` and `upper` are exclusive bounds that every key in the subtree
    /// must lie strictly within.
    #[cfg(test)]
    pub fn check(&self, lower: Option<&T>, upper: Option<&T>) -> usize {
        if let Some(lower) = lower {
            assert!(lower < &self.key, "BST order violated on the left");
        }
        if let Some(upper) = upper {
            assert!(&self.key < upper, "BST order violated on the right");
        }
        let mut count = 1;
        if let Some(left) = self.left.as_deref() {
            assert!(self.priority <= left.priority, "Heap order violated");
            count += left.check(lower, Some(&self.key));
        }
        if let Some(right) = self.right.as_deref() {
            assert!(self.priority <= right.priority, "Heap order violated");
            count += right.check(Some(&self.key), upper);
        }
        count
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
