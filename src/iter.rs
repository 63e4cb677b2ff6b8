//! In-order iterators over the keys of a treap.

use std::iter::FusedIterator;

use crate::node::{Link, Node};

// ////////////////////////////////////////////////////////////////////////////
// Iter
// ////////////////////////////////////////////////////////////////////////////

/// Iterator over the keys of a treap in ascending order, by reference.
///
/// Created by [`Treap::iter`][crate::Treap::iter].
#[derive(Debug)]
pub struct Iter<'a, T> {
    // Nodes whose key and right subtree are still to be visited. The top of
    // the stack is the next node to yield.
    stack: Vec<&'a Node<T>>,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, size: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            size,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.size -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            size: self.size,
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// IntoIter
// ////////////////////////////////////////////////////////////////////////////

/// Consuming iterator over the keys of a treap in ascending order.
///
/// Created by the [`IntoIterator`] implementation of
/// [`Treap`][crate::Treap]. Nodes are taken apart as the iterator advances,
/// so that every node is freed once its key has been yielded.
#[derive(Debug)]
pub struct IntoIter<T> {
    // Detached nodes whose left subtree has already been moved onto the
    // stack.
    stack: Vec<Box<Node<T>>>,
    size: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, size: usize) -> Self {
        let mut iter = IntoIter {
            stack: Vec::new(),
            size,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.size -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
