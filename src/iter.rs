//! Lazy traversal sequences over a tree.
//!
//! Each iterator walks the live node graph without copying it; the
//! borrow it holds on the tree keeps mutation out for its whole
//! lifetime. All three orders yield [`NodeRef`] handles, are finite,
//! and are consumed by iteration (re-invoke the tree method to walk
//! again).

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::node::{predecessor_of, subtree_maximum, subtree_minimum, successor_of};
use crate::node::{Link, Node, NodeRef};
use crate::tree::RbTree;

/// Ascending key-order traversal (left, node, right).
///
/// Also iterates descending from the back via
/// [`DoubleEndedIterator`].
pub struct InOrder<'a, K, V> {
    front: Link<K, V>,
    back: Link<K, V>,
    remaining: usize,
    _tree: PhantomData<&'a RbTree<K, V>>,
}

unsafe impl<K: Sync, V: Sync> Send for InOrder<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for InOrder<'_, K, V> {}

impl<'a, K, V> InOrder<'a, K, V> {
    pub(crate) fn new(tree: &'a RbTree<K, V>) -> Self {
        Self {
            front: tree.root.map(|root| unsafe { subtree_minimum(root) }),
            back: tree.root.map(|root| unsafe { subtree_maximum(root) }),
            remaining: tree.len,
            _tree: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = NodeRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.front = unsafe { successor_of(node) };
        self.remaining -= 1;
        Some(NodeRef::new(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for InOrder<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.back = unsafe { predecessor_of(node) };
        self.remaining -= 1;
        Some(NodeRef::new(node))
    }
}

impl<K, V> ExactSizeIterator for InOrder<'_, K, V> {}
impl<K, V> FusedIterator for InOrder<'_, K, V> {}

/// Root-first traversal (node, left, right).
pub struct PreOrder<'a, K, V> {
    stack: Vec<NonNull<Node<K, V>>>,
    remaining: usize,
    _tree: PhantomData<&'a RbTree<K, V>>,
}

unsafe impl<K: Sync, V: Sync> Send for PreOrder<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for PreOrder<'_, K, V> {}

impl<'a, K, V> PreOrder<'a, K, V> {
    pub(crate) fn new(tree: &'a RbTree<K, V>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root {
            stack.push(root);
        }
        Self {
            stack,
            remaining: tree.len,
            _tree: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = NodeRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        unsafe {
            // Right first so the left subtree pops out first.
            if let Some(right) = (*node.as_ptr()).right {
                self.stack.push(right);
            }
            if let Some(left) = (*node.as_ptr()).left {
                self.stack.push(left);
            }
        }
        self.remaining -= 1;
        Some(NodeRef::new(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PreOrder<'_, K, V> {}
impl<K, V> FusedIterator for PreOrder<'_, K, V> {}

/// Children-first traversal (left, right, node).
pub struct PostOrder<'a, K, V> {
    stack: Vec<NonNull<Node<K, V>>>,
    descending: Link<K, V>,
    last_visited: Link<K, V>,
    remaining: usize,
    _tree: PhantomData<&'a RbTree<K, V>>,
}

unsafe impl<K: Sync, V: Sync> Send for PostOrder<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for PostOrder<'_, K, V> {}

impl<'a, K, V> PostOrder<'a, K, V> {
    pub(crate) fn new(tree: &'a RbTree<K, V>) -> Self {
        Self {
            stack: Vec::new(),
            descending: tree.root,
            last_visited: None,
            remaining: tree.len,
            _tree: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for PostOrder<'a, K, V> {
    type Item = NodeRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            loop {
                // Push the left spine of the pending subtree.
                while let Some(node) = self.descending {
                    self.stack.push(node);
                    self.descending = (*node.as_ptr()).left;
                }

                let node = *self.stack.last()?;
                let right = (*node.as_ptr()).right;

                // Visit the node only once its right subtree is done.
                if right.is_some() && right != self.last_visited {
                    self.descending = right;
                } else {
                    self.stack.pop();
                    self.last_visited = Some(node);
                    self.remaining -= 1;
                    return Some(NodeRef::new(node));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PostOrder<'_, K, V> {}
impl<K, V> FusedIterator for PostOrder<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RbTree<K, V> {
    type Item = NodeRef<'a, K, V>;
    type IntoIter = InOrder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}
