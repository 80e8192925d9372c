//! Node representation and read-only node handles.
//!
//! Nodes are heap-allocated and owned top-down from the tree's root.
//! Child links own their subtrees; parent links are non-owning
//! back-references used only for upward walks and rotation bookkeeping.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use static_assertions::assert_eq_size;

/// Node color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// A possibly-absent edge to a node. Absent children count as black
/// leaves for all balancing decisions.
pub(crate) type Link<K, V> = Option<NonNull<Node<K, V>>>;

/// A single tree node.
///
/// The key and value are written once at allocation and never mutated
/// afterwards; rotations and recoloring touch only the links and the
/// color bit.
pub(crate) struct Node<K, V> {
    pub(crate) parent: Link<K, V>,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) color: Color,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    /// Allocates a new unlinked node.
    ///
    /// New nodes start red so no path's black count changes before the
    /// insertion fixup runs.
    pub(crate) fn alloc(key: K, value: V, parent: Link<K, V>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Self {
            parent,
            left: None,
            right: None,
            color: Color::Red,
            key,
            value,
        })))
    }

    /// Allocates a detached copy of `source` carrying its key, value,
    /// and color.
    ///
    /// # Safety
    /// `source` must point to a live node.
    pub(crate) unsafe fn alloc_from(source: NonNull<Self>, parent: Link<K, V>) -> NonNull<Self>
    where
        K: Clone,
        V: Clone,
    {
        NonNull::from(Box::leak(Box::new(Self {
            parent,
            left: None,
            right: None,
            color: (*source.as_ptr()).color,
            key: (*source.as_ptr()).key.clone(),
            value: (*source.as_ptr()).value.clone(),
        })))
    }

    /// Check if the node is red.
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Check if the node is black.
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

/// Color of a possibly-absent node: absent is black.
///
/// # Safety
/// A non-empty `link` must point to a live node.
pub(crate) unsafe fn is_red<K, V>(link: Link<K, V>) -> bool {
    link.map_or(false, |node| (*node.as_ptr()).is_red())
}

/// Complement of [`is_red`].
///
/// # Safety
/// A non-empty `link` must point to a live node.
pub(crate) unsafe fn is_black<K, V>(link: Link<K, V>) -> bool {
    link.map_or(true, |node| (*node.as_ptr()).is_black())
}

/// Leftmost node of the subtree rooted at `node`.
///
/// # Safety
/// `node` must belong to a live, well-formed tree.
pub(crate) unsafe fn subtree_minimum<K, V>(mut node: NonNull<Node<K, V>>) -> NonNull<Node<K, V>> {
    while let Some(left) = (*node.as_ptr()).left {
        node = left;
    }
    node
}

/// Rightmost node of the subtree rooted at `node`.
///
/// # Safety
/// `node` must belong to a live, well-formed tree.
pub(crate) unsafe fn subtree_maximum<K, V>(mut node: NonNull<Node<K, V>>) -> NonNull<Node<K, V>> {
    while let Some(right) = (*node.as_ptr()).right {
        node = right;
    }
    node
}

/// In-order successor of `node`: the minimum of its right subtree, or
/// the nearest ancestor holding `node` in its left subtree.
///
/// # Safety
/// `node` must belong to a live, well-formed tree.
pub(crate) unsafe fn successor_of<K, V>(node: NonNull<Node<K, V>>) -> Link<K, V> {
    if let Some(right) = (*node.as_ptr()).right {
        return Some(subtree_minimum(right));
    }
    let mut current = node;
    let mut parent = (*current.as_ptr()).parent;
    while let Some(up) = parent {
        if (*up.as_ptr()).right != Some(current) {
            break;
        }
        current = up;
        parent = (*up.as_ptr()).parent;
    }
    parent
}

/// In-order predecessor of `node`, mirror of [`successor_of`].
///
/// # Safety
/// `node` must belong to a live, well-formed tree.
pub(crate) unsafe fn predecessor_of<K, V>(node: NonNull<Node<K, V>>) -> Link<K, V> {
    if let Some(left) = (*node.as_ptr()).left {
        return Some(subtree_maximum(left));
    }
    let mut current = node;
    let mut parent = (*current.as_ptr()).parent;
    while let Some(up) = parent {
        if (*up.as_ptr()).left != Some(current) {
            break;
        }
        current = up;
        parent = (*up.as_ptr()).parent;
    }
    parent
}

/// Read-only handle to a node.
///
/// A handle borrows the tree it came from, so the tree cannot be
/// mutated or dropped while any handle is alive. Handles expose the
/// key, value, and color plus the order-based walks; the tree itself
/// is the only writer.
pub struct NodeRef<'a, K, V> {
    node: NonNull<Node<K, V>>,
    _tree: PhantomData<&'a Node<K, V>>,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    /// Handles are equal when they point at the same node.
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

unsafe impl<K: Sync, V: Sync> Send for NodeRef<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(node: NonNull<Node<K, V>>) -> Self {
        Self {
            node,
            _tree: PhantomData,
        }
    }

    /// The node's key.
    pub fn key(&self) -> &'a K {
        unsafe { &(*self.node.as_ptr()).key }
    }

    /// The node's value.
    pub fn value(&self) -> &'a V {
        unsafe { &(*self.node.as_ptr()).value }
    }

    /// The node's color.
    pub fn color(&self) -> Color {
        unsafe { (*self.node.as_ptr()).color }
    }

    /// Handle to the smallest key in this node's subtree.
    pub fn minimum(self) -> Self {
        Self::new(unsafe { subtree_minimum(self.node) })
    }

    /// Handle to the largest key in this node's subtree.
    pub fn maximum(self) -> Self {
        Self::new(unsafe { subtree_maximum(self.node) })
    }

    /// Handle to the next key in ascending order, if any.
    pub fn successor(self) -> Option<Self> {
        unsafe { successor_of(self.node) }.map(Self::new)
    }

    /// Handle to the previous key in ascending order, if any.
    pub fn predecessor(self) -> Option<Self> {
        unsafe { predecessor_of(self.node) }.map(Self::new)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

// The niche of NonNull keeps links pointer-sized.
assert_eq_size!(Link<u64, u64>, *mut Node<u64, u64>);
assert_eq_size!(Color, u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_red() {
        let node = Node::alloc(1, "one", None);
        unsafe {
            assert_eq!((*node.as_ptr()).color, Color::Red);
            assert!((*node.as_ptr()).parent.is_none());
            assert!((*node.as_ptr()).left.is_none());
            assert!((*node.as_ptr()).right.is_none());
            drop(Box::from_raw(node.as_ptr()));
        }
    }

    #[test]
    fn test_link_colors_treat_absent_as_black() {
        unsafe {
            assert!(is_black::<i32, i32>(None));
            assert!(!is_red::<i32, i32>(None));

            let node = Node::alloc(7, 7, None);
            assert!(is_red(Some(node)));
            (*node.as_ptr()).color = Color::Black;
            assert!(is_black(Some(node)));
            drop(Box::from_raw(node.as_ptr()));
        }
    }

    #[test]
    fn test_node_ref_equality_is_identity() {
        unsafe {
            let a = Node::alloc(1, 1, None);
            let b = Node::alloc(1, 1, None);
            assert_eq!(NodeRef::new(a), NodeRef::new(a));
            assert_ne!(NodeRef::new(a), NodeRef::new(b));
            drop(Box::from_raw(a.as_ptr()));
            drop(Box::from_raw(b.as_ptr()));
        }
    }

    #[test]
    fn test_alloc_from_copies_key_value_color() {
        unsafe {
            let original = Node::alloc(3, "three", None);
            (*original.as_ptr()).color = Color::Black;

            let copy = Node::alloc_from(original, None);
            assert_eq!((*copy.as_ptr()).key, 3);
            assert_eq!((*copy.as_ptr()).value, "three");
            assert_eq!((*copy.as_ptr()).color, Color::Black);
            assert!((*copy.as_ptr()).left.is_none());
            assert!((*copy.as_ptr()).right.is_none());

            drop(Box::from_raw(original.as_ptr()));
            drop(Box::from_raw(copy.as_ptr()));
        }
    }
}
