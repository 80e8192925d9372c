//! Balancing engine: ownership of the node graph and the insert/remove
//! rebalancing algorithms.
//!
//! Mutations run in two phases: a plain binary-search-tree link or
//! unlink, then a fixup walk that restores the red-black invariants
//! with recolorings and at most two (insert) or three (remove)
//! rotations. Lookups and traversals never mutate and never rebalance.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::trace;

use crate::error::{Result, TreeError};
use crate::iter::{InOrder, PostOrder, PreOrder};
use crate::node::{is_black, is_red, subtree_maximum, subtree_minimum};
use crate::node::{Color, Link, Node, NodeRef};

/// Ordered map backed by a red-black tree.
///
/// Keys are compared with [`Ord`]; duplicate keys are rejected rather
/// than overwritten. The value type defaults to the key type for
/// set-like use.
///
/// Not safe for concurrent mutation; the borrow rules make shared
/// read-only traversal safe on their own.
pub struct RbTree<K, V = K> {
    pub(crate) root: Link<K, V>,
    pub(crate) len: usize,
    _owns: PhantomData<Box<Node<K, V>>>,
}

unsafe impl<K: Send, V: Send> Send for RbTree<K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for RbTree<K, V> {}

// ============================================================================
// Construction and teardown
// ============================================================================

impl<K, V> RbTree<K, V> {
    /// Creates an empty tree. Does not allocate.
    pub const fn new() -> Self {
        Self {
            root: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every entry, leaving the tree empty and reusable.
    ///
    /// The walk is iterative with an explicit stack, so teardown depth
    /// does not depend on tree height.
    pub fn clear(&mut self) {
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            if let Some(left) = node.left {
                stack.push(left);
            }
            if let Some(right) = node.right {
                stack.push(right);
            }
        }
        if self.len != 0 {
            trace!(dropped = self.len, "cleared tree");
        }
        self.len = 0;
    }
}

impl<K, V> Drop for RbTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Queries
// ============================================================================

impl<K, V> RbTree<K, V> {
    /// Handle to the entry with the smallest key, if any.
    pub fn minimum(&self) -> Option<NodeRef<'_, K, V>> {
        self.root
            .map(|root| NodeRef::new(unsafe { subtree_minimum(root) }))
    }

    /// Handle to the entry with the largest key, if any.
    pub fn maximum(&self) -> Option<NodeRef<'_, K, V>> {
        self.root
            .map(|root| NodeRef::new(unsafe { subtree_maximum(root) }))
    }

    /// Ascending traversal over all entries.
    pub fn in_order(&self) -> InOrder<'_, K, V> {
        InOrder::new(self)
    }

    /// Root-first traversal over all entries.
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder::new(self)
    }

    /// Children-first traversal over all entries.
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder::new(self)
    }
}

impl<K: Ord, V> RbTree<K, V> {
    /// Handle to the entry holding `key`, if present.
    ///
    /// The key may be any borrowed form of the tree's key type, as long
    /// as the orderings match.
    pub fn search<Q>(&self, key: &Q) -> Option<NodeRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(NodeRef::new)
    }

    /// Reference to the value stored under `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key)
            .map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Check if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    fn find<Q>(&self, key: &Q) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node) = current {
            current = unsafe {
                match key.cmp((*node.as_ptr()).key.borrow()) {
                    Ordering::Less => (*node.as_ptr()).left,
                    Ordering::Greater => (*node.as_ptr()).right,
                    Ordering::Equal => return Some(node),
                }
            };
        }
        None
    }
}

// ============================================================================
// Mutation
// ============================================================================

impl<K: Ord, V> RbTree<K, V> {
    /// Inserts `key` with `value` at its binary-search-tree position.
    ///
    /// Fails with [`TreeError::DuplicateKey`] if the key is already
    /// present; the tree is untouched in that case. The duplicate check
    /// happens during the descent, before anything is allocated.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let mut parent = None;
        let mut link = self.root;
        while let Some(current) = link {
            parent = link;
            link = unsafe {
                match key.cmp(&(*current.as_ptr()).key) {
                    Ordering::Less => (*current.as_ptr()).left,
                    Ordering::Greater => (*current.as_ptr()).right,
                    Ordering::Equal => return Err(TreeError::DuplicateKey),
                }
            };
        }

        let node = Node::alloc(key, value, parent);
        unsafe {
            match parent {
                Some(parent) => {
                    if (*node.as_ptr()).key < (*parent.as_ptr()).key {
                        (*parent.as_ptr()).left = Some(node);
                    } else {
                        (*parent.as_ptr()).right = Some(node);
                    }
                }
                None => self.root = Some(node),
            }
            self.insert_fixup(node);
        }
        self.len += 1;
        trace!(len = self.len, "inserted node");
        Ok(())
    }

    /// Removes the entry holding `key` and returns its value.
    ///
    /// Fails with [`TreeError::KeyNotFound`] if the key is absent; the
    /// tree is untouched in that case.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(target) = self.find(key) else {
            return Err(TreeError::KeyNotFound);
        };

        unsafe {
            let mut removed_color = (*target.as_ptr()).color;
            let fixup_slot;
            let fixup_parent;

            match ((*target.as_ptr()).left, (*target.as_ptr()).right) {
                (None, right) => {
                    fixup_slot = right;
                    fixup_parent = (*target.as_ptr()).parent;
                    self.transplant(target, right);
                }
                (left @ Some(_), None) => {
                    fixup_slot = left;
                    fixup_parent = (*target.as_ptr()).parent;
                    self.transplant(target, left);
                }
                (Some(left), Some(right)) => {
                    // Two children: relink the in-order successor
                    // (which has no left child) into the target's
                    // position, so the structural removal always
                    // happens at a node with at most one child. Keys
                    // and values are never copied between nodes.
                    let successor = subtree_minimum(right);
                    removed_color = (*successor.as_ptr()).color;
                    fixup_slot = (*successor.as_ptr()).right;

                    if (*successor.as_ptr()).parent == Some(target) {
                        fixup_parent = Some(successor);
                    } else {
                        fixup_parent = (*successor.as_ptr()).parent;
                        self.transplant(successor, fixup_slot);
                        (*successor.as_ptr()).right = Some(right);
                        (*right.as_ptr()).parent = Some(successor);
                    }

                    self.transplant(target, Some(successor));
                    (*successor.as_ptr()).left = Some(left);
                    (*left.as_ptr()).parent = Some(successor);
                    (*successor.as_ptr()).color = (*target.as_ptr()).color;
                }
            }

            let node = Box::from_raw(target.as_ptr());
            self.len -= 1;

            if removed_color == Color::Black {
                self.remove_fixup(fixup_slot, fixup_parent);
            }
            trace!(len = self.len, "removed node");
            Ok(node.value)
        }
    }

    /// Restores the invariants after linking the red `node`.
    ///
    /// While the parent is red, the violation is either absorbed by
    /// recoloring (red uncle) or resolved by at most two rotations
    /// around the grandparent (black uncle). The root is forced black
    /// on the way out.
    ///
    /// # Safety
    /// `node` must be a freshly linked red node of this tree.
    unsafe fn insert_fixup(&mut self, mut node: NonNull<Node<K, V>>) {
        while let Some(mut parent) = (*node.as_ptr()).parent {
            if (*parent.as_ptr()).is_black() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(gparent) = (*parent.as_ptr()).parent else {
                break;
            };

            if Some(parent) == (*gparent.as_ptr()).left {
                match (*gparent.as_ptr()).right {
                    Some(uncle) if (*uncle.as_ptr()).is_red() => {
                        // Red uncle: recolor and push the violation up
                        // two levels.
                        (*parent.as_ptr()).color = Color::Black;
                        (*uncle.as_ptr()).color = Color::Black;
                        (*gparent.as_ptr()).color = Color::Red;
                        node = gparent;
                    }
                    _ => {
                        if Some(node) == (*parent.as_ptr()).right {
                            // Inner grandchild: rotate it outward, which
                            // swaps the node and parent roles.
                            self.rotate_left(parent);
                            parent = node;
                        }
                        (*parent.as_ptr()).color = Color::Black;
                        (*gparent.as_ptr()).color = Color::Red;
                        self.rotate_right(gparent);
                        break;
                    }
                }
            } else {
                match (*gparent.as_ptr()).left {
                    Some(uncle) if (*uncle.as_ptr()).is_red() => {
                        (*parent.as_ptr()).color = Color::Black;
                        (*uncle.as_ptr()).color = Color::Black;
                        (*gparent.as_ptr()).color = Color::Red;
                        node = gparent;
                    }
                    _ => {
                        if Some(node) == (*parent.as_ptr()).left {
                            self.rotate_right(parent);
                            parent = node;
                        }
                        (*parent.as_ptr()).color = Color::Black;
                        (*gparent.as_ptr()).color = Color::Red;
                        self.rotate_left(gparent);
                        break;
                    }
                }
            }
        }

        if let Some(root) = self.root {
            (*root.as_ptr()).color = Color::Black;
        }
    }

    /// Repairs the missing black at `node` after unlinking a black
    /// node.
    ///
    /// `node` may be absent, so its effective parent is tracked
    /// explicitly instead of through a sentinel leaf. The walk climbs
    /// while the slot carries the deficit, dispatching on the sibling:
    /// red siblings are rotated away, fully black siblings absorb the
    /// deficit upward, and a red sibling child terminates the loop
    /// with one or two rotations.
    ///
    /// # Safety
    /// `parent` must be the slot's parent in this tree, or `None` when
    /// the slot is the root.
    unsafe fn remove_fixup(&mut self, mut node: Link<K, V>, mut parent: Link<K, V>) {
        while node != self.root && is_black(node) {
            let Some(current_parent) = parent else {
                break;
            };

            if node == (*current_parent.as_ptr()).left {
                let mut sibling = (*current_parent.as_ptr()).right;

                if is_red(sibling) {
                    // Red sibling: rotate it above the parent; the
                    // slot's new sibling is one of its black children.
                    if let Some(s) = sibling {
                        (*s.as_ptr()).color = Color::Black;
                    }
                    (*current_parent.as_ptr()).color = Color::Red;
                    self.rotate_left(current_parent);
                    sibling = (*current_parent.as_ptr()).right;
                }

                let (near, far) = match sibling {
                    Some(s) => ((*s.as_ptr()).left, (*s.as_ptr()).right),
                    None => (None, None),
                };

                if is_black(near) && is_black(far) {
                    // Fully black sibling: repaint it red and move the
                    // deficit up one level.
                    if let Some(s) = sibling {
                        (*s.as_ptr()).color = Color::Red;
                    }
                    node = Some(current_parent);
                    parent = (*current_parent.as_ptr()).parent;
                } else {
                    if is_black(far) {
                        // Only the near child is red: rotate it into
                        // the far position first.
                        if let Some(n) = near {
                            (*n.as_ptr()).color = Color::Black;
                        }
                        if let Some(s) = sibling {
                            (*s.as_ptr()).color = Color::Red;
                            self.rotate_right(s);
                        }
                        sibling = (*current_parent.as_ptr()).right;
                    }

                    // Red far child: one rotation at the parent settles
                    // the deficit.
                    if let Some(s) = sibling {
                        (*s.as_ptr()).color = (*current_parent.as_ptr()).color;
                        if let Some(far) = (*s.as_ptr()).right {
                            (*far.as_ptr()).color = Color::Black;
                        }
                    }
                    (*current_parent.as_ptr()).color = Color::Black;
                    self.rotate_left(current_parent);
                    node = self.root;
                    break;
                }
            } else {
                // Mirror of the branch above.
                let mut sibling = (*current_parent.as_ptr()).left;

                if is_red(sibling) {
                    if let Some(s) = sibling {
                        (*s.as_ptr()).color = Color::Black;
                    }
                    (*current_parent.as_ptr()).color = Color::Red;
                    self.rotate_right(current_parent);
                    sibling = (*current_parent.as_ptr()).left;
                }

                let (near, far) = match sibling {
                    Some(s) => ((*s.as_ptr()).right, (*s.as_ptr()).left),
                    None => (None, None),
                };

                if is_black(near) && is_black(far) {
                    if let Some(s) = sibling {
                        (*s.as_ptr()).color = Color::Red;
                    }
                    node = Some(current_parent);
                    parent = (*current_parent.as_ptr()).parent;
                } else {
                    if is_black(far) {
                        if let Some(n) = near {
                            (*n.as_ptr()).color = Color::Black;
                        }
                        if let Some(s) = sibling {
                            (*s.as_ptr()).color = Color::Red;
                            self.rotate_left(s);
                        }
                        sibling = (*current_parent.as_ptr()).left;
                    }

                    if let Some(s) = sibling {
                        (*s.as_ptr()).color = (*current_parent.as_ptr()).color;
                        if let Some(far) = (*s.as_ptr()).left {
                            (*far.as_ptr()).color = Color::Black;
                        }
                    }
                    (*current_parent.as_ptr()).color = Color::Black;
                    self.rotate_right(current_parent);
                    node = self.root;
                    break;
                }
            }
        }

        // The slot that ends the walk absorbs the deficit by turning
        // black, which also covers the red-replacement and new-root
        // exits.
        if let Some(node) = node {
            (*node.as_ptr()).color = Color::Black;
        }
    }

    // ========================================================================
    // Structural primitives
    // ========================================================================

    /// Promotes `node`'s right child above it. No-op without one.
    ///
    /// Pure relinking: colors and keys are untouched. Rotations and
    /// [`Self::transplant`] are the only places the root pointer moves.
    ///
    /// # Safety
    /// `node` must belong to this tree.
    unsafe fn rotate_left(&mut self, node: NonNull<Node<K, V>>) {
        let Some(right) = (*node.as_ptr()).right else {
            return;
        };

        (*node.as_ptr()).right = (*right.as_ptr()).left;
        if let Some(moved) = (*right.as_ptr()).left {
            (*moved.as_ptr()).parent = Some(node);
        }

        (*right.as_ptr()).parent = (*node.as_ptr()).parent;
        match (*node.as_ptr()).parent {
            Some(parent) => {
                if Some(node) == (*parent.as_ptr()).left {
                    (*parent.as_ptr()).left = Some(right);
                } else {
                    (*parent.as_ptr()).right = Some(right);
                }
            }
            None => self.root = Some(right),
        }

        (*right.as_ptr()).left = Some(node);
        (*node.as_ptr()).parent = Some(right);
    }

    /// Promotes `node`'s left child above it. Mirror of
    /// [`Self::rotate_left`].
    ///
    /// # Safety
    /// `node` must belong to this tree.
    unsafe fn rotate_right(&mut self, node: NonNull<Node<K, V>>) {
        let Some(left) = (*node.as_ptr()).left else {
            return;
        };

        (*node.as_ptr()).left = (*left.as_ptr()).right;
        if let Some(moved) = (*left.as_ptr()).right {
            (*moved.as_ptr()).parent = Some(node);
        }

        (*left.as_ptr()).parent = (*node.as_ptr()).parent;
        match (*node.as_ptr()).parent {
            Some(parent) => {
                if Some(node) == (*parent.as_ptr()).right {
                    (*parent.as_ptr()).right = Some(left);
                } else {
                    (*parent.as_ptr()).left = Some(left);
                }
            }
            None => self.root = Some(left),
        }

        (*left.as_ptr()).right = Some(node);
        (*node.as_ptr()).parent = Some(left);
    }

    /// Replaces the subtree rooted at `node` with `replacement` in the
    /// parent slot. The replacement keeps its own children; `node`
    /// keeps its stale links for the caller to reuse.
    ///
    /// # Safety
    /// `node` must belong to this tree; `replacement`, when present,
    /// must not be an ancestor of `node`.
    unsafe fn transplant(&mut self, node: NonNull<Node<K, V>>, replacement: Link<K, V>) {
        match (*node.as_ptr()).parent {
            Some(parent) => {
                if Some(node) == (*parent.as_ptr()).left {
                    (*parent.as_ptr()).left = replacement;
                } else {
                    (*parent.as_ptr()).right = replacement;
                }
            }
            None => self.root = replacement,
        }
        if let Some(replacement) = replacement {
            (*replacement.as_ptr()).parent = (*node.as_ptr()).parent;
        }
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl<K: Clone, V: Clone> Clone for RbTree<K, V> {
    /// Deep copy preserving structure and colors exactly.
    ///
    /// The copy walk is iterative, pairing each source node with its
    /// clone on an explicit stack.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let Some(src_root) = self.root else {
            return copy;
        };

        unsafe {
            let dst_root = Node::alloc_from(src_root, None);
            copy.root = Some(dst_root);

            let mut stack = vec![(src_root, dst_root)];
            while let Some((src, dst)) = stack.pop() {
                if let Some(left) = (*src.as_ptr()).left {
                    let child = Node::alloc_from(left, Some(dst));
                    (*dst.as_ptr()).left = Some(child);
                    stack.push((left, child));
                }
                if let Some(right) = (*src.as_ptr()).right {
                    let child = Node::alloc_from(right, Some(dst));
                    (*dst.as_ptr()).right = Some(child);
                    stack.push((right, child));
                }
            }
        }
        copy.len = self.len;
        copy
    }
}

impl<K: fmt::Debug, V> fmt::Debug for RbTree<K, V> {
    /// Renders the tree shape, one node per line, `R----`/`L----`
    /// marking the child side and colors spelled out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => unsafe { fmt_subtree(f, root, String::new(), true) },
            None => Ok(()),
        }
    }
}

unsafe fn fmt_subtree<K: fmt::Debug, V>(
    f: &mut fmt::Formatter<'_>,
    node: NonNull<Node<K, V>>,
    indent: String,
    last: bool,
) -> fmt::Result {
    f.write_str(&indent)?;
    let child_indent = if last {
        f.write_str("R----")?;
        format!("{indent}   ")
    } else {
        f.write_str("L----")?;
        format!("{indent}|  ")
    };

    let color = if (*node.as_ptr()).is_red() { "RED" } else { "BLACK" };
    writeln!(f, "{:?}({})", (*node.as_ptr()).key, color)?;

    if let Some(left) = (*node.as_ptr()).left {
        fmt_subtree(f, left, child_indent.clone(), false)?;
    }
    if let Some(right) = (*node.as_ptr()).right {
        fmt_subtree(f, right, child_indent, true)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks the whole graph checking parent back-links and the node
    /// count against `len`.
    fn assert_links_consistent<K, V>(tree: &RbTree<K, V>) {
        let mut count = 0usize;
        let mut stack = Vec::new();
        if let Some(root) = tree.root {
            unsafe {
                assert!((*root.as_ptr()).parent.is_none());
            }
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            count += 1;
            unsafe {
                for child in [(*node.as_ptr()).left, (*node.as_ptr()).right] {
                    if let Some(child) = child {
                        assert_eq!((*child.as_ptr()).parent, Some(node));
                        stack.push(child);
                    }
                }
            }
        }
        assert_eq!(count, tree.len);
    }

    #[test]
    fn test_empty_tree() {
        let tree: RbTree<i32> = RbTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.minimum().is_none());
        assert!(tree.maximum().is_none());
    }

    #[test]
    fn test_first_insert_makes_black_root() {
        let mut tree = RbTree::new();
        tree.insert(42, "answer").unwrap();
        unsafe {
            let root = tree.root.unwrap();
            assert!((*root.as_ptr()).is_black());
        }
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_maintains_parent_links() {
        let mut tree = RbTree::new();
        for key in [10, 20, 30, 15, 25, 5, 1] {
            tree.insert(key, key).unwrap();
            assert_links_consistent(&tree);
        }
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_remove_maintains_parent_links() {
        let mut tree = RbTree::new();
        for key in 0..64 {
            tree.insert(key, key).unwrap();
        }
        for key in (0..64).step_by(3) {
            tree.remove(&key).unwrap();
            assert_links_consistent(&tree);
        }
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut tree = RbTree::new();
        tree.insert(1, "first").unwrap();
        assert_eq!(tree.insert(1, "second"), Err(TreeError::DuplicateKey));
        assert_eq!(tree.get(&1), Some(&"first"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_missing_key_fails() {
        let mut tree: RbTree<i32> = RbTree::new();
        assert_eq!(tree.remove(&9), Err(TreeError::KeyNotFound));
        tree.insert(1, 1).unwrap();
        assert_eq!(tree.remove(&9), Err(TreeError::KeyNotFound));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_returns_value() {
        let mut tree = RbTree::new();
        tree.insert(3, "three").unwrap();
        tree.insert(1, "one").unwrap();
        assert_eq!(tree.remove(&3), Ok("three"));
        assert!(!tree.contains_key(&3));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_until_empty() {
        let mut tree = RbTree::new();
        for key in [8, 4, 12, 2, 6, 10, 14] {
            tree.insert(key, key).unwrap();
        }
        for key in [8, 4, 12, 2, 6, 10, 14] {
            tree.remove(&key).unwrap();
            assert_links_consistent(&tree);
        }
        assert!(tree.is_empty());
        assert!(tree.root.is_none());
    }

    #[test]
    fn test_borrowed_key_lookup() {
        let mut tree: RbTree<String, usize> = RbTree::new();
        tree.insert("alpha".to_owned(), 1).unwrap();
        tree.insert("beta".to_owned(), 2).unwrap();
        assert_eq!(tree.get("alpha"), Some(&1));
        assert!(tree.contains_key("beta"));
        assert_eq!(tree.remove("alpha"), Ok(1));
        assert!(tree.get("alpha").is_none());
    }

    #[test]
    fn test_clear_resets_tree() {
        let mut tree = RbTree::new();
        for key in 0..100 {
            tree.insert(key, key).unwrap();
        }
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        tree.insert(7, 7).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_clone_preserves_colors_and_detaches() {
        let mut tree = RbTree::new();
        for key in [10, 20, 30, 15, 25, 5, 1] {
            tree.insert(key, key * 100).unwrap();
        }
        let copy = tree.clone();
        assert_links_consistent(&copy);

        let original: Vec<(i32, Color)> =
            tree.pre_order().map(|n| (*n.key(), n.color())).collect();
        let cloned: Vec<(i32, Color)> =
            copy.pre_order().map(|n| (*n.key(), n.color())).collect();
        assert_eq!(original, cloned);

        tree.remove(&20).unwrap();
        assert_eq!(copy.len(), 7);
        assert!(copy.contains_key(&20));
    }

    #[test]
    fn test_debug_renders_shape() {
        let mut tree = RbTree::new();
        for key in [2, 1, 3] {
            tree.insert(key, key).unwrap();
        }
        let rendered = format!("{tree:?}");
        assert_eq!(rendered, "R----2(BLACK)\n   L----1(RED)\n   R----3(RED)\n");
    }

    #[test]
    fn test_debug_empty_tree_is_blank() {
        let tree: RbTree<i32> = RbTree::new();
        assert_eq!(format!("{tree:?}"), "");
    }
}
