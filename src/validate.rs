//! Structural self-check of the red-black invariants.
//!
//! The check is a diagnostic and a test oracle. Mutations are expected
//! to keep the invariants on their own; a `false` here means a bug in
//! this crate, not a recoverable runtime condition.

use tracing::warn;

use crate::node::is_red;
use crate::tree::RbTree;

impl<K, V> RbTree<K, V> {
    /// Verifies the red-black invariants over the whole tree.
    ///
    /// Checks that the root is black, that no red node has a red
    /// child, and that every path from the root down to an absent
    /// child crosses the same number of black nodes. An empty tree is
    /// valid. Violations are logged at `warn` level before `false` is
    /// returned. Read-only.
    pub fn validate(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };

        unsafe {
            if (*root.as_ptr()).is_red() {
                warn!("root is red");
                return false;
            }

            // Depth-first with (node, black count above it); the first
            // absent child reached fixes the expected count for every
            // other path.
            let mut expected_blacks = None;
            let mut stack = vec![(root, 0usize)];

            while let Some((node, blacks_above)) = stack.pop() {
                let node = node.as_ptr();

                if (*node).is_red() && (is_red((*node).left) || is_red((*node).right)) {
                    warn!("red node has a red child");
                    return false;
                }

                let blacks = blacks_above + usize::from((*node).is_black());

                for child in [(*node).left, (*node).right] {
                    match child {
                        Some(child) => stack.push((child, blacks)),
                        None => match expected_blacks {
                            None => expected_blacks = Some(blacks),
                            Some(expected) if expected != blacks => {
                                warn!(expected, found = blacks, "uneven black count across paths");
                                return false;
                            }
                            Some(_) => {}
                        },
                    }
                }
            }
        }
        true
    }

    /// Number of black nodes on any root-to-leaf path, not counting
    /// the absent leaf itself. Zero for an empty tree.
    ///
    /// Only meaningful while [`Self::validate`] holds; the count walks
    /// the leftmost path and trusts the uniformity invariant for the
    /// rest.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node) = current {
            unsafe {
                if (*node.as_ptr()).is_black() {
                    height += 1;
                }
                current = (*node.as_ptr()).left;
            }
        }
        height
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Color, Link};
    use crate::tree::RbTree;

    /// Forcibly recolors the node holding `key`. Test-only corruption;
    /// the public API can never produce an invalid tree.
    fn paint<K: Ord, V>(tree: &mut RbTree<K, V>, key: &K, color: Color) {
        fn locate<K: Ord, V>(mut link: Link<K, V>, key: &K) -> Link<K, V> {
            while let Some(node) = link {
                link = unsafe {
                    match key.cmp(&(*node.as_ptr()).key) {
                        std::cmp::Ordering::Less => (*node.as_ptr()).left,
                        std::cmp::Ordering::Greater => (*node.as_ptr()).right,
                        std::cmp::Ordering::Equal => return Some(node),
                    }
                };
            }
            None
        }
        let node = locate(tree.root, key).unwrap();
        unsafe {
            (*node.as_ptr()).color = color;
        }
    }

    fn sample() -> RbTree<i32> {
        let mut tree = RbTree::new();
        for key in [2, 1, 3] {
            tree.insert(key, key).unwrap();
        }
        tree
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree: RbTree<i32> = RbTree::new();
        assert!(tree.validate());
        assert_eq!(tree.black_height(), 0);
    }

    #[test]
    fn test_valid_after_construction() {
        let tree = sample();
        assert!(tree.validate());
        assert_eq!(tree.black_height(), 1);
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = sample();
        paint(&mut tree, &2, Color::Red);
        assert!(!tree.validate());
    }

    #[test]
    fn test_detects_red_red_violation() {
        let mut tree = RbTree::new();
        for key in [1, 2, 3, 4] {
            tree.insert(key, key).unwrap();
        }
        // Shape is 2B(1B, 3B(4R)); turning 3 red pairs it with red 4.
        paint(&mut tree, &3, Color::Red);
        assert!(!tree.validate());
    }

    #[test]
    fn test_detects_uneven_black_count() {
        let mut tree = sample();
        paint(&mut tree, &1, Color::Black);
        assert!(!tree.validate());
    }

    #[test]
    fn test_black_height_counts_blacks_only() {
        let mut tree = RbTree::new();
        for key in [1, 2, 3, 4] {
            tree.insert(key, key).unwrap();
        }
        // Leftmost path is 2B then 1B.
        assert_eq!(tree.black_height(), 2);
        assert!(tree.validate());
    }

    #[test]
    fn test_valid_with_value_type() {
        let mut tree: RbTree<i32, String> = RbTree::new();
        for key in 0..32 {
            tree.insert(key, key.to_string()).unwrap();
        }
        assert!(tree.validate());
    }
}
