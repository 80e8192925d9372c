//! Red-black tree ordered map.
//!
//! A self-balancing binary search tree with logarithmic insertion,
//! removal, and lookup, plus deterministic traversals and an invariant
//! self-check. Single-threaded and in-memory, intended as a building
//! block for storage and indexing layers rather than a standalone
//! service.
//!
//! Balancing maintains the classic properties: every node is red or
//! black, the root is black, absent children count as black leaves, a
//! red node has no red child, and every path from a node down to an
//! absent child crosses the same number of black nodes. Together they
//! bound the tree height to O(log n).
//!
//! Duplicate keys are rejected at insertion and removal of an absent
//! key fails, both as ordinary [`TreeError`] results that leave the
//! tree untouched.
//!
//! # Example
//! ```
//! use redblack::RbTree;
//!
//! let mut tree = RbTree::new();
//! tree.insert(10, "ten")?;
//! tree.insert(5, "five")?;
//! tree.insert(20, "twenty")?;
//!
//! assert_eq!(tree.get(&5), Some(&"five"));
//! assert!(tree.validate());
//!
//! let keys: Vec<i32> = tree.in_order().map(|node| *node.key()).collect();
//! assert_eq!(keys, vec![5, 10, 20]);
//!
//! assert_eq!(tree.remove(&10)?, "ten");
//! assert!(!tree.contains_key(&10));
//! # Ok::<(), redblack::TreeError>(())
//! ```

mod error;
mod iter;
mod node;
mod tree;
mod validate;

pub use error::{Result, TreeError};
pub use iter::{InOrder, PostOrder, PreOrder};
pub use node::{Color, NodeRef};
pub use tree::RbTree;
