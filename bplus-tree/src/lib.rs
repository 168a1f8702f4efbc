//! In-memory B+ tree used as an ordered key index.
//!
//! ```
//! use bplus_tree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(4).unwrap();
//! for key in [5, 10, 15, 20, 25] {
//!     tree.insert(key);
//! }
//! assert!(tree.search(&15));
//! assert!(!tree.search(&30));
//! ```

pub mod error;
pub mod node;
pub mod split;
mod tree;

pub use error::IndexError;
pub use node::{Node, NodeType, Slot};
pub use split::{SplitHook, SplitKind, SplitStats};
pub use tree::BPlusTree;

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 5;
/// Below this the split midpoint can leave an interior node without keys.
pub const MIN_CAPACITY: usize = 3;
