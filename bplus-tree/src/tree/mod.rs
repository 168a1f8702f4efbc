
use std::{collections::VecDeque, fmt, mem};

use log::info;

use crate::{
    error::IndexError,
    node::{InsertResult, Node},
    split::{SplitHook, SplitKind, SplitStats},
    DEFAULT_CAPACITY, MIN_CAPACITY,
};

/// An ordered key index: every key lives in a leaf, interior nodes only route.
///
/// Keys are stored without payload and duplicates are kept. Nothing is ever
/// removed, so the tree only grows, one level per root split.
pub struct BPlusTree<K> {
    root: Node<K>,
    capacity: usize,
    len: usize,
    stats: SplitStats,
    on_split: Option<SplitHook<K>>,
}

impl<K: Ord + Clone> BPlusTree<K> {
    /// Creates an empty tree whose nodes split once they hold `capacity` keys.
    pub fn new(capacity: usize) -> Result<Self, IndexError> {
        Self::validate(capacity)?;
        Ok(Self::build(capacity, None))
    }

    /// Like [`BPlusTree::new`], calling `hook` before every split.
    pub fn with_split_hook<F>(capacity: usize, hook: F) -> Result<Self, IndexError>
    where
        F: FnMut(SplitKind, &K) + 'static,
    {
        Self::validate(capacity)?;
        Ok(Self::build(capacity, Some(Box::new(hook))))
    }

    fn validate(capacity: usize) -> Result<(), IndexError> {
        if capacity < MIN_CAPACITY {
            return Err(IndexError::CapacityTooSmall { capacity });
        }
        Ok(())
    }

    fn build(capacity: usize, on_split: Option<SplitHook<K>>) -> Self {
        BPlusTree {
            root: Node::new_leaf(capacity),
            capacity,
            len: 0,
            stats: SplitStats::default(),
            on_split,
        }
    }

    pub fn insert(&mut self, key: K) {
        let BPlusTree {
            root,
            capacity,
            len,
            stats,
            on_split,
        } = self;
        let mut notify = |kind: SplitKind, key: &K| {
            stats.record(kind);
            if let Some(hook) = on_split.as_mut() {
                hook(kind, key);
            }
        };

        if let InsertResult::Splitted(separator, sibling) = root.insert(key, &mut notify) {
            let old_root = mem::replace(root, Node::placeholder(*capacity));
            *root = Node::new_root(*capacity, separator, old_root, sibling);
            info!("Root split, tree height is now {}", root.height());
        }
        *len += 1;
    }

    /// Whether `key` was ever inserted.
    pub fn search(&self, key: &K) -> bool {
        self.root.search(key)
    }

    /// Walks the whole tree and reports the first broken invariant.
    pub fn verify(&self) -> Result<(), IndexError> {
        let mut leaf_depth = None;
        self.root.verify(0, None, None, &mut leaf_depth)
    }
}

impl<K> BPlusTree<K> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of insertions so far, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn root(&self) -> &Node<K> {
        &self.root
    }

    pub fn split_stats(&self) -> SplitStats {
        self.stats
    }

    /// Nodes grouped by depth, root first, each level ordered left to right.
    pub fn levels(&self) -> Vec<Vec<&Node<K>>> {
        let mut levels: Vec<Vec<&Node<K>>> = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back((0, &self.root));
        while let Some((depth, node)) = queue.pop_front() {
            if levels.len() == depth {
                levels.push(Vec::new());
            }
            levels[depth].push(node);
            for child in node.children() {
                queue.push_back((depth + 1, child.as_ref()));
            }
        }
        levels
    }
}

impl<K: Ord + Clone> Default for BPlusTree<K> {
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY, None)
    }
}

impl<K: fmt::Debug> fmt::Debug for BPlusTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BPlusTree")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("height", &self.height())
            .field("splits", &self.stats)
            .field("root", &self.root)
            .finish()
    }
}
