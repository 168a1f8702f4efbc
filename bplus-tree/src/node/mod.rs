#[cfg(test)]
mod tests;

use std::fmt::{self, Debug};

use log::{debug, trace};

use crate::{error::IndexError, split::SplitKind};

/// Payload slot paired with every key of a leaf.
///
/// Leaves only record key membership, so the slot carries nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Interior,
    Leaf,
}

enum Body<K> {
    /// One slot per key
    Leaf(Vec<Slot>),
    /// One more child than keys
    Interior(Vec<Box<Node<K>>>),
}

/// A node of the tree, holding at most `capacity - 1` keys once an insert
/// has returned.
///
/// Every node exclusively owns its children, so a split hands the upper half
/// of them over to the new sibling.
pub struct Node<K> {
    capacity: usize,
    keys: Vec<K>,
    body: Body<K>,
}

/// Outcome of inserting into a subtree.
pub(crate) enum InsertResult<K> {
    Normal,
    /// The subtree root split: the separator to add to the parent and the new
    /// right sibling.
    Splitted(K, Box<Node<K>>),
}

impl<K> Node<K> {
    pub(crate) fn new_leaf(capacity: usize) -> Self {
        Node {
            capacity,
            keys: Vec::with_capacity(capacity),
            body: Body::Leaf(Vec::with_capacity(capacity)),
        }
    }

    /// Leaf without preallocated storage, used to move a node out of its slot.
    pub(crate) fn placeholder(capacity: usize) -> Self {
        Node {
            capacity,
            keys: Vec::new(),
            body: Body::Leaf(Vec::new()),
        }
    }

    /// Builds the interior node that replaces a root which just split.
    pub(crate) fn new_root(
        capacity: usize,
        separator: K,
        left: Node<K>,
        right: Box<Node<K>>,
    ) -> Self {
        let mut keys = Vec::with_capacity(capacity);
        keys.push(separator);
        let mut children = Vec::with_capacity(capacity + 1);
        children.push(Box::new(left));
        children.push(right);
        Node {
            capacity,
            keys,
            body: Body::Interior(children),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.body {
            Body::Leaf(_) => NodeType::Leaf,
            Body::Interior(_) => NodeType::Interior,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.node_type() == NodeType::Leaf
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Children of an interior node, empty for a leaf.
    pub fn children(&self) -> &[Box<Node<K>>] {
        match &self.body {
            Body::Interior(children) => children,
            Body::Leaf(_) => &[],
        }
    }

    /// Payload slots of a leaf, empty for an interior node.
    pub fn slots(&self) -> &[Slot] {
        match &self.body {
            Body::Leaf(slots) => slots,
            Body::Interior(_) => &[],
        }
    }

    pub fn is_full(&self) -> bool {
        self.keys.len() >= self.capacity
    }

    /// Number of levels from this node down to its leaves, inclusive.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Body::Interior(children) = &node.body {
            node = &*children[0];
            height += 1;
        }
        height
    }

    /// Splits a full node in two, keeping the lower half in place.
    ///
    /// Returns the separator to promote and the new right sibling. A leaf
    /// sibling starts with a copy of the separator; an interior split moves the
    /// middle key up instead, so both halves keep one more child than keys.
    pub(crate) fn split(&mut self) -> (K, Box<Node<K>>)
    where
        K: Clone,
    {
        debug_assert!(self.is_full(), "splitting a node that is not full");
        let mid = self.capacity / 2;
        let capacity = self.capacity;
        match &mut self.body {
            Body::Leaf(slots) => {
                let keys = self.keys.split_off(mid);
                let slots = slots.split_off(mid);
                let separator = keys[0].clone();
                debug!(
                    "Leaf split: {} keys kept, {} keys moved",
                    self.keys.len(),
                    keys.len()
                );
                let sibling = Node {
                    capacity,
                    keys,
                    body: Body::Leaf(slots),
                };
                (separator, Box::new(sibling))
            }
            Body::Interior(children) => {
                let mut keys = self.keys.split_off(mid);
                let separator = keys.remove(0);
                let moved_children = children.split_off(mid + 1);
                debug!(
                    "Interior split: {} keys kept, {} keys moved",
                    self.keys.len(),
                    keys.len()
                );
                let sibling = Node {
                    capacity,
                    keys,
                    body: Body::Interior(moved_children),
                };
                (separator, Box::new(sibling))
            }
        }
    }
}

impl<K: Ord> Node<K> {
    /// First position whose key is not less than `key`, so new duplicates go
    /// in front of equal keys.
    pub fn leaf_position(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Index of the child whose range covers `key`: the first separator
    /// strictly greater than `key`.
    pub fn child_index(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Inserts `key` into the subtree rooted at this node.
    ///
    /// `on_split` fires before every split, with the key being inserted.
    pub(crate) fn insert(
        &mut self,
        key: K,
        on_split: &mut dyn FnMut(SplitKind, &K),
    ) -> InsertResult<K>
    where
        K: Clone,
    {
        let (kind, key) = match &mut self.body {
            Body::Leaf(slots) => {
                let pos = self.keys.partition_point(|k| k < &key);
                self.keys.insert(pos, key.clone());
                slots.insert(pos, Slot);
                (SplitKind::Leaf, key)
            }
            Body::Interior(children) => {
                let idx = self.keys.partition_point(|k| k <= &key);
                trace!("Descending into child {} of {}", idx, children.len());
                match children[idx].insert(key.clone(), on_split) {
                    InsertResult::Normal => return InsertResult::Normal,
                    InsertResult::Splitted(separator, sibling) => {
                        self.keys.insert(idx, separator);
                        children.insert(idx + 1, sibling);
                    }
                }
                (SplitKind::NonLeaf, key)
            }
        };

        if !self.is_full() {
            return InsertResult::Normal;
        }
        on_split(kind, &key);
        let (separator, sibling) = self.split();
        InsertResult::Splitted(separator, sibling)
    }

    pub fn search(&self, key: &K) -> bool {
        let mut node = self;
        while let Body::Interior(children) = &node.body {
            node = &*children[node.child_index(key)];
        }
        node.contains(key)
    }

    /// Checks the structural invariants of the subtree rooted here.
    ///
    /// `lower` and `upper` are the separators bounding this subtree in its
    /// parent; both are inclusive because duplicates of a separator may stay
    /// behind in the left half of a leaf split.
    pub(crate) fn verify(
        &self,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        leaf_depth: &mut Option<usize>,
    ) -> Result<(), IndexError> {
        if self.keys.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(IndexError::Unsorted { depth });
        }
        if self.is_full() {
            return Err(IndexError::NodeFull {
                depth,
                keys: self.keys.len(),
                capacity: self.capacity,
            });
        }
        if depth > 0 && self.keys.is_empty() {
            return Err(IndexError::EmptyNode { depth });
        }

        match &self.body {
            Body::Leaf(slots) => {
                if slots.len() != self.keys.len() {
                    return Err(IndexError::SlotCountMismatch {
                        depth,
                        keys: self.keys.len(),
                        slots: slots.len(),
                    });
                }
                match *leaf_depth {
                    Some(expected) if expected != depth => {
                        return Err(IndexError::UnevenLeafDepth {
                            expected,
                            found: depth,
                        })
                    }
                    Some(_) => {}
                    None => *leaf_depth = Some(depth),
                }
            }
            Body::Interior(children) => {
                if children.len() != self.keys.len() + 1 {
                    return Err(IndexError::ChildCountMismatch {
                        depth,
                        keys: self.keys.len(),
                        children: children.len(),
                    });
                }
                for (i, child) in children.iter().enumerate() {
                    let child_lower = if i == 0 { lower } else { self.keys.get(i - 1) };
                    let child_upper = self.keys.get(i).or(upper);
                    let escapes = child.keys.iter().any(|k| {
                        child_lower.map_or(false, |lo| k < lo)
                            || child_upper.map_or(false, |hi| k > hi)
                    });
                    if escapes {
                        return Err(IndexError::SeparatorViolation { depth, child: i });
                    }
                    child.verify(depth + 1, child_lower, child_upper, leaf_depth)?;
                }
            }
        }
        Ok(())
    }
}

impl<K: Debug> Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Body::Leaf(slots) => f
                .debug_struct("LeafNode")
                .field("keys", &self.keys)
                .field("slots_num", &slots.len())
                .finish(),
            Body::Interior(children) => f
                .debug_struct("InteriorNode")
                .field("keys", &self.keys)
                .field("children_num", &children.len())
                .field("children", children)
                .finish(),
        }
    }
}
