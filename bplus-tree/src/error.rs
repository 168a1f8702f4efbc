use std::fmt;

use crate::MIN_CAPACITY;

/// Errors raised while building or checking a `BPlusTree`.
///
/// Depths are counted from the root, which sits at depth 0.
#[derive(Debug, PartialEq, Eq)]
pub enum IndexError {
    /// Splitting degenerates below `MIN_CAPACITY` keys per node.
    CapacityTooSmall { capacity: usize },
    /// A node's keys are not in ascending order.
    Unsorted { depth: usize },
    /// A node was left holding `capacity` keys or more.
    NodeFull {
        depth: usize,
        keys: usize,
        capacity: usize,
    },
    /// An interior node without exactly one more child than keys.
    ChildCountMismatch {
        depth: usize,
        keys: usize,
        children: usize,
    },
    /// A leaf without one slot per key.
    SlotCountMismatch {
        depth: usize,
        keys: usize,
        slots: usize,
    },
    /// A non-root node holding no keys.
    EmptyNode { depth: usize },
    /// A child holds keys outside the range its parent's separators allow.
    SeparatorViolation { depth: usize, child: usize },
    /// Leaves found at different depths.
    UnevenLeafDepth { expected: usize, found: usize },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::CapacityTooSmall { capacity } => write!(
                f,
                "capacity {} is too small, at least {} keys per node are required",
                capacity, MIN_CAPACITY
            ),
            IndexError::Unsorted { depth } => {
                write!(f, "node at depth {} has keys out of order", depth)
            }
            IndexError::NodeFull {
                depth,
                keys,
                capacity,
            } => write!(
                f,
                "node at depth {} holds {} keys with capacity {}",
                depth, keys, capacity
            ),
            IndexError::ChildCountMismatch {
                depth,
                keys,
                children,
            } => write!(
                f,
                "interior node at depth {} has {} keys but {} children",
                depth, keys, children
            ),
            IndexError::SlotCountMismatch { depth, keys, slots } => write!(
                f,
                "leaf at depth {} has {} keys but {} slots",
                depth, keys, slots
            ),
            IndexError::EmptyNode { depth } => {
                write!(f, "non-root node at depth {} is empty", depth)
            }
            IndexError::SeparatorViolation { depth, child } => write!(
                f,
                "child {} of node at depth {} escapes its separator range",
                child, depth
            ),
            IndexError::UnevenLeafDepth { expected, found } => write!(
                f,
                "leaf found at depth {}, expected every leaf at depth {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for IndexError {}
