use std::fmt;

/// Which kind of node a split happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitKind {
    Leaf,
    NonLeaf,
}

impl SplitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitKind::Leaf => "leaf",
            SplitKind::NonLeaf => "non-leaf",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observer called once per split, on the inserting call stack.
///
/// The key passed is the one being inserted, for both leaf and non-leaf
/// splits, not the separator that gets promoted.
pub type SplitHook<K> = Box<dyn FnMut(SplitKind, &K)>;

/// Running split counters kept by every tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitStats {
    pub leaf: usize,
    pub non_leaf: usize,
}

impl SplitStats {
    pub fn total(&self) -> usize {
        self.leaf + self.non_leaf
    }

    pub(crate) fn record(&mut self, kind: SplitKind) {
        match kind {
            SplitKind::Leaf => self.leaf += 1,
            SplitKind::NonLeaf => self.non_leaf += 1,
        }
    }
}
