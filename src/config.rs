use std::{env, fmt};

use bplus_tree::{BPlusTree, IndexError, SplitKind, DEFAULT_CAPACITY, MIN_CAPACITY};

/// Environment variable overriding the node capacity of the index.
pub const CAPACITY_ENV_VAR: &str = "DOCKIE_INDEX_CAPACITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub capacity: usize,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The capacity variable is set but is not a number.
    InvalidCapacity(String),
    Index(IndexError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity(value) => write!(
                f,
                "{} must be a positive integer, got {:?}",
                CAPACITY_ENV_VAR, value
            ),
            ConfigError::Index(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<IndexError> for ConfigError {
    fn from(err: IndexError) -> Self {
        ConfigError::Index(err)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl IndexConfig {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity < MIN_CAPACITY {
            return Err(IndexError::CapacityTooSmall { capacity }.into());
        }
        Ok(IndexConfig { capacity })
    }

    /// Reads the capacity from `DOCKIE_INDEX_CAPACITY`, falling back to the
    /// default only when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CAPACITY_ENV_VAR) {
            Ok(value) => {
                let capacity = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidCapacity(value.clone()))?;
                Self::new(capacity)
            }
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(value)) => Err(ConfigError::InvalidCapacity(
                value.to_string_lossy().into_owned(),
            )),
        }
    }

    pub fn open_index<K: Ord + Clone>(&self) -> Result<BPlusTree<K>, ConfigError> {
        Ok(BPlusTree::new(self.capacity)?)
    }

    pub fn open_index_with_hook<K, F>(&self, hook: F) -> Result<BPlusTree<K>, ConfigError>
    where
        K: Ord + Clone,
        F: FnMut(SplitKind, &K) + 'static,
    {
        Ok(BPlusTree::with_split_hook(self.capacity, hook)?)
    }
}
