use std::fmt;

use crate::error::SimHashError;
use crate::memory::MemoryStore;

/// Default neighbor threshold in bits.
pub const DEFAULT_THRESHOLD: u32 = 3;

/// Result of a consensus computation over one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consensus {
    /// Identifier of the entry with the most neighbors.
    pub representative: i64,

    /// Neighbor count of the representative.
    pub representative_neighbors: usize,

    /// Identifier of the entry with the fewest neighbors.
    /// `None` when the store has a single entry or every entry ties.
    pub outlier: Option<i64>,

    /// Neighbor count of the outlier.
    pub outlier_neighbors: Option<usize>,

    /// Number of entries considered.
    pub entries: usize,
}

/// SimStore is a single named index of `(content, id)` pairs.
///
/// All implementations must be safe for concurrent use (Send + Sync).
pub trait SimStore: Send + Sync {
    /// Add or replace the entry for `id`.
    fn insert(&self, content: &str, id: i64);

    /// Compute the consensus of all entries. `None` if the store is empty.
    fn consensus(&self) -> Option<Consensus>;

    /// Return the number of entries in the store.
    fn len(&self) -> usize;

    /// Return true if the store contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Engine creates store instances.
pub trait Engine: Send + Sync + 'static {
    type Store: SimStore + 'static;

    /// Allocate a new, empty store.
    fn create_instance(&self) -> Self::Store;
}

/// Engine producing in-memory SimHash stores.
#[derive(Clone, Copy)]
pub struct SimHashEngine {
    threshold: u32,
}

impl SimHashEngine {
    /// Creates an engine whose stores treat fingerprints within `threshold`
    /// bits as neighbors.
    pub fn new(threshold: u32) -> Result<Self, SimHashError> {
        if threshold > 64 {
            return Err(SimHashError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for SimHashEngine {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl fmt::Debug for SimHashEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimHashEngine")
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl Engine for SimHashEngine {
    type Store = MemoryStore;

    fn create_instance(&self) -> MemoryStore {
        MemoryStore::new(self.threshold)
    }
}
