use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Outcome of [`StoreManager::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// StoreManager owns the name -> store mapping.
///
/// Thread-safe: create, delete and lookup are linearizable per name. The
/// lock guards only the map; callers work on the returned `Arc` after the
/// lock is released.
pub struct StoreManager<S> {
    stores: RwLock<HashMap<String, Arc<S>>>,
}

impl<S> StoreManager<S> {
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Create the store `name` with `make` unless it already exists.
    ///
    /// `make` runs under the write lock, so it must only construct.
    pub fn create(&self, name: &str, make: impl FnOnce() -> S) -> CreateOutcome {
        let mut stores = self.stores.write();
        if stores.contains_key(name) {
            return CreateOutcome::AlreadyExists;
        }
        stores.insert(name.to_string(), Arc::new(make()));
        CreateOutcome::Created
    }

    /// Remove the store `name`. Returns whether a store was removed.
    pub fn delete(&self, name: &str) -> bool {
        // Drop the store outside the lock.
        let removed = self.stores.write().remove(name);
        removed.is_some()
    }

    /// Return the store `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Arc<S>> {
        self.stores.read().get(name).cloned()
    }

    /// Return the number of stores.
    pub fn len(&self) -> usize {
        self.stores.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return all store names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stores.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove every store. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let drained = std::mem::take(&mut *self.stores.write());
        drained.len()
    }
}

impl<S> Default for StoreManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
