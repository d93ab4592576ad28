use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::engine::{Consensus, SimStore};
use crate::fingerprint::{fingerprint, hamming};

struct Entry {
    id: i64,
    fp: u64,
}

struct Inner {
    // Insertion order; replaced ids keep their slot.
    entries: Vec<Entry>,
    index: HashMap<i64, usize>,
}

/// MemoryStore is an in-memory SimStore using brute-force pairwise
/// Hamming distance. Consensus is O(n^2) in the number of entries.
pub struct MemoryStore {
    threshold: u32,
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    #[cfg(test)]
    fn fingerprint_of(&self, id: i64) -> Option<u64> {
        let inner = self.inner.read();
        inner.index.get(&id).map(|&i| inner.entries[i].fp)
    }

    /// Returns the neighbor count of every entry in insertion order.
    fn neighbor_counts(&self) -> Vec<(i64, usize)> {
        let inner = self.inner.read();
        let n = inner.entries.len();
        let mut counts = vec![0usize; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if hamming(inner.entries[i].fp, inner.entries[j].fp) <= self.threshold {
                    counts[i] += 1;
                    counts[j] += 1;
                }
            }
        }
        inner
            .entries
            .iter()
            .zip(counts)
            .map(|(e, c)| (e.id, c))
            .collect()
    }
}

impl SimStore for MemoryStore {
    fn insert(&self, content: &str, id: i64) {
        let fp = fingerprint(content);
        let mut inner = self.inner.write();
        match inner.index.get(&id).copied() {
            Some(i) => inner.entries[i].fp = fp,
            None => {
                let slot = inner.entries.len();
                inner.entries.push(Entry { id, fp });
                inner.index.insert(id, slot);
            }
        }
        debug!(id, fp, "simhash: insert");
    }

    fn consensus(&self) -> Option<Consensus> {
        let counts = self.neighbor_counts();
        let (first, rest) = counts.split_first()?;

        // Strict comparisons keep the earliest entry on ties.
        let mut best = *first;
        let mut worst = *first;
        for &(id, c) in rest {
            if c > best.1 {
                best = (id, c);
            }
            if c < worst.1 {
                worst = (id, c);
            }
        }

        let outlier = (counts.len() >= 2 && worst.0 != best.0).then_some(worst);
        Some(Consensus {
            representative: best.0,
            representative_neighbors: best.1,
            outlier: outlier.map(|o| o.0),
            outlier_neighbors: outlier.map(|o| o.1),
            entries: counts.len(),
        })
    }

    fn len(&self) -> usize {
        self.inner.read().entries.len()
    }
}
