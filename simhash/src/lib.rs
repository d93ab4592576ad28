//! SimHash fingerprint stores with neighbor-count consensus.
//!
//! Each store keeps `(content, id)` pairs as 64-bit SimHash fingerprints.
//! Two entries are neighbors when their fingerprints differ in at most
//! `threshold` bits. Consensus picks the entry with the most neighbors
//! (the representative) and the one with the fewest (the outlier).
//!
//! # Usage
//!
//! ```
//! use giztoy_simhash::{Engine, SimHashEngine, SimStore};
//!
//! let engine = SimHashEngine::default();
//! let store = engine.create_instance();
//! store.insert("the quick brown fox", 1);
//! store.insert("the quick brown fox jumps", 2);
//! store.insert("lorem ipsum dolor sit amet", 3);
//!
//! let c = store.consensus().unwrap();
//! assert_eq!(c.entries, 3);
//! ```

mod engine;
mod error;
mod fingerprint;
mod memory;

pub use engine::{Consensus, DEFAULT_THRESHOLD, Engine, SimHashEngine, SimStore};
pub use error::SimHashError;
pub use fingerprint::{fingerprint, hamming};
pub use memory::MemoryStore;
