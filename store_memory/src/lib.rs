//! Thread-safe in-memory implementation of the weft storage traits.
//!
//! This is both the deterministic backend for tests and the default backend
//! for embedding the core in a surrounding service. State can be dumped to
//! and restored from a bincode snapshot; secondary indexes are rebuilt on
//! load rather than persisted.

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::StoreSnapshot;
