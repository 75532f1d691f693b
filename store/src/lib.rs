//! Abstract storage traits for the weft social core.
//!
//! Every storage backend (in-memory, or a durable store provided by the
//! surrounding service) implements these traits. The engine crates depend
//! only on the traits.
//!
//! Retry policy: business-rule failures surface unchanged to the caller and
//! are never retried here; only a backend may internally retry transient
//! infrastructure failures of the durable-write call.

pub mod content;
pub mod edges;
pub mod error;
pub mod votes;

pub use content::{CommentRecord, ContentStore, PostRecord};
pub use edges::{EdgeStore, RelationshipEdge};
pub use error::StoreError;
pub use votes::{VoteRecord, VoteStore};
