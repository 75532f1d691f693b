//! Relationship graph engine.
//!
//! Owns the directed follow/block/request edge set between users. Every
//! two-party fact is a single canonical edge; "followers" and
//! "pending-received" are the inverse views of the same edges, computed on
//! read, so the two sides of a relationship can never drift apart.

pub mod engine;
pub mod error;
pub mod snapshot;

pub use engine::{FollowQuery, RelationshipGraph};
pub use error::GraphError;
pub use snapshot::RelationshipSnapshot;
