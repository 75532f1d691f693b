//! Relationship edge storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use weft_types::{EdgeKind, UserId};

/// A directed fact between two users.
///
/// This is the canonical representation: "A follows B" and "B is followed
/// by A" are the same edge read from opposite ends. Inverse views are
/// always computed on read so the two sides can never drift.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub from: UserId,
    pub to: UserId,
    pub kind: EdgeKind,
}

impl RelationshipEdge {
    pub fn new(from: UserId, to: UserId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }
}

/// Trait for the canonical directed edge set.
pub trait EdgeStore {
    /// Insert an edge. Fails with [`StoreError::Duplicate`] if it exists.
    fn put_edge(&self, edge: &RelationshipEdge) -> Result<(), StoreError>;

    /// Remove an edge. Returns whether it existed.
    fn delete_edge(&self, from: &UserId, to: &UserId, kind: EdgeKind)
        -> Result<bool, StoreError>;

    fn edge_exists(&self, from: &UserId, to: &UserId, kind: EdgeKind)
        -> Result<bool, StoreError>;

    /// Users `user` has an edge of `kind` towards (outbound view).
    fn edges_from(&self, user: &UserId, kind: EdgeKind) -> Result<Vec<UserId>, StoreError>;

    /// Users that have an edge of `kind` towards `user` (inverse view).
    fn edges_to(&self, user: &UserId, kind: EdgeKind) -> Result<Vec<UserId>, StoreError>;

    /// Total number of edges of all kinds.
    fn edge_count(&self) -> Result<u64, StoreError>;
}
