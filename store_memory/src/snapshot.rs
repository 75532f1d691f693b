//! Bincode snapshot of the in-memory store.
//!
//! Only the canonical tables are serialized; the direct-child index is
//! rebuilt on load.

use serde::{Deserialize, Serialize};

use crate::memory::MemoryStore;
use weft_store::content::{CommentRecord, PostRecord};
use weft_store::edges::RelationshipEdge;
use weft_store::votes::VoteRecord;
use weft_store::StoreError;

/// Serializable image of the canonical store state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub posts: Vec<PostRecord>,
    pub comments: Vec<CommentRecord>,
    pub votes: Vec<VoteRecord>,
    pub edges: Vec<RelationshipEdge>,
    pub next_post_id: u64,
    pub next_comment_id: u64,
}

impl MemoryStore {
    /// Serialize the full store state to bytes.
    pub fn save(&self) -> Result<Vec<u8>, StoreError> {
        let (posts, comments, votes, edges, next_post_id, next_comment_id) = self.dump()?;
        let snapshot = StoreSnapshot {
            posts,
            comments,
            votes,
            edges,
            next_post_id,
            next_comment_id,
        };
        bincode::serialize(&snapshot).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Restore a store from bytes produced by [`MemoryStore::save`].
    pub fn load(data: &[u8]) -> Result<Self, StoreError> {
        let snapshot: StoreSnapshot =
            bincode::deserialize(data).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self::restore(
            snapshot.posts,
            snapshot.comments,
            snapshot.votes,
            snapshot.edges,
            snapshot.next_post_id,
            snapshot.next_comment_id,
        ))
    }
}
