//! Content storage traits for posts and comments.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use weft_types::{CommentId, MediaRef, PostId, SubjectRef, UserId};

/// A stored post.
///
/// `like`, `dislike` and `comments` are derived counters: they must always
/// equal the live count of the corresponding records. Engines adjust them
/// incrementally and expose reconciliation operations that recompute them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub author: UserId,
    pub body: Option<String>,
    pub media: Option<MediaRef>,
    pub like: u64,
    pub dislike: u64,
    /// Number of comments whose parent is this post (direct children only).
    pub comments: u64,
}

/// A stored comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: CommentId,
    /// The item this comment replies to: a post or another comment.
    pub parent: SubjectRef,
    pub author: UserId,
    pub body: Option<String>,
    pub media: Option<MediaRef>,
    pub like: u64,
    pub dislike: u64,
    /// Number of comments whose parent is this comment (direct children only).
    pub replies: u64,
}

/// Trait for post and comment storage.
///
/// Identifiers are allocated by the backend from a monotonic sequence per
/// table, so a deleted id is never reused.
pub trait ContentStore {
    fn allocate_post_id(&self) -> Result<PostId, StoreError>;
    fn allocate_comment_id(&self) -> Result<CommentId, StoreError>;

    fn get_post(&self, id: PostId) -> Result<PostRecord, StoreError>;
    /// Insert or overwrite a post row.
    fn put_post(&self, record: &PostRecord) -> Result<(), StoreError>;
    fn delete_post(&self, id: PostId) -> Result<(), StoreError>;
    fn post_exists(&self, id: PostId) -> Result<bool, StoreError>;

    fn get_comment(&self, id: CommentId) -> Result<CommentRecord, StoreError>;
    /// Insert or overwrite a comment row.
    fn put_comment(&self, record: &CommentRecord) -> Result<(), StoreError>;
    fn delete_comment(&self, id: CommentId) -> Result<(), StoreError>;
    fn comment_exists(&self, id: CommentId) -> Result<bool, StoreError>;

    /// Ids of the comments whose parent is `parent`, in insertion order.
    fn children_of(&self, parent: SubjectRef) -> Result<Vec<CommentId>, StoreError>;

    /// Live count of direct children, without allocating the id list.
    fn child_count(&self, parent: SubjectRef) -> Result<u64, StoreError> {
        self.children_of(parent).map(|c| c.len() as u64)
    }

    fn post_count(&self) -> Result<u64, StoreError>;
    fn comment_count(&self) -> Result<u64, StoreError>;
}
