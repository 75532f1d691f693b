//! The thread engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ThreadError;
use weft_graph::FollowQuery;
use weft_store::content::{CommentRecord, ContentStore, PostRecord};
use weft_store::votes::VoteStore;
use weft_store::StoreError;
use weft_types::{CommentId, FeedParams, MediaRef, PostId, SubjectRef, UserId};

/// Outcome of a subtree deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    /// The deleted item's parent, when the item was a comment.
    pub parent: Option<SubjectRef>,
    /// The parent's direct-child count after the deletion.
    pub remaining_children: Option<u64>,
    /// Content items removed: the item itself plus every descendant.
    pub removed: u64,
}

/// The thread engine — content lifecycle and direct-child counters.
///
/// Validation always precedes the first write. Callers serialize
/// operations on the same parent chain (the service layer locks the root
/// post), so the insert-plus-increment and the delete cascade each run as
/// one unit with respect to their key.
pub struct ThreadEngine<S> {
    store: Arc<S>,
    params: FeedParams,
}

impl<S: ContentStore + VoteStore> ThreadEngine<S> {
    pub fn new(store: Arc<S>, params: FeedParams) -> Self {
        Self { store, params }
    }

    /// Publish a new post. A post needs a body, a media attachment, or both.
    pub fn create_post(
        &self,
        actor: &UserId,
        body: Option<String>,
        media: Option<MediaRef>,
    ) -> Result<PostRecord, ThreadError> {
        self.validate_content(&body, &media)?;
        let record = PostRecord {
            id: self.store.allocate_post_id()?,
            author: actor.clone(),
            body,
            media,
            like: 0,
            dislike: 0,
            comments: 0,
        };
        self.store.put_post(&record)?;
        tracing::info!(author = %actor, post = %record.id, "post created");
        Ok(record)
    }

    /// Replace a post's body. Only the author may edit.
    pub fn edit_post(
        &self,
        actor: &UserId,
        id: PostId,
        body: Option<String>,
    ) -> Result<PostRecord, ThreadError> {
        let mut post = self.get_post(id)?;
        if post.author != *actor {
            return Err(ThreadError::EditNotAllowed { noun: "post" });
        }
        self.validate_content(&body, &post.media)?;
        post.body = body;
        self.store.put_post(&post)?;
        Ok(post)
    }

    /// Delete a post and its entire comment subtree, including every vote
    /// record on the post and on each deleted comment. Only the author may
    /// delete.
    pub fn delete_post(&self, actor: &UserId, id: PostId) -> Result<DeleteReceipt, ThreadError> {
        let post = self.get_post(id)?;
        if post.author != *actor {
            return Err(ThreadError::DeleteNotAllowed { noun: "post" });
        }

        let mut removed = 1u64;
        for child in self.store.children_of(SubjectRef::Post(id))? {
            removed += self.delete_subtree(child)?;
        }
        self.store.delete_votes_for_subject(SubjectRef::Post(id))?;
        self.store.delete_post(id)?;
        tracing::info!(author = %actor, post = %id, removed, "post deleted");
        Ok(DeleteReceipt {
            parent: None,
            remaining_children: None,
            removed,
        })
    }

    /// Reply to a post or to another comment.
    ///
    /// The reply is gated on the parent item's author: the actor must be
    /// that author or follow them. The parent's direct-child counter is
    /// incremented in the same critical section as the insert.
    pub fn create_comment<G: FollowQuery>(
        &self,
        graph: &G,
        actor: &UserId,
        parent: SubjectRef,
        body: Option<String>,
        media: Option<MediaRef>,
    ) -> Result<CommentRecord, ThreadError> {
        self.validate_content(&body, &media)?;
        let parent_author = self.author_of(parent)?;
        if *actor != parent_author && !graph.is_following(actor, &parent_author)? {
            return Err(ThreadError::NotVisible {
                user: actor.clone(),
                author: parent_author,
            });
        }

        let record = CommentRecord {
            id: self.store.allocate_comment_id()?,
            parent,
            author: actor.clone(),
            body,
            media,
            like: 0,
            dislike: 0,
            replies: 0,
        };
        self.store.put_comment(&record)?;
        self.shift_child_counter(parent, 1)?;
        tracing::info!(author = %actor, comment = %record.id, parent = %parent, "comment created");
        Ok(record)
    }

    /// Replace a comment's body. Only the author may edit.
    pub fn edit_comment(
        &self,
        actor: &UserId,
        id: CommentId,
        body: Option<String>,
    ) -> Result<CommentRecord, ThreadError> {
        let mut comment = self.get_comment(id)?;
        if comment.author != *actor {
            return Err(ThreadError::EditNotAllowed { noun: "comment" });
        }
        self.validate_content(&body, &comment.media)?;
        comment.body = body;
        self.store.put_comment(&comment)?;
        Ok(comment)
    }

    /// Delete a comment and its entire descendant subtree.
    ///
    /// Allowed for the comment's author, the author of the thread's post,
    /// or the author of the immediate parent comment. Descendants are
    /// removed leaves-first; every deleted node decrements its parent's
    /// direct-child counter by one, and vote records of each deleted item
    /// are removed with it.
    pub fn delete_comment(
        &self,
        actor: &UserId,
        id: CommentId,
    ) -> Result<DeleteReceipt, ThreadError> {
        let comment = self.get_comment(id)?;

        let mut allowed = comment.author == *actor;
        if !allowed {
            allowed = self.author_of(comment.parent)? == *actor;
        }
        if !allowed {
            let root = self.root_post_of(SubjectRef::Comment(id))?;
            allowed = self.get_post(root)?.author == *actor;
        }
        if !allowed {
            return Err(ThreadError::DeleteNotAllowed { noun: "comment" });
        }

        let removed = self.delete_subtree(id)?;
        let remaining = self.store.child_count(comment.parent)?;
        tracing::info!(actor = %actor, comment = %id, removed, "comment deleted");
        Ok(DeleteReceipt {
            parent: Some(comment.parent),
            remaining_children: Some(remaining),
            removed,
        })
    }

    /// Recompute a direct-child counter from the live child count and
    /// rewrite it. The incremental bookkeeping and this recomputation must
    /// always agree; this is the check that proves it.
    pub fn reconcile_replies(&self, parent: SubjectRef) -> Result<u64, ThreadError> {
        let live = self.store.child_count(parent)?;
        match parent {
            SubjectRef::Post(id) => {
                let mut post = self.get_post(id)?;
                post.comments = live;
                self.store.put_post(&post)?;
            }
            SubjectRef::Comment(id) => {
                let mut comment = self.get_comment(id)?;
                comment.replies = live;
                self.store.put_comment(&comment)?;
            }
        }
        Ok(live)
    }

    /// The post at the root of the parent chain of `subject`.
    ///
    /// A comment's parent always exists before the comment does, so parent
    /// ids strictly decrease along the walk and the loop terminates.
    pub fn root_post_of(&self, subject: SubjectRef) -> Result<PostId, ThreadError> {
        let mut current = subject;
        loop {
            match current {
                SubjectRef::Post(id) => return Ok(id),
                SubjectRef::Comment(id) => current = self.get_comment(id)?.parent,
            }
        }
    }

    /// Delete `root` and every descendant, leaves first. Returns the number
    /// of comments removed.
    fn delete_subtree(&self, root: CommentId) -> Result<u64, ThreadError> {
        // Pre-order walk; every node lands before its descendants, so the
        // reversed order deletes children before their parents.
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.store.children_of(SubjectRef::Comment(id))?);
        }

        let mut removed = 0u64;
        for id in order.into_iter().rev() {
            let record = self.store.get_comment(id)?;
            self.store.delete_votes_for_subject(SubjectRef::Comment(id))?;
            self.store.delete_comment(id)?;
            self.shift_child_counter(record.parent, -1)?;
            removed += 1;
        }
        Ok(removed)
    }

    fn shift_child_counter(&self, parent: SubjectRef, delta: i64) -> Result<(), ThreadError> {
        match parent {
            SubjectRef::Post(id) => {
                let mut post = self.get_post(id)?;
                post.comments = apply_delta(post.comments, delta);
                self.store.put_post(&post)?;
            }
            SubjectRef::Comment(id) => {
                let mut comment = self.get_comment(id)?;
                comment.replies = apply_delta(comment.replies, delta);
                self.store.put_comment(&comment)?;
            }
        }
        Ok(())
    }

    fn author_of(&self, subject: SubjectRef) -> Result<UserId, ThreadError> {
        match subject {
            SubjectRef::Post(id) => match self.store.get_post(id) {
                Ok(post) => Ok(post.author),
                Err(StoreError::NotFound(_)) => Err(ThreadError::ParentNotFound(subject)),
                Err(e) => Err(e.into()),
            },
            SubjectRef::Comment(id) => match self.store.get_comment(id) {
                Ok(comment) => Ok(comment.author),
                Err(StoreError::NotFound(_)) => Err(ThreadError::ParentNotFound(subject)),
                Err(e) => Err(e.into()),
            },
        }
    }

    fn validate_content(
        &self,
        body: &Option<String>,
        media: &Option<MediaRef>,
    ) -> Result<(), ThreadError> {
        let has_body = body.as_deref().is_some_and(|b| !b.is_empty());
        if !has_body && media.is_none() {
            return Err(ThreadError::EmptyContent);
        }
        if let Some(b) = body {
            let len = b.chars().count();
            if len > self.params.max_body_chars {
                return Err(ThreadError::BodyTooLong {
                    len,
                    max: self.params.max_body_chars,
                });
            }
        }
        Ok(())
    }

    fn get_post(&self, id: PostId) -> Result<PostRecord, ThreadError> {
        match self.store.get_post(id) {
            Ok(post) => Ok(post),
            Err(StoreError::NotFound(_)) => Err(ThreadError::PostNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn get_comment(&self, id: CommentId) -> Result<CommentRecord, ThreadError> {
        match self.store.get_comment(id) {
            Ok(comment) => Ok(comment),
            Err(StoreError::NotFound(_)) => Err(ThreadError::CommentNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

fn apply_delta(counter: u64, delta: i64) -> u64 {
    if delta >= 0 {
        counter.saturating_add(delta as u64)
    } else {
        counter.saturating_sub(delta.unsigned_abs())
    }
}
