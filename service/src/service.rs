//! The service facade: engines wired over one store, with per-key
//! serialization.

use std::sync::Arc;

use crate::command::{Command, Outcome};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::locks::KeyLocks;
use crate::metrics::FeedMetrics;
use weft_graph::{GraphError, RelationshipGraph, RelationshipSnapshot};
use weft_store::content::ContentStore;
use weft_store::edges::EdgeStore;
use weft_store::votes::VoteStore;
use weft_threads::ThreadEngine;
use weft_types::{PostId, SubjectRef, UserId};
use weft_votes::{VoteLedger, VoteTally};

fn subject_key(subject: SubjectRef) -> String {
    format!("subject/{subject}")
}

fn user_key(user: &UserId) -> String {
    format!("user/{user}")
}

fn thread_key(post: PostId) -> String {
    format!("thread/{post}")
}

/// The weft core behind a single dispatch surface.
///
/// Lock domains: vote casts hold the subject key, so concurrent casts on
/// one subject by different voters serialize; relationship mutations hold
/// both user keys, so any edge touching either user serializes;
/// create/edit/delete of content holds the root post of the affected
/// parent chain, covering the whole counter propagation path.
pub struct FeedService<S> {
    store: Arc<S>,
    graph: RelationshipGraph<S>,
    votes: VoteLedger<S>,
    threads: ThreadEngine<S>,
    locks: KeyLocks,
    metrics: FeedMetrics,
}

impl<S> FeedService<S>
where
    S: ContentStore + VoteStore + EdgeStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: &ServiceConfig) -> Self {
        Self {
            graph: RelationshipGraph::new(Arc::clone(&store)),
            votes: VoteLedger::new(Arc::clone(&store)),
            threads: ThreadEngine::new(Arc::clone(&store), config.params.clone()),
            store,
            locks: KeyLocks::new(),
            metrics: FeedMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &FeedMetrics {
        &self.metrics
    }

    /// Validate and apply one command as a single atomic unit with respect
    /// to its key. On failure nothing has been mutated and the error maps
    /// onto exactly one kind.
    pub async fn dispatch(
        &self,
        actor: &UserId,
        command: Command,
    ) -> Result<Outcome, ServiceError> {
        let result = self.apply(actor, command).await;
        match &result {
            Ok(_) => {
                if let Err(e) = self.refresh_gauges() {
                    tracing::warn!(error = %e, "failed to refresh gauges");
                }
            }
            Err(e) => {
                self.metrics.commands_rejected.inc();
                tracing::debug!(actor = %actor, error = %e, "command rejected");
            }
        }
        result
    }

    async fn apply(&self, actor: &UserId, command: Command) -> Result<Outcome, ServiceError> {
        match command {
            Command::CreatePost { body, media } => {
                let record = self.threads.create_post(actor, body, media)?;
                self.metrics.posts_created.inc();
                Ok(Outcome::Post(record))
            }
            Command::EditPost { post, body } => {
                let _guard = self.locks.acquire(&thread_key(post)).await;
                Ok(Outcome::Post(self.threads.edit_post(actor, post, body)?))
            }
            Command::DeletePost { post } => {
                let _guard = self.locks.acquire(&thread_key(post)).await;
                let receipt = self.threads.delete_post(actor, post)?;
                self.metrics.items_deleted.inc_by(receipt.removed);
                Ok(Outcome::Deleted(receipt))
            }
            Command::CreateComment {
                parent,
                body,
                media,
            } => {
                let root = self.threads.root_post_of(parent)?;
                let _guard = self.locks.acquire(&thread_key(root)).await;
                let record = self
                    .threads
                    .create_comment(&self.graph, actor, parent, body, media)?;
                let parent_children = self.store.child_count(parent)?;
                self.metrics.comments_created.inc();
                Ok(Outcome::Comment {
                    record,
                    parent_children,
                })
            }
            Command::EditComment { comment, body } => {
                let root = self.threads.root_post_of(SubjectRef::Comment(comment))?;
                let _guard = self.locks.acquire(&thread_key(root)).await;
                let record = self.threads.edit_comment(actor, comment, body)?;
                let parent_children = self.store.child_count(record.parent)?;
                Ok(Outcome::Comment {
                    record,
                    parent_children,
                })
            }
            Command::DeleteComment { comment } => {
                let root = self.threads.root_post_of(SubjectRef::Comment(comment))?;
                let _guard = self.locks.acquire(&thread_key(root)).await;
                let receipt = self.threads.delete_comment(actor, comment)?;
                self.metrics.items_deleted.inc_by(receipt.removed);
                Ok(Outcome::Deleted(receipt))
            }
            Command::CastVote {
                subject,
                up_vote,
                down_vote,
            } => {
                let _guard = self.locks.acquire(&subject_key(subject)).await;
                let tally = self
                    .votes
                    .cast_vote(&self.graph, actor, subject, up_vote, down_vote)?;
                self.metrics.votes_applied.inc();
                Ok(Outcome::Votes(tally))
            }
            Command::SendFollowRequest { target } => {
                self.relationship_op(actor, &target, |g| g.send_request(actor, &target))
                    .await
            }
            Command::AcceptFollowRequest { target } => {
                self.relationship_op(actor, &target, |g| g.accept_request(actor, &target))
                    .await
            }
            Command::DenyFollowRequest { target } => {
                self.relationship_op(actor, &target, |g| g.deny_request(actor, &target))
                    .await
            }
            Command::Unfollow { target } => {
                self.relationship_op(actor, &target, |g| g.unfollow(actor, &target))
                    .await
            }
            Command::RemoveFollower { target } => {
                self.relationship_op(actor, &target, |g| g.remove_follower(actor, &target))
                    .await
            }
            Command::Block { target } => {
                self.relationship_op(actor, &target, |g| g.block(actor, &target))
                    .await
            }
            Command::Unblock { target } => {
                self.relationship_op(actor, &target, |g| g.unblock(actor, &target))
                    .await
            }
        }
    }

    async fn relationship_op<F>(
        &self,
        actor: &UserId,
        target: &UserId,
        op: F,
    ) -> Result<Outcome, ServiceError>
    where
        F: FnOnce(&RelationshipGraph<S>) -> Result<(), GraphError>,
    {
        let _guards = self
            .locks
            .acquire_pair(&user_key(actor), &user_key(target))
            .await;
        op(&self.graph)?;
        self.metrics.relationship_ops.inc();
        Ok(Outcome::Relationship(self.graph.snapshot(actor)?))
    }

    /// Read-only view of a user's relationships.
    pub fn relationship_snapshot(
        &self,
        user: &UserId,
    ) -> Result<RelationshipSnapshot, ServiceError> {
        Ok(self.graph.snapshot(user)?)
    }

    /// Recompute a subject's like/dislike counters from its vote records.
    pub async fn reconcile_votes(&self, subject: SubjectRef) -> Result<VoteTally, ServiceError> {
        let _guard = self.locks.acquire(&subject_key(subject)).await;
        Ok(self.votes.reconcile(subject)?)
    }

    /// Recompute a direct-child counter from the live child count.
    pub async fn reconcile_replies(&self, parent: SubjectRef) -> Result<u64, ServiceError> {
        let root = self.threads.root_post_of(parent)?;
        let _guard = self.locks.acquire(&thread_key(root)).await;
        Ok(self.threads.reconcile_replies(parent)?)
    }

    fn refresh_gauges(&self) -> Result<(), ServiceError> {
        self.metrics.post_count.set(self.store.post_count()? as i64);
        self.metrics
            .comment_count
            .set(self.store.comment_count()? as i64);
        self.metrics.vote_count.set(self.store.vote_count()? as i64);
        self.metrics.edge_count.set(self.store.edge_count()? as i64);
        Ok(())
    }
}
