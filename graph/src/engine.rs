//! The relationship graph engine.

use std::sync::Arc;

use crate::error::GraphError;
use crate::snapshot::RelationshipSnapshot;
use weft_store::edges::{EdgeStore, RelationshipEdge};
use weft_store::StoreError;
use weft_types::{EdgeKind, UserId};

/// Read-side visibility predicate consumed by the vote and thread engines.
pub trait FollowQuery {
    /// Whether `follower` currently follows `followee`.
    fn is_following(&self, follower: &UserId, followee: &UserId) -> Result<bool, StoreError>;
}

/// The relationship graph — manages follow requests, follows, and blocks.
///
/// Every operation validates against current edge state before any write.
/// Callers serialize operations touching the same user pair (the service
/// layer holds both users' keys for the duration of a mutation), so a
/// validate-then-apply sequence is atomic with respect to its key.
pub struct RelationshipGraph<S> {
    store: Arc<S>,
}

impl<S: EdgeStore> RelationshipGraph<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// `actor` asks to follow `target`.
    pub fn send_request(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if actor == target {
            return Err(GraphError::SelfRelation);
        }
        self.ensure_unblocked_pair(actor, target)?;
        if self.store.edge_exists(actor, target, EdgeKind::Pending)? {
            return Err(GraphError::RequestAlreadyPending {
                from: actor.clone(),
                to: target.clone(),
            });
        }
        if self.store.edge_exists(target, actor, EdgeKind::Pending)? {
            return Err(GraphError::RequestAlreadyPending {
                from: target.clone(),
                to: actor.clone(),
            });
        }
        if self.store.edge_exists(actor, target, EdgeKind::Following)? {
            return Err(GraphError::AlreadyFollowing {
                from: actor.clone(),
                to: target.clone(),
            });
        }

        self.store.put_edge(&RelationshipEdge::new(
            actor.clone(),
            target.clone(),
            EdgeKind::Pending,
        ))?;
        tracing::debug!(actor = %actor, target = %target, "follow request sent");
        Ok(())
    }

    /// `actor` accepts the request received from `target`; `target` becomes
    /// a follower of `actor`.
    pub fn accept_request(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if !self.store.edge_exists(target, actor, EdgeKind::Pending)? {
            return Err(GraphError::NoPendingRequest {
                from: target.clone(),
                to: actor.clone(),
            });
        }
        self.ensure_unblocked_pair(actor, target)?;

        self.store.delete_edge(target, actor, EdgeKind::Pending)?;
        self.store.put_edge(&RelationshipEdge::new(
            target.clone(),
            actor.clone(),
            EdgeKind::Following,
        ))?;
        tracing::debug!(follower = %target, followee = %actor, "follow request accepted");
        Ok(())
    }

    /// `actor` denies the request received from `target`. No edge is created.
    pub fn deny_request(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if !self.store.delete_edge(target, actor, EdgeKind::Pending)? {
            return Err(GraphError::NoPendingRequest {
                from: target.clone(),
                to: actor.clone(),
            });
        }
        tracing::debug!(actor = %actor, target = %target, "follow request denied");
        Ok(())
    }

    /// `actor` stops following `target`.
    pub fn unfollow(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if !self.store.delete_edge(actor, target, EdgeKind::Following)? {
            return Err(GraphError::NotFollowing {
                from: actor.clone(),
                to: target.clone(),
            });
        }
        tracing::debug!(actor = %actor, target = %target, "unfollowed");
        Ok(())
    }

    /// `actor` forcibly drops `target` from their followers.
    pub fn remove_follower(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if !self.store.delete_edge(target, actor, EdgeKind::Following)? {
            return Err(GraphError::NotFollowing {
                from: target.clone(),
                to: actor.clone(),
            });
        }
        tracing::debug!(actor = %actor, target = %target, "follower removed");
        Ok(())
    }

    /// `actor` blocks `target`.
    ///
    /// Any following edge in either direction and any pending request in
    /// either direction is retracted; follows and blocks are mutually
    /// exclusive for a pair. The sweep runs before the block edge is
    /// written so that exclusivity holds at every intermediate store state.
    pub fn block(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if actor == target {
            return Err(GraphError::SelfRelation);
        }
        if self.store.edge_exists(actor, target, EdgeKind::Blocked)? {
            return Err(GraphError::AlreadyBlocked {
                from: actor.clone(),
                to: target.clone(),
            });
        }

        self.store.delete_edge(actor, target, EdgeKind::Following)?;
        self.store.delete_edge(target, actor, EdgeKind::Following)?;
        self.store.delete_edge(actor, target, EdgeKind::Pending)?;
        self.store.delete_edge(target, actor, EdgeKind::Pending)?;
        self.store.put_edge(&RelationshipEdge::new(
            actor.clone(),
            target.clone(),
            EdgeKind::Blocked,
        ))?;
        tracing::info!(actor = %actor, target = %target, "user blocked");
        Ok(())
    }

    /// `actor` unblocks `target`. Prior following/pending state is not
    /// restored.
    pub fn unblock(&self, actor: &UserId, target: &UserId) -> Result<(), GraphError> {
        if !self.store.delete_edge(actor, target, EdgeKind::Blocked)? {
            return Err(GraphError::NotBlocked {
                from: actor.clone(),
                to: target.clone(),
            });
        }
        tracing::info!(actor = %actor, target = %target, "user unblocked");
        Ok(())
    }

    /// Whether `actor` currently follows `target`.
    pub fn is_following(&self, actor: &UserId, target: &UserId) -> Result<bool, StoreError> {
        self.store.edge_exists(actor, target, EdgeKind::Following)
    }

    /// Whether `actor` has blocked `target`.
    pub fn is_blocked(&self, actor: &UserId, target: &UserId) -> Result<bool, StoreError> {
        self.store.edge_exists(actor, target, EdgeKind::Blocked)
    }

    /// Whether a follow request from `from` to `to` is pending.
    pub fn has_pending_request(&self, from: &UserId, to: &UserId) -> Result<bool, StoreError> {
        self.store.edge_exists(from, to, EdgeKind::Pending)
    }

    /// Materialize both edge directions into the caller-facing snapshot.
    pub fn snapshot(&self, user: &UserId) -> Result<RelationshipSnapshot, GraphError> {
        Ok(RelationshipSnapshot {
            user: user.clone(),
            following: self.store.edges_from(user, EdgeKind::Following)?,
            followers: self.store.edges_to(user, EdgeKind::Following)?,
            blocked: self.store.edges_from(user, EdgeKind::Blocked)?,
            pending_sent: self.store.edges_from(user, EdgeKind::Pending)?,
            pending_received: self.store.edges_to(user, EdgeKind::Pending)?,
        })
    }

    fn ensure_unblocked_pair(&self, a: &UserId, b: &UserId) -> Result<(), GraphError> {
        if self.store.edge_exists(a, b, EdgeKind::Blocked)?
            || self.store.edge_exists(b, a, EdgeKind::Blocked)?
        {
            return Err(GraphError::BlockedPair {
                user: a.clone(),
                other: b.clone(),
            });
        }
        Ok(())
    }
}

impl<S: EdgeStore> FollowQuery for RelationshipGraph<S> {
    fn is_following(&self, follower: &UserId, followee: &UserId) -> Result<bool, StoreError> {
        self.store.edge_exists(follower, followee, EdgeKind::Following)
    }
}
