//! Caller-facing view of one user's relationships.

use serde::{Deserialize, Serialize};
use weft_types::UserId;

/// All relationships of a single user, materialized from the canonical
/// edge set. `followers` and `pending_received` are the inverse views of
/// other users' outbound edges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSnapshot {
    pub user: UserId,
    /// Users this user follows.
    pub following: Vec<UserId>,
    /// Users that follow this user.
    pub followers: Vec<UserId>,
    /// Users this user has blocked.
    pub blocked: Vec<UserId>,
    /// Users this user has asked to follow.
    pub pending_sent: Vec<UserId>,
    /// Users waiting for this user's accept/deny.
    pub pending_received: Vec<UserId>,
}
