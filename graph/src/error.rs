use thiserror::Error;
use weft_store::StoreError;
use weft_types::{ErrorKind, UserId};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("users cannot follow or block themselves")]
    SelfRelation,

    #[error("no relationship changes are possible between {user} and {other} while a block stands")]
    BlockedPair { user: UserId, other: UserId },

    #[error("a follow request between {from} and {to} is already pending")]
    RequestAlreadyPending { from: UserId, to: UserId },

    #[error("{from} already follows {to}")]
    AlreadyFollowing { from: UserId, to: UserId },

    #[error("no pending follow request from {from} to {to}")]
    NoPendingRequest { from: UserId, to: UserId },

    #[error("{from} does not follow {to}")]
    NotFollowing { from: UserId, to: UserId },

    #[error("{from} has not blocked {to}")]
    NotBlocked { from: UserId, to: UserId },

    #[error("{from} already blocks {to}")]
    AlreadyBlocked { from: UserId, to: UserId },

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl GraphError {
    /// Project onto the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfRelation | Self::BlockedPair { .. } => ErrorKind::Permission,
            Self::RequestAlreadyPending { .. }
            | Self::AlreadyFollowing { .. }
            | Self::NoPendingRequest { .. }
            | Self::NotFollowing { .. }
            | Self::NotBlocked { .. }
            | Self::AlreadyBlocked { .. } => ErrorKind::Conflict,
            Self::Storage(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
