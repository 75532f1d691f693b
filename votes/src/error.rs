use thiserror::Error;
use weft_store::StoreError;
use weft_types::{ErrorKind, Polarity, SubjectRef, UserId};

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("either like it or not")]
    EmptyIntent,

    #[error("cannot like and dislike at the same time")]
    ContradictoryIntent,

    #[error("you cannot like or dislike your own {}", .subject.noun())]
    SelfVote { subject: SubjectRef },

    #[error("{voter} does not follow {author} and cannot see their content")]
    NotVisible { voter: UserId, author: UserId },

    #[error("you already {} this {}", .polarity.past_tense(), .subject.noun())]
    AlreadyCast {
        subject: SubjectRef,
        polarity: Polarity,
    },

    #[error("nothing to retract")]
    NothingToRetract,

    #[error("cannot retract a {} vote while the current vote is {}", .requested.past_tense(), .current.past_tense())]
    RetractMismatch {
        requested: Polarity,
        current: Polarity,
    },

    #[error("{0} does not exist")]
    SubjectNotFound(SubjectRef),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl VoteError {
    /// Project onto the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyIntent | Self::ContradictoryIntent => ErrorKind::Validation,
            Self::SelfVote { .. } | Self::NotVisible { .. } => ErrorKind::Permission,
            Self::AlreadyCast { .. } | Self::NothingToRetract | Self::RetractMismatch { .. } => {
                ErrorKind::Conflict
            }
            Self::SubjectNotFound(_) => ErrorKind::NotFound,
            Self::Storage(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
