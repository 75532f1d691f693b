use thiserror::Error;
use weft_store::StoreError;
use weft_types::{CommentId, ErrorKind, PostId, SubjectRef, UserId};

#[derive(Debug, Error)]
pub enum ThreadError {
    #[error("either add a photo or the text")]
    EmptyContent,

    #[error("body is {len} characters, the limit is {max}")]
    BodyTooLong { len: usize, max: usize },

    #[error("you are not allowed to edit the {noun} of another user")]
    EditNotAllowed { noun: &'static str },

    #[error("you are not allowed to delete this {noun}")]
    DeleteNotAllowed { noun: &'static str },

    #[error("{user} does not follow {author} and cannot see their content")]
    NotVisible { user: UserId, author: UserId },

    #[error("post/{0} does not exist")]
    PostNotFound(PostId),

    #[error("comment/{0} does not exist")]
    CommentNotFound(CommentId),

    #[error("parent {0} does not exist")]
    ParentNotFound(SubjectRef),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ThreadError {
    /// Project onto the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyContent | Self::BodyTooLong { .. } => ErrorKind::Validation,
            Self::EditNotAllowed { .. }
            | Self::DeleteNotAllowed { .. }
            | Self::NotVisible { .. } => ErrorKind::Permission,
            Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::ParentNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Storage(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
