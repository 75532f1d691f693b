//! Polymorphic reference to a votable content item.

use crate::id::{CommentId, PostId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a content item that can be voted on or replied to.
///
/// A post has no parent; a comment's parent is exactly one `SubjectRef`,
/// which makes "either a post or a comment, never both, never neither"
/// hold by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectRef {
    Post(PostId),
    Comment(CommentId),
}

impl SubjectRef {
    pub fn is_post(&self) -> bool {
        matches!(self, Self::Post(_))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    pub fn as_post(&self) -> Option<PostId> {
        match self {
            Self::Post(id) => Some(*id),
            Self::Comment(_) => None,
        }
    }

    pub fn as_comment(&self) -> Option<CommentId> {
        match self {
            Self::Post(_) => None,
            Self::Comment(id) => Some(*id),
        }
    }

    /// Short noun for log lines and error messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Post(_) => "post",
            Self::Comment(_) => "comment",
        }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post(id) => write!(f, "post/{id}"),
            Self::Comment(id) => write!(f, "comment/{id}"),
        }
    }
}
