//! State enums for votes and relationship edges.

use serde::{Deserialize, Serialize};

/// The direction of a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// A like.
    Up,
    /// A dislike.
    Down,
}

impl Polarity {
    /// The opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Past-tense verb for error messages ("already liked").
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Up => "liked",
            Self::Down => "disliked",
        }
    }
}

/// The kind of a directed fact between two users.
///
/// Each kind is an independent directed relation over the same pair of
/// users. The inverse views ("follower", "pending-received") are computed
/// on read, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// `from` follows `to`.
    Following,
    /// `from` has blocked `to`.
    Blocked,
    /// `from` has a follow request pending with `to`.
    Pending,
}

impl EdgeKind {
    /// Short noun for log lines.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Following => "following",
            Self::Blocked => "blocked",
            Self::Pending => "pending",
        }
    }
}
