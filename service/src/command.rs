//! The closed command set and its outcomes.
//!
//! Dispatch is keyed by the operation's identity, never by a transport
//! detail, and every command is applied with an explicit `actor` — there
//! is no ambient current user.

use serde::{Deserialize, Serialize};

use weft_graph::RelationshipSnapshot;
use weft_store::content::{CommentRecord, PostRecord};
use weft_threads::DeleteReceipt;
use weft_types::{CommentId, MediaRef, PostId, SubjectRef, UserId};
use weft_votes::VoteTally;

/// An inbound intent, validated and applied by its own handler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    CreatePost {
        body: Option<String>,
        media: Option<MediaRef>,
    },
    EditPost {
        post: PostId,
        body: Option<String>,
    },
    DeletePost {
        post: PostId,
    },
    CreateComment {
        parent: SubjectRef,
        body: Option<String>,
        media: Option<MediaRef>,
    },
    EditComment {
        comment: CommentId,
        body: Option<String>,
    },
    DeleteComment {
        comment: CommentId,
    },
    CastVote {
        subject: SubjectRef,
        up_vote: Option<bool>,
        down_vote: Option<bool>,
    },
    SendFollowRequest {
        target: UserId,
    },
    AcceptFollowRequest {
        target: UserId,
    },
    DenyFollowRequest {
        target: UserId,
    },
    Unfollow {
        target: UserId,
    },
    RemoveFollower {
        target: UserId,
    },
    Block {
        target: UserId,
    },
    Unblock {
        target: UserId,
    },
}

/// The successful result of a command. Failures never carry partial data;
/// they flatten to an error kind plus a message instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Outcome {
    /// A created or edited post.
    Post(PostRecord),
    /// A created or edited comment, with the parent's updated
    /// direct-child count.
    Comment {
        record: CommentRecord,
        parent_children: u64,
    },
    /// Result of a delete cascade.
    Deleted(DeleteReceipt),
    /// Updated counters after a vote transition.
    Votes(VoteTally),
    /// The actor's relationships after a graph mutation.
    Relationship(RelationshipSnapshot),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_round_trip_through_json() {
        let commands = vec![
            Command::CreatePost {
                body: Some("hello".into()),
                media: Some(MediaRef::new("img/1.jpg")),
            },
            Command::CastVote {
                subject: SubjectRef::Comment(CommentId::new(7)),
                up_vote: Some(true),
                down_vote: None,
            },
            Command::Block {
                target: UserId::new("someone"),
            },
        ];
        for command in commands {
            let json = serde_json::to_string(&command).unwrap();
            let decoded: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(format!("{decoded:?}"), format!("{command:?}"));
        }
    }

    #[test]
    fn test_vote_outcome_serializes_the_counters() {
        let outcome = Outcome::Votes(VoteTally { like: 3, dislike: 1 });
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"like\":3"));
        assert!(json.contains("\"dislike\":1"));
    }
}
