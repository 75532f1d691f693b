//! The vote ledger engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::VoteError;
use crate::intent::VoteIntent;
use weft_graph::FollowQuery;
use weft_store::content::ContentStore;
use weft_store::votes::{VoteRecord, VoteStore};
use weft_store::StoreError;
use weft_types::{Polarity, SubjectRef, UserId};

/// Updated like/dislike counters, returned by every vote operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub like: u64,
    pub dislike: u64,
}

/// The resolved state change for one cast, decided before anything is
/// written.
#[derive(Clone, Copy, Debug)]
enum Transition {
    Create(Polarity),
    Flip(Polarity),
    Delete(Polarity),
}

/// The vote ledger — one state machine per `(subject, voter)` key.
///
/// All validation happens before any write; callers serialize casts on the
/// same subject, so the read-decide-write sequence is atomic per key and
/// the subject's counters always equal the live record counts.
pub struct VoteLedger<S> {
    store: Arc<S>,
}

impl<S: VoteStore + ContentStore> VoteLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Cast or retract a vote on `subject`.
    ///
    /// `graph` supplies the visibility gate: a voter must follow the
    /// subject's author. Authors cannot vote on their own content.
    pub fn cast_vote<G: FollowQuery>(
        &self,
        graph: &G,
        voter: &UserId,
        subject: SubjectRef,
        up_vote: Option<bool>,
        down_vote: Option<bool>,
    ) -> Result<VoteTally, VoteError> {
        let (author, like, dislike) = self.load_subject(subject)?;

        if voter == &author {
            return Err(VoteError::SelfVote { subject });
        }
        if !graph.is_following(voter, &author)? {
            return Err(VoteError::NotVisible {
                voter: voter.clone(),
                author,
            });
        }
        let intent = VoteIntent::from_flags(up_vote, down_vote)?;

        let current = self.store.get_vote(subject, voter)?.map(|r| r.polarity);
        let transition = resolve(subject, current, intent)?;

        let base = VoteTally { like, dislike };
        let tally = match transition {
            Transition::Create(polarity) => {
                self.store.put_vote(&VoteRecord {
                    subject,
                    voter: voter.clone(),
                    polarity,
                })?;
                shift(base, polarity, 1)
            }
            Transition::Flip(polarity) => {
                self.store.put_vote(&VoteRecord {
                    subject,
                    voter: voter.clone(),
                    polarity,
                })?;
                shift(shift(base, polarity, 1), polarity.flipped(), -1)
            }
            Transition::Delete(polarity) => {
                self.store.delete_vote(subject, voter)?;
                shift(base, polarity, -1)
            }
        };

        self.write_counters(subject, tally)?;
        tracing::debug!(voter = %voter, subject = %subject, ?transition, "vote applied");
        Ok(tally)
    }

    /// The voter's current vote on `subject`, if any.
    pub fn vote_of(
        &self,
        subject: SubjectRef,
        voter: &UserId,
    ) -> Result<Option<Polarity>, VoteError> {
        Ok(self.store.get_vote(subject, voter)?.map(|r| r.polarity))
    }

    /// The subject's current counters.
    pub fn tally(&self, subject: SubjectRef) -> Result<VoteTally, VoteError> {
        let (_, like, dislike) = self.load_subject(subject)?;
        Ok(VoteTally { like, dislike })
    }

    /// Recompute both counters from the vote records and rewrite the
    /// subject row. The incremental bookkeeping and this recomputation
    /// must always agree; this is the check that proves it.
    pub fn reconcile(&self, subject: SubjectRef) -> Result<VoteTally, VoteError> {
        self.load_subject(subject)?;
        let tally = VoteTally {
            like: self.store.count_votes(subject, Polarity::Up)?,
            dislike: self.store.count_votes(subject, Polarity::Down)?,
        };
        self.write_counters(subject, tally)?;
        Ok(tally)
    }

    fn load_subject(&self, subject: SubjectRef) -> Result<(UserId, u64, u64), VoteError> {
        match subject {
            SubjectRef::Post(id) => match self.store.get_post(id) {
                Ok(post) => Ok((post.author, post.like, post.dislike)),
                Err(StoreError::NotFound(_)) => Err(VoteError::SubjectNotFound(subject)),
                Err(e) => Err(e.into()),
            },
            SubjectRef::Comment(id) => match self.store.get_comment(id) {
                Ok(comment) => Ok((comment.author, comment.like, comment.dislike)),
                Err(StoreError::NotFound(_)) => Err(VoteError::SubjectNotFound(subject)),
                Err(e) => Err(e.into()),
            },
        }
    }

    fn write_counters(&self, subject: SubjectRef, tally: VoteTally) -> Result<(), VoteError> {
        match subject {
            SubjectRef::Post(id) => {
                let mut post = self.store.get_post(id)?;
                post.like = tally.like;
                post.dislike = tally.dislike;
                self.store.put_post(&post)?;
            }
            SubjectRef::Comment(id) => {
                let mut comment = self.store.get_comment(id)?;
                comment.like = tally.like;
                comment.dislike = tally.dislike;
                self.store.put_comment(&comment)?;
            }
        }
        Ok(())
    }
}

/// The transition table, keyed by (current state, intent).
fn resolve(
    subject: SubjectRef,
    current: Option<Polarity>,
    intent: VoteIntent,
) -> Result<Transition, VoteError> {
    match (current, intent) {
        (None, VoteIntent::Cast(p)) => Ok(Transition::Create(p)),
        (None, VoteIntent::Retract(_)) => Err(VoteError::NothingToRetract),
        (Some(cur), VoteIntent::Cast(p)) if cur == p => Err(VoteError::AlreadyCast {
            subject,
            polarity: p,
        }),
        (Some(_), VoteIntent::Cast(p)) => Ok(Transition::Flip(p)),
        (Some(cur), VoteIntent::Retract(p)) if cur == p => Ok(Transition::Delete(p)),
        (Some(cur), VoteIntent::Retract(p)) => Err(VoteError::RetractMismatch {
            requested: p,
            current: cur,
        }),
    }
}

/// Apply `delta` to the counter addressed by `polarity`, leaving the other
/// one untouched.
fn shift(tally: VoteTally, polarity: Polarity, delta: i64) -> VoteTally {
    let apply = |v: u64| {
        if delta >= 0 {
            v.saturating_add(delta as u64)
        } else {
            v.saturating_sub(delta.unsigned_abs())
        }
    };
    match polarity {
        Polarity::Up => VoteTally {
            like: apply(tally.like),
            ..tally
        },
        Polarity::Down => VoteTally {
            dislike: apply(tally.dislike),
            ..tally
        },
    }
}
