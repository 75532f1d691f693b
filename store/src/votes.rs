//! Vote record storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use weft_types::{Polarity, SubjectRef, UserId};

/// A single user's vote on a single subject.
///
/// Keyed by `(subject, voter)`; at most one record exists per key. The
/// backend enforces this by construction of its key space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub subject: SubjectRef,
    pub voter: UserId,
    pub polarity: Polarity,
}

/// Trait for vote record storage.
pub trait VoteStore {
    /// The current vote of `voter` on `subject`, if any.
    fn get_vote(&self, subject: SubjectRef, voter: &UserId)
        -> Result<Option<VoteRecord>, StoreError>;

    /// Insert or overwrite the record for `(record.subject, record.voter)`.
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError>;

    /// Remove the record for `(subject, voter)`. Returns whether one existed.
    fn delete_vote(&self, subject: SubjectRef, voter: &UserId) -> Result<bool, StoreError>;

    /// Live count of records on `subject` with the given polarity.
    fn count_votes(&self, subject: SubjectRef, polarity: Polarity) -> Result<u64, StoreError>;

    /// Remove every record on `subject` (subject is being deleted).
    /// Returns the number of records removed.
    fn delete_votes_for_subject(&self, subject: SubjectRef) -> Result<u64, StoreError>;

    /// Total number of vote records across all subjects.
    fn vote_count(&self) -> Result<u64, StoreError>;
}
