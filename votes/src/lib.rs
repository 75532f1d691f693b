//! Vote ledger engine.
//!
//! Owns the per-(subject, voter) vote records and keeps the subject's
//! like/dislike counters exactly in sync with them. Each cast is resolved
//! through a closed transition table over the states {none, up, down} and
//! applied as a single unit under the caller's per-subject serialization.

pub mod error;
pub mod intent;
pub mod ledger;

pub use error::VoteError;
pub use intent::VoteIntent;
pub use ledger::{VoteLedger, VoteTally};
