//! Thread engine.
//!
//! Owns the content tree (posts and their nested comments) and the
//! direct-child counters on every node. Comment creation increments its
//! parent's counter in the same critical section as the insert; deletion
//! removes the whole descendant subtree leaves-first, decrementing each
//! deleted node's parent as it goes, so a counter never disagrees with the
//! live child count at any observable point.

pub mod engine;
pub mod error;

pub use engine::{DeleteReceipt, ThreadEngine};
pub use error::ThreadError;
