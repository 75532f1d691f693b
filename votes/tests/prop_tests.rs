//! Property tests for the vote ledger.
//!
//! For any sequence of intents from any voters, the per-voter record is
//! always one of {absent, up, down} and the subject's counters equal the
//! live record counts — never double-counted regardless of history.

use std::sync::Arc;

use proptest::prelude::*;

use weft_graph::RelationshipGraph;
use weft_store::content::{ContentStore, PostRecord};
use weft_store::votes::VoteStore;
use weft_store_memory::MemoryStore;
use weft_types::{Polarity, SubjectRef, UserId};
use weft_votes::VoteLedger;

fn voter_name(n: u8) -> UserId {
    UserId::new(format!("voter_{n}"))
}

/// One author, three followers, one post. Returns the ledger fixture.
fn setup() -> (
    Arc<MemoryStore>,
    RelationshipGraph<MemoryStore>,
    VoteLedger<MemoryStore>,
    SubjectRef,
) {
    let store = Arc::new(MemoryStore::new());
    let graph = RelationshipGraph::new(Arc::clone(&store));
    let ledger = VoteLedger::new(Arc::clone(&store));

    let author = UserId::new("author");
    for n in 0..3 {
        let voter = voter_name(n);
        graph.send_request(&voter, &author).unwrap();
        graph.accept_request(&author, &voter).unwrap();
    }

    let post = PostRecord {
        id: store.allocate_post_id().unwrap(),
        author,
        body: Some("subject".into()),
        media: None,
        like: 0,
        dislike: 0,
        comments: 0,
    };
    store.put_post(&post).unwrap();

    (store, graph, ledger, SubjectRef::Post(post.id))
}

fn arb_flags() -> impl Strategy<Value = (Option<bool>, Option<bool>)> {
    (prop::option::of(any::<bool>()), prop::option::of(any::<bool>()))
}

proptest! {
    #[test]
    fn counters_always_equal_live_record_counts(
        ops in prop::collection::vec((0u8..3, arb_flags()), 1..60)
    ) {
        let (store, graph, ledger, subject) = setup();

        for (voter_idx, (up, down)) in ops {
            let voter = voter_name(voter_idx);
            // Rejected casts must leave no trace; accepted ones must keep
            // the counters exact. Both are checked below either way.
            let _ = ledger.cast_vote(&graph, &voter, subject, up, down);

            let tally = ledger.tally(subject).unwrap();
            let live_up = store.count_votes(subject, Polarity::Up).unwrap();
            let live_down = store.count_votes(subject, Polarity::Down).unwrap();
            prop_assert_eq!(tally.like, live_up);
            prop_assert_eq!(tally.dislike, live_down);
            prop_assert_eq!(tally.like + tally.dislike, store.vote_count().unwrap());

            // Reconciliation must agree with the incremental bookkeeping.
            let reconciled = ledger.reconcile(subject).unwrap();
            prop_assert_eq!(reconciled, tally);
        }
    }

    #[test]
    fn a_voter_never_holds_more_than_one_record(
        ops in prop::collection::vec(arb_flags(), 1..40)
    ) {
        let (store, graph, ledger, subject) = setup();
        let voter = voter_name(0);

        for (up, down) in ops {
            let _ = ledger.cast_vote(&graph, &voter, subject, up, down);
            let record = store.get_vote(subject, &voter).unwrap();
            let total = store.vote_count().unwrap();
            prop_assert!(total <= 1);
            prop_assert_eq!(record.is_some(), total == 1);
        }
    }
}
