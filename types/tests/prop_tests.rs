use proptest::prelude::*;

use weft_types::{CommentId, EdgeKind, FeedParams, Polarity, PostId, SubjectRef, UserId};

fn arb_user_id() -> impl Strategy<Value = UserId> {
    "[a-z0-9_]{3,30}".prop_map(UserId::new)
}

fn arb_subject() -> impl Strategy<Value = SubjectRef> {
    prop_oneof![
        any::<u64>().prop_map(|n| SubjectRef::Post(PostId::new(n))),
        any::<u64>().prop_map(|n| SubjectRef::Comment(CommentId::new(n))),
    ]
}

proptest! {
    /// PostId roundtrip: new -> value produces the original number.
    #[test]
    fn post_id_roundtrip(raw in any::<u64>()) {
        prop_assert_eq!(PostId::new(raw).value(), raw);
    }

    /// CommentId roundtrip: new -> value produces the original number.
    #[test]
    fn comment_id_roundtrip(raw in any::<u64>()) {
        prop_assert_eq!(CommentId::new(raw).value(), raw);
    }

    /// Id ordering agrees with the underlying number.
    #[test]
    fn post_id_ordering(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(PostId::new(a) <= PostId::new(b), a <= b);
        prop_assert_eq!(PostId::new(a) == PostId::new(b), a == b);
    }

    /// UserId bincode serialization roundtrip.
    #[test]
    fn user_id_bincode_roundtrip(user in arb_user_id()) {
        let encoded = bincode::serialize(&user).unwrap();
        let decoded: UserId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, user);
    }

    /// SubjectRef bincode serialization roundtrip.
    #[test]
    fn subject_bincode_roundtrip(subject in arb_subject()) {
        let encoded = bincode::serialize(&subject).unwrap();
        let decoded: SubjectRef = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, subject);
    }

    /// A subject is a post or a comment, never both.
    #[test]
    fn subject_variant_exclusive(subject in arb_subject()) {
        prop_assert_ne!(subject.is_post(), subject.is_comment());
        prop_assert_eq!(subject.as_post().is_some(), subject.is_post());
        prop_assert_eq!(subject.as_comment().is_some(), subject.is_comment());
    }
}

#[test]
fn polarity_flip_is_involution() {
    assert_eq!(Polarity::Up.flipped(), Polarity::Down);
    assert_eq!(Polarity::Down.flipped(), Polarity::Up);
    assert_eq!(Polarity::Up.flipped().flipped(), Polarity::Up);
}

#[test]
fn edge_kind_nouns_are_distinct() {
    let nouns = [
        EdgeKind::Following.noun(),
        EdgeKind::Blocked.noun(),
        EdgeKind::Pending.noun(),
    ];
    assert_eq!(
        nouns.len(),
        nouns.iter().collect::<std::collections::HashSet<_>>().len()
    );
}

#[test]
fn feed_params_default_body_limit() {
    let params = FeedParams::default();
    assert_eq!(params.max_body_chars, 255);
}
