//! The in-memory store.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use weft_store::content::{CommentRecord, ContentStore, PostRecord};
use weft_store::edges::{EdgeStore, RelationshipEdge};
use weft_store::votes::{VoteRecord, VoteStore};
use weft_store::StoreError;
use weft_types::{CommentId, EdgeKind, Polarity, PostId, SubjectRef, UserId};

/// Thread-safe in-memory store for posts, comments, votes, and edges.
///
/// One `Mutex` per table. Callers that need multi-call atomicity
/// serialize above this layer on a per-key basis.
pub struct MemoryStore {
    posts: Mutex<HashMap<u64, PostRecord>>,
    comments: Mutex<HashMap<u64, CommentRecord>>,
    /// Direct-child index, maintained on every comment insert/delete.
    /// Ids are kept in insertion order.
    children: Mutex<HashMap<SubjectRef, Vec<CommentId>>>,
    votes: Mutex<HashMap<SubjectRef, HashMap<UserId, Polarity>>>,
    edges: Mutex<HashSet<(UserId, UserId, EdgeKind)>>,
    next_post_id: AtomicU64,
    next_comment_id: AtomicU64,
}

fn acquire<'a, T>(mutex: &'a Mutex<T>, table: &str) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend(format!("poisoned lock on {table} table")))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(HashMap::new()),
            comments: Mutex::new(HashMap::new()),
            children: Mutex::new(HashMap::new()),
            votes: Mutex::new(HashMap::new()),
            edges: Mutex::new(HashSet::new()),
            next_post_id: AtomicU64::new(1),
            next_comment_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn restore(
        posts: Vec<PostRecord>,
        comments: Vec<CommentRecord>,
        votes: Vec<VoteRecord>,
        edges: Vec<RelationshipEdge>,
        next_post_id: u64,
        next_comment_id: u64,
    ) -> Self {
        let mut children: HashMap<SubjectRef, Vec<CommentId>> = HashMap::new();
        let mut ordered = comments.clone();
        ordered.sort_by_key(|c| c.id);
        for c in &ordered {
            children.entry(c.parent).or_default().push(c.id);
        }

        let mut vote_map: HashMap<SubjectRef, HashMap<UserId, Polarity>> = HashMap::new();
        for v in votes {
            vote_map
                .entry(v.subject)
                .or_default()
                .insert(v.voter, v.polarity);
        }

        Self {
            posts: Mutex::new(posts.into_iter().map(|p| (p.id.value(), p)).collect()),
            comments: Mutex::new(comments.into_iter().map(|c| (c.id.value(), c)).collect()),
            children: Mutex::new(children),
            votes: Mutex::new(vote_map),
            edges: Mutex::new(
                edges
                    .into_iter()
                    .map(|e| (e.from, e.to, e.kind))
                    .collect(),
            ),
            next_post_id: AtomicU64::new(next_post_id),
            next_comment_id: AtomicU64::new(next_comment_id),
        }
    }

    pub(crate) fn dump(
        &self,
    ) -> Result<
        (
            Vec<PostRecord>,
            Vec<CommentRecord>,
            Vec<VoteRecord>,
            Vec<RelationshipEdge>,
            u64,
            u64,
        ),
        StoreError,
    > {
        let posts = acquire(&self.posts, "posts")?.values().cloned().collect();
        let comments = acquire(&self.comments, "comments")?
            .values()
            .cloned()
            .collect();
        let votes = acquire(&self.votes, "votes")?
            .iter()
            .flat_map(|(subject, per_user)| {
                per_user.iter().map(|(voter, polarity)| VoteRecord {
                    subject: *subject,
                    voter: voter.clone(),
                    polarity: *polarity,
                })
            })
            .collect();
        let edges = acquire(&self.edges, "edges")?
            .iter()
            .map(|(from, to, kind)| RelationshipEdge::new(from.clone(), to.clone(), *kind))
            .collect();
        Ok((
            posts,
            comments,
            votes,
            edges,
            self.next_post_id.load(Ordering::SeqCst),
            self.next_comment_id.load(Ordering::SeqCst),
        ))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemoryStore {
    fn allocate_post_id(&self) -> Result<PostId, StoreError> {
        Ok(PostId::new(self.next_post_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn allocate_comment_id(&self) -> Result<CommentId, StoreError> {
        Ok(CommentId::new(
            self.next_comment_id.fetch_add(1, Ordering::SeqCst),
        ))
    }

    fn get_post(&self, id: PostId) -> Result<PostRecord, StoreError> {
        acquire(&self.posts, "posts")?
            .get(&id.value())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("post/{id}")))
    }

    fn put_post(&self, record: &PostRecord) -> Result<(), StoreError> {
        acquire(&self.posts, "posts")?.insert(record.id.value(), record.clone());
        Ok(())
    }

    fn delete_post(&self, id: PostId) -> Result<(), StoreError> {
        acquire(&self.posts, "posts")?
            .remove(&id.value())
            .ok_or_else(|| StoreError::NotFound(format!("post/{id}")))?;
        acquire(&self.children, "children")?.remove(&SubjectRef::Post(id));
        Ok(())
    }

    fn post_exists(&self, id: PostId) -> Result<bool, StoreError> {
        Ok(acquire(&self.posts, "posts")?.contains_key(&id.value()))
    }

    fn get_comment(&self, id: CommentId) -> Result<CommentRecord, StoreError> {
        acquire(&self.comments, "comments")?
            .get(&id.value())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("comment/{id}")))
    }

    fn put_comment(&self, record: &CommentRecord) -> Result<(), StoreError> {
        let mut comments = acquire(&self.comments, "comments")?;
        let is_new = !comments.contains_key(&record.id.value());
        comments.insert(record.id.value(), record.clone());
        drop(comments);
        if is_new {
            acquire(&self.children, "children")?
                .entry(record.parent)
                .or_default()
                .push(record.id);
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> Result<(), StoreError> {
        let removed = acquire(&self.comments, "comments")?
            .remove(&id.value())
            .ok_or_else(|| StoreError::NotFound(format!("comment/{id}")))?;
        let mut children = acquire(&self.children, "children")?;
        if let Some(siblings) = children.get_mut(&removed.parent) {
            siblings.retain(|c| *c != id);
            if siblings.is_empty() {
                children.remove(&removed.parent);
            }
        }
        children.remove(&SubjectRef::Comment(id));
        Ok(())
    }

    fn comment_exists(&self, id: CommentId) -> Result<bool, StoreError> {
        Ok(acquire(&self.comments, "comments")?.contains_key(&id.value()))
    }

    fn children_of(&self, parent: SubjectRef) -> Result<Vec<CommentId>, StoreError> {
        Ok(acquire(&self.children, "children")?
            .get(&parent)
            .cloned()
            .unwrap_or_default())
    }

    fn post_count(&self) -> Result<u64, StoreError> {
        Ok(acquire(&self.posts, "posts")?.len() as u64)
    }

    fn comment_count(&self) -> Result<u64, StoreError> {
        Ok(acquire(&self.comments, "comments")?.len() as u64)
    }
}

impl VoteStore for MemoryStore {
    fn get_vote(
        &self,
        subject: SubjectRef,
        voter: &UserId,
    ) -> Result<Option<VoteRecord>, StoreError> {
        Ok(acquire(&self.votes, "votes")?
            .get(&subject)
            .and_then(|per_user| per_user.get(voter))
            .map(|polarity| VoteRecord {
                subject,
                voter: voter.clone(),
                polarity: *polarity,
            }))
    }

    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError> {
        acquire(&self.votes, "votes")?
            .entry(record.subject)
            .or_default()
            .insert(record.voter.clone(), record.polarity);
        Ok(())
    }

    fn delete_vote(&self, subject: SubjectRef, voter: &UserId) -> Result<bool, StoreError> {
        let mut votes = acquire(&self.votes, "votes")?;
        let removed = votes
            .get_mut(&subject)
            .map(|per_user| per_user.remove(voter).is_some())
            .unwrap_or(false);
        if votes.get(&subject).is_some_and(|m| m.is_empty()) {
            votes.remove(&subject);
        }
        Ok(removed)
    }

    fn count_votes(&self, subject: SubjectRef, polarity: Polarity) -> Result<u64, StoreError> {
        Ok(acquire(&self.votes, "votes")?
            .get(&subject)
            .map(|per_user| per_user.values().filter(|p| **p == polarity).count() as u64)
            .unwrap_or(0))
    }

    fn delete_votes_for_subject(&self, subject: SubjectRef) -> Result<u64, StoreError> {
        Ok(acquire(&self.votes, "votes")?
            .remove(&subject)
            .map(|per_user| per_user.len() as u64)
            .unwrap_or(0))
    }

    fn vote_count(&self) -> Result<u64, StoreError> {
        Ok(acquire(&self.votes, "votes")?
            .values()
            .map(|per_user| per_user.len() as u64)
            .sum())
    }
}

impl EdgeStore for MemoryStore {
    fn put_edge(&self, edge: &RelationshipEdge) -> Result<(), StoreError> {
        let mut edges = acquire(&self.edges, "edges")?;
        let key = (edge.from.clone(), edge.to.clone(), edge.kind);
        if !edges.insert(key) {
            return Err(StoreError::Duplicate(format!(
                "{} edge {} -> {}",
                edge.kind.noun(),
                edge.from,
                edge.to
            )));
        }
        Ok(())
    }

    fn delete_edge(
        &self,
        from: &UserId,
        to: &UserId,
        kind: EdgeKind,
    ) -> Result<bool, StoreError> {
        Ok(acquire(&self.edges, "edges")?.remove(&(from.clone(), to.clone(), kind)))
    }

    fn edge_exists(
        &self,
        from: &UserId,
        to: &UserId,
        kind: EdgeKind,
    ) -> Result<bool, StoreError> {
        Ok(acquire(&self.edges, "edges")?.contains(&(from.clone(), to.clone(), kind)))
    }

    fn edges_from(&self, user: &UserId, kind: EdgeKind) -> Result<Vec<UserId>, StoreError> {
        let mut out: Vec<UserId> = acquire(&self.edges, "edges")?
            .iter()
            .filter(|(from, _, k)| from == user && *k == kind)
            .map(|(_, to, _)| to.clone())
            .collect();
        out.sort();
        Ok(out)
    }

    fn edges_to(&self, user: &UserId, kind: EdgeKind) -> Result<Vec<UserId>, StoreError> {
        let mut out: Vec<UserId> = acquire(&self.edges, "edges")?
            .iter()
            .filter(|(_, to, k)| to == user && *k == kind)
            .map(|(from, _, _)| from.clone())
            .collect();
        out.sort();
        Ok(out)
    }

    fn edge_count(&self) -> Result<u64, StoreError> {
        Ok(acquire(&self.edges, "edges")?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(n: u8) -> UserId {
        UserId::new(format!("user_{n}"))
    }

    fn test_post(store: &MemoryStore, author: u8) -> PostRecord {
        let record = PostRecord {
            id: store.allocate_post_id().unwrap(),
            author: test_user(author),
            body: Some("hello".into()),
            media: None,
            like: 0,
            dislike: 0,
            comments: 0,
        };
        store.put_post(&record).unwrap();
        record
    }

    #[test]
    fn test_post_ids_are_monotonic() {
        let store = MemoryStore::new();
        let a = store.allocate_post_id().unwrap();
        let b = store.allocate_post_id().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_children_index_tracks_inserts_and_deletes() {
        let store = MemoryStore::new();
        let post = test_post(&store, 1);
        let parent = SubjectRef::Post(post.id);

        let c1 = CommentRecord {
            id: store.allocate_comment_id().unwrap(),
            parent,
            author: test_user(2),
            body: Some("first".into()),
            media: None,
            like: 0,
            dislike: 0,
            replies: 0,
        };
        let c2 = CommentRecord {
            id: store.allocate_comment_id().unwrap(),
            ..c1.clone()
        };
        store.put_comment(&c1).unwrap();
        store.put_comment(&c2).unwrap();

        assert_eq!(store.children_of(parent).unwrap(), vec![c1.id, c2.id]);
        assert_eq!(store.child_count(parent).unwrap(), 2);

        store.delete_comment(c1.id).unwrap();
        assert_eq!(store.children_of(parent).unwrap(), vec![c2.id]);
    }

    #[test]
    fn test_rewriting_a_comment_does_not_duplicate_child_entry() {
        let store = MemoryStore::new();
        let post = test_post(&store, 1);
        let parent = SubjectRef::Post(post.id);

        let mut c = CommentRecord {
            id: store.allocate_comment_id().unwrap(),
            parent,
            author: test_user(2),
            body: Some("first".into()),
            media: None,
            like: 0,
            dislike: 0,
            replies: 0,
        };
        store.put_comment(&c).unwrap();
        c.like = 3;
        store.put_comment(&c).unwrap();

        assert_eq!(store.child_count(parent).unwrap(), 1);
    }

    #[test]
    fn test_deleting_a_post_clears_its_row_and_child_index() {
        let store = MemoryStore::new();
        let post = test_post(&store, 1);
        assert!(store.post_exists(post.id).unwrap());

        store.delete_post(post.id).unwrap();
        assert!(!store.post_exists(post.id).unwrap());
        assert!(store.children_of(SubjectRef::Post(post.id)).unwrap().is_empty());
        assert!(matches!(
            store.delete_post(post.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_vote_counts_by_polarity() {
        let store = MemoryStore::new();
        let post = test_post(&store, 1);
        let subject = SubjectRef::Post(post.id);

        for n in 2..5 {
            store
                .put_vote(&VoteRecord {
                    subject,
                    voter: test_user(n),
                    polarity: Polarity::Up,
                })
                .unwrap();
        }
        store
            .put_vote(&VoteRecord {
                subject,
                voter: test_user(9),
                polarity: Polarity::Down,
            })
            .unwrap();

        assert_eq!(store.count_votes(subject, Polarity::Up).unwrap(), 3);
        assert_eq!(store.count_votes(subject, Polarity::Down).unwrap(), 1);

        assert!(store.delete_vote(subject, &test_user(2)).unwrap());
        assert!(!store.delete_vote(subject, &test_user(2)).unwrap());
        assert_eq!(store.count_votes(subject, Polarity::Up).unwrap(), 2);

        assert_eq!(store.delete_votes_for_subject(subject).unwrap(), 3);
        assert_eq!(store.vote_count().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_edge_is_rejected() {
        let store = MemoryStore::new();
        let edge = RelationshipEdge::new(test_user(1), test_user(2), EdgeKind::Following);
        store.put_edge(&edge).unwrap();
        assert!(matches!(
            store.put_edge(&edge),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn test_edge_views_are_two_ends_of_one_fact() {
        let store = MemoryStore::new();
        store
            .put_edge(&RelationshipEdge::new(
                test_user(1),
                test_user(2),
                EdgeKind::Following,
            ))
            .unwrap();

        assert_eq!(
            store.edges_from(&test_user(1), EdgeKind::Following).unwrap(),
            vec![test_user(2)]
        );
        assert_eq!(
            store.edges_to(&test_user(2), EdgeKind::Following).unwrap(),
            vec![test_user(1)]
        );
        assert!(store
            .edges_from(&test_user(2), EdgeKind::Following)
            .unwrap()
            .is_empty());
    }
}
