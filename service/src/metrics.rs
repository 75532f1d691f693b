//! Prometheus metrics for the weft service.
//!
//! The [`FeedMetrics`] struct owns a dedicated [`Registry`] that the
//! embedding service can encode into the Prometheus text exposition
//! format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

/// Central collection of all service-level Prometheus metrics.
pub struct FeedMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Total vote transitions applied (casts, flips, retractions).
    pub votes_applied: IntCounter,
    /// Total posts created.
    pub posts_created: IntCounter,
    /// Total comments created.
    pub comments_created: IntCounter,
    /// Total content items removed, including cascaded descendants.
    pub items_deleted: IntCounter,
    /// Total relationship mutations applied (requests, accepts, blocks, ...).
    pub relationship_ops: IntCounter,
    /// Total commands rejected with a business-rule error.
    pub commands_rejected: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Current number of posts.
    pub post_count: IntGauge,
    /// Current number of comments.
    pub comment_count: IntGauge,
    /// Current number of vote records.
    pub vote_count: IntGauge,
    /// Current number of relationship edges of all kinds.
    pub edge_count: IntGauge,
}

impl FeedMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let votes_applied = register_int_counter_with_registry!(
            Opts::new("weft_votes_applied_total", "Total vote transitions applied"),
            registry
        )
        .expect("failed to register votes_applied counter");

        let posts_created = register_int_counter_with_registry!(
            Opts::new("weft_posts_created_total", "Total posts created"),
            registry
        )
        .expect("failed to register posts_created counter");

        let comments_created = register_int_counter_with_registry!(
            Opts::new("weft_comments_created_total", "Total comments created"),
            registry
        )
        .expect("failed to register comments_created counter");

        let items_deleted = register_int_counter_with_registry!(
            Opts::new(
                "weft_items_deleted_total",
                "Total content items removed, including cascaded descendants"
            ),
            registry
        )
        .expect("failed to register items_deleted counter");

        let relationship_ops = register_int_counter_with_registry!(
            Opts::new(
                "weft_relationship_ops_total",
                "Total relationship mutations applied"
            ),
            registry
        )
        .expect("failed to register relationship_ops counter");

        let commands_rejected = register_int_counter_with_registry!(
            Opts::new(
                "weft_commands_rejected_total",
                "Total commands rejected with a business-rule error"
            ),
            registry
        )
        .expect("failed to register commands_rejected counter");

        let post_count = register_int_gauge_with_registry!(
            Opts::new("weft_post_count", "Current number of posts"),
            registry
        )
        .expect("failed to register post_count gauge");

        let comment_count = register_int_gauge_with_registry!(
            Opts::new("weft_comment_count", "Current number of comments"),
            registry
        )
        .expect("failed to register comment_count gauge");

        let vote_count = register_int_gauge_with_registry!(
            Opts::new("weft_vote_count", "Current number of vote records"),
            registry
        )
        .expect("failed to register vote_count gauge");

        let edge_count = register_int_gauge_with_registry!(
            Opts::new("weft_edge_count", "Current number of relationship edges"),
            registry
        )
        .expect("failed to register edge_count gauge");

        Self {
            registry,
            votes_applied,
            posts_created,
            comments_created,
            items_deleted,
            relationship_ops,
            commands_rejected,
            post_count,
            comment_count,
            vote_count,
            edge_count,
        }
    }
}

impl Default for FeedMetrics {
    fn default() -> Self {
        Self::new()
    }
}
