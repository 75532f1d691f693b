//! weft orchestration layer.
//!
//! Wires the three engines (relationship graph, vote ledger, thread
//! engine) over one store, serializes same-key operations behind a
//! per-key lock map, and exposes a closed set of commands with explicit
//! `actor` identities. Transport, authentication, and rendering live in
//! the surrounding service that embeds this crate.

pub mod command;
pub mod config;
pub mod error;
pub mod locks;
pub mod logging;
pub mod metrics;
pub mod service;

pub use command::{Command, Outcome};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use locks::KeyLocks;
pub use logging::{init_logging, LogFormat};
pub use metrics::FeedMetrics;
pub use service::FeedService;
