use thiserror::Error;
use weft_graph::GraphError;
use weft_store::StoreError;
use weft_threads::ThreadError;
use weft_types::{ErrorKind, WeftError};
use weft_votes::VoteError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("relationship error: {0}")]
    Graph(#[from] GraphError),

    #[error("vote error: {0}")]
    Vote(#[from] VoteError),

    #[error("thread error: {0}")]
    Thread(#[from] ThreadError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Project onto the caller-facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Graph(e) => e.kind(),
            Self::Vote(e) => e.kind(),
            Self::Thread(e) => e.kind(),
            Self::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Validation,
        }
    }

    /// Flatten into the outbound failure contract: one kind plus the
    /// inner engine's message, no wrapper prefix.
    pub fn to_wire(&self) -> WeftError {
        let message = match self {
            Self::Graph(e) => e.to_string(),
            Self::Vote(e) => e.to_string(),
            Self::Thread(e) => e.to_string(),
            Self::Store(e) => e.to_string(),
            Self::Config(msg) => msg.clone(),
        };
        WeftError::new(self.kind(), message)
    }
}
