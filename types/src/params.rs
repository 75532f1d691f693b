//! Validation parameters for content items.

use serde::{Deserialize, Serialize};

/// Maximum number of characters in a post or comment body.
pub const DEFAULT_MAX_BODY_CHARS: usize = 255;

/// Tunable validation limits, loaded alongside the service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedParams {
    /// Maximum body length for posts and comments, in characters.
    #[serde(default = "default_max_body_chars")]
    pub max_body_chars: usize,
}

fn default_max_body_chars() -> usize {
    DEFAULT_MAX_BODY_CHARS
}

impl Default for FeedParams {
    fn default() -> Self {
        Self {
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
        }
    }
}
