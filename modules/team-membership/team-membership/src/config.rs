use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Module configuration, read from the `team_membership` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamMembershipConfig {
    #[serde(default = "default_min_review_comment_len")]
    pub min_review_comment_len: usize,
    #[serde(default = "default_max_review_comment_len")]
    pub max_review_comment_len: usize,
}

impl Default for TeamMembershipConfig {
    fn default() -> Self {
        Self {
            min_review_comment_len: default_min_review_comment_len(),
            max_review_comment_len: default_max_review_comment_len(),
        }
    }
}

impl From<&TeamMembershipConfig> for ServiceConfig {
    fn from(cfg: &TeamMembershipConfig) -> Self {
        Self {
            min_review_comment_len: cfg.min_review_comment_len,
            max_review_comment_len: cfg.max_review_comment_len,
        }
    }
}

fn default_min_review_comment_len() -> usize {
    5
}

fn default_max_review_comment_len() -> usize {
    500
}
