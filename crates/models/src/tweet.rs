use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user::User;
use crate::validate_len;

pub const CONTENT_MAX_LEN: usize = 256;

/// A posted tweet. `by` is a snapshot of the author taken when the tweet was
/// posted; later changes to the user record do not propagate here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub tweet_id: Uuid,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub by: User,
}

impl Tweet {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_content(&self.content)?;
        self.by.validate()
    }
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    validate_len("content", content, 1, CONTENT_MAX_LEN)
}
