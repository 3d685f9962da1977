use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    pub content: String,
}

impl NewCommentRequest {
    pub fn validate(self, max_chars: usize) -> Result<Self, DomainError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation {
                field: "content",
                message: "must not be empty",
            });
        }
        if content.chars().count() > max_chars {
            return Err(DomainError::Validation {
                field: "content",
                message: "is above the comment length limit",
            });
        }
        Ok(Self {
            content: content.to_string(),
        })
    }
}
