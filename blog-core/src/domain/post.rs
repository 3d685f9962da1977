use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Applies a status change. The first transition into `Published` stamps
    /// `published_at`; the timestamp survives unpublish and re-publish and is
    /// never moved or cleared afterwards.
    pub fn change_status(&mut self, next: PostStatus, now: DateTime<Utc>) {
        if next == PostStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.status = next;
    }

    /// Listing timestamp: publication time, or creation time for drafts.
    pub fn effective_ts(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}

/// Length rules applied to incoming post fields. Constructed from
/// `Settings`; defaults mirror the shipped configuration.
#[derive(Debug, Clone, Copy)]
pub struct PostLimits {
    pub min_content_chars: usize,
    pub max_title_chars: usize,
    pub max_excerpt_chars: usize,
}

impl Default for PostLimits {
    fn default() -> Self {
        Self {
            min_content_chars: 50,
            max_title_chars: 200,
            max_excerpt_chars: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category_id: Option<i64>,
    pub featured_image: Option<String>,
    pub status: PostStatus,
}

impl CreatePostRequest {
    pub fn validate(self, limits: &PostLimits) -> Result<Self, DomainError> {
        let (title, content, excerpt) = normalize_post_fields(
            &self.title,
            &self.content,
            &self.excerpt,
            self.status,
            limits,
        )?;
        Ok(Self {
            title,
            content,
            excerpt,
            category_id: self.category_id,
            featured_image: normalize_featured_image(self.featured_image),
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category_id: Option<i64>,
    pub featured_image: Option<String>,
    pub status: PostStatus,
}

impl UpdatePostRequest {
    pub fn validate(self, limits: &PostLimits) -> Result<Self, DomainError> {
        let (title, content, excerpt) = normalize_post_fields(
            &self.title,
            &self.content,
            &self.excerpt,
            self.status,
            limits,
        )?;
        Ok(Self {
            title,
            content,
            excerpt,
            category_id: self.category_id,
            featured_image: normalize_featured_image(self.featured_image),
            status: self.status,
        })
    }
}

fn normalize_post_fields(
    title: &str,
    content: &str,
    excerpt: &str,
    status: PostStatus,
    limits: &PostLimits,
) -> Result<(String, String, String), DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > limits.max_title_chars {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be non-empty and within the title length limit",
        });
    }

    let content = content.trim();
    // cross-field rule: whatever the configured minimum, nothing empty goes out published
    if status == PostStatus::Published && content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty for a published post",
        });
    }
    if content.chars().count() < limits.min_content_chars {
        return Err(DomainError::Validation {
            field: "content",
            message: "is below the minimum content length",
        });
    }

    let excerpt = excerpt.trim();
    if excerpt.chars().count() > limits.max_excerpt_chars {
        return Err(DomainError::Validation {
            field: "excerpt",
            message: "is above the excerpt length limit",
        });
    }

    Ok((title.to_string(), content.to_string(), excerpt.to_string()))
}

fn normalize_featured_image(featured_image: Option<String>) -> Option<String> {
    featured_image
        .map(|reference| reference.trim().to_string())
        .filter(|reference| !reference.is_empty())
}
