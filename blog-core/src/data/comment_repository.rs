use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
}

/// Which comments a listing may contain. `ApprovedOrAuthor` adds the given
/// author's own unapproved comments to the public set.
#[derive(Debug, Clone, Copy)]
pub enum CommentVisibility {
    ApprovedOnly,
    ApprovedOrAuthor(i64),
    All,
}

impl CommentVisibility {
    pub fn permits(&self, comment: &Comment) -> bool {
        match self {
            CommentVisibility::ApprovedOnly => comment.approved,
            CommentVisibility::ApprovedOrAuthor(author_id) => {
                comment.approved || comment.author_id == *author_id
            }
            CommentVisibility::All => true,
        }
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// New comments are stored unapproved; there is no way to create one
    /// pre-approved.
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    /// Idempotent; returns the comment as stored afterwards.
    async fn set_approved(&self, id: i64, approved: bool)
    -> Result<Option<Comment>, DomainError>;
    /// Skips missing ids; returns how many comments actually changed state.
    async fn set_approved_many(&self, ids: &[i64], approved: bool) -> Result<u64, DomainError>;
    /// Comments on a post, oldest first.
    async fn list_for_post(
        &self,
        post_id: i64,
        visibility: CommentVisibility,
    ) -> Result<Vec<Comment>, DomainError>;
    async fn count_approved(&self, post_id: i64) -> Result<i64, DomainError>;
    /// Moderation queue: every unapproved comment, oldest first.
    async fn list_unapproved(&self) -> Result<Vec<Comment>, DomainError>;
}
