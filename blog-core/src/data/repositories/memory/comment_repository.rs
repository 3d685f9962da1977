use async_trait::async_trait;
use chrono::Utc;

use super::store::MemoryStore;
use crate::data::comment_repository::{
    CommentRepository, CommentVisibility, NewComment,
};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Clone)]
pub struct MemoryCommentRepository {
    store: MemoryStore,
}

impl MemoryCommentRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut inner = self.store.lock()?;

        if !inner.posts.contains_key(&input.post_id) {
            return Err(DomainError::NotFound(format!("post id: {}", input.post_id)));
        }

        let now = Utc::now();
        let id = inner.next_comment_id;
        inner.next_comment_id += 1;
        // moderation is uniform: every comment starts unapproved
        let comment = Comment {
            id,
            post_id: input.post_id,
            author_id: input.author_id,
            content: input.content,
            approved: false,
            created_at: now,
            updated_at: now,
        };
        inner.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        Ok(self.store.lock()?.comments.get(&id).cloned())
    }

    async fn set_approved(
        &self,
        id: i64,
        approved: bool,
    ) -> Result<Option<Comment>, DomainError> {
        let mut inner = self.store.lock()?;
        let Some(comment) = inner.comments.get_mut(&id) else {
            return Ok(None);
        };
        if comment.approved != approved {
            comment.approved = approved;
            comment.updated_at = Utc::now();
        }
        Ok(Some(comment.clone()))
    }

    async fn set_approved_many(&self, ids: &[i64], approved: bool) -> Result<u64, DomainError> {
        let mut inner = self.store.lock()?;
        let now = Utc::now();
        let mut changed: u64 = 0;
        for id in ids {
            if let Some(comment) = inner.comments.get_mut(id)
                && comment.approved != approved
            {
                comment.approved = approved;
                comment.updated_at = now;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn list_for_post(
        &self,
        post_id: i64,
        visibility: CommentVisibility,
    ) -> Result<Vec<Comment>, DomainError> {
        let inner = self.store.lock()?;
        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id && visibility.permits(comment))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn count_approved(&self, post_id: i64) -> Result<i64, DomainError> {
        let inner = self.store.lock()?;
        Ok(inner
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id && comment.approved)
            .count() as i64)
    }

    async fn list_unapproved(&self) -> Result<Vec<Comment>, DomainError> {
        let inner = self.store.lock()?;
        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|comment| !comment.approved)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }
}
