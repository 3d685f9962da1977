use async_trait::async_trait;

use super::store::MemoryStore;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;

#[derive(Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn delete_user(&self, user_id: i64) -> Result<u64, DomainError> {
        let mut inner = self.store.lock()?;

        let doomed_posts: Vec<i64> = inner
            .posts
            .values()
            .filter(|post| post.author_id == user_id)
            .map(|post| post.id)
            .collect();
        for id in &doomed_posts {
            inner.posts.remove(id);
        }
        // the author's own comments go too, wherever they were left
        inner.comments.retain(|_, comment| {
            comment.author_id != user_id && !doomed_posts.contains(&comment.post_id)
        });

        Ok(doomed_posts.len() as u64)
    }
}
