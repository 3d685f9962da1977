use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostStatus};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    /// Derived from `title` by the store when absent.
    pub slug: Option<String>,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
}

/// AND-composed listing predicate. `search` matches case-insensitively
/// against title, content, or excerpt.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category_slug: Option<String>,
    pub author_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// 1-indexed; out-of-range pages clamp rather than fail.
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total: i64,
    /// Effective page after clamping.
    pub page: u32,
    pub page_size: u32,
}

impl PostPage {
    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        (self.total as u64).div_ceil(u64::from(self.page_size)) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError>;
    /// Replaces the stored row. The store keeps the original `created_at`
    /// and slug, refreshes `updated_at`, and never clears a set
    /// `published_at`.
    async fn update_post(&self, post: &Post) -> Result<Option<Post>, DomainError>;
    /// Cascades to the post's comments.
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    /// Newest first: `published_at` descending, falling back to `created_at`
    /// for drafts.
    async fn list_posts(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<PostPage, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::PostPage;

    fn page(total: i64, page: u32, page_size: u32) -> PostPage {
        PostPage {
            items: Vec::new(),
            total,
            page,
            page_size,
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page(0, 1, 10).total_pages(), 1);
        assert_eq!(page(10, 1, 10).total_pages(), 1);
        assert_eq!(page(11, 1, 10).total_pages(), 2);
        assert_eq!(page(25, 1, 10).total_pages(), 3);
    }

    #[test]
    fn has_next_and_prev_follow_the_page_position() {
        let first = page(25, 1, 10);
        assert!(first.has_next());
        assert!(!first.has_prev());

        let middle = page(25, 2, 10);
        assert!(middle.has_next());
        assert!(middle.has_prev());

        let last = page(25, 3, 10);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }
}
