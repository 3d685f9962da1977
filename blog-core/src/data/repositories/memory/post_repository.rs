use async_trait::async_trait;
use chrono::Utc;

use super::store::MemoryStore;
use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostPage, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostStatus};
use crate::domain::slug;

#[derive(Clone)]
pub struct MemoryPostRepository {
    store: MemoryStore,
}

impl MemoryPostRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = {
            let mut inner = self.store.lock()?;

            if let Some(category_id) = input.category_id
                && !inner.categories.contains_key(&category_id)
            {
                return Err(DomainError::NotFound(format!("category id: {category_id}")));
            }

            let slugs = inner.post_slugs();
            let slug = match input.slug {
                Some(slug) => {
                    if slugs.contains(&slug) {
                        return Err(DomainError::Conflict(format!("post slug: {slug}")));
                    }
                    slug
                }
                None => slug::generate(&input.title, &slugs),
            };

            let now = Utc::now();
            let id = inner.next_post_id;
            inner.next_post_id += 1;
            let post = Post {
                id,
                title: input.title,
                slug,
                author_id: input.author_id,
                category_id: input.category_id,
                content: input.content,
                excerpt: input.excerpt,
                featured_image: input.featured_image,
                status: input.status,
                created_at: now,
                updated_at: now,
                // creating straight into published stamps the publication
                // time atomically with the insert
                published_at: (input.status == PostStatus::Published).then_some(now),
            };
            inner.posts.insert(id, post.clone());
            post
        };

        // hooks run synchronously within create, outside the table lock
        self.store.run_post_created_hooks(&post)?;
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.store.lock()?.posts.get(&id).cloned())
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self
            .store
            .lock()?
            .posts
            .values()
            .find(|post| post.slug == slug)
            .cloned())
    }

    async fn update_post(&self, post: &Post) -> Result<Option<Post>, DomainError> {
        let mut inner = self.store.lock()?;

        if let Some(category_id) = post.category_id
            && !inner.categories.contains_key(&category_id)
        {
            return Err(DomainError::NotFound(format!("category id: {category_id}")));
        }

        let Some(stored) = inner.posts.get_mut(&post.id) else {
            return Ok(None);
        };

        let mut updated = post.clone();
        // slug and created_at are immutable; a set published_at never moves
        updated.slug = stored.slug.clone();
        updated.created_at = stored.created_at;
        updated.published_at = stored.published_at.or(post.published_at);
        updated.updated_at = Utc::now();
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut inner = self.store.lock()?;
        if inner.posts.remove(&id).is_none() {
            return Ok(false);
        }
        // comments are owned by their post
        inner.comments.retain(|_, comment| comment.post_id != id);
        Ok(true)
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<PostPage, DomainError> {
        let inner = self.store.lock()?;
        let page_size = pagination.page_size.max(1);

        let category_id = if let Some(category_slug) = &filter.category_slug {
            match inner
                .categories
                .values()
                .find(|c| c.slug == *category_slug)
            {
                Some(category) => Some(category.id),
                // an unknown category matches nothing
                None => {
                    return Ok(PostPage {
                        items: Vec::new(),
                        total: 0,
                        page: 1,
                        page_size,
                    });
                }
            }
        } else {
            None
        };

        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut items: Vec<Post> = inner
            .posts
            .values()
            .filter(|post| {
                if let Some(status) = filter.status
                    && post.status != status
                {
                    return false;
                }
                if category_id.is_some() && post.category_id != category_id {
                    return false;
                }
                if let Some(author_id) = filter.author_id
                    && post.author_id != author_id
                {
                    return false;
                }
                if let Some(needle) = &needle
                    && !matches_search(post, needle)
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            b.effective_ts()
                .cmp(&a.effective_ts())
                .then(b.id.cmp(&a.id))
        });

        let total = items.len() as i64;
        let total_pages = if total == 0 {
            1
        } else {
            (total as u64).div_ceil(u64::from(page_size)) as u32
        };
        let page = pagination.page.clamp(1, total_pages);
        let start = ((page - 1) * page_size) as usize;
        let items = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(PostPage {
            items,
            total,
            page,
            page_size,
        })
    }
}

fn matches_search(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
}
