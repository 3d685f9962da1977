use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostPage, PostRepository};
use crate::domain::actor::Actor;
use crate::domain::error::DomainError;
use crate::domain::policy::{self, Action};
use crate::domain::post::{CreatePostRequest, Post, PostStatus, UpdatePostRequest};
use crate::infrastructure::settings::Settings;

/// What the rendering layer gets for a post detail page.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub approved_comment_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    pub category_slug: Option<String>,
    pub search: Option<String>,
    pub page: u32,
}

pub struct PostService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
    settings: Settings,
}

impl<P: PostRepository, C: CommentRepository> PostService<P, C> {
    pub fn new(posts: P, comments: C, settings: Settings) -> Self {
        Self {
            posts,
            comments,
            settings,
        }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        policy::authorize(actor, Action::CreatePost)?;
        let req = req.validate(&self.settings.post_limits())?;
        let author_id = actor.id().ok_or(DomainError::Forbidden)?;

        let post = self
            .posts
            .create_post(NewPost {
                title: req.title,
                slug: None,
                author_id,
                category_id: req.category_id,
                content: req.content,
                excerpt: req.excerpt,
                featured_image: req.featured_image,
                status: req.status,
            })
            .await?;
        info!(post_id = post.id, slug = %post.slug, status = ?post.status, "post created");
        Ok(post)
    }

    pub async fn get_detail(&self, actor: &Actor, slug: &str) -> Result<PostDetail, DomainError> {
        let post = self.require_post(slug).await?;
        policy::authorize(actor, Action::ViewPost(&post))?;

        let approved_comment_count = self.comments.count_approved(post.id).await?;
        Ok(PostDetail {
            post,
            approved_comment_count,
        })
    }

    pub async fn update(
        &self,
        actor: &Actor,
        slug: &str,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate(&self.settings.post_limits())?;
        let mut post = self.require_post(slug).await?;
        policy::authorize(actor, Action::EditPost(&post))?;

        let previous_status = post.status;
        post.title = req.title;
        post.content = req.content;
        post.excerpt = req.excerpt;
        post.category_id = req.category_id;
        post.featured_image = req.featured_image;
        post.change_status(req.status, Utc::now());

        let updated = self
            .posts
            .update_post(&post)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post slug: {slug}")))?;
        if previous_status != updated.status {
            info!(post_id = updated.id, status = ?updated.status, "post status changed");
        }
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, slug: &str) -> Result<(), DomainError> {
        let post = self.require_post(slug).await?;
        policy::authorize(actor, Action::DeletePost(&post))?;

        let deleted = self.posts.delete_post(post.id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post slug: {slug}")));
        }
        info!(post_id = post.id, "post deleted with its comments");
        Ok(())
    }

    /// Public listing: only published posts, whatever the query says.
    pub async fn list_public(&self, query: PostListQuery) -> Result<PostPage, DomainError> {
        let filter = PostFilter {
            status: Some(PostStatus::Published),
            category_slug: query.category_slug,
            author_id: None,
            search: query.search,
        };
        self.posts.list_posts(filter, self.pagination(query.page)).await
    }

    /// The actor's own posts, drafts included.
    pub async fn list_own(&self, actor: &Actor, page: u32) -> Result<PostPage, DomainError> {
        policy::authorize(actor, Action::ListOwnPosts)?;
        let author_id = actor.id().ok_or(DomainError::Forbidden)?;

        let filter = PostFilter {
            author_id: Some(author_id),
            ..PostFilter::default()
        };
        self.posts.list_posts(filter, self.pagination(page)).await
    }

    /// Unrestricted listing for the admin screens.
    pub async fn list_all(
        &self,
        actor: &Actor,
        filter: PostFilter,
        page: u32,
    ) -> Result<PostPage, DomainError> {
        policy::authorize(actor, Action::ListAllPosts)?;
        self.posts.list_posts(filter, self.pagination(page)).await
    }

    async fn require_post(&self, slug: &str) -> Result<Post, DomainError> {
        self.posts
            .get_post_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post slug: {slug}")))
    }

    fn pagination(&self, page: u32) -> Pagination {
        Pagination {
            page,
            page_size: self.settings.page_size,
        }
    }
}
