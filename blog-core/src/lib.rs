//! Content publishing and moderation core for a blog/CMS.
//!
//! Posts move between draft and published states, comments pass an approval
//! gate before they are publicly visible, categories organize posts, and a
//! single access-control policy decides who may do what. HTTP routing,
//! templating, persistence and credentials are collaborator seams: services
//! are generic over repository traits, and an opaque [`Actor`] carries the
//! capability flags the policy consumes.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;

use application::category_service::CategoryService;
use application::comment_service::CommentService;
use application::post_service::PostService;
use data::repositories::memory::{
    MemoryCategoryRepository, MemoryCommentRepository, MemoryPostRepository, MemoryStore,
    MemoryUserRepository,
};
use infrastructure::settings::Settings;

pub use domain::actor::Actor;
pub use domain::error::DomainError;

/// The wired-up core over the in-memory entity store.
pub struct Blog {
    pub store: MemoryStore,
    pub categories: CategoryService<MemoryCategoryRepository>,
    pub posts: PostService<MemoryPostRepository, MemoryCommentRepository>,
    pub comments: CommentService<MemoryCommentRepository, MemoryPostRepository>,
    pub users: MemoryUserRepository,
}

impl Blog {
    pub fn in_memory(settings: Settings) -> Self {
        let store = MemoryStore::new();
        Self {
            categories: CategoryService::new(MemoryCategoryRepository::new(store.clone())),
            posts: PostService::new(
                MemoryPostRepository::new(store.clone()),
                MemoryCommentRepository::new(store.clone()),
                settings.clone(),
            ),
            comments: CommentService::new(
                MemoryCommentRepository::new(store.clone()),
                MemoryPostRepository::new(store.clone()),
                settings,
            ),
            users: MemoryUserRepository::new(store.clone()),
            store,
        }
    }
}
