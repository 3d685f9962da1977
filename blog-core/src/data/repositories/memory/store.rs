use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::category::Category;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

pub(crate) struct StoreInner {
    pub(crate) categories: BTreeMap<i64, Category>,
    pub(crate) posts: BTreeMap<i64, Post>,
    pub(crate) comments: BTreeMap<i64, Comment>,
    pub(crate) next_category_id: i64,
    pub(crate) next_post_id: i64,
    pub(crate) next_comment_id: i64,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            next_category_id: 1,
            next_post_id: 1,
            next_comment_id: 1,
        }
    }

    pub(crate) fn post_slugs(&self) -> HashSet<String> {
        self.posts.values().map(|post| post.slug.clone()).collect()
    }

    pub(crate) fn category_slugs(&self) -> HashSet<String> {
        self.categories
            .values()
            .map(|category| category.slug.clone())
            .collect()
    }
}

type PostCreatedHook = Box<dyn Fn(&Post) + Send + Sync>;

/// In-memory entity store shared by the repository implementations.
///
/// One mutex guards all tables, which makes every single-entity write atomic
/// (a row and its derived timestamps land together) and makes the store the
/// arbiter for slug and name uniqueness.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
    post_created_hooks: Arc<Mutex<Vec<PostCreatedHook>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner::new())),
            post_created_hooks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a callback run synchronously after every post insert.
    pub fn on_post_created(
        &self,
        hook: impl Fn(&Post) + Send + Sync + 'static,
    ) -> Result<(), DomainError> {
        self.post_created_hooks
            .lock()
            .map_err(|_| poisoned())?
            .push(Box::new(hook));
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, DomainError> {
        self.inner.lock().map_err(|_| poisoned())
    }

    pub(crate) fn run_post_created_hooks(&self, post: &Post) -> Result<(), DomainError> {
        let hooks = self.post_created_hooks.lock().map_err(|_| poisoned())?;
        for hook in hooks.iter() {
            hook(post);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> DomainError {
    DomainError::Unexpected("store mutex poisoned".to_string())
}
