use tracing::info;

use crate::data::category_repository::{CategoryPatch, CategoryRepository, NewCategory};
use crate::domain::actor::Actor;
use crate::domain::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::error::DomainError;
use crate::domain::policy::{self, Action};

pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        req: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        policy::authorize(actor, Action::ManageCategories)?;
        let req = req.validate()?;

        let category = self
            .repo
            .create_category(NewCategory {
                name: req.name,
                slug: None,
                description: req.description,
            })
            .await?;
        info!(category_id = category.id, slug = %category.slug, "category created");
        Ok(category)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: i64,
        req: UpdateCategoryRequest,
    ) -> Result<Category, DomainError> {
        policy::authorize(actor, Action::ManageCategories)?;
        let req = req.validate()?;

        let patch = CategoryPatch {
            name: req.name,
            description: req.description,
        };
        self.repo
            .update_category(id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("category id: {id}")))
    }

    pub async fn delete(&self, actor: &Actor, id: i64) -> Result<(), DomainError> {
        policy::authorize(actor, Action::ManageCategories)?;

        let deleted = self.repo.delete_category(id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("category id: {id}")));
        }
        info!(category_id = id, "category deleted, dependent posts detached");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories().await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Category, DomainError> {
        self.repo
            .get_category_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("category slug: {slug}")))
    }
}
