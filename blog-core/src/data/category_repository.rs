use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    /// Derived from `name` by the store when absent.
    pub slug: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CategoryPatch {
    pub name: String,
    pub description: String,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError>;
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
    /// Applies name/description; the slug stays as first assigned.
    async fn update_category(
        &self,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, DomainError>;
    /// Deleting a category leaves its posts in place with a null category ref.
    async fn delete_category(&self, id: i64) -> Result<bool, DomainError>;
    /// All categories, name ascending.
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
}
