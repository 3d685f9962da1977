use async_trait::async_trait;
use chrono::Utc;

use super::store::MemoryStore;
use crate::data::category_repository::{CategoryPatch, CategoryRepository, NewCategory};
use crate::domain::category::Category;
use crate::domain::error::DomainError;
use crate::domain::slug;

#[derive(Clone)]
pub struct MemoryCategoryRepository {
    store: MemoryStore,
}

impl MemoryCategoryRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let mut inner = self.store.lock()?;

        if inner.categories.values().any(|c| c.name == input.name) {
            return Err(DomainError::Conflict(format!(
                "category name: {}",
                input.name
            )));
        }

        let slugs = inner.category_slugs();
        let slug = match input.slug {
            Some(slug) => {
                if slugs.contains(&slug) {
                    return Err(DomainError::Conflict(format!("category slug: {slug}")));
                }
                slug
            }
            None => slug::generate(&input.name, &slugs),
        };

        let id = inner.next_category_id;
        inner.next_category_id += 1;
        let category = Category {
            id,
            name: input.name,
            slug,
            description: input.description,
            created_at: Utc::now(),
        };
        inner.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        Ok(self.store.lock()?.categories.get(&id).cloned())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .store
            .lock()?
            .categories
            .values()
            .find(|category| category.slug == slug)
            .cloned())
    }

    async fn update_category(
        &self,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, DomainError> {
        let mut inner = self.store.lock()?;

        if inner
            .categories
            .values()
            .any(|c| c.id != id && c.name == patch.name)
        {
            return Err(DomainError::Conflict(format!(
                "category name: {}",
                patch.name
            )));
        }

        let Some(category) = inner.categories.get_mut(&id) else {
            return Ok(None);
        };
        // slug stays as first assigned, even when the name changes
        category.name = patch.name;
        category.description = patch.description;
        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        let mut inner = self.store.lock()?;
        if inner.categories.remove(&id).is_none() {
            return Ok(false);
        }
        // weak reference: dependent posts survive with a null category
        for post in inner.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(true)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let inner = self.store.lock()?;
        let mut categories: Vec<Category> = inner.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryCategoryRepository, MemoryStore};
    use crate::data::category_repository::{CategoryPatch, CategoryRepository, NewCategory};
    use crate::domain::error::DomainError;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: None,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn create_category_derives_slug_from_name() {
        let repo = MemoryCategoryRepository::new(MemoryStore::new());

        let category = repo
            .create_category(new_category("Tech News"))
            .await
            .expect("create must succeed");
        assert_eq!(category.slug, "tech-news");

        let reloaded = repo
            .get_category(category.id)
            .await
            .expect("get must succeed")
            .expect("category must exist");
        assert_eq!(reloaded.name, "Tech News");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let repo = MemoryCategoryRepository::new(MemoryStore::new());
        repo.create_category(new_category("Tech"))
            .await
            .expect("first create must succeed");

        let err = repo
            .create_category(new_category("Tech"))
            .await
            .expect_err("duplicate name must fail");
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn colliding_derived_slugs_are_disambiguated() {
        let repo = MemoryCategoryRepository::new(MemoryStore::new());
        repo.create_category(new_category("Tech"))
            .await
            .expect("first create must succeed");

        // different name, same slugified form
        let second = repo
            .create_category(new_category("Tech!"))
            .await
            .expect("second create must succeed");
        assert_eq!(second.slug, "tech-2");
    }

    #[tokio::test]
    async fn explicit_duplicate_slug_is_a_conflict() {
        let repo = MemoryCategoryRepository::new(MemoryStore::new());
        repo.create_category(new_category("Tech"))
            .await
            .expect("first create must succeed");

        let err = repo
            .create_category(NewCategory {
                name: "Technology".to_string(),
                slug: Some("tech".to_string()),
                description: String::new(),
            })
            .await
            .expect_err("explicit duplicate slug must fail");
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeps_the_original_slug() {
        let repo = MemoryCategoryRepository::new(MemoryStore::new());
        let category = repo
            .create_category(new_category("Tech"))
            .await
            .expect("create must succeed");

        let updated = repo
            .update_category(
                category.id,
                CategoryPatch {
                    name: "Technology".to_string(),
                    description: "renamed".to_string(),
                },
            )
            .await
            .expect("update must succeed")
            .expect("category must exist");
        assert_eq!(updated.name, "Technology");
        assert_eq!(updated.slug, "tech");
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let repo = MemoryCategoryRepository::new(MemoryStore::new());
        for name in ["Rust", "Django", "Testing"] {
            repo.create_category(new_category(name))
                .await
                .expect("create must succeed");
        }

        let names: Vec<String> = repo
            .list_categories()
            .await
            .expect("list must succeed")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Django", "Rust", "Testing"]);
    }
}
