use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CreateCategoryCommand;
use crate::domain::category::models::UpdateCategoryCommand;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

/// Domain service for category operations.
pub struct CategoryService<R>
where
    R: CategoryRepository,
{
    repository: Arc<R>,
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    /// Create a new category service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Category persistence implementation
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CategoryServicePort for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<Category, CategoryError> {
        let category = self
            .repository
            .create(Category::from_command(command))
            .await?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Category, CategoryError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(*id))
    }

    async fn get_categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CategoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.find_by_ids(ids).await
    }

    async fn list_categories(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Category>, CategoryError> {
        self.repository.list(filter, request).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        command: UpdateCategoryCommand,
    ) -> Result<Category, CategoryError> {
        let mut category = self.get_category(id).await?;
        category.apply(command);

        let updated = self.repository.update(category).await?;
        tracing::info!(category_id = %updated.id, "Category updated");

        Ok(updated)
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), CategoryError> {
        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(*id));
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    async fn delete_categories(&self, ids: &[CategoryId]) -> Result<u64, CategoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = self.repository.delete_many(ids).await?;
        tracing::info!(requested = ids.len(), deleted, "Categories deleted");

        Ok(deleted)
    }
}
