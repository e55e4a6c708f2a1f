use async_trait::async_trait;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CreateCategoryCommand;
use crate::domain::category::models::UpdateCategoryCommand;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

/// Port for category domain operations.
#[async_trait]
pub trait CategoryServicePort: Send + Sync + 'static {
    /// Create a new category.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another category uses this name
    /// * `DatabaseError` - Database operation failed
    async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<Category, CategoryError>;

    /// Retrieve a category by ID.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_category(&self, id: &CategoryId) -> Result<Category, CategoryError>;

    /// Retrieve every category whose id is in `ids`.
    ///
    /// Unknown ids are skipped.
    async fn get_categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CategoryError>;

    /// Retrieve one page of categories.
    async fn list_categories(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Category>, CategoryError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `NameAlreadyExists` - Another category uses the new name
    /// * `DatabaseError` - Database operation failed
    async fn update_category(
        &self,
        id: &CategoryId,
        command: UpdateCategoryCommand,
    ) -> Result<Category, CategoryError>;

    /// Delete a category by ID.
    ///
    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_category(&self, id: &CategoryId) -> Result<(), CategoryError>;

    /// Delete every category whose id is in `ids`.
    ///
    /// # Returns
    /// Number of deleted categories
    async fn delete_categories(&self, ids: &[CategoryId]) -> Result<u64, CategoryError>;
}

/// Persistence operations for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Persist a new category.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, category: Category) -> Result<Category, CategoryError>;

    /// Retrieve a category by ID.
    ///
    /// # Returns
    /// Optional category (None if not found)
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError>;

    /// Retrieve the categories whose ids are in `ids`.
    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CategoryError>;

    /// Retrieve one page of categories ordered by creation time.
    async fn list(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Category>, CategoryError>;

    /// Overwrite the mutable fields of an existing category.
    ///
    /// # Errors
    /// * `NotFound` - Category no longer exists
    /// * `NameAlreadyExists` - Name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, category: Category) -> Result<Category, CategoryError>;

    /// Delete a category by ID.
    ///
    /// # Returns
    /// `true` if a row was deleted
    async fn delete(&self, id: &CategoryId) -> Result<bool, CategoryError>;

    /// Delete the categories whose ids are in `ids`.
    ///
    /// # Returns
    /// Number of deleted rows
    async fn delete_many(&self, ids: &[CategoryId]) -> Result<u64, CategoryError>;
}
