use async_trait::async_trait;

use crate::domain::category::models::CategoryId;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product domain operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a new product.
    ///
    /// # Errors
    /// * `CategoryRequired` - No category given
    /// * `CategoryNotFound` - A referenced category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// Retrieve a product by ID.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Retrieve one page of products.
    async fn list_products(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    /// Retrieve one page of the products attached to a category.
    ///
    /// # Errors
    /// * `ParentCategoryNotFound` - Category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn list_products_by_category(
        &self,
        category_id: &CategoryId,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `CategoryNotFound` - A referenced category does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Delete a product by ID.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError>;

    /// Delete every product whose id is in `ids`.
    ///
    /// # Returns
    /// Number of deleted products
    async fn delete_products(&self, ids: &[ProductId]) -> Result<u64, ProductError>;
}

/// Persistence operations for products and their category associations.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist a product and its category associations atomically.
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    /// Retrieve a product by ID, with its category ids.
    ///
    /// # Returns
    /// Optional product (None if not found)
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Retrieve one page of products ordered by creation time.
    async fn list(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    /// Retrieve one page of the products attached to `category_id`.
    async fn list_by_category(
        &self,
        category_id: &CategoryId,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError>;

    /// Overwrite a product and replace its category associations atomically.
    ///
    /// # Errors
    /// * `NotFound` - Product no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// Delete a product by ID.
    ///
    /// # Returns
    /// `true` if a row was deleted
    async fn delete(&self, id: &ProductId) -> Result<bool, ProductError>;

    /// Delete the products whose ids are in `ids`.
    ///
    /// # Returns
    /// Number of deleted rows
    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, ProductError>;
}
