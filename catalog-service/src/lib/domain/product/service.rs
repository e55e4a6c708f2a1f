use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service for product operations.
///
/// Reads the category store to check that every referenced category exists
/// before anything is written.
pub struct ProductService<PR, CR>
where
    PR: ProductRepository,
    CR: CategoryRepository,
{
    products: Arc<PR>,
    categories: Arc<CR>,
}

impl<PR, CR> ProductService<PR, CR>
where
    PR: ProductRepository,
    CR: CategoryRepository,
{
    /// Create a new product service with injected dependencies.
    ///
    /// # Arguments
    /// * `products` - Product persistence implementation
    /// * `categories` - Category persistence, used for existence checks
    pub fn new(products: Arc<PR>, categories: Arc<CR>) -> Self {
        Self {
            products,
            categories,
        }
    }

    async fn ensure_categories_exist(&self, ids: &[CategoryId]) -> Result<(), ProductError> {
        if ids.is_empty() {
            return Err(ProductError::CategoryRequired);
        }

        let found: HashSet<CategoryId> = self
            .categories
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        match ids.iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(ProductError::CategoryNotFound(*missing)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<PR, CR> ProductServicePort for ProductService<PR, CR>
where
    PR: ProductRepository,
    CR: CategoryRepository,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        self.ensure_categories_exist(&command.category_ids).await?;

        let product = self.products.create(Product::from_command(command)).await?;
        tracing::info!(
            product_id = %product.id,
            categories = product.category_ids.len(),
            "Product created"
        );

        Ok(product)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(*id))
    }

    async fn list_products(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        self.products.list(filter, request).await
    }

    async fn list_products_by_category(
        &self,
        category_id: &CategoryId,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(ProductError::ParentCategoryNotFound(*category_id));
        }

        self.products
            .list_by_category(category_id, filter, request)
            .await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        if let Some(category_ids) = &command.category_ids {
            self.ensure_categories_exist(category_ids).await?;
        }

        product.apply(command);
        let updated = self.products.update(product).await?;
        tracing::info!(product_id = %updated.id, "Product updated");

        Ok(updated)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError> {
        if !self.products.delete(id).await? {
            return Err(ProductError::NotFound(*id));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn delete_products(&self, ids: &[ProductId]) -> Result<u64, ProductError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let deleted = self.products.delete_many(ids).await?;
        tracing::info!(requested = ids.len(), deleted, "Products deleted");

        Ok(deleted)
    }
}
