use thiserror::Error;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::errors::CategoryIdError;
use crate::domain::category::models::CategoryId;
use crate::domain::product::models::ProductId;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),

    #[error("Invalid category id: {0}")]
    InvalidCategoryId(#[from] CategoryIdError),

    #[error("Product name is required")]
    NameRequired,

    #[error("Product name too long: maximum {max} characters, got {actual}")]
    NameTooLong { max: usize, actual: usize },

    #[error("Product description is required")]
    DescriptionRequired,

    #[error("Product price must not be negative")]
    NegativePrice,

    #[error("Product price must have at most 2 decimal places")]
    PriceTooPrecise,

    #[error("Product price must not exceed 9999999999.99")]
    PriceTooLarge,

    #[error("Product must belong to at least one category")]
    CategoryRequired,

    // A referenced category in a create or update payload
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    // The category addressed by a nested listing route
    #[error("Category not found: {0}")]
    ParentCategoryNotFound(CategoryId),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<CategoryError> for ProductError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => ProductError::CategoryNotFound(id),
            CategoryError::DatabaseError(e) => ProductError::DatabaseError(e),
            other => ProductError::DatabaseError(other.to_string()),
        }
    }
}
