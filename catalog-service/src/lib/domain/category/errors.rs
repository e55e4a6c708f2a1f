use thiserror::Error;

use crate::domain::category::models::CategoryId;

/// Error for CategoryId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all category-related operations
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    #[error("Invalid category id: {0}")]
    InvalidId(#[from] CategoryIdError),

    #[error("Category name is required")]
    NameRequired,

    #[error("Category name too long: maximum {max} characters, got {actual}")]
    NameTooLong { max: usize, actual: usize },

    #[error("Category description is required")]
    DescriptionRequired,

    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    #[error("Category name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
