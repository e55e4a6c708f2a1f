use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::errors::CategoryIdError;

/// Category aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Build a fresh category from a validated command.
    ///
    /// # Returns
    /// Category with a random id and `created_at` set to now
    pub fn from_command(command: CreateCategoryCommand) -> Self {
        Self {
            id: CategoryId::new(),
            name: command.name,
            description: command.description,
            active: command.active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Apply a partial update, stamping `updated_at`.
    pub fn apply(&mut self, command: UpdateCategoryCommand) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if let Some(description) = command.description {
            self.description = description;
        }
        if let Some(active) = command.active {
            self.active = active;
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Category unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    /// Generate a new random category ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a category ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CategoryIdError> {
        Uuid::parse_str(s)
            .map(CategoryId)
            .map_err(|e| CategoryIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new category with validated fields
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: String,
    pub active: bool,
}

impl CreateCategoryCommand {
    /// Validate raw input into a create command.
    ///
    /// Name and description are trimmed and must not be blank; `active`
    /// defaults to `true`.
    ///
    /// # Errors
    /// * `NameRequired` - Name is blank
    /// * `NameTooLong` - Name longer than 255 characters
    /// * `DescriptionRequired` - Description is blank
    pub fn new(
        name: String,
        description: String,
        active: Option<bool>,
    ) -> Result<Self, CategoryError> {
        Ok(Self {
            name: category_name(name)?,
            description: required(description, CategoryError::DescriptionRequired)?,
            active: active.unwrap_or(true),
        })
    }
}

/// Command to partially update a category
///
/// Only fields that are `Some` are changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCategoryCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl UpdateCategoryCommand {
    /// # Errors
    /// * `NameRequired` - Name provided but blank
    /// * `NameTooLong` - Name provided and longer than 255 characters
    /// * `DescriptionRequired` - Description provided but blank
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        active: Option<bool>,
    ) -> Result<Self, CategoryError> {
        Ok(Self {
            name: name
                .map(category_name)
                .transpose()?,
            description: description
                .map(|d| required(d, CategoryError::DescriptionRequired))
                .transpose()?,
            active,
        })
    }
}

const MAX_NAME_LENGTH: usize = 255;

fn category_name(name: String) -> Result<String, CategoryError> {
    let name = required(name, CategoryError::NameRequired)?;
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(CategoryError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual: length,
        });
    }
    Ok(name)
}

fn required(value: String, error: CategoryError) -> Result<String, CategoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_string())
    }
}
