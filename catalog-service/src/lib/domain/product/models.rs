use std::collections::BTreeSet;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::category::models::CategoryId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::errors::ProductIdError;

/// Product aggregate entity.
///
/// `category_ids` is never empty for a persisted product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category_ids: Vec<CategoryId>,
}

impl Product {
    /// Build a fresh product from a validated command.
    pub fn from_command(command: CreateProductCommand) -> Self {
        Self {
            id: ProductId::new(),
            name: command.name,
            description: command.description,
            price: command.price,
            active: command.active,
            created_at: Utc::now(),
            updated_at: None,
            category_ids: command.category_ids,
        }
    }

    /// Apply a partial update, stamping `updated_at`.
    pub fn apply(&mut self, command: UpdateProductCommand) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if let Some(description) = command.description {
            self.description = description;
        }
        if let Some(price) = command.price {
            self.price = price;
        }
        if let Some(active) = command.active {
            self.active = active;
        }
        if let Some(category_ids) = command.category_ids {
            self.category_ids = category_ids;
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    /// Generate a new random product ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new product with validated fields
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub active: bool,
    pub category_ids: Vec<CategoryId>,
}

impl CreateProductCommand {
    /// Validate raw input into a create command.
    ///
    /// Checks run in order: name, description, price, category list. Whether
    /// the categories exist is up to the service.
    ///
    /// # Errors
    /// * `NameRequired` - Name is blank
    /// * `NameTooLong` - Name longer than 255 characters
    /// * `DescriptionRequired` - Description is blank
    /// * `NegativePrice` - Price below zero
    /// * `PriceTooPrecise` - More than two decimal places
    /// * `PriceTooLarge` - Price above 9999999999.99
    /// * `CategoryRequired` - No category given
    pub fn new(
        name: String,
        description: String,
        price: Decimal,
        active: Option<bool>,
        category_ids: Vec<CategoryId>,
    ) -> Result<Self, ProductError> {
        let name = product_name(name)?;
        let description = required(description, ProductError::DescriptionRequired)?;
        let price = valid_price(price)?;
        let category_ids = category_set(category_ids)?;

        Ok(Self {
            name,
            description,
            price,
            active: active.unwrap_or(true),
            category_ids,
        })
    }
}

/// Command to partially update a product
///
/// A given `category_ids` replaces the whole association set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProductCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
    pub category_ids: Option<Vec<CategoryId>>,
}

impl UpdateProductCommand {
    /// # Errors
    /// Same as [`CreateProductCommand::new`], for the fields that are given.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        active: Option<bool>,
        category_ids: Option<Vec<CategoryId>>,
    ) -> Result<Self, ProductError> {
        Ok(Self {
            name: name
                .map(product_name)
                .transpose()?,
            description: description
                .map(|d| required(d, ProductError::DescriptionRequired))
                .transpose()?,
            price: price.map(valid_price).transpose()?,
            active,
            category_ids: category_ids.map(category_set).transpose()?,
        })
    }
}

fn required(value: String, error: ProductError) -> Result<String, ProductError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_string())
    }
}

const MAX_NAME_LENGTH: usize = 255;
const MAX_PRICE_SCALE: u32 = 2;
// Largest value of NUMERIC(12, 2), in hundredths
const MAX_PRICE_CENTS: i64 = 999_999_999_999;

fn product_name(name: String) -> Result<String, ProductError> {
    let name = required(name, ProductError::NameRequired)?;
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ProductError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual: length,
        });
    }
    Ok(name)
}

fn valid_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price < Decimal::ZERO {
        Err(ProductError::NegativePrice)
    } else if price.normalize().scale() > MAX_PRICE_SCALE {
        Err(ProductError::PriceTooPrecise)
    } else if price > Decimal::new(MAX_PRICE_CENTS, MAX_PRICE_SCALE) {
        Err(ProductError::PriceTooLarge)
    } else {
        Ok(price)
    }
}

// Distinct ids in a stable order
fn category_set(category_ids: Vec<CategoryId>) -> Result<Vec<CategoryId>, ProductError> {
    let distinct: BTreeSet<CategoryId> = category_ids.into_iter().collect();
    if distinct.is_empty() {
        return Err(ProductError::CategoryRequired);
    }
    Ok(distinct.into_iter().collect())
}
