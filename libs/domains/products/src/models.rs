use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::audit::Audited;

pub const NAME_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// A product field rule was violated. The message is client-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Product aggregate.
///
/// Fields are private: a `Product` can only be obtained through
/// [`Product::create`] or loaded from storage, and only changed through
/// [`Product::update`], so every live instance satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Uuid,
    name: String,
    description: String,
    quantity: i32,
}

/// Values that passed validation, already trimmed.
struct Checked {
    name: String,
    description: String,
    quantity: i32,
}

fn required_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(format!("{field} cannot be empty.")));
    }
    if value.chars().count() > max {
        return Err(ValidationError(format!(
            "{field} cannot exceed {max} characters."
        )));
    }
    Ok(trimmed.to_string())
}

/// First failing rule wins, in field order.
fn check(name: &str, description: &str, quantity: i32) -> Result<Checked, ValidationError> {
    let name = required_text("name", name, NAME_MAX_LENGTH)?;
    let description = required_text("description", description, DESCRIPTION_MAX_LENGTH)?;
    if quantity < 0 {
        return Err(ValidationError(
            "Product quantity cannot be negative.".to_string(),
        ));
    }
    Ok(Checked {
        name,
        description,
        quantity,
    })
}

impl Product {
    /// Validates the inputs and returns a new product with a fresh id.
    pub fn create(name: &str, description: &str, quantity: i32) -> Result<Self, ValidationError> {
        let checked = check(name, description, quantity)?;
        Ok(Self {
            id: Uuid::now_v7(),
            name: checked.name,
            description: checked.description,
            quantity: checked.quantity,
        })
    }

    /// Replaces all mutable fields. On error `self` is left untouched.
    pub fn update(
        &mut self,
        name: &str,
        description: &str,
        quantity: i32,
    ) -> Result<(), ValidationError> {
        let checked = check(name, description, quantity)?;
        self.name = checked.name;
        self.description = checked.description;
        self.quantity = checked.quantity;
        Ok(())
    }

    /// Rebuilds a product from persisted values without re-validating them.
    pub(crate) fn rehydrate(id: Uuid, name: String, description: String, quantity: i32) -> Self {
        Self {
            id,
            name,
            description,
            quantity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }
}

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Widget", max_length = 200)]
    pub name: String,
    #[schema(example = "A small widget", max_length = 1000)]
    pub description: String,
    #[schema(example = 5, minimum = 0)]
    pub quantity: i32,
}

/// Body of `PUT /products/{id}`. All fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Widget", max_length = 200)]
    pub name: String,
    #[schema(example = "A small widget", max_length = 1000)]
    pub description: String,
    #[schema(example = 5, minimum = 0)]
    pub quantity: i32,
}

/// Product as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub created: DateTime<Utc>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl From<&Audited<Product>> for ProductResponse {
    fn from(stored: &Audited<Product>) -> Self {
        let audit = stored.audit();
        Self {
            id: stored.id(),
            name: stored.name().to_string(),
            description: stored.description().to_string(),
            quantity: stored.quantity(),
            created: audit.created,
            last_modified: audit.last_modified,
        }
    }
}
