use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::rules::messages;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the database, starting at 1 after a reset
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Tablet - Testing")]
    pub name: String,
    /// Always greater than zero
    #[schema(example = 4000.0)]
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: i32, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            price: input.price,
            availability: input.availability.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field
    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = input.name;
        self.price = input.price;
        self.availability = input.availability;
        self.updated_at = Utc::now();
    }

    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
        self.updated_at = Utc::now();
    }
}

/// Input for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[schema(as = CreateProductBody)]
pub struct CreateProduct {
    #[validate(length(
        min = 1,
        max = 100,
        message = "El nombre de producto debe tener entre 1 y 100 caracteres"
    ))]
    #[schema(example = "Tablet - Testing")]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Precio no válido"))]
    #[schema(example = 4000.0)]
    pub price: f64,
    /// Defaults to `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

/// Input for replacing a product's editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[schema(as = UpdateProductBody)]
pub struct UpdateProduct {
    #[validate(length(
        min = 1,
        max = 100,
        message = "El nombre de producto debe tener entre 1 y 100 caracteres"
    ))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Precio no válido"))]
    pub price: f64,
    pub availability: bool,
}

/// `{"data": product}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductBody {
    pub data: Product,
}

/// `{"data": [product, ...]}`, cheapest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListBody {
    pub data: Vec<Product>,
}

/// `{"data": "Producto eliminado"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Producto eliminado")]
    pub data: String,
}

impl MessageBody {
    pub fn deleted() -> Self {
        Self {
            data: messages::PRODUCT_DELETED.to_string(),
        }
    }
}
