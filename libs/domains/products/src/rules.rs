//! Validation chains for every product route, and the typed requests they guard.

use axum_helpers::validation::predicates::{is_positive, to_number, to_text};
use axum_helpers::{AppError, FieldChain, RequestInput, ValidatedRequest};
use serde_json::Value;

use crate::models::{CreateProduct, UpdateProduct};

/// Client-facing messages
pub mod messages {
    pub const INVALID_ID: &str = "ID no válido";
    pub const EMPTY_NAME: &str = "El nombre de producto no puede ir vacío";
    pub const INVALID_VALUE: &str = "Valor no valido";
    pub const EMPTY_PRICE: &str = "El precio de producto no puede ir vacío";
    pub const INVALID_PRICE: &str = "Precio no válido";
    pub const INVALID_AVAILABILITY: &str = "valor para disponibilidad no válido";

    pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
    pub const PRODUCT_MISSING: &str = "No se encontro el producto";
    pub const PRODUCT_DELETED: &str = "Producto eliminado";
}

pub fn id_chain() -> FieldChain {
    FieldChain::param("id").is_int(messages::INVALID_ID)
}

pub fn name_chain() -> FieldChain {
    FieldChain::body("name").not_empty(messages::EMPTY_NAME)
}

/// Three independent rules; an absent price fails all of them.
pub fn price_chain() -> FieldChain {
    FieldChain::body("price")
        .is_numeric(messages::INVALID_VALUE)
        .not_empty(messages::EMPTY_PRICE)
        .custom(is_positive, messages::INVALID_PRICE)
}

pub fn availability_chain() -> FieldChain {
    FieldChain::body("availability").is_boolean(messages::INVALID_AVAILABILITY)
}

fn parse_id(input: &RequestInput) -> Result<i32, AppError> {
    input
        .param("id")
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| AppError::BadRequest(messages::INVALID_ID.to_string()))
}

fn parse_price(input: &RequestInput) -> Result<f64, AppError> {
    to_number(input.body_field("price"))
        .ok_or_else(|| AppError::BadRequest(messages::INVALID_PRICE.to_string()))
}

/// `/{id}` with no body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPath {
    pub id: i32,
}

impl ValidatedRequest for ProductPath {
    const READS_BODY: bool = false;

    fn rules() -> Vec<FieldChain> {
        vec![id_chain()]
    }

    fn from_input(input: RequestInput) -> Result<Self, AppError> {
        Ok(Self {
            id: parse_id(&input)?,
        })
    }
}

/// `POST /`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductRequest(pub CreateProduct);

impl ValidatedRequest for CreateProductRequest {
    fn rules() -> Vec<FieldChain> {
        vec![name_chain(), price_chain()]
    }

    fn from_input(input: RequestInput) -> Result<Self, AppError> {
        Ok(Self(CreateProduct {
            name: to_text(input.body_field("name")),
            price: parse_price(&input)?,
            availability: input.body_field("availability").and_then(Value::as_bool),
        }))
    }
}

/// `PUT /{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductRequest {
    pub id: i32,
    pub input: UpdateProduct,
}

impl ValidatedRequest for UpdateProductRequest {
    fn rules() -> Vec<FieldChain> {
        vec![id_chain(), name_chain(), price_chain(), availability_chain()]
    }

    fn from_input(input: RequestInput) -> Result<Self, AppError> {
        let availability = matches!(
            to_text(input.body_field("availability")).as_str(),
            "true" | "1"
        );

        Ok(Self {
            id: parse_id(&input)?,
            input: UpdateProduct {
                name: to_text(input.body_field("name")),
                price: parse_price(&input)?,
                availability,
            },
        })
    }
}
