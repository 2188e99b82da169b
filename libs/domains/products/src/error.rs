use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError, Location};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {id} not found")]
    NotFound { id: i32, message: &'static str },

    #[error("Invalid input: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn not_found(id: i32, message: &'static str) -> Self {
        Self::NotFound { id, message }
    }
}

/// Body-located field errors, sorted by field name
impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let errors = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldError::new(
                        Location::Body,
                        field.to_string(),
                        e.params.get("value").cloned(),
                        msg,
                    )
                })
            })
            .collect();

        ProductError::Validation(errors)
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound { message, .. } => AppError::NotFound(message.to_string()),
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
