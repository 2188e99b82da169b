//! Extractor that runs validation chains before a handler sees the request.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, FromRequestParts, RawPathParams, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::errors::AppError;
use crate::validation::{run_chains, FieldChain, RequestInput};

/// A request shape guarded by validation chains.
///
/// [`ValidatedRequest::rules`] runs first against the raw input; only when
/// every rule passes is [`ValidatedRequest::from_input`] asked to build the
/// typed value.
pub trait ValidatedRequest: Sized {
    /// Whether the request body is read and parsed as JSON
    const READS_BODY: bool = true;

    fn rules() -> Vec<FieldChain>;

    fn from_input(input: RequestInput) -> Result<Self, AppError>;
}

/// Rejects with `400 {"errors": [...]}` when any rule of `T` fails.
///
/// ```ignore
/// async fn get_product(Validated(path): Validated<ProductPath>) -> ... {
///     service.get_product(path.id).await
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: ValidatedRequest,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params: HashMap<String, String> =
            match RawPathParams::from_request_parts(&mut parts, state).await {
                Ok(raw) => raw
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                Err(_) => HashMap::new(),
            };

        let body = if T::READS_BODY {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(body_rejection)?;
            parse_body(&bytes)?
        } else {
            Value::Object(Map::new())
        };

        let input = RequestInput::new(params, body);
        let errors = run_chains(&T::rules(), &input);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        T::from_input(input).map(Validated)
    }
}

/// Keeps the status of a body that could not be buffered (413 over the limit).
fn body_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Parses a JSON body. A blank body counts as `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(bytes).map_err(|e| AppError::InvalidJson(e.to_string()))
}
