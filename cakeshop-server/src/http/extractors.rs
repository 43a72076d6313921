//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so malformed input never reaches the store.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Integer cake id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CakeId(pub i64);

impl<S> FromRequestParts<S> for CakeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        raw.parse::<i64>().map(Self).map_err(|_| ApiError::InvalidId)
    }
}

/// JSON request body decoded without looking at `Content-Type`
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BodyRejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::BadRequest {
                message: e.to_string(),
            })
    }
}
