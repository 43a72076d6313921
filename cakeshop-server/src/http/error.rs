//! API error type with IntoResponse
//!
//! Every failure becomes `{"error": "<message>"}`. Storage failures carry the
//! driver's own message through to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not an integer (400)
    InvalidId,

    /// Request body could not be decoded (400)
    BadRequest { message: String },

    /// Request body could not be read, e.g. over the size limit (status from axum)
    BodyRejected { status: StatusCode, message: String },

    /// No row for the id (404)
    NotFound { resource: &'static str, id: String },

    /// Any other storage failure (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::BodyRejected { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidId => "Invalid cake ID".to_string(),
            Self::BadRequest { message } | Self::BodyRejected { message, .. } => message.clone(),
            Self::NotFound { resource, .. } => format!("{} not found", resource),
            Self::Database(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::NotFound { resource, id } => tracing::debug!(%id, "{} not found", resource),
            _ => {}
        }

        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}
