//! Cake endpoints
//!
//! Each handler issues exactly one store call. Update and delete answer 200
//! whether or not a row matched the id.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{CakeId, JsonBody};
use crate::http::server::AppState;
use crate::models::{Cake, CakeInput};

/// GET /cakes - all cakes, best rated first
async fn list_cakes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Cake>>, ApiError> {
    let cakes = state.store.list().await?;
    Ok(Json(cakes))
}

/// GET /cakes/{id}
async fn get_cake(
    State(state): State<Arc<AppState>>,
    CakeId(id): CakeId,
) -> Result<Json<Cake>, ApiError> {
    let cake = state.store.get(id).await?;
    Ok(Json(cake))
}

/// POST /cakes - 201 with an empty body; the new id is in `Location`
async fn create_cake(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<CakeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.store.create(&input).await?;
    tracing::info!(id, title = %input.title, "cake created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/cakes/{}", id))],
    ))
}

/// PUT /cakes/{id}
async fn update_cake(
    State(state): State<Arc<AppState>>,
    CakeId(id): CakeId,
    JsonBody(input): JsonBody<CakeInput>,
) -> Result<StatusCode, ApiError> {
    let rows = state.store.update(id, &input).await?;
    if rows == 0 {
        tracing::debug!(id, "update matched no cake");
    }
    Ok(StatusCode::OK)
}

/// DELETE /cakes/{id} - removes the row
async fn delete_cake(
    State(state): State<Arc<AppState>>,
    CakeId(id): CakeId,
) -> Result<StatusCode, ApiError> {
    let rows = state.store.delete(id).await?;
    if rows == 0 {
        tracing::debug!(id, "delete matched no cake");
    }
    Ok(StatusCode::OK)
}

/// Cake routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cakes", get(list_cakes).post(create_cake))
        .route(
            "/cakes/{id}",
            get(get_cake).put(update_cake).delete(delete_cake),
        )
}
