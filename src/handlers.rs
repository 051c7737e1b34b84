//! Restaurant CRUD handlers: each one translates a request into store calls
//! and a store result into a JSON response.

use crate::error::AppError;
use crate::model::RestaurantDraft;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let restaurants = state.store.find_all().await?;
    Ok((StatusCode::OK, Json(restaurants)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = state.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok((StatusCode::OK, Json(restaurant)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RestaurantDraft>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(draft) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = state.store.create(draft.into_new()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Load, merge the body's fields over the loaded record, save wholesale.
/// The draft carries no id or timestamps, so those stay store-managed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<RestaurantDraft>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut restaurant = state.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    let Json(draft) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    draft.merge_into(&mut restaurant);
    let saved = state.store.save(restaurant).await?.ok_or(AppError::NotFound)?;
    Ok((StatusCode::OK, Json(saved)))
}

/// Idempotent: deleting an id that was never created still returns 204.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.store.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
