use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::handlers::AppError;
use crate::models::{ResolveRequest, ResolveResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub id: Option<String>,
}

/// Resolve an access token passed as the `id` query parameter.
pub async fn get_media(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, AppError> {
    resolve(&state, query.id.as_deref().unwrap_or_default()).await
}

/// Resolve an access token passed as the `id` field of a JSON body.
pub async fn resolve_media(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    resolve(&state, request.id.as_deref().unwrap_or_default()).await
}

async fn resolve(state: &AppState, token: &str) -> Result<Json<ResolveResponse>, AppError> {
    let record = state.media_service.resolve(token).await?;
    Ok(Json(ResolveResponse { file: record }))
}
