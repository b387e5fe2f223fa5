use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use spiritual_core::{Bhajan, NewBhajan};

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::session::Moderator;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bhajans", post(create_bhajan))
        .route("/api/bhajans/festival/:festival_id", get(bhajans_by_festival))
        .route("/api/bhajans/:id", get(get_bhajan))
}

async fn bhajans_by_festival(
    State(state): State<AppState>,
    ApiPath(festival_id): ApiPath<i64>,
) -> Result<Json<Vec<Bhajan>>> {
    Ok(Json(state.storage.get_bhajans_by_festival(festival_id)?))
}

async fn get_bhajan(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Bhajan>> {
    state
        .storage
        .get_bhajan(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Bhajan"))
}

async fn create_bhajan(
    State(state): State<AppState>,
    Moderator(moderator): Moderator,
    ApiJson(bhajan): ApiJson<NewBhajan>,
) -> Result<(StatusCode, Json<Bhajan>)> {
    let bhajan = state.storage.create_bhajan(bhajan)?;
    tracing::info!(bhajan_id = bhajan.id, moderator = moderator.user.id, "bhajan created");
    Ok((StatusCode::CREATED, Json(bhajan)))
}
