use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use spiritual_core::{narration_script, NarrationScript, NewRitual, Ritual, RitualUpdate};

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::session::Moderator;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/rituals", get(rituals_by_religion).post(create_ritual))
        .route("/api/rituals/festival/:festival_id", get(rituals_by_festival))
        .route("/api/rituals/:id", get(get_ritual).put(update_ritual))
        .route("/api/rituals/:id/narration", get(ritual_narration))
}

#[derive(Deserialize)]
struct ReligionQuery {
    religion: Option<String>,
}

async fn rituals_by_religion(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReligionQuery>,
) -> Result<Json<Vec<Ritual>>> {
    let religion = query
        .religion
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::BadRequest("religion is required".to_string()))?;
    Ok(Json(state.storage.get_rituals_by_religion(religion)?))
}

async fn rituals_by_festival(
    State(state): State<AppState>,
    ApiPath(festival_id): ApiPath<i64>,
) -> Result<Json<Vec<Ritual>>> {
    Ok(Json(state.storage.get_rituals_by_festival(festival_id)?))
}

fn find_ritual(state: &AppState, id: i64) -> Result<Ritual> {
    state
        .storage
        .get_ritual(id)?
        .ok_or_else(|| ApiError::not_found("Ritual"))
}

async fn get_ritual(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Ritual>> {
    find_ritual(&state, id).map(Json)
}

/// Priest Mode script: the segments the client reads aloud one at a time.
async fn ritual_narration(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<NarrationScript>> {
    let ritual = find_ritual(&state, id)?;
    Ok(Json(narration_script(&ritual)))
}

async fn create_ritual(
    State(state): State<AppState>,
    Moderator(moderator): Moderator,
    ApiJson(ritual): ApiJson<NewRitual>,
) -> Result<(StatusCode, Json<Ritual>)> {
    let ritual = state.storage.create_ritual(ritual)?;
    tracing::info!(ritual_id = ritual.id, moderator = moderator.user.id, "ritual created");
    Ok((StatusCode::CREATED, Json(ritual)))
}

async fn update_ritual(
    State(state): State<AppState>,
    Moderator(moderator): Moderator,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<RitualUpdate>,
) -> Result<Json<Ritual>> {
    let ritual = state
        .storage
        .update_ritual(id, &update)?
        .ok_or_else(|| ApiError::not_found("Ritual"))?;
    tracing::info!(ritual_id = id, moderator = moderator.user.id, "ritual updated");
    Ok(Json(ritual))
}
