use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use spiritual_core::{Contribution, ContributionStatus, ContributionUpdate, NewContribution};

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::session::{CurrentUser, Moderator};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/contributions",
            get(list_contributions).post(create_contribution),
        )
        .route("/api/contributions/:id", get(get_contribution))
        .route("/api/contributions/:id/status", put(set_status))
}

async fn list_contributions(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Contribution>>> {
    Ok(Json(state.storage.get_contributions_by_user(current.user.id)?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionForm {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    religion: String,
    #[serde(default)]
    festival: Option<String>,
    #[serde(default)]
    file_url: Option<String>,
}

/// New submissions always start out pending, whatever the client sends.
async fn create_contribution(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(form): ApiJson<ContributionForm>,
) -> Result<(StatusCode, Json<Contribution>)> {
    let contribution = state.storage.create_contribution(NewContribution {
        user_id: current.user.id,
        title: form.title,
        description: form.description,
        file_url: form.file_url,
        content: form.content,
        religion: form.religion,
        festival: form.festival,
        status: ContributionStatus::Pending,
    })?;

    tracing::info!(
        contribution_id = contribution.id,
        user_id = current.user.id,
        "contribution submitted"
    );
    Ok((StatusCode::CREATED, Json(contribution)))
}

/// Users only see their own submissions; anyone else's id is a 404.
async fn get_contribution(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Contribution>> {
    state
        .storage
        .get_contribution(id)?
        .filter(|c| c.user_id == current.user.id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Contribution"))
}

#[derive(Deserialize)]
struct StatusForm {
    status: String,
}

async fn set_status(
    State(state): State<AppState>,
    Moderator(moderator): Moderator,
    ApiPath(id): ApiPath<i64>,
    ApiJson(form): ApiJson<StatusForm>,
) -> Result<Json<Contribution>> {
    let status: ContributionStatus = form
        .status
        .trim()
        .parse()
        .map_err(|e: spiritual_core::Error| ApiError::BadRequest(e.to_string()))?;

    let contribution = state
        .storage
        .update_contribution(id, &ContributionUpdate::status(status))?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    tracing::info!(
        contribution_id = id,
        moderator = moderator.user.id,
        status = %status,
        "contribution moderated"
    );
    Ok(Json(contribution))
}
