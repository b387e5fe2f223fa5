use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use spiritual_core::{UserProfile, UserUpdate};

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::session::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/user", get(get_user).put(update_user))
}

async fn get_user(current: CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&current.user))
}

/// Only the display name can be edited here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NameUpdate {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(body): ApiJson<NameUpdate>,
) -> Result<Json<UserProfile>> {
    let update = UserUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        profile_picture: None,
    };
    let user = state
        .storage
        .update_user(current.user.id, &update)?
        .ok_or_else(|| ApiError::not_found("User"))?;
    Ok(Json(UserProfile::from(&user)))
}
