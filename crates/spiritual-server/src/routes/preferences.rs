use axum::{extract::State, routing::get, Json, Router};
use spiritual_core::{NewPreferences, PreferencesUpdate, UserPreferences};

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::session::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/preferences",
        get(get_preferences).put(update_preferences),
    )
}

async fn get_preferences(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<UserPreferences>> {
    state
        .storage
        .get_user_preferences(current.user.id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Preferences"))
}

/// Create the row on first save, otherwise merge into it.
async fn update_preferences(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(update): ApiJson<PreferencesUpdate>,
) -> Result<Json<UserPreferences>> {
    update.validate()?;

    let preferences = match state.storage.get_user_preferences(current.user.id)? {
        Some(existing) => state
            .storage
            .update_user_preferences(existing.id, &update)?
            .ok_or_else(|| ApiError::not_found("Preferences"))?,
        None => state
            .storage
            .create_user_preferences(NewPreferences::from_update(current.user.id, &update))?,
    };

    tracing::debug!(user_id = current.user.id, religion = %preferences.primary_religion, "preferences saved");
    Ok(Json(preferences))
}
