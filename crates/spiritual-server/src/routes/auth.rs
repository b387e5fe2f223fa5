use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use spiritual_core::{NewPreferences, NewUser, UserProfile};

use crate::error::Result;
use crate::extract::ApiJson;
use crate::session::{clear_cookie, session_cookie, set_cookie_header, CurrentUser, MaybeSession};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/google", post(google_login))
        .route("/api/auth/session", get(current_session))
        .route("/api/auth/logout", post(logout))
}

/// Sign in with a Google identity, creating the account (with default
/// preferences) on first use.
async fn google_login(
    State(state): State<AppState>,
    MaybeSession(previous): MaybeSession,
    ApiJson(login): ApiJson<NewUser>,
) -> Result<(HeaderMap, Json<UserProfile>)> {
    let user = match state.storage.get_user_by_google_id(&login.google_id)? {
        Some(user) => user,
        None => {
            let user = state.storage.create_user(login)?;
            state
                .storage
                .create_user_preferences(NewPreferences::defaults_for(user.id))?;
            tracing::info!(user_id = user.id, "new account created");
            user
        }
    };

    if let Some(previous) = previous {
        state.sessions.delete_session(&previous.id);
    }
    let session = state.sessions.create_session(user.id)?;
    let cookie = session_cookie(
        &session.id,
        state.sessions.ttl(),
        state.config.secure_cookies,
    );

    tracing::info!(user_id = user.id, "signed in");
    Ok((set_cookie_header(&cookie), Json(UserProfile::from(&user))))
}

async fn current_session(current: CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&current.user))
}

async fn logout(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> (HeaderMap, Json<Value>) {
    if let Some(session) = session {
        state.sessions.delete_session(&session.id);
        tracing::info!(user_id = session.user_id, "signed out");
    }
    (
        set_cookie_header(&clear_cookie(state.config.secure_cookies)),
        Json(json!({ "message": "Logged out successfully" })),
    )
}
