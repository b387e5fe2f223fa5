//! Session-aware extractors.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use spiritual_core::User;
use std::sync::Arc;

use super::cookie::read_session_id;
use super::Session;
use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in user. Rejects with 401 when the cookie is missing, the
/// session has expired, or the user row no longer exists.
pub struct CurrentUser {
    pub user: User,
    pub session: Arc<Session>,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeSession(session) = MaybeSession::from_request_parts(parts, state).await?;
        let session = session.ok_or_else(ApiError::unauthorized)?;

        match state.storage.get_user(session.user_id)? {
            Some(user) => Ok(CurrentUser { user, session }),
            None => {
                state.sessions.delete_session(&session.id);
                Err(ApiError::Unauthorized("User not found".to_string()))
            }
        }
    }
}

/// The live session, if the request carries one.
pub struct MaybeSession(pub Option<Arc<Session>>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = read_session_id(&parts.headers).and_then(|id| state.sessions.get_session(&id));
        Ok(MaybeSession(session))
    }
}

/// A signed-in user whose email is on the moderator list. Rejects with 401
/// when signed out and 403 otherwise.
pub struct Moderator(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for Moderator {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        if !state.config.is_moderator(&current.user.email) {
            tracing::warn!(user_id = current.user.id, "moderation attempt by non-moderator");
            return Err(ApiError::Forbidden("Moderator access required".to_string()));
        }
        Ok(Moderator(current))
    }
}
