use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::categorize::Categorization;
use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::session::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/categorize", post(categorize))
}

#[derive(Deserialize)]
struct CategorizeRequest {
    #[serde(default)]
    text: Option<String>,
}

/// Tag a document with its religion and festival. Provider failures, or no
/// provider at all, yield `Unknown` for both fields.
async fn categorize(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(body): ApiJson<CategorizeRequest>,
) -> Result<Json<Categorization>> {
    let text = body
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Text is required".to_string()))?;

    let Some(categorizer) = state.categorizer.as_ref() else {
        tracing::debug!("no categorizer configured");
        return Ok(Json(Categorization::unknown()));
    };

    match categorizer.categorize(&text).await {
        Ok(result) => {
            tracing::info!(
                user_id = current.user.id,
                religion = %result.religion,
                festival = %result.festival,
                "document categorized"
            );
            Ok(Json(result))
        }
        Err(err) => {
            tracing::warn!(error = %err, "document categorization failed");
            Ok(Json(Categorization::unknown()))
        }
    }
}
