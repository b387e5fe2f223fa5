use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use spiritual_core::calendar::{days_until, pick_today, reminder_due, religion_filter};
use spiritual_core::{Festival, NewFestival};

use crate::error::{ApiError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::session::{CurrentUser, MaybeSession, Moderator};
use crate::state::AppState;

pub const DEFAULT_UPCOMING_LIMIT: usize = 5;
pub const MAX_UPCOMING_LIMIT: usize = 50;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/festivals", get(list_festivals).post(create_festival))
        .route("/api/festivals/today", get(todays_festivals))
        .route("/api/festivals/today/featured", get(featured_festival))
        .route("/api/festivals/upcoming", get(upcoming_festivals))
        .route("/api/festivals/reminders", get(festival_reminders))
        .route("/api/festivals/date/:date", get(festivals_on_date))
        .route("/api/festivals/:id", get(get_festival))
}

/// Calendar days are UTC.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Deserialize)]
struct ReligionQuery {
    religion: Option<String>,
}

async fn list_festivals(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReligionQuery>,
) -> Result<Json<Vec<Festival>>> {
    let festivals = match religion_filter(query.religion.as_deref()) {
        Some(religion) => state.storage.get_festivals_by_religion(religion)?,
        None => state.storage.get_all_festivals()?,
    };
    Ok(Json(festivals))
}

async fn create_festival(
    State(state): State<AppState>,
    Moderator(moderator): Moderator,
    ApiJson(festival): ApiJson<NewFestival>,
) -> Result<(StatusCode, Json<Festival>)> {
    let festival = state.storage.create_festival(festival)?;
    tracing::info!(festival_id = festival.id, moderator = moderator.user.id, "festival created");
    Ok((StatusCode::CREATED, Json(festival)))
}

async fn todays_festivals(State(state): State<AppState>) -> Result<Json<Vec<Festival>>> {
    Ok(Json(state.storage.get_festivals_by_date(today())?))
}

async fn festivals_on_date(
    State(state): State<AppState>,
    ApiPath(date): ApiPath<NaiveDate>,
) -> Result<Json<Vec<Festival>>> {
    Ok(Json(state.storage.get_festivals_by_date(date)?))
}

/// One festival to headline the home page, matched to the signed-in user's
/// primary religion when possible.
async fn featured_festival(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<Festival>> {
    let religion = match session {
        Some(session) => state
            .storage
            .get_user_preferences(session.user_id)?
            .map(|p| p.primary_religion),
        None => None,
    };

    let festivals = state.storage.get_festivals_by_date(today())?;
    pick_today(&festivals, religion.as_deref())
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No festival today".to_string()))
}

#[derive(Deserialize)]
struct UpcomingQuery {
    limit: Option<usize>,
}

fn upcoming_limit(requested: Option<usize>) -> usize {
    match requested {
        None | Some(0) => DEFAULT_UPCOMING_LIMIT,
        Some(n) => n.min(MAX_UPCOMING_LIMIT),
    }
}

async fn upcoming_festivals(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<UpcomingQuery>,
) -> Result<Json<Vec<Festival>>> {
    let preferences = state
        .storage
        .get_user_preferences(current.user.id)?
        .ok_or_else(|| ApiError::not_found("User preferences"))?;

    let festivals = state.storage.get_upcoming_festivals(
        &preferences.primary_religion,
        today(),
        upcoming_limit(query.limit),
    )?;
    Ok(Json(festivals))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FestivalReminder {
    #[serde(flatten)]
    festival: Festival,
    days_until: i64,
}

/// Upcoming festivals inside the user's reminder window. Empty when festival
/// notifications are switched off.
async fn festival_reminders(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<FestivalReminder>>> {
    let preferences = state
        .storage
        .get_user_preferences(current.user.id)?
        .ok_or_else(|| ApiError::not_found("User preferences"))?;
    if !preferences.notify_festivals {
        return Ok(Json(Vec::new()));
    }

    let today = today();
    let until = today
        .checked_add_signed(Duration::days(i64::from(preferences.festival_reminder_days)))
        .unwrap_or(NaiveDate::MAX);
    let reminders = state
        .storage
        .get_festivals_between(&preferences.primary_religion, today, until)?
        .into_iter()
        .filter(|f| reminder_due(f, today, preferences.festival_reminder_days))
        .map(|festival| FestivalReminder {
            days_until: days_until(festival.date, today),
            festival,
        })
        .collect();
    Ok(Json(reminders))
}

async fn get_festival(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Festival>> {
    state
        .storage
        .get_festival(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Festival"))
}
