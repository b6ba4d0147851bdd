//! HTTP handlers.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
};
use pushup_core::{parse_year_param, CalendarView, Clock, DailyRecord, StreakState};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::SharedState;

/// Index page
pub async fn index() -> impl IntoResponse {
    Html(include_str!("../static/index.html"))
}

/// GET /api/today
pub async fn api_today<C: Clock + 'static>(
    State(state): State<SharedState<C>>,
) -> ApiResult<Json<DailyRecord>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.today()?))
}

/// POST /api/today/complete
pub async fn api_complete<C: Clock + 'static>(
    State(state): State<SharedState<C>>,
) -> ApiResult<Json<DailyRecord>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.complete_today()?))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<String>,
}

/// GET /api/calendar?year=YYYY
pub async fn api_calendar<C: Clock + 'static>(
    State(state): State<SharedState<C>>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Json<CalendarView>> {
    let tracker = state.tracker.lock().await;
    let year = parse_year_param(query.year.as_deref(), tracker.today_date());
    Ok(Json(tracker.calendar(year)?))
}

/// GET /api/streak
pub async fn api_streak<C: Clock + 'static>(
    State(state): State<SharedState<C>>,
) -> ApiResult<Json<StreakState>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.streak()?))
}
