use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    auth::AdminAuthorizer,
    store::ScheduleStore,
    types::{ChannelLanguage, ParseStats, RegenerateRequest, ServerInfo},
};
use crate::config::local_now;
use crate::error::ApiError;
use crate::schedule::{
    parse_schedule, upcoming_today, upcoming_within_24h,
    view::{day_view, live_view},
    window::{minutes_of_day, time_to_minutes},
    Day, UpcomingMatch,
};

// ── Application state shared across all routes ─────────────────────────────────

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<ScheduleStore>,
    pub authorizer: Arc<dyn AdminAuthorizer>,
    pub timezone: Option<Tz>,
    pub server_info: ServerInfo,
}

impl ApiState {
    fn now(&self, at: Option<&str>) -> Result<NaiveDateTime, ApiError> {
        match at.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_at(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid time override: {raw}"))),
            None => Ok(local_now(self.timezone)),
        }
    }
}

fn parse_at(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_day(raw: &str) -> Result<Day, ApiError> {
    Day::from_name(raw).ok_or_else(|| ApiError::NotFound(format!("Unknown day: {raw}")))
}

// ── Query param structs ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LiveQuery {
    at: Option<String>,
}

#[derive(Deserialize)]
struct UpcomingQuery {
    scope: Option<String>,
    at: Option<String>,
}

// ── Route handlers ────────────────────────────────────────────────────────────

async fn handle_info(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.server_info.clone())
}

async fn handle_get_schedule(State(state): State<ApiState>) -> Response {
    let snapshot = state.store.current().await;
    Json(&*snapshot).into_response()
}

async fn handle_get_day(
    Path(day): Path<String>,
    State(state): State<ApiState>,
) -> Result<Response, ApiError> {
    let day = parse_day(&day)?;
    let snapshot = state.store.current().await;
    Ok(Json(day_view(&snapshot.schedule, &snapshot.channels, day)).into_response())
}

async fn handle_live(
    Query(q): Query<LiveQuery>,
    State(state): State<ApiState>,
) -> Result<Response, ApiError> {
    let now = state.now(q.at.as_deref())?;
    let snapshot = state.store.current().await;
    Ok(Json(live_view(&snapshot.schedule, now)).into_response())
}

async fn handle_upcoming(
    Query(q): Query<UpcomingQuery>,
    State(state): State<ApiState>,
) -> Result<Response, ApiError> {
    let now = state.now(q.at.as_deref())?;
    let snapshot = state.store.current().await;

    let matches: Vec<UpcomingMatch> = match q.scope.as_deref().unwrap_or("24h") {
        "24h" => upcoming_within_24h(&snapshot.schedule, now),
        "today" => {
            let today = Day::from(now.weekday());
            let now_minutes = minutes_of_day(now);
            upcoming_today(&snapshot.schedule, now)
                .into_iter()
                .filter_map(|r| {
                    let start = time_to_minutes(&r.time)?;
                    Some(UpcomingMatch {
                        day: today,
                        starts_in_minutes: start - now_minutes,
                        time: r.time,
                        name: r.name,
                        url: r.url,
                    })
                })
                .collect()
        }
        other => return Err(ApiError::BadRequest(format!("Unknown scope: {other}"))),
    };
    Ok(Json(matches).into_response())
}

async fn handle_channel_language(
    Path((day, channel)): Path<(String, String)>,
    State(state): State<ApiState>,
) -> Result<Response, ApiError> {
    let day = parse_day(&day)?;
    let snapshot = state.store.current().await;
    let language = snapshot
        .channels
        .language(day, &channel)
        .ok_or_else(|| ApiError::NotFound(format!("No channel {channel} on {day}")))?;

    Ok(Json(ChannelLanguage {
        day,
        channel: channel.trim().to_uppercase(),
        language: language.to_string(),
    })
    .into_response())
}

async fn handle_regenerate(
    State(state): State<ApiState>,
    headers: HeaderMap,
    payload: Result<Json<RegenerateRequest>, JsonRejection>,
) -> Result<Json<ParseStats>, ApiError> {
    state.authorizer.authorize(&headers)?;

    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if body.schedule_text.trim().is_empty() {
        return Err(ApiError::BadRequest("scheduleText is required".to_string()));
    }

    let report = parse_schedule(&body.schedule_text);
    let snapshot = state.store.replace(report).await?;
    info!(revision = snapshot.revision, "schedule regenerated by admin");
    Ok(Json(snapshot.stats.clone()))
}

// ── Router factory ────────────────────────────────────────────────────────────

pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/info", get(handle_info))
        // Read side
        .route("/schedule", get(handle_get_schedule))
        .route("/schedule/days/:day", get(handle_get_day))
        .route("/schedule/live", get(handle_live))
        .route("/schedule/upcoming", get(handle_upcoming))
        .route("/schedule/channels/:day/:channel", get(handle_channel_language))
        // Admin
        .route("/admin/schedule", post(handle_regenerate))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
