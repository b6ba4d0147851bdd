//! HTTP API for the push-up tracker.
//!
//! Provides:
//! - JSON endpoints for today's record, completion, streak and calendar
//! - An embedded index page and `/static` assets
//! - HTTP Basic Auth in front of everything

pub mod auth;
pub mod error;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use pushup_core::{Clock, LocalClock, Tracker};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Basic Auth realm shown by browsers.
pub const REALM: &str = "Push Up Tracker";

/// Expected Basic Auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// State shared across handlers.
///
/// The tracker sits behind one mutex: the store is single-writer and every
/// operation is a short local transaction.
pub struct AppState<C: Clock = LocalClock> {
    pub tracker: Mutex<Tracker<C>>,
    pub credentials: Credentials,
}

pub type SharedState<C = LocalClock> = Arc<AppState<C>>;

impl<C: Clock> AppState<C> {
    pub fn new(tracker: Tracker<C>, credentials: Credentials) -> SharedState<C> {
        Arc::new(Self {
            tracker: Mutex::new(tracker),
            credentials,
        })
    }
}

/// Build the router. `static_dir` is served under `/static`.
pub fn create_router<C: Clock + 'static>(state: SharedState<C>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/today", get(routes::api_today::<C>))
        .route("/api/today/complete", post(routes::api_complete::<C>))
        .route("/api/calendar", get(routes::api_calendar::<C>))
        .route("/api/streak", get(routes::api_streak::<C>))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth::<C>,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
