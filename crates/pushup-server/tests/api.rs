//! HTTP API integration tests.
//!
//! Each test starts the router on an ephemeral port with an in-memory store
//! and a pinned clock, then talks to it with reqwest.

use std::net::SocketAddr;

use chrono::NaiveDate;
use pushup_core::storage::Bucket;
use pushup_core::tracker::daily::ORIGIN_KEY;
use pushup_core::{Database, FixedClock, Tracker};
use pushup_server::{create_router, AppState, Credentials};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const USER: &str = "athlete";
const PASS: &str = "burpees";

/// A test server instance.
struct TestServer {
    addr: SocketAddr,
    _shutdown_tx: oneshot::Sender<()>,
    _static_dir: TempDir,
}

impl TestServer {
    async fn start(today: NaiveDate) -> Self {
        Self::start_with(Database::open_memory().unwrap(), today).await
    }

    async fn start_with(db: Database, today: NaiveDate) -> Self {
        let static_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(static_dir.path().join("app.css"), "body {}").unwrap();

        let tracker = Tracker::with_clock(db, FixedClock(today));
        let state = AppState::new(
            tracker,
            Credentials {
                username: USER.into(),
                password: PASS.into(),
            },
        );
        let app = create_router(state, static_dir.path().to_path_buf());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        Self {
            addr,
            _shutdown_tx: shutdown_tx,
            _static_dir: static_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(self.url(path))
            .basic_auth(USER, Some(PASS))
            .send()
            .await
            .unwrap()
    }

    async fn post(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.url(path))
            .basic_auth(USER, Some(PASS))
            .send()
            .await
            .unwrap()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn rejects_missing_and_wrong_credentials() {
    let server = TestServer::start(date(2026, 10, 19)).await;

    let resp = reqwest::get(server.url("/api/today")).await.unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(
        resp.headers()["www-authenticate"],
        "Basic realm=\"Push Up Tracker\""
    );

    let resp = reqwest::Client::new()
        .get(server.url("/api/streak"))
        .basic_auth(USER, Some("wrong"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(resp.text().await.unwrap().trim(), "Unauthorized.");
}

#[tokio::test]
async fn today_is_created_lazily() {
    let server = TestServer::start(date(2026, 10, 19)).await;
    let resp = server.get("/api/today").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["date"], "2026-10-19");
    assert_eq!(body["count"], 10);
    assert_eq!(body["done"], false);
}

#[tokio::test]
async fn complete_is_idempotent_over_http() {
    let server = TestServer::start(date(2026, 10, 19)).await;

    let first: Value = server.post("/api/today/complete").await.json().await.unwrap();
    let second: Value = server.post("/api/today/complete").await.json().await.unwrap();
    assert_eq!(first["done"], true);
    assert_eq!(first, second);

    let streak: Value = server.get("/api/streak").await.json().await.unwrap();
    assert_eq!(streak["current"], 1);
    assert_eq!(streak["longest"], 1);
    assert_eq!(streak["lastDate"], "2026-10-19");
}

#[tokio::test]
async fn complete_rejects_get() {
    let server = TestServer::start(date(2026, 10, 19)).await;
    let resp = server.get("/api/today/complete").await;
    assert_eq!(resp.status(), 405);

    let streak: Value = server.get("/api/streak").await.json().await.unwrap();
    assert_eq!(streak["current"], 0);
}

#[tokio::test]
async fn streak_defaults_to_zeros() {
    let server = TestServer::start(date(2026, 10, 19)).await;
    let streak: Value = server.get("/api/streak").await.json().await.unwrap();
    assert_eq!(
        streak,
        serde_json::json!({"current": 0, "longest": 0, "lastDate": ""})
    );
}

#[tokio::test]
async fn calendar_filters_by_year_and_falls_back_leniently() {
    let server = TestServer::start(date(2026, 10, 19)).await;
    server.post("/api/today/complete").await;

    let cal: Value = server.get("/api/calendar?year=2026").await.json().await.unwrap();
    assert_eq!(cal["year"], 2026);
    assert_eq!(cal["startYear"], 2026);
    assert_eq!(cal["startMonth"], 9);
    assert_eq!(cal["days"]["2026-10-19"]["done"], true);

    let fallback: Value = server.get("/api/calendar?year=abc").await.json().await.unwrap();
    assert_eq!(fallback["year"], 2026);

    let omitted: Value = server.get("/api/calendar").await.json().await.unwrap();
    assert_eq!(omitted, cal);

    let next: Value = server.get("/api/calendar?year=2027").await.json().await.unwrap();
    assert!(next["days"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn serves_index_and_static_assets() {
    let server = TestServer::start(date(2026, 10, 19)).await;

    let index = server.get("/").await;
    assert_eq!(index.status(), 200);
    assert!(index.text().await.unwrap().contains("Push Up Tracker"));

    let css = server.get("/static/app.css").await;
    assert_eq!(css.status(), 200);

    let missing = server.get("/static/nope.css").await;
    assert_eq!(missing.status(), 404);

    let resp = reqwest::get(server.url("/static/app.css")).await.unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn future_origin_keeps_reads_up_and_fails_writes() {
    let db = Database::open_memory().unwrap();
    db.update(|txn| txn.put(Bucket::Config, ORIGIN_KEY, b"2030-01-01"))
        .unwrap();
    let server = TestServer::start_with(db, date(2026, 10, 19)).await;

    let streak = server.get("/api/streak").await;
    assert_eq!(streak.status(), 200);
    let streak: Value = streak.json().await.unwrap();
    assert_eq!(streak["current"], 0);

    let cal = server.get("/api/calendar").await;
    assert_eq!(cal.status(), 200);

    let today = server.get("/api/today").await;
    assert_eq!(today.status(), 500);
    let body: Value = today.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("2030-01-01"));

    let complete = server.post("/api/today/complete").await;
    assert_eq!(complete.status(), 500);

    let streak: Value = server.get("/api/streak").await.json().await.unwrap();
    assert_eq!(streak["current"], 0);
    let cal: Value = server.get("/api/calendar").await.json().await.unwrap();
    assert!(cal["days"].as_object().unwrap().is_empty());
}
