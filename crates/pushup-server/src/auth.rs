//! HTTP Basic Auth middleware.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use pushup_core::Clock;

use crate::{Credentials, SharedState, REALM};

/// Decode an `Authorization: Basic ...` header into (user, password).
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn matches(expected: &Credentials, user: &str, pass: &str) -> bool {
    expected.username == user && expected.password == pass
}

fn unauthorized() -> Response {
    let challenge = format!("Basic realm=\"{REALM}\"");
    let mut response = (StatusCode::UNAUTHORIZED, "Unauthorized.\n").into_response();
    if let Ok(value) = HeaderValue::from_str(&challenge) {
        response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
    }
    response
}

/// Reject requests without valid credentials.
pub async fn require_basic_auth<C: Clock + 'static>(
    State(state): State<SharedState<C>>,
    request: Request,
    next: Next,
) -> Response {
    match parse_basic_auth(request.headers()) {
        Some((user, pass)) if matches(&state.credentials, &user, &pass) => next.run(request).await,
        Some((user, _)) => {
            tracing::warn!(user = %user, path = %request.uri().path(), "rejected credentials");
            unauthorized()
        }
        None => unauthorized(),
    }
}
