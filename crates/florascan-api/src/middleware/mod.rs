//! Request middleware
//!
//! One layer handles the whole session lifecycle: resolve or mint the signed
//! session cookie, expose the `SessionId` to handlers via request extensions,
//! and run the per-request TTL sweep over that session's history before the
//! handler sees the request.

use crate::session::{self, SessionId};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use std::sync::Arc;

pub async fn session_layer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let secret = state.config.session_secret.as_bytes();

    let (session_id, minted_token) = match session::session_from_headers(request.headers(), secret)
    {
        Some(id) => (id, None),
        None => {
            let (id, token) = session::mint(secret);
            tracing::debug!(session = %id.0, "Minted new session");
            (id, Some(token))
        }
    };

    // Expired entries go away before any handler reads the history.
    let ttl = Duration::seconds(state.config.history_ttl_secs as i64);
    state
        .history
        .evict_expired(&session_id.0, Utc::now(), ttl)
        .await;

    request.extensions_mut().insert(session_id);
    let mut response = next.run(request).await;

    if let Some(token) = minted_token {
        response
            .headers_mut()
            .append(header::SET_COOKIE, session::set_cookie_header(&token));
    }

    response
}
