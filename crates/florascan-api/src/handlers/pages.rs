//! Landing page
//!
//! `GET /` renders the upload form, any pending flash message, and the
//! session's gallery. The page is a single server-rendered HTML string; there
//! is no template engine, the markup is small enough to build inline.

use crate::flash;
use crate::session::SessionId;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Extension,
};
use std::sync::Arc;

pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionId>,
    headers: HeaderMap,
) -> Response {
    let flash_message = flash::take_from_headers(&headers);
    let entries = state.history.list(&session.0);
    let uploads_used = state.history.upload_count(&session.0);

    let mut body = String::with_capacity(2048);
    body.push_str(
        "<!DOCTYPE html>\n<html>\n<head><title>Florascan</title></head>\n<body>\n\
         <h1>Florascan</h1>\n",
    );

    if let Some(message) = &flash_message {
        body.push_str(&format!(
            "<p class=\"flash\">{}</p>\n",
            escape_html(message)
        ));
    }

    body.push_str(&format!(
        "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\"image/*\">\n\
         <button type=\"submit\">Identify</button>\n\
         </form>\n\
         <p>{} of {} uploads used. <a href=\"/clear_history\">Clear history</a></p>\n",
        uploads_used, state.config.max_uploads_per_session
    ));

    if !entries.is_empty() {
        body.push_str("<ul class=\"gallery\">\n");
        for entry in &entries {
            body.push_str(&format!(
                "<li><a href=\"/result/{key}\">{name}</a> \
                 (<a href=\"/image/{key}\">image</a>)</li>\n",
                key = escape_html(&entry.filename),
                name = escape_html(&entry.result.name),
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("</body>\n</html>\n");

    let mut response = Html(body).into_response();
    if flash_message.is_some() {
        response
            .headers_mut()
            .append(header::SET_COOKIE, flash::clear_cookie_header());
    }
    response
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
