pub mod history;
pub mod images;
pub mod pages;
pub mod upload;

use crate::flash;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// 303 redirect back to the form with a one-shot flash message.
pub(crate) fn flash_redirect(message: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, header::HeaderValue::from_static("/")),
            (header::SET_COOKIE, flash::set_cookie_header(message)),
        ],
    )
        .into_response()
}
