//! One-shot flash messages
//!
//! Upload failures redirect back to the form with the message carried in a
//! short-lived cookie. The next page render reads the cookie and immediately
//! expires it. Messages are base64url-encoded so arbitrary validation text
//! survives cookie encoding rules.

use axum::http::{header, HeaderMap, HeaderValue};
use base64::Engine;

pub const FLASH_COOKIE: &str = "florascan_flash";

/// Set-Cookie value carrying a flash message for the next request.
pub fn set_cookie_header(message: &str) -> HeaderValue {
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes());
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", FLASH_COOKIE, encoded);
    HeaderValue::from_str(&cookie).expect("cookie value is ASCII")
}

/// Set-Cookie value that expires the flash cookie.
pub fn clear_cookie_header() -> HeaderValue {
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", FLASH_COOKIE);
    HeaderValue::from_str(&cookie).expect("cookie value is ASCII")
}

/// Read the flash message from request headers, if any.
pub fn take_from_headers(headers: &HeaderMap) -> Option<String> {
    // Scan every Cookie header: some clients split cookies across several
    // headers instead of folding them into one as RFC 6265 prescribes.
    let encoded = headers.get_all(header::COOKIE).iter().find_map(|value| {
        let cookies = value.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == FLASH_COOKIE && !value.is_empty()).then_some(value)
        })
    })?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(encoded)
        .ok()?;
    String::from_utf8(bytes).ok()
}
