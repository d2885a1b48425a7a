//! Signed session-id cookie
//!
//! Sessions carry no server-side login state, only an opaque random id that
//! scopes the upload history. The cookie value is
//! `base64url(id || HMAC-SHA256(secret, id))`; a bad or missing signature
//! just mints a fresh session rather than erroring.

use axum::http::{header, HeaderMap, HeaderValue};
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

pub const SESSION_COOKIE: &str = "florascan_session";

const ID_LEN: usize = 16;
const MAC_LEN: usize = 32; // SHA256
const TOKEN_LEN: usize = ID_LEN + MAC_LEN;

/// Opaque per-browser session identifier (hex of the random id bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

fn sign(secret: &[u8], id: &[u8]) -> [u8; MAC_LEN] {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(id);
    mac.finalize().into_bytes().into()
}

/// Mint a new session, returning the id and the cookie value to set.
pub fn mint(secret: &[u8]) -> (SessionId, String) {
    let mut id = [0u8; ID_LEN];
    rand::rng().fill_bytes(&mut id);

    let tag = sign(secret, &id);
    let mut token_bytes = [0u8; TOKEN_LEN];
    token_bytes[..ID_LEN].copy_from_slice(&id);
    token_bytes[ID_LEN..].copy_from_slice(&tag);

    let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(token_bytes);
    (SessionId(hex_encode(&id)), token)
}

/// Verify a cookie value and return the session id it carries.
pub fn verify(token: &str, secret: &[u8]) -> Option<SessionId> {
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(token)
        .ok()?;
    if decoded.len() != TOKEN_LEN {
        return None;
    }

    let (id, tag) = decoded.split_at(ID_LEN);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(id);
    mac.verify_slice(tag).ok()?;

    Some(SessionId(hex_encode(id)))
}

/// Extract and verify the session cookie from request headers.
pub fn session_from_headers(headers: &HeaderMap, secret: &[u8]) -> Option<SessionId> {
    // Scan every Cookie header: some clients split cookies across several
    // headers instead of folding them into one as RFC 6265 prescribes.
    let token = headers.get_all(header::COOKIE).iter().find_map(|value| {
        let cookies = value.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then_some(value)
        })
    })?;
    verify(token, secret)
}

/// Build the Set-Cookie header value for a freshly minted session.
pub fn set_cookie_header(token: &str) -> HeaderValue {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token);
    HeaderValue::from_str(&cookie).expect("cookie value is ASCII")
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
