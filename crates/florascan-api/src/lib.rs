//! Florascan HTTP API
//!
//! Route surface:
//! - `GET  /` — upload form plus the session's gallery and any flash message
//! - `POST /upload` — multipart upload; redirects to `/result/{filename}` on
//!   success, back to `/` with a flash message on failure
//! - `GET  /result/{filename}` — one identification from the session history
//! - `GET  /images` — the session history, insertion-ordered
//! - `GET  /image/{filename}` — the stored file, session-gated
//! - `GET  /clear_history` — drop history and reset the upload counter

pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod setup;
pub mod state;
