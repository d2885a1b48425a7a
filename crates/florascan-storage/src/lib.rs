//! Florascan storage library
//!
//! Uploaded images live on the local filesystem under a flat key namespace.
//! Keys are `{timestamp}_{sanitized-original-name}` and must not contain
//! `..`, a leading `/`, or path separators; key generation is centralized in
//! the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

pub use keys::generate_storage_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
