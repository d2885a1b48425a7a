pub mod hashing;
pub mod safety;

pub use hashing::content_hash_bytes;
pub use safety::{verify_image, SafetyError, SniffedImage};
