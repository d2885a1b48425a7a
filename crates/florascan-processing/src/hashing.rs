//! Content hashing for the result cache
//!
//! SHA-256 over the file bytes, fed to the hasher in fixed-size chunks. The
//! hex digest is the cache key: identical bytes always produce the same key,
//! independent of filename or uploader.

use sha2::{Digest, Sha256};

const CHUNK_SIZE: usize = 64 * 1024;

/// Hash an upload's bytes in 64 KiB chunks, returning the lowercase hex
/// digest.
pub fn content_hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    for chunk in data.chunks(CHUNK_SIZE) {
        hasher.update(chunk);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bytes_hash_identically() {
        let a = content_hash_bytes(b"same content");
        let b = content_hash_bytes(b"same content");
        assert_eq!(a, b);
    }

    #[test]
    fn different_bytes_hash_differently() {
        assert_ne!(content_hash_bytes(b"one"), content_hash_bytes(b"two"));
    }

    #[test]
    fn chunking_does_not_change_the_digest() {
        // Larger than one chunk so the loop takes multiple iterations.
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let chunked = content_hash_bytes(&data);

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let single_pass = hex::encode(hasher.finalize());

        assert_eq!(chunked, single_pass);
    }

    #[test]
    fn known_digest() {
        // sha256 of the empty input
        assert_eq!(
            content_hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
