//! Deterministic bucketing hash
//!
//! Maps `(flag key, distinct id, salt)` onto `[0, 1)`. The digest algorithm,
//! the 15 hex digit prefix and the scale are shared with every other client
//! evaluating the same flags, so a subject lands in the same bucket
//! everywhere. They are protocol constants, not configuration.

use sha1::{Digest, Sha1};

/// Largest value of a 15 hex digit prefix (`2^60 - 1`)
pub const LONG_SCALE: u64 = 0xFFF_FFFF_FFFF_FFFF;

/// Salt used for flag-level rollout gating
pub const ROLLOUT_SALT: &str = "";

/// Salt used for variant bucketing
pub const VARIANT_SALT: &str = "variant";

/// Bucket `distinct_id` for `key` into `[0, 1)`
pub fn hash(key: &str, distinct_id: &str, salt: &str) -> f64 {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(b".");
    hasher.update(distinct_id.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();

    // First 15 hex digits == top 60 bits of the first 8 bytes
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let bucket = u64::from_be_bytes(prefix) >> 4;

    bucket as f64 / LONG_SCALE as f64
}
