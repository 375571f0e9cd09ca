//! Stable hashing for derived file names.

use xxhash_rust::xxh3::xxh3_64;

/// 64-bit xxh3 hash of `data`.
///
/// The value is seedless and identical across platforms and runs, which
/// is what makes collision suffixes in license file names reproducible.
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}
