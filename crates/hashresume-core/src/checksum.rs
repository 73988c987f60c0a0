//! One-shot MD5 over an in-memory buffer, with no interruption support.

use crate::md5::{Md5, Md5Digest};

/// Compute the MD5 digest of `input` in a single pass.
pub fn md5(input: &[u8]) -> Md5Digest {
    let mut hasher = Md5::new();
    hasher.update(input);
    hasher.finalize()
}

/// Compute MD5 of `input` and return the digest as lowercase hex.
pub fn md5_hex(input: &[u8]) -> String {
    md5(input).to_hex()
}
