//! Digest command: synchronous MD5 of a string.

use hashresume_core::checksum;

/// Compute and print the MD5 of `text`.
pub fn run_digest(text: &str) {
    println!("{}", checksum::md5_hex(text.as_bytes()));
}
