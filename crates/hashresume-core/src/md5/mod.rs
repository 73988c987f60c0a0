//! MD5 (RFC 1321) with exportable internal state.
//!
//! MD5 is used here as a checksum, not for anything security-sensitive. The
//! point of carrying our own implementation is that the running state
//! (registers, partial block, length counter) is reachable, so a computation
//! can be checkpointed and resumed later.

mod compress;
mod state;

use std::fmt;

use crate::accumulator::{Accumulator, StateError};

pub use state::MARSHALED_SIZE;

/// Digest length in bytes.
pub const DIGEST_SIZE: usize = 16;
/// Compression block length in bytes.
pub const BLOCK_SIZE: usize = 64;

const INIT_STATE: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// A finished MD5 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Md5Digest(pub [u8; DIGEST_SIZE]);

impl Md5Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Md5Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Md5Digest> for [u8; DIGEST_SIZE] {
    fn from(d: Md5Digest) -> Self {
        d.0
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::UpperHex for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

/// Running MD5 computation.
#[derive(Debug, Clone)]
pub struct Md5 {
    state: [u32; 4],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    /// Total bytes absorbed.
    len: u64,
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    pub fn new() -> Self {
        Self {
            state: INIT_STATE,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            len: 0,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        self.len = self.len.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_SIZE {
                return;
            }
            compress::compress(&mut self.state, &self.buffer);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            compress::compress(&mut self.state, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    pub fn finalize(mut self) -> Md5Digest {
        let bit_len = self.len.wrapping_mul(8);

        // 0x80, zeros up to 56 mod 64, then the bit length (little-endian).
        let mut padding = [0u8; BLOCK_SIZE];
        padding[0] = 0x80;
        let pad_len = if self.buffered < 56 {
            56 - self.buffered
        } else {
            120 - self.buffered
        };
        self.update(&padding[..pad_len]);
        self.update(&bit_len.to_le_bytes());
        debug_assert_eq!(self.buffered, 0);

        let mut out = [0u8; DIGEST_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Md5Digest(out)
    }
}

impl Accumulator for Md5 {
    type Output = Md5Digest;

    fn absorb(&mut self, data: &[u8]) {
        self.update(data);
    }

    fn absorbed(&self) -> u64 {
        self.len
    }

    fn finalize(self) -> Md5Digest {
        Md5::finalize(self)
    }

    fn export_state(&self) -> Vec<u8> {
        self.marshal()
    }

    fn import_state(&mut self, data: &[u8]) -> Result<(), StateError> {
        self.unmarshal(data)
    }
}
