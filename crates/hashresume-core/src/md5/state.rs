//! Binary layout of an exported MD5 state.
//!
//! `magic(4) | A B C D as big-endian u32 (16) | block buffer (64) | length as big-endian u64 (8)`.
//! Only the first `length % 64` bytes of the block buffer are meaningful; the
//! rest is written as zeros. This is the same layout Go's `crypto/md5` uses
//! for `MarshalBinary`, so states are interchangeable with it.

use super::{Md5, BLOCK_SIZE};
use crate::accumulator::StateError;

const MAGIC: &[u8; 4] = b"md5\x01";

/// Size of an exported state in bytes.
pub const MARSHALED_SIZE: usize = MAGIC.len() + 4 * 4 + BLOCK_SIZE + 8;

impl Md5 {
    pub(super) fn marshal(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MARSHALED_SIZE);
        out.extend_from_slice(MAGIC);
        for word in self.state {
            out.extend_from_slice(&word.to_be_bytes());
        }
        out.extend_from_slice(&self.buffer[..self.buffered]);
        out.resize(out.len() + BLOCK_SIZE - self.buffered, 0);
        out.extend_from_slice(&self.len.to_be_bytes());
        out
    }

    pub(super) fn unmarshal(&mut self, data: &[u8]) -> Result<(), StateError> {
        if !data.starts_with(MAGIC) {
            return Err(StateError::InvalidIdentifier);
        }
        if data.len() != MARSHALED_SIZE {
            return Err(StateError::InvalidLength {
                expected: MARSHALED_SIZE,
                actual: data.len(),
            });
        }

        let (registers, rest) = data[MAGIC.len()..].split_at(16);
        let (block, len_bytes) = rest.split_at(BLOCK_SIZE);

        let mut state = [0u32; 4];
        for (word, bytes) in state.iter_mut().zip(registers.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        let mut len = [0u8; 8];
        len.copy_from_slice(len_bytes);
        let len = u64::from_be_bytes(len);

        self.state = state;
        self.buffer.copy_from_slice(block);
        self.len = len;
        self.buffered = (len % BLOCK_SIZE as u64) as usize;
        Ok(())
    }
}
