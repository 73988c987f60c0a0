//! Resumable snapshot of an interrupted digest computation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Offset into the input plus the exported accumulator state at that offset.
///
/// Produced once by a cancelled worker and handed to the caller; feeding it
/// back to a new worker over the same input resumes exactly where the first
/// one stopped. Fields are read-only once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashState {
    offset: u64,
    data: Vec<u8>,
}

impl HashState {
    pub fn new(offset: u64, data: Vec<u8>) -> Self {
        Self { offset, data }
    }

    /// Number of input bytes already absorbed.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Opaque serialized accumulator state.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_parts(self) -> (u64, Vec<u8>) {
        (self.offset, self.data)
    }
}

impl fmt::Display for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Offset: {}\nData: {}",
            self.offset,
            hex::encode_upper(&self.data)
        )
    }
}
