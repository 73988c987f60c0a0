//! Incremental hash computation whose internal state can be exported and
//! re-imported mid-stream.

use thiserror::Error;

/// A hash computation that supports checkpointing.
///
/// For any accumulator `x`, importing `x.export_state()` into a fresh
/// accumulator yields one that behaves exactly like `x` for every later
/// `absorb` and for `finalize`.
pub trait Accumulator: Default + Send + 'static {
    /// Final digest type.
    type Output: Send + 'static;

    /// Feed more input.
    fn absorb(&mut self, data: &[u8]);

    /// Total number of bytes absorbed since initialization (restored by `import_state`).
    fn absorbed(&self) -> u64;

    /// Consume the accumulator and produce the digest.
    fn finalize(self) -> Self::Output;

    /// Serialize the full internal state (registers, block buffer, length counter).
    fn export_state(&self) -> Vec<u8>;

    /// Replace the internal state with a previously exported one.
    /// On error the accumulator is left unchanged.
    fn import_state(&mut self, data: &[u8]) -> Result<(), StateError>;
}

/// Saved accumulator state could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Blob does not start with the expected algorithm tag.
    #[error("invalid hash state identifier")]
    InvalidIdentifier,
    /// Blob has the right tag but the wrong size.
    #[error("invalid hash state size: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
