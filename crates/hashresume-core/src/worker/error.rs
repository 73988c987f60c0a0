//! Errors reported when starting or waiting on a digest worker.

use thiserror::Error;

use crate::accumulator::StateError;

/// Why a worker could not be started, or ended without a result.
///
/// Checkpoint problems are detected before the worker task is spawned, so no
/// result channel ever exists for a rejected checkpoint.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Saved accumulator state could not be imported.
    #[error("saved hash state rejected: {0}")]
    State(#[from] StateError),
    /// Checkpoint offset points past the end of the input.
    #[error("checkpoint offset {offset} is beyond input length {len}")]
    OffsetOutOfRange { offset: u64, len: u64 },
    /// Checkpoint offset disagrees with the byte count recorded in its own state.
    #[error("checkpoint offset {offset} does not match {absorbed} bytes recorded in hash state")]
    OffsetMismatch { offset: u64, absorbed: u64 },
    /// Both result channels closed without a value.
    #[error("worker exited without reporting a result")]
    Closed,
    /// The worker task panicked or was aborted.
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
