//! Resumable digest worker.
//!
//! A worker absorbs its input one unit at a time on a tokio task. If its
//! `CancelToken` fires it exports the accumulator state and sends a
//! [`HashState`] on the checkpoint channel; otherwise it finalizes and sends
//! the digest on the digest channel. Exactly one of the two channels gets a
//! value and both are closed when the task exits, so a listener waiting on
//! either one never blocks forever.
//!
//! Passing that `HashState` to a new worker over the same input continues from
//! the recorded offset and yields the same digest as an uninterrupted run.

mod error;
mod run;

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::accumulator::Accumulator;
use crate::checkpoint::HashState;
use crate::control::CancelToken;
use crate::md5::{Md5, Md5Digest};

pub use error::WorkerError;

/// Absorption granularity and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Bytes absorbed per loop iteration (the last unit may be shorter).
    pub unit_size: NonZeroUsize,
    /// Delay after each unit. `None` or zero only yields to the scheduler.
    pub pace: Option<Duration>,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            unit_size: NonZeroUsize::MIN,
            pace: None,
        }
    }
}

/// Terminal result of a worker, as returned by [`WorkerHandle::wait`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<D> {
    /// Cancelled; resume from this checkpoint.
    Checkpoint(HashState),
    /// Ran to the end of the input.
    Digest(D),
}

/// Caller side of a running worker.
#[derive(Debug)]
pub struct WorkerHandle<D> {
    /// Receives the checkpoint if the worker was cancelled.
    pub checkpoint_rx: oneshot::Receiver<HashState>,
    /// Receives the digest if the worker ran to completion.
    pub digest_rx: oneshot::Receiver<D>,
    progress_rx: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl<D> WorkerHandle<D> {
    /// Current cursor (bytes absorbed so far, including any restored offset).
    pub fn progress(&self) -> watch::Receiver<u64> {
        self.progress_rx.clone()
    }

    /// True once the worker task has exited and both channels are closed.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait on both result channels and return whichever produced a value.
    pub async fn wait(self) -> Result<Outcome<D>, WorkerError> {
        let WorkerHandle {
            mut checkpoint_rx,
            mut digest_rx,
            task,
            ..
        } = self;

        let outcome = tokio::select! {
            Ok(state) = &mut checkpoint_rx => Some(Outcome::Checkpoint(state)),
            Ok(digest) = &mut digest_rx => Some(Outcome::Digest(digest)),
            else => None,
        };

        match outcome {
            Some(outcome) => Ok(outcome),
            None => {
                // Both senders dropped without a value: surface a panic if there was one.
                task.await?;
                Err(WorkerError::Closed)
            }
        }
    }
}

/// Start an MD5 worker over `input`, optionally resuming from `prior`.
///
/// A checkpoint is validated and imported before the task is spawned; a bad
/// one is returned as an error and no channels are created. Must be called
/// inside a tokio runtime.
pub fn start_resumable_digest(
    input: Arc<[u8]>,
    prior: Option<HashState>,
    cancel: CancelToken,
    options: WorkerOptions,
) -> Result<WorkerHandle<Md5Digest>, WorkerError> {
    start_resumable::<Md5>(input, prior, cancel, options)
}

/// Generic form of [`start_resumable_digest`] for any [`Accumulator`].
pub fn start_resumable<A: Accumulator>(
    input: Arc<[u8]>,
    prior: Option<HashState>,
    cancel: CancelToken,
    options: WorkerOptions,
) -> Result<WorkerHandle<A::Output>, WorkerError> {
    let len = input.len() as u64;
    let mut acc = A::default();
    let mut cursor = 0usize;

    if let Some(state) = prior {
        let offset = state.offset();
        if offset > len {
            return Err(WorkerError::OffsetOutOfRange { offset, len });
        }
        acc.import_state(state.data())?;
        if acc.absorbed() != offset {
            return Err(WorkerError::OffsetMismatch {
                offset,
                absorbed: acc.absorbed(),
            });
        }
        cursor = offset as usize;
        tracing::debug!(offset, len, "resuming digest from checkpoint");
    } else {
        tracing::debug!(len, "starting digest");
    }

    let (checkpoint_tx, checkpoint_rx) = oneshot::channel();
    let (digest_tx, digest_rx) = oneshot::channel();
    let (progress_tx, progress_rx) = watch::channel(cursor as u64);

    let task = tokio::spawn(run::run_worker(run::WorkerTask {
        input,
        acc,
        cursor,
        cancel,
        options,
        checkpoint_tx,
        digest_tx,
        progress_tx,
    }));

    Ok(WorkerHandle {
        checkpoint_rx,
        digest_rx,
        progress_rx,
        task,
    })
}
