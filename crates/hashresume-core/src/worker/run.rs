//! The worker's absorption loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};

use crate::accumulator::Accumulator;
use crate::checkpoint::HashState;
use crate::control::CancelToken;

use super::WorkerOptions;

/// Everything the spawned task owns. Dropping it closes both result channels.
pub(super) struct WorkerTask<A: Accumulator> {
    pub(super) input: Arc<[u8]>,
    pub(super) acc: A,
    pub(super) cursor: usize,
    pub(super) cancel: CancelToken,
    pub(super) options: WorkerOptions,
    pub(super) checkpoint_tx: oneshot::Sender<HashState>,
    pub(super) digest_tx: oneshot::Sender<A::Output>,
    pub(super) progress_tx: watch::Sender<u64>,
}

/// Absorb one unit per iteration until the input is exhausted or cancellation
/// is observed. Cancellation is checked first on every iteration.
pub(super) async fn run_worker<A: Accumulator>(task: WorkerTask<A>) {
    let WorkerTask {
        input,
        mut acc,
        mut cursor,
        cancel,
        options,
        checkpoint_tx,
        digest_tx,
        progress_tx,
    } = task;
    let unit = options.unit_size.get();

    loop {
        if cancel.is_cancelled() {
            let state = HashState::new(cursor as u64, acc.export_state());
            tracing::info!(offset = cursor, len = input.len(), "digest stopped by cancellation");
            if checkpoint_tx.send(state).is_err() {
                tracing::debug!("checkpoint receiver dropped before delivery");
            }
            return;
        }

        if cursor < input.len() {
            let end = cursor.saturating_add(unit).min(input.len());
            acc.absorb(&input[cursor..end]);
            cursor = end;
            tracing::trace!(cursor, "absorbed unit");
            progress_tx.send_replace(cursor as u64);
            pace(options.pace, &cancel).await;
        } else {
            let digest = acc.finalize();
            tracing::debug!(len = input.len(), "digest complete");
            if digest_tx.send(digest).is_err() {
                tracing::debug!("digest receiver dropped before delivery");
            }
            return;
        }
    }
}

/// Wait out the per-unit delay, returning early if cancelled.
async fn pace(delay: Option<Duration>, cancel: &CancelToken) {
    match delay {
        Some(d) if !d.is_zero() => {
            tokio::select! {
                _ = tokio::time::sleep(d) => {}
                _ = cancel.cancelled() => {}
            }
        }
        _ => tokio::task::yield_now().await,
    }
}
