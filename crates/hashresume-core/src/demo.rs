//! Three-act checkpoint/resume demonstration.
//!
//! 1. Digest the input synchronously.
//! 2. Start a worker and cancel it after a deadline, keeping its checkpoint.
//! 3. Start a second worker from that checkpoint and run it to completion.
//!
//! The digests from acts 1 and 3 must be identical.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::checkpoint::HashState;
use crate::checksum;
use crate::control::CancelToken;
use crate::md5::Md5Digest;
use crate::worker::{self, Outcome, WorkerOptions};

/// Timing for the demonstration.
#[derive(Debug, Clone, Copy)]
pub struct DemoOptions {
    /// Deadline after which the first worker is cancelled.
    pub cancel_after: Duration,
    pub worker: WorkerOptions,
}

/// What each act produced.
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// Act 1.
    pub sync_digest: Md5Digest,
    /// Act 2, when the deadline hit before the input was exhausted.
    pub checkpoint: Option<HashState>,
    /// Act 2, when the worker finished before the deadline.
    pub interrupted_digest: Option<Md5Digest>,
    /// Act 3.
    pub resumed_digest: Md5Digest,
}

impl DemoReport {
    /// True when the resumed digest equals the synchronous one byte-for-byte.
    pub fn matches(&self) -> bool {
        self.sync_digest == self.resumed_digest
    }
}

pub async fn run(input: &[u8], opts: &DemoOptions) -> Result<DemoReport> {
    let input: Arc<[u8]> = Arc::from(input);

    let sync_digest = checksum::md5(&input);
    tracing::debug!(digest = %sync_digest, "act 1: synchronous digest");

    let cancel = CancelToken::new();
    let deadline = cancel.cancel_after(opts.cancel_after);
    let first = worker::start_resumable_digest(Arc::clone(&input), None, cancel, opts.worker)?
        .wait()
        .await?;
    deadline.abort();

    let (checkpoint, interrupted_digest) = match first {
        Outcome::Checkpoint(state) => {
            tracing::debug!(offset = state.offset(), "act 2: checkpoint captured");
            (Some(state), None)
        }
        Outcome::Digest(digest) => {
            tracing::debug!(%digest, "act 2: finished before the deadline");
            (None, Some(digest))
        }
    };

    let resumed =
        worker::start_resumable_digest(input, checkpoint.clone(), CancelToken::new(), opts.worker)?
            .wait()
            .await?;
    let resumed_digest = match resumed {
        Outcome::Digest(digest) => digest,
        Outcome::Checkpoint(state) => {
            bail!("resumed run stopped unexpectedly at offset {}", state.offset())
        }
    };
    tracing::debug!(digest = %resumed_digest, "act 3: resumed digest");

    let report = DemoReport {
        sync_digest,
        checkpoint,
        interrupted_digest,
        resumed_digest,
    };
    if !report.matches() {
        tracing::warn!(
            sync = %report.sync_digest,
            resumed = %report.resumed_digest,
            "resumed digest differs from synchronous digest"
        );
    }
    Ok(report)
}
