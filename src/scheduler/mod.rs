//! The lint-task scheduler boundary.
//!
//! The orchestrator hands a `LintJob` to a `LintScheduler` and moves on;
//! running the lint and completing the check run afterwards is the
//! downstream task's responsibility. The in-process implementation is a
//! bounded mpsc channel: the send is the hand-off, and a closed channel is
//! an explicit scheduling error, never a silent drop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::types::{CheckRunId, PrInfo, Sha};

/// One unit of linting work, keyed by PR identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintJob {
    /// The PR to lint.
    pub pr_info: PrInfo,

    /// The head SHA the check run is bound to.
    pub head_sha: Sha,

    /// The check run the lint task must complete when it finishes.
    pub check_run: CheckRunId,
}

/// Errors that can occur when enqueueing a lint job.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The lint queue's receiver is gone.
    #[error("lint queue closed")]
    QueueClosed,
}

/// Accepts lint jobs for asynchronous execution.
#[async_trait]
pub trait LintScheduler: Send + Sync {
    /// Enqueues a job. Fire-and-forget from the caller's perspective, but
    /// enqueue failures must surface.
    async fn schedule(&self, job: LintJob) -> Result<(), ScheduleError>;
}

/// Channel buffer size for the in-process lint queue.
const LINT_QUEUE_BUFFER: usize = 100;

/// An mpsc-backed scheduler handing jobs to an in-process worker.
#[derive(Clone)]
pub struct ChannelScheduler {
    tx: mpsc::Sender<LintJob>,
}

/// Creates the in-process lint queue, returning the scheduler half and the
/// receiver the lint worker drains.
pub fn lint_queue() -> (ChannelScheduler, mpsc::Receiver<LintJob>) {
    let (tx, rx) = mpsc::channel(LINT_QUEUE_BUFFER);
    (ChannelScheduler { tx }, rx)
}

#[async_trait]
impl LintScheduler for ChannelScheduler {
    async fn schedule(&self, job: LintJob) -> Result<(), ScheduleError> {
        info!(
            pr = %job.pr_info.pr_number,
            check_run = %job.check_run,
            sha = job.head_sha.short(),
            recipes = job.pr_info.recipe_paths.len(),
            "Scheduling lint task"
        );
        self.tx
            .send(job)
            .await
            .map_err(|_| ScheduleError::QueueClosed)
    }
}
