//! The `GithubGateway` trait and its wire types.
//!
//! This is the boundary contract the orchestrator and command handlers are
//! written against. The real implementation lives in `client.rs`; tests use
//! a recording mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{CheckRunId, PrNumber, Sha};

use super::error::GatewayError;

/// Lifecycle status of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    Queued,
    InProgress,
    Completed,
}

impl CheckRunStatus {
    /// Returns the GitHub API string for this status.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CheckRunStatus::Queued => "queued",
            CheckRunStatus::InProgress => "in_progress",
            CheckRunStatus::Completed => "completed",
        }
    }
}

/// Conclusion of a completed check run.
///
/// Only meaningful when status is `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    TimedOut,
    ActionRequired,
    Skipped,
}

impl CheckRunConclusion {
    /// Returns the GitHub API string for this conclusion.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            CheckRunConclusion::Success => "success",
            CheckRunConclusion::Failure => "failure",
            CheckRunConclusion::Neutral => "neutral",
            CheckRunConclusion::Cancelled => "cancelled",
            CheckRunConclusion::TimedOut => "timed_out",
            CheckRunConclusion::ActionRequired => "action_required",
            CheckRunConclusion::Skipped => "skipped",
        }
    }
}

/// The head side of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestHead {
    /// Login of the user owning the head repository.
    pub user_login: String,

    /// Name of the head repository.
    pub repo_name: String,

    /// The head branch ref.
    pub branch: String,
}

/// The subset of PR data this core reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestData {
    pub number: PrNumber,
    pub head: PullRequestHead,
}

/// One file entry from a PR's modified-files listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedFile {
    pub filename: String,
}

/// Platform API operations this core consumes.
///
/// Implementations are scoped to one repository; operations take no
/// owner/repo parameters.
#[async_trait]
pub trait GithubGateway: Send + Sync {
    /// Creates a check run bound to a head SHA, returning its platform id.
    async fn create_check_run(&self, title: &str, head_sha: &Sha)
    -> Result<CheckRunId, GatewayError>;

    /// Modifies an existing check run.
    ///
    /// `conclusion` is only meaningful alongside `Completed` status.
    async fn modify_check_run(
        &self,
        run: CheckRunId,
        status: CheckRunStatus,
        conclusion: Option<CheckRunConclusion>,
        output_title: &str,
        output_summary: &str,
    ) -> Result<(), GatewayError>;

    /// Fetches a PR by number; `Ok(None)` when it does not exist.
    async fn get_pull_request(
        &self,
        number: PrNumber,
    ) -> Result<Option<PullRequestData>, GatewayError>;

    /// Lists the files modified by a PR.
    async fn get_pr_modified_files(
        &self,
        number: PrNumber,
    ) -> Result<Vec<ModifiedFile>, GatewayError>;

    /// Posts a comment on an issue or PR.
    ///
    /// Command handlers use this to report results back to the user.
    async fn post_comment(&self, number: PrNumber, body: &str) -> Result<(), GatewayError>;
}
