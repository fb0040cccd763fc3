//! Shared test doubles: recording gateway and scheduler mocks.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::events::EventContext;
use crate::github::{
    CheckRunConclusion, CheckRunStatus, GatewayError, GithubGateway, ModifiedFile,
    PullRequestData, PullRequestHead,
};
use crate::scheduler::{LintJob, LintScheduler, ScheduleError};
use crate::types::{CheckRunId, PrNumber, Sha};

/// One recorded `modify_check_run` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyCall {
    pub run: CheckRunId,
    pub status: CheckRunStatus,
    pub conclusion: Option<CheckRunConclusion>,
    pub title: String,
    pub summary: String,
}

/// A gateway that records every call and answers from canned data.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    pub created: Mutex<Vec<(String, Sha)>>,
    pub modified: Mutex<Vec<ModifyCall>>,
    pub comments: Mutex<Vec<(PrNumber, String)>>,
    pub pr: Option<PullRequestData>,
    pub files: Vec<ModifiedFile>,
}

impl RecordingGateway {
    /// Configures the PR returned by `get_pull_request`.
    pub fn with_pr(mut self, number: u64, user: &str, repo: &str, branch: &str) -> Self {
        self.pr = Some(PullRequestData {
            number: PrNumber(number),
            head: PullRequestHead {
                user_login: user.to_string(),
                repo_name: repo.to_string(),
                branch: branch.to_string(),
            },
        });
        self
    }

    /// Configures the modified-files listing.
    pub fn with_files(mut self, files: Vec<ModifiedFile>) -> Self {
        self.files = files;
        self
    }
}

#[async_trait]
impl GithubGateway for RecordingGateway {
    async fn create_check_run(
        &self,
        title: &str,
        head_sha: &Sha,
    ) -> Result<CheckRunId, GatewayError> {
        let mut created = self.created.lock().unwrap();
        created.push((title.to_string(), head_sha.clone()));
        Ok(CheckRunId(created.len() as u64))
    }

    async fn modify_check_run(
        &self,
        run: CheckRunId,
        status: CheckRunStatus,
        conclusion: Option<CheckRunConclusion>,
        output_title: &str,
        output_summary: &str,
    ) -> Result<(), GatewayError> {
        self.modified.lock().unwrap().push(ModifyCall {
            run,
            status,
            conclusion,
            title: output_title.to_string(),
            summary: output_summary.to_string(),
        });
        Ok(())
    }

    async fn get_pull_request(
        &self,
        number: PrNumber,
    ) -> Result<Option<PullRequestData>, GatewayError> {
        Ok(self.pr.clone().filter(|pr| pr.number == number))
    }

    async fn get_pr_modified_files(
        &self,
        _number: PrNumber,
    ) -> Result<Vec<ModifiedFile>, GatewayError> {
        Ok(self.files.clone())
    }

    async fn post_comment(&self, number: PrNumber, body: &str) -> Result<(), GatewayError> {
        self.comments
            .lock()
            .unwrap()
            .push((number, body.to_string()));
        Ok(())
    }
}

/// A scheduler that records jobs, or refuses them when `closed`.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub jobs: Mutex<Vec<LintJob>>,
    closed: bool,
}

impl RecordingScheduler {
    /// A scheduler whose queue is gone; every schedule call fails.
    pub fn closed() -> Self {
        RecordingScheduler {
            jobs: Mutex::new(Vec::new()),
            closed: true,
        }
    }
}

#[async_trait]
impl LintScheduler for RecordingScheduler {
    async fn schedule(&self, job: LintJob) -> Result<(), ScheduleError> {
        if self.closed {
            return Err(ScheduleError::QueueClosed);
        }
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

/// Builds an `EventContext` over the given mocks.
pub fn test_context(gateway: RecordingGateway, scheduler: RecordingScheduler) -> EventContext {
    EventContext {
        gateway: Arc::new(gateway),
        scheduler: Arc::new(scheduler),
    }
}
