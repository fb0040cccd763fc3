//! Octocrab-backed gateway scoped to a specific repository.
//!
//! All operations target the repository the client was constructed with,
//! matching the gateway trait's repo-less operation signatures. Requests go
//! through octocrab's generic REST methods with explicit payload structs so
//! the request bodies match the GitHub REST API exactly.

use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;

use crate::types::{CheckRunId, PrNumber, RepoId, Sha};

use super::error::GatewayError;
use super::gateway::{
    CheckRunConclusion, CheckRunStatus, GithubGateway, ModifiedFile, PullRequestData,
    PullRequestHead,
};

/// A GitHub API gateway scoped to a single repository.
#[derive(Clone)]
pub struct OctocrabGateway {
    client: Octocrab,
    repo: RepoId,
}

impl OctocrabGateway {
    /// Creates a gateway from a pre-configured octocrab instance.
    ///
    /// Use this for custom authentication (e.g., GitHub App installation
    /// tokens).
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Creates a gateway from a personal access token.
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client, repo))
    }

    /// Returns the repository this gateway is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    fn route(&self, tail: &str) -> String {
        format!("/repos/{}/{}/{}", self.repo.owner, self.repo.repo, tail)
    }
}

impl std::fmt::Debug for OctocrabGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabGateway")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

// Response payloads, kept to the fields this core reads.

#[derive(Debug, Deserialize)]
struct CheckRunPayload {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct PrPayload {
    number: u64,
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    branch: String,
    user: Option<LoginPayload>,
    repo: Option<NamePayload>,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct NamePayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FilePayload {
    filename: String,
}

#[async_trait::async_trait]
impl GithubGateway for OctocrabGateway {
    async fn create_check_run(
        &self,
        title: &str,
        head_sha: &Sha,
    ) -> Result<CheckRunId, GatewayError> {
        let body = json!({
            "name": title,
            "head_sha": head_sha.as_str(),
        });
        let run: CheckRunPayload = self
            .client
            .post(self.route("check-runs"), Some(&body))
            .await
            .map_err(GatewayError::from_octocrab)?;
        Ok(CheckRunId(run.id))
    }

    async fn modify_check_run(
        &self,
        run: CheckRunId,
        status: CheckRunStatus,
        conclusion: Option<CheckRunConclusion>,
        output_title: &str,
        output_summary: &str,
    ) -> Result<(), GatewayError> {
        let mut body = json!({
            "status": status.as_api_str(),
            "output": {
                "title": output_title,
                "summary": output_summary,
            },
        });
        if let Some(conclusion) = conclusion {
            body["conclusion"] = json!(conclusion.as_api_str());
        }
        let _updated: CheckRunPayload = self
            .client
            .patch(self.route(&format!("check-runs/{}", run.0)), Some(&body))
            .await
            .map_err(GatewayError::from_octocrab)?;
        Ok(())
    }

    async fn get_pull_request(
        &self,
        number: PrNumber,
    ) -> Result<Option<PullRequestData>, GatewayError> {
        let result: Result<PrPayload, octocrab::Error> = self
            .client
            .get(self.route(&format!("pulls/{}", number.0)), None::<&()>)
            .await;

        let pr = match result {
            Ok(pr) => pr,
            Err(err) => {
                let err = GatewayError::from_octocrab(err);
                if err.is_not_found() {
                    return Ok(None);
                }
                return Err(err);
            }
        };

        // Head user/repo can be absent when the fork was deleted; such a PR
        // cannot be linted, so treat it like a missing PR.
        let (Some(user), Some(repo)) = (pr.head.user, pr.head.repo) else {
            return Ok(None);
        };

        Ok(Some(PullRequestData {
            number: PrNumber(pr.number),
            head: PullRequestHead {
                user_login: user.login,
                repo_name: repo.name,
                branch: pr.head.branch,
            },
        }))
    }

    async fn get_pr_modified_files(
        &self,
        number: PrNumber,
    ) -> Result<Vec<ModifiedFile>, GatewayError> {
        let files: Vec<FilePayload> = self
            .client
            .get(
                self.route(&format!("pulls/{}/files?per_page=100", number.0)),
                None::<&()>,
            )
            .await
            .map_err(GatewayError::from_octocrab)?;
        Ok(files
            .into_iter()
            .map(|f| ModifiedFile { filename: f.filename })
            .collect())
    }

    async fn post_comment(&self, number: PrNumber, body: &str) -> Result<(), GatewayError> {
        let payload = json!({ "body": body });
        let _comment: serde_json::Value = self
            .client
            .post(
                self.route(&format!("issues/{}/comments", number.0)),
                Some(&payload),
            )
            .await
            .map_err(GatewayError::from_octocrab)?;
        Ok(())
    }
}
