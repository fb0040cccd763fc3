//! The check-run state machine.
//!
//! Per `(head_sha)` lineage the platform-owned check run moves through
//! `no-check-run → queued (created) → completed(neutral|success|failure)`.
//! This core never caches check-run state; it only issues create/modify
//! requests and the platform remains the single source of truth.
//!
//! # Policy table
//!
//! | Condition | check-run state | Conclusion |
//! |-----------|-----------------|------------|
//! | suite has no PRs | (none created) | — |
//! | run created, no associated PRs | completed | neutral |
//! | run created, PR lookup empty | completed | neutral |
//! | run created, no recipe-manifest files changed | completed | success |
//! | run created, ≥1 recipe-manifest file changed | queued (scheduled) | pending |
//! | app-id mismatch on check_run event | ignored | — |
//!
//! Creates happen only on `check_suite` activity; `check_run` activity only
//! modifies (or, for `rerequested`, creates a fresh run — never resumes the
//! old one). The app-id guard keeps the bot from reacting to other apps'
//! check runs and from looping on runs its own modifications spawn.

use tracing::{error, info};

use crate::events::{Envelope, HandlerError};
use crate::github::{CheckRunConclusion, CheckRunStatus, GithubGateway, ModifiedFile};
use crate::scheduler::{LintJob, LintScheduler};
use crate::types::{AppId, CheckRunId, InstallationId, PrInfo, PrNumber, Sha};

/// Title of the check run the bot creates.
pub const LINT_CHECK_TITLE: &str = "Linting Recipe(s)";

/// The recipe-manifest filename whose modification triggers linting.
pub const RECIPE_MANIFEST: &str = "meta.yaml";

/// Drives check-run lifecycle for check_suite and check_run events.
///
/// Stateless apart from the configured app id; every transition reads its
/// inputs from the envelope and the platform.
#[derive(Debug, Clone)]
pub struct CheckRunOrchestrator {
    app_id: AppId,
}

impl CheckRunOrchestrator {
    pub fn new(app_id: AppId) -> Self {
        CheckRunOrchestrator { app_id }
    }

    /// Handles a `check_suite` event.
    ///
    /// Only `requested` and `rerequested` create a check run, and only when
    /// the suite has associated pull requests; a suite without PRs (e.g., a
    /// merge commit) never gets one.
    pub async fn handle_check_suite(
        &self,
        event: &Envelope,
        gateway: &dyn GithubGateway,
    ) -> Result<(), HandlerError> {
        if !matches!(event.action(), Some("requested") | Some("rerequested")) {
            return Ok(());
        }

        let has_prs = event
            .get_array("check_suite/pull_requests")
            .map(|prs| !prs.is_empty())
            .unwrap_or(false);
        if !has_prs {
            info!("check_suite event had no associated pull requests (merge?)");
            return Ok(());
        }

        self.create_check_run(event, gateway).await
    }

    /// Handles a `check_run` event.
    ///
    /// The app-id guard runs first: runs originating from other apps are
    /// ignored entirely. `rerequested` creates a fresh run (idempotent with
    /// the check_suite path); `created` executes the initiation protocol.
    pub async fn handle_check_run(
        &self,
        event: &Envelope,
        gateway: &dyn GithubGateway,
        scheduler: &dyn LintScheduler,
    ) -> Result<(), HandlerError> {
        // Ignore check runs coming from other apps.
        if event.get_u64("check_run/app/id").ok() != Some(self.app_id.0) {
            return Ok(());
        }

        match event.action() {
            Some("rerequested") => self.create_check_run(event, gateway).await,
            Some("created") => self.initiate_check_run(event, gateway, scheduler).await,
            _ => Ok(()),
        }
    }

    /// Creates a new check run bound to the event's head SHA.
    ///
    /// The SHA comes from `check_suite/head_sha`, falling back to
    /// `check_run/head_sha` on the rerequested-run path. Creation failure
    /// surfaces to the caller; retry is the platform's re-request mechanism,
    /// not this component's.
    async fn create_check_run(
        &self,
        event: &Envelope,
        gateway: &dyn GithubGateway,
    ) -> Result<(), HandlerError> {
        let head_sha = match event.get_str("check_suite/head_sha") {
            Ok(sha) => sha,
            Err(_) => event.get_str("check_run/head_sha")?,
        };
        let head_sha = Sha::new(head_sha);

        let run = gateway.create_check_run(LINT_CHECK_TITLE, &head_sha).await?;
        info!(check_run = %run, sha = head_sha.short(), "Created check run");
        Ok(())
    }

    /// The initiation protocol for a freshly created check run.
    ///
    /// A single sequential chain of platform calls; each step's outcome can
    /// short-circuit the remainder. Every branch either completes the check
    /// run or hands off to the scheduler, so the run never sticks in
    /// `queued` within the bot's own handling path.
    async fn initiate_check_run(
        &self,
        event: &Envelope,
        gateway: &dyn GithubGateway,
        scheduler: &dyn LintScheduler,
    ) -> Result<(), HandlerError> {
        let run = CheckRunId(event.get_u64("check_run/id")?);
        let head_sha = Sha::new(event.get_str("check_run/head_sha")?);
        let prs = event.get_array("check_run/check_suite/pull_requests")?;

        // A run without associated PRs belongs to a merge commit.
        let Some(first_pr) = prs.first() else {
            gateway
                .modify_check_run(
                    run,
                    CheckRunStatus::Completed,
                    Some(CheckRunConclusion::Neutral),
                    "No PRs associated",
                    "Merge commits are not linted",
                )
                .await?;
            return Ok(());
        };

        let number = PrNumber(
            first_pr
                .get("number")
                .and_then(serde_json::Value::as_u64)
                .ok_or_else(|| crate::events::MissingField {
                    path: "check_run/check_suite/pull_requests/0/number".to_string(),
                })?,
        );

        // The PR can vanish between event emission and handling.
        let Some(pr) = gateway.get_pull_request(number).await? else {
            error!(pr = %number, "No PR with this number?");
            gateway
                .modify_check_run(
                    run,
                    CheckRunStatus::Completed,
                    Some(CheckRunConclusion::Neutral),
                    "PR not found",
                    &format!("PR {} not found?", number.0),
                )
                .await?;
            return Ok(());
        };

        let files = gateway.get_pr_modified_files(number).await?;
        let recipes = recipe_paths(&files);

        // An empty diff-of-interest is success, not skip: the PR is valid
        // and needs no linting action.
        if recipes.is_empty() {
            gateway
                .modify_check_run(
                    run,
                    CheckRunStatus::Completed,
                    Some(CheckRunConclusion::Success),
                    "No recipes modified by PR",
                    "No need to check anything.",
                )
                .await?;
            return Ok(());
        }

        let installation_id = InstallationId(event.get_u64("installation/id")?);
        let pr_info = PrInfo {
            installation_id,
            owner_login: pr.head.user_login,
            repo_name: pr.head.repo_name,
            git_ref: pr.head.branch,
            recipe_paths: recipes,
            pr_number: number,
        };

        scheduler
            .schedule(LintJob {
                pr_info,
                head_sha,
                check_run: run,
            })
            .await?;
        Ok(())
    }
}

/// Filters a modified-files listing down to recipe-manifest paths.
///
/// Order-preserving; filenames are unique per diff so no dedup is needed.
fn recipe_paths(files: &[ModifiedFile]) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.filename.ends_with(&format!("/{RECIPE_MANIFEST}")))
        .map(|f| f.filename.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ModifyCall, RecordingGateway, RecordingScheduler};
    use serde_json::json;

    const APP: u64 = 12345;

    fn orchestrator() -> CheckRunOrchestrator {
        CheckRunOrchestrator::new(AppId(APP))
    }

    fn sha() -> String {
        "a".repeat(40)
    }

    fn check_suite_event(action: &str, prs: serde_json::Value) -> Envelope {
        Envelope::new(
            "check_suite",
            json!({
                "action": action,
                "check_suite": {
                    "head_sha": sha(),
                    "pull_requests": prs,
                },
            }),
        )
    }

    fn check_run_event(action: &str, app_id: u64, prs: serde_json::Value) -> Envelope {
        Envelope::new(
            "check_run",
            json!({
                "action": action,
                "check_run": {
                    "id": 77,
                    "head_sha": sha(),
                    "app": { "id": app_id },
                    "check_suite": { "pull_requests": prs },
                },
                "installation": { "id": 42 },
            }),
        )
    }

    fn file(name: &str) -> ModifiedFile {
        ModifiedFile {
            filename: name.to_string(),
        }
    }

    // ==================== check_suite transitions ====================

    #[tokio::test]
    async fn irrelevant_suite_actions_are_no_ops() {
        let gateway = RecordingGateway::default();
        for action in ["completed", "created", "published"] {
            let event = check_suite_event(action, json!([{ "number": 1 }]));
            orchestrator()
                .handle_check_suite(&event, &gateway)
                .await
                .unwrap();
        }
        assert!(gateway.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn suite_without_prs_creates_nothing() {
        let gateway = RecordingGateway::default();
        let event = check_suite_event("requested", json!([]));
        orchestrator()
            .handle_check_suite(&event, &gateway)
            .await
            .unwrap();
        assert!(gateway.created.lock().unwrap().is_empty());

        // Also when the field is missing outright
        let event = Envelope::new("check_suite", json!({"action": "requested"}));
        orchestrator()
            .handle_check_suite(&event, &gateway)
            .await
            .unwrap();
        assert!(gateway.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn requested_suite_with_prs_creates_one_run() {
        let gateway = RecordingGateway::default();
        let event = check_suite_event("requested", json!([{ "number": 1 }]));
        orchestrator()
            .handle_check_suite(&event, &gateway)
            .await
            .unwrap();

        let created = gateway.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, LINT_CHECK_TITLE);
        assert_eq!(created[0].1, Sha::new(sha()));
    }

    #[tokio::test]
    async fn rerequested_suite_also_creates() {
        let gateway = RecordingGateway::default();
        let event = check_suite_event("rerequested", json!([{ "number": 2 }]));
        orchestrator()
            .handle_check_suite(&event, &gateway)
            .await
            .unwrap();
        assert_eq!(gateway.created.lock().unwrap().len(), 1);
    }

    // ==================== app-id guard ====================

    #[tokio::test]
    async fn foreign_app_check_run_is_ignored_entirely() {
        let gateway = RecordingGateway::default();
        let scheduler = RecordingScheduler::default();
        let event = check_run_event("created", APP + 1, json!([{ "number": 1 }]));

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        assert!(gateway.created.lock().unwrap().is_empty());
        assert!(gateway.modified.lock().unwrap().is_empty());
        assert!(scheduler.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_app_id_fails_the_guard() {
        let gateway = RecordingGateway::default();
        let scheduler = RecordingScheduler::default();
        let event = Envelope::new(
            "check_run",
            json!({
                "action": "created",
                "check_run": { "id": 1, "head_sha": sha() },
            }),
        );

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        assert!(gateway.modified.lock().unwrap().is_empty());
    }

    // ==================== check_run.rerequested ====================

    #[tokio::test]
    async fn rerequested_run_creates_a_fresh_run() {
        let gateway = RecordingGateway::default();
        let scheduler = RecordingScheduler::default();
        let event = check_run_event("rerequested", APP, json!([{ "number": 1 }]));

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        // Creates via the check_run/head_sha fallback, modifies nothing
        let created = gateway.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].1, Sha::new(sha()));
        assert!(gateway.modified.lock().unwrap().is_empty());
    }

    // ==================== initiation protocol ====================

    fn assert_single_completion(
        calls: &[ModifyCall],
        conclusion: CheckRunConclusion,
        title: &str,
    ) {
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.run, CheckRunId(77));
        assert_eq!(call.status, CheckRunStatus::Completed);
        assert_eq!(call.conclusion, Some(conclusion));
        assert_eq!(call.title, title);
    }

    #[tokio::test]
    async fn created_run_without_prs_concludes_neutral() {
        let gateway = RecordingGateway::default();
        let scheduler = RecordingScheduler::default();
        let event = check_run_event("created", APP, json!([]));

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        assert_single_completion(
            &gateway.modified.lock().unwrap(),
            CheckRunConclusion::Neutral,
            "No PRs associated",
        );
        assert!(scheduler.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn created_run_with_vanished_pr_concludes_neutral() {
        let gateway = RecordingGateway::default(); // no PR configured
        let scheduler = RecordingScheduler::default();
        let event = check_run_event("created", APP, json!([{ "number": 5 }]));

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        assert_single_completion(
            &gateway.modified.lock().unwrap(),
            CheckRunConclusion::Neutral,
            "PR not found",
        );
        assert!(
            gateway.modified.lock().unwrap()[0]
                .summary
                .contains("PR 5 not found?")
        );
    }

    #[tokio::test]
    async fn created_run_without_recipe_changes_concludes_success() {
        let gateway = RecordingGateway::default()
            .with_pr(5, "alice", "recipes-fork", "bump-foo")
            .with_files(vec![file("recipes/foo/build.sh"), file("README.md")]);
        let scheduler = RecordingScheduler::default();
        let event = check_run_event("created", APP, json!([{ "number": 5 }]));

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        assert_single_completion(
            &gateway.modified.lock().unwrap(),
            CheckRunConclusion::Success,
            "No recipes modified by PR",
        );
        assert!(scheduler.jobs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn created_run_with_recipe_changes_schedules_exactly_once() {
        let gateway = RecordingGateway::default()
            .with_pr(5, "alice", "recipes-fork", "bump-foo")
            .with_files(vec![
                file("recipes/foo/meta.yaml"),
                file("recipes/foo/build.sh"),
                file("recipes/bar/meta.yaml"),
            ]);
        let scheduler = RecordingScheduler::default();
        let event = check_run_event("created", APP, json!([{ "number": 5 }]));

        orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap();

        // The check run is left queued for the scheduled task to complete
        assert!(gateway.modified.lock().unwrap().is_empty());

        let jobs = scheduler.jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.check_run, CheckRunId(77));
        assert_eq!(job.head_sha, Sha::new(sha()));
        assert_eq!(job.pr_info.pr_number, PrNumber(5));
        assert_eq!(job.pr_info.installation_id, InstallationId(42));
        assert_eq!(job.pr_info.owner_login, "alice");
        assert_eq!(job.pr_info.repo_name, "recipes-fork");
        assert_eq!(job.pr_info.git_ref, "bump-foo");
        // Order-preserving filter, non-manifest files excluded
        assert_eq!(
            job.pr_info.recipe_paths,
            vec!["recipes/foo/meta.yaml", "recipes/bar/meta.yaml"]
        );
    }

    #[tokio::test]
    async fn scheduling_failure_propagates_as_an_error() {
        let gateway = RecordingGateway::default()
            .with_pr(5, "alice", "recipes-fork", "bump-foo")
            .with_files(vec![file("recipes/foo/meta.yaml")]);
        let scheduler = RecordingScheduler::closed();
        let event = check_run_event("created", APP, json!([{ "number": 5 }]));

        let err = orchestrator()
            .handle_check_run(&event, &gateway, &scheduler)
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Schedule(_)));
    }

    // ==================== recipe path filter ====================

    #[test]
    fn recipe_filter_keeps_manifest_paths_in_order() {
        let files = vec![
            file("recipes/foo/meta.yaml"),
            file("recipes/foo/build.sh"),
            file("recipes/bar/meta.yaml"),
            file("docs/meta.yaml.md"),
        ];
        assert_eq!(
            recipe_paths(&files),
            vec!["recipes/foo/meta.yaml", "recipes/bar/meta.yaml"]
        );
    }

    #[test]
    fn bare_manifest_at_repo_root_is_not_a_recipe() {
        // The filter requires a directory component, matching the
        // recipes/<name>/meta.yaml layout.
        assert!(recipe_paths(&[file("meta.yaml")]).is_empty());
    }
}
