//! Event handlers and router construction.
//!
//! The router is built explicitly, in one place, at process start: every
//! handler registration is enumerated in `build_event_router` and the
//! resulting router is passed by reference into the delivery-processing
//! pipeline. There are no hidden process-wide registries, and the handler
//! set is unit-testable in isolation.
//!
//! # Event Types
//!
//! | Event | Handler |
//! |-------|---------|
//! | `issue_comment.created` | `CommentCreated` - extracts and dispatches bot commands |
//! | `check_suite` (any action) | `CheckSuiteActivity` - creates check runs |
//! | `check_run` (any action) | `CheckRunActivity` - drives the initiation protocol |

mod check_run;
mod check_suite;
mod issue_comment;

use std::sync::Arc;

pub use check_run::CheckRunActivity;
pub use check_suite::CheckSuiteActivity;
pub use issue_comment::CommentCreated;

use crate::commands::{BotAlias, CommandRegistry};
use crate::events::EventRouter;
use crate::types::AppId;

/// Builds the event router with every handler the bot registers.
pub fn build_event_router(
    app_id: AppId,
    alias: BotAlias,
    commands: Arc<CommandRegistry>,
) -> EventRouter {
    let mut router = EventRouter::new();
    router.register(
        "issue_comment",
        Some("created"),
        CommentCreated::new(alias, commands),
    );
    router.register("check_suite", None, CheckSuiteActivity::new(app_id));
    router.register("check_run", None, CheckRunActivity::new(app_id));
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingGateway, RecordingScheduler, test_context};
    use crate::events::Envelope;
    use serde_json::json;

    fn router() -> EventRouter {
        build_event_router(
            AppId(12345),
            BotAlias::new("bioconda", "bot"),
            Arc::new(CommandRegistry::new()),
        )
    }

    #[tokio::test]
    async fn full_router_routes_check_suite_to_creation() {
        let ctx = test_context(RecordingGateway::default(), RecordingScheduler::default());
        let event = Envelope::new(
            "check_suite",
            json!({
                "action": "requested",
                "check_suite": {
                    "head_sha": "a".repeat(40),
                    "pull_requests": [{ "number": 1 }],
                },
            }),
        );

        let report = router().dispatch(&event, &ctx).await;
        assert_eq!(report.matched, 1);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn unrelated_events_match_nothing() {
        let ctx = test_context(RecordingGateway::default(), RecordingScheduler::default());
        let event = Envelope::new("push", json!({}));
        let report = router().dispatch(&event, &ctx).await;
        assert_eq!(report.matched, 0);
    }
}
