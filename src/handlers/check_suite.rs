//! Handler for `check_suite` webhook events.

use async_trait::async_trait;

use crate::checks::CheckRunOrchestrator;
use crate::events::{Envelope, EventContext, EventHandler, HandlerError};
use crate::types::AppId;

/// Routes check_suite activity into the orchestrator.
///
/// `requested` and `rerequested` create a check run for suites with
/// associated PRs; all other actions are no-ops.
pub struct CheckSuiteActivity {
    orchestrator: CheckRunOrchestrator,
}

impl CheckSuiteActivity {
    pub fn new(app_id: AppId) -> Self {
        CheckSuiteActivity {
            orchestrator: CheckRunOrchestrator::new(app_id),
        }
    }
}

#[async_trait]
impl EventHandler for CheckSuiteActivity {
    async fn handle(&self, event: &Envelope, ctx: &EventContext) -> Result<(), HandlerError> {
        self.orchestrator
            .handle_check_suite(event, ctx.gateway.as_ref())
            .await
    }
}
