//! Handler for `check_run` webhook events.

use async_trait::async_trait;

use crate::checks::CheckRunOrchestrator;
use crate::events::{Envelope, EventContext, EventHandler, HandlerError};
use crate::types::AppId;

/// Routes check_run activity into the orchestrator.
///
/// The app-id guard inside the orchestrator filters out runs created by
/// other apps before any platform call is made.
pub struct CheckRunActivity {
    orchestrator: CheckRunOrchestrator,
}

impl CheckRunActivity {
    pub fn new(app_id: AppId) -> Self {
        CheckRunActivity {
            orchestrator: CheckRunOrchestrator::new(app_id),
        }
    }
}

#[async_trait]
impl EventHandler for CheckRunActivity {
    async fn handle(&self, event: &Envelope, ctx: &EventContext) -> Result<(), HandlerError> {
        self.orchestrator
            .handle_check_run(event, ctx.gateway.as_ref(), ctx.scheduler.as_ref())
            .await
    }
}
