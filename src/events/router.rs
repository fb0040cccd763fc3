//! The `(type, action)` event router.
//!
//! The router holds the static registration table mapping `(event type,
//! action-or-any)` patterns to handlers. It is populated once at process
//! start (see `handlers::build_event_router`) and read-only thereafter, so
//! it is safe to share across concurrently processed deliveries.
//!
//! Dispatch is fire-and-collect: every matching handler runs, in
//! registration order, and one handler's failure never suppresses another's
//! side effects. Failures are collected into the `DispatchReport` and logged
//! by the caller.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

use crate::commands::CommandError;
use crate::github::{GatewayError, GithubGateway};
use crate::scheduler::{LintScheduler, ScheduleError};

use super::envelope::{Envelope, MissingField};

/// Errors that can occur during event handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required payload field was absent.
    #[error(transparent)]
    MissingField(#[from] MissingField),

    /// A platform API call failed.
    #[error("GitHub API call failed: {0}")]
    Gateway(#[from] GatewayError),

    /// Handing work to the lint scheduler failed.
    ///
    /// Distinct from the "no recipes found" terminal state: this is an
    /// infrastructure problem, not a correct outcome.
    #[error("failed to schedule lint task: {0}")]
    Schedule(#[from] ScheduleError),

    /// A registered comment command failed.
    #[error("command failed: {0}")]
    Command(#[from] CommandError),
}

/// Collaborators passed through to every handler, unchanged.
#[derive(Clone)]
pub struct EventContext {
    /// The platform API gateway.
    pub gateway: Arc<dyn GithubGateway>,

    /// The lint-task scheduler.
    pub scheduler: Arc<dyn LintScheduler>,
}

/// A handler for one `(type, action)` pattern.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &Envelope, ctx: &EventContext) -> Result<(), HandlerError>;
}

struct Route {
    event_type: String,
    /// `None` matches any action for the event type.
    action: Option<String>,
    handler: Box<dyn EventHandler>,
}

impl Route {
    fn matches(&self, event: &Envelope) -> bool {
        if self.event_type != event.event_type() {
            return false;
        }
        match &self.action {
            None => true,
            Some(action) => event.action() == Some(action.as_str()),
        }
    }
}

/// Outcome of dispatching one envelope.
///
/// `matched` counts the handlers that ran; `failures` records each handler
/// error alongside the `(type, action)` pattern it was registered under.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub matched: usize,
    pub failures: Vec<(String, HandlerError)>,
}

impl DispatchReport {
    /// True if every matched handler completed without error.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Routes envelopes to the handlers registered for their `(type, action)`.
#[derive(Default)]
pub struct EventRouter {
    routes: Vec<Route>,
}

impl EventRouter {
    pub fn new() -> Self {
        EventRouter { routes: Vec::new() }
    }

    /// Registers a handler for an event type and optional action.
    ///
    /// `action = None` matches any action for the type. Multiple handlers
    /// may be registered for the same pattern; all of them run on a match.
    pub fn register(
        &mut self,
        event_type: impl Into<String>,
        action: Option<&str>,
        handler: impl EventHandler + 'static,
    ) {
        self.routes.push(Route {
            event_type: event_type.into(),
            action: action.map(str::to_string),
            handler: Box::new(handler),
        });
    }

    /// Dispatches an envelope to every matching handler.
    ///
    /// Handlers run sequentially in registration order. A failing handler is
    /// recorded and the remaining matches still run. Zero matches is a
    /// no-op, logged at debug.
    pub async fn dispatch(&self, event: &Envelope, ctx: &EventContext) -> DispatchReport {
        let mut report = DispatchReport::default();

        for route in self.routes.iter().filter(|r| r.matches(event)) {
            report.matched += 1;
            if let Err(err) = route.handler.handle(event, ctx).await {
                let pattern = match &route.action {
                    Some(action) => format!("{}.{}", route.event_type, action),
                    None => route.event_type.clone(),
                };
                error!(
                    event_type = event.event_type(),
                    action = event.action().unwrap_or(""),
                    pattern = %pattern,
                    %err,
                    "Event handler failed"
                );
                report.failures.push((pattern, err));
            }
        }

        if report.matched == 0 {
            debug!(
                event_type = event.event_type(),
                action = event.action().unwrap_or(""),
                "No handler registered for event"
            );
        }

        report
    }
}
