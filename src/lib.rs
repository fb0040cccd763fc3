//! Recipe Bot - A GitHub bot that routes webhook events and gates recipe
//! linting through the Checks API.
//!
//! This library provides the event router, the comment-command dispatcher,
//! and the check-run lifecycle orchestrator, plus the boundary traits for the
//! platform API gateway and the lint-task scheduler.

pub mod checks;
pub mod commands;
pub mod config;
pub mod events;
pub mod github;
pub mod handlers;
pub mod scheduler;
pub mod server;
pub mod types;

#[cfg(test)]
pub mod test_utils;
