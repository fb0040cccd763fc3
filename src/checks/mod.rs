//! Check-run lifecycle orchestration.

pub mod orchestrator;

pub use orchestrator::{CheckRunOrchestrator, LINT_CHECK_TITLE, RECIPE_MANIFEST};
