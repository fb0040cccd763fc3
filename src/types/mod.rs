//! Core domain types for the recipe bot.

mod ids;
mod pr_info;

pub use ids::{AppId, CheckRunId, InstallationId, PrNumber, RepoId, Sha};
pub use pr_info::PrInfo;
