//! The unit of work handed to the lint scheduler.

use serde::{Deserialize, Serialize};

use super::{InstallationId, PrNumber};

/// Everything the lint task needs to check out and lint a PR's recipes.
///
/// Constructed once per check-run activation from the PR's head
/// repository/branch/user and the filtered recipe paths, then handed
/// opaquely to the scheduler. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrInfo {
    /// The GitHub App installation the event arrived under.
    pub installation_id: InstallationId,

    /// Login of the user owning the PR's head repository.
    pub owner_login: String,

    /// Name of the PR's head repository.
    pub repo_name: String,

    /// The PR's head branch ref.
    pub git_ref: String,

    /// Recipe-manifest paths changed by the PR, in diff order.
    ///
    /// Filenames are unique per diff, so this behaves as an ordered set.
    pub recipe_paths: Vec<String>,

    /// The PR number in the upstream repository.
    pub pr_number: PrNumber,
}
