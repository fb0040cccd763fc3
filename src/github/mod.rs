//! The platform API gateway boundary.
//!
//! `GithubGateway` is the trait the core consumes; `OctocrabGateway` is the
//! octocrab-backed implementation scoped to a single repository. The
//! gateway never caches check-run state: the platform is the single source
//! of truth, and this core only issues well-formed requests.

pub mod client;
pub mod error;
pub mod gateway;

pub use client::OctocrabGateway;
pub use error::GatewayError;
pub use gateway::{
    CheckRunConclusion, CheckRunStatus, GithubGateway, ModifiedFile, PullRequestData,
    PullRequestHead,
};
