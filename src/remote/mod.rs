//! Remote store access.
//!
//! - **Store**: the [`RemoteStore`] trait the push workflow depends on
//! - **GitHub**: [`GitHubClient`], the contents-API implementation
//! - **Types**: probe results, write requests, and API errors

mod github;
mod store;
mod types;

pub use github::GitHubClient;
pub use store::RemoteStore;
pub use types::{ApiError, FileWrite, Probe, RepositoryInfo};

#[cfg(test)]
pub(crate) mod test_server;
