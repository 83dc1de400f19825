//! Remote store trait.
//!
//! The push workflow only talks to the remote through this trait, so tests
//! can substitute an in-memory store for GitHub.

use super::types::{ApiError, FileWrite, Probe, RepositoryInfo};

/// A content store addressed by path, with git blob ids as content tokens.
pub trait RemoteStore: Send + Sync {
    /// Fetch repository metadata. Used as the startup reachability check.
    fn repository(
        &self,
    ) -> impl std::future::Future<Output = Result<RepositoryInfo, ApiError>> + Send;

    /// Look up the current blob id at `path`.
    fn probe(&self, path: &str) -> impl std::future::Future<Output = Probe> + Send;

    /// Create or update a file. Updates must carry the prior blob id.
    fn put(
        &self,
        write: &FileWrite,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
