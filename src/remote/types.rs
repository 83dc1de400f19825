//! Wire and result types for the GitHub contents API.

use serde::{Deserialize, Serialize};

use crate::sync::{BlobId, RemoteFileMetadata};

/// Failure of a single API call, carrying whatever the server sent back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not what we expected.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, if the server responded at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// True for the statuses GitHub uses when the `sha` precondition is stale.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409 | 422))
    }
}

/// Result of looking up a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// The path exists remotely.
    Found(RemoteFileMetadata),
    /// 404: nothing at that path.
    Absent,
    /// The lookup itself failed. Treated as absent for the upload decision.
    Failed(ApiError),
}

impl Probe {
    /// Remote metadata for the decision; failures count as absence.
    #[must_use]
    pub fn into_metadata(self) -> Option<RemoteFileMetadata> {
        match self {
            Self::Found(meta) => Some(meta),
            Self::Absent | Self::Failed(_) => None,
        }
    }
}

/// A create or update of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    /// Remote path, `/`-separated.
    pub path: String,
    /// Commit message.
    pub message: String,
    /// Base64-encoded file bytes.
    pub content: String,
    /// Prior blob id; present only for updates.
    pub sha: Option<BlobId>,
}

/// Repository metadata from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub private: bool,
}

/// Body of `GET /repos/{owner}/{repo}/contents/{path}` for a file.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentsResponse {
    pub sha: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub(crate) struct PutContentsBody<'a> {
    pub message: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<&'a str>,
}
