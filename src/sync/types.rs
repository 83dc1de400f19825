//! Sync types for the push workflow.
//!
//! These types carry a single file from discovery through the upload
//! decision, plus the per-run counters reported at the end.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Git blob object id: 40 lowercase hex characters.
///
/// Computed locally by [`crate::sync::blob_id`] and returned verbatim by the
/// GitHub contents API, so the two compare as opaque tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(String);

impl BlobId {
    /// Wrap a hex digest, normalizing to lowercase.
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, the way git abbreviates object ids.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate file found by the walker, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path on disk.
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated. Used as the remote key.
    pub relative_path: String,
}

/// A candidate file with its content loaded.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub content: Vec<u8>,
}

impl LocalFile {
    /// Read the content of a walked file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn load(source: SourceFile) -> std::io::Result<Self> {
        let content = std::fs::read(&source.path)?;
        Ok(Self {
            path: source.path,
            relative_path: source.relative_path,
            content,
        })
    }
}

/// What the remote knows about a path that exists there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileMetadata {
    /// Current blob id; doubles as the optimistic-concurrency token on update.
    pub sha: BlobId,
}

/// Upload decision for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadDecision {
    /// Remote content is byte-identical.
    Skip,
    /// Nothing exists at the remote path.
    Create,
    /// Remote content exists and differs.
    Update,
}

/// Terminal state of one filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeKind {
    Created,
    Updated,
    Unchanged,
    WouldCreate,
    WouldUpdate,
    Failed { reason: String },
    /// Extension did not match; never read or hashed.
    NotMatching,
}

/// Outcome of processing one filesystem entry, reported as it happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: String,
    #[serde(flatten)]
    pub kind: OutcomeKind,
}

/// Counters for a single push run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// New files written to the remote.
    pub created: usize,
    /// Existing remote files overwritten.
    pub updated: usize,
    /// Matching files whose content already matched the remote.
    pub unchanged: usize,
    /// Files that could not be read, walked, or written.
    pub failed: usize,
    /// Entries skipped because the extension did not match.
    pub not_matching: usize,
    /// True when no writes were issued; created/updated count would-be writes.
    pub dry_run: bool,
}

impl RunSummary {
    /// Apply one outcome to the counters.
    pub fn record(&mut self, kind: &OutcomeKind) {
        match kind {
            OutcomeKind::Created | OutcomeKind::WouldCreate => self.created += 1,
            OutcomeKind::Updated | OutcomeKind::WouldUpdate => self.updated += 1,
            OutcomeKind::Unchanged => self.unchanged += 1,
            OutcomeKind::Failed { .. } => self.failed += 1,
            OutcomeKind::NotMatching => self.not_matching += 1,
        }
    }

    /// All skipped entries, unchanged or not matching.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.unchanged + self.not_matching
    }

    /// Total filesystem entries processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.updated + self.failed + self.skipped()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
