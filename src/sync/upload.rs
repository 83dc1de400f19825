//! Write request construction.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;

use crate::remote::FileWrite;
use crate::sync::types::{LocalFile, RemoteFileMetadata, UploadDecision};

/// Commit message for a write, e.g. `Add joins/a.sql on 2024-05-01`.
#[must_use]
pub fn commit_message(decision: UploadDecision, path: &str, date: NaiveDate) -> String {
    let verb = match decision {
        UploadDecision::Update => "Update",
        UploadDecision::Create | UploadDecision::Skip => "Add",
    };
    format!("{verb} {path} on {}", date.format("%Y-%m-%d"))
}

/// Build the write for a file, or `None` when the decision is `Skip`.
///
/// Updates carry the probed blob id so GitHub rejects the write if the file
/// changed since the probe.
#[must_use]
pub fn build_write(
    file: &LocalFile,
    decision: UploadDecision,
    remote: Option<&RemoteFileMetadata>,
    date: NaiveDate,
) -> Option<FileWrite> {
    let sha = match decision {
        UploadDecision::Skip => return None,
        UploadDecision::Create => None,
        UploadDecision::Update => remote.map(|meta| meta.sha.clone()),
    };

    Some(FileWrite {
        path: file.relative_path.clone(),
        message: commit_message(decision, &file.relative_path, date),
        content: STANDARD.encode(&file.content),
        sha,
    })
}
