//! Content hashing for change detection.
//!
//! GitHub addresses file content by git blob id, so hashing local bytes the
//! same way lets us compare against the `sha` the contents API returns
//! without downloading anything.

use sha1::{Digest, Sha1};

use crate::sync::types::{BlobId, RemoteFileMetadata, UploadDecision};

/// Compute the git blob id of raw bytes.
///
/// `SHA1("blob " + <decimal length> + "\0" + bytes)`, identical to
/// `git hash-object`.
#[must_use]
pub fn blob_id(content: &[u8]) -> BlobId {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    BlobId::from_hex(format!("{:x}", hasher.finalize()))
}

/// Decide what to do with a local file given what the remote holds.
#[must_use]
pub fn decide(remote: Option<&RemoteFileMetadata>, local: &BlobId) -> UploadDecision {
    match remote {
        None => UploadDecision::Create,
        Some(meta) if meta.sha == *local => UploadDecision::Skip,
        Some(_) => UploadDecision::Update,
    }
}
