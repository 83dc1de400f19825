//! Directory-to-GitHub sync.
//!
//! - **Walk**: recursive enumeration filtered by extension
//! - **Hashing**: git blob ids for change detection
//! - **Upload**: write requests with the optimistic-concurrency `sha`
//! - **Engine**: the per-file probe → decide → write loop
//! - **Report**: progress lines and the summary block
//!
//! # Example
//!
//! ```ignore
//! use sqlpush::remote::GitHubClient;
//! use sqlpush::sync::{Pusher, print_progress, print_summary};
//!
//! let client = GitHubClient::new(&settings)?;
//! let summary = Pusher::new(&client, &settings.root, &settings.extension)
//!     .run(print_progress)
//!     .await;
//! print_summary(&summary, &settings.extension);
//! ```

mod engine;
mod hash;
mod report;
mod types;
mod upload;
mod walk;

pub use engine::Pusher;
pub use hash::{blob_id, decide};
pub use report::{print_progress, print_summary, summary_text};
pub use types::{
    BlobId, FileOutcome, LocalFile, OutcomeKind, RemoteFileMetadata, RunSummary, SourceFile,
    UploadDecision,
};
pub use upload::{build_write, commit_message};
pub use walk::{WalkEntry, Walker, relative_key};
