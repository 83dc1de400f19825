//! Push workflow.
//!
//! Walks the root, and for each matching file: read, hash, probe the remote,
//! decide, and write if needed. Files are handled strictly one at a time.
//! A failure on one file is recorded and the walk moves on; nothing in here
//! returns an error.
//!
//! The probed blob id is sent back on update as a precondition, so a remote
//! change between probe and write makes the write fail rather than clobber.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::remote::{Probe, RemoteStore};
use crate::sync::hash::{blob_id, decide};
use crate::sync::types::{
    FileOutcome, LocalFile, OutcomeKind, RunSummary, SourceFile, UploadDecision,
};
use crate::sync::upload::build_write;
use crate::sync::walk::{WalkEntry, Walker};

/// Runs one push of a directory tree to a remote store.
pub struct Pusher<'a, S: RemoteStore> {
    store: &'a S,
    root: PathBuf,
    extension: String,
    dry_run: bool,
    date: NaiveDate,
}

impl<'a, S: RemoteStore> Pusher<'a, S> {
    /// Create a pusher for `root`, syncing names ending in `extension`.
    #[must_use]
    pub fn new(store: &'a S, root: &Path, extension: &str) -> Self {
        Self {
            store,
            root: root.to_path_buf(),
            extension: extension.to_string(),
            dry_run: false,
            date: Local::now().date_naive(),
        }
    }

    /// Probe and decide, but never write.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Date used in commit messages. Defaults to today, local time.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Push every entry under the root, calling `on_outcome` as each one
    /// finishes.
    pub async fn run<F>(&self, mut on_outcome: F) -> RunSummary
    where
        F: FnMut(&FileOutcome),
    {
        let mut summary = RunSummary {
            dry_run: self.dry_run,
            ..RunSummary::default()
        };

        for entry in Walker::new(&self.root, &self.extension) {
            let outcome = match entry {
                WalkEntry::Candidate(source) => {
                    let path = source.relative_path.clone();
                    debug!(path = %path, "Processing");
                    FileOutcome {
                        path,
                        kind: self.process(source).await,
                    }
                }
                WalkEntry::Skipped(path) => FileOutcome {
                    path: self.display_path(&path),
                    kind: OutcomeKind::NotMatching,
                },
                WalkEntry::Error { path, message } => {
                    warn!(error = %message, "Walk error");
                    FileOutcome {
                        path: path.map_or_else(
                            || self.root.display().to_string(),
                            |p| self.display_path(&p),
                        ),
                        kind: OutcomeKind::Failed { reason: message },
                    }
                }
            };

            summary.record(&outcome.kind);
            on_outcome(&outcome);
        }

        summary
    }

    async fn process(&self, source: SourceFile) -> OutcomeKind {
        let path = source.path.clone();
        let file = match LocalFile::load(source) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Read failed");
                return OutcomeKind::Failed {
                    reason: format!("read failed: {e}"),
                };
            }
        };

        let local_id = blob_id(&file.content);

        let probe = self.store.probe(&file.relative_path).await;
        if let Probe::Failed(e) = &probe {
            warn!(path = %file.relative_path, error = %e, "Probe failed, treating as absent");
        }
        let remote = probe.into_metadata();

        let decision = decide(remote.as_ref(), &local_id);
        debug!(
            path = %file.relative_path,
            local = %local_id.short(),
            remote = remote.as_ref().map_or("-", |m| m.sha.short()),
            ?decision,
            "Decided"
        );

        let Some(write) = build_write(&file, decision, remote.as_ref(), self.date) else {
            return OutcomeKind::Unchanged;
        };

        if self.dry_run {
            return match decision {
                UploadDecision::Update => OutcomeKind::WouldUpdate,
                UploadDecision::Create | UploadDecision::Skip => OutcomeKind::WouldCreate,
            };
        }

        match self.store.put(&write).await {
            Ok(()) => match decision {
                UploadDecision::Update => OutcomeKind::Updated,
                UploadDecision::Create | UploadDecision::Skip => OutcomeKind::Created,
            },
            Err(e) => {
                if e.is_conflict() {
                    warn!(path = %file.relative_path, error = %e, "Remote changed since probe");
                } else {
                    warn!(path = %file.relative_path, error = %e, "Write failed");
                }
                OutcomeKind::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{ApiError, FileWrite, RepositoryInfo};
    use crate::sync::BlobId;
    use crate::sync::types::RemoteFileMetadata;
    use base64::Engine as _;
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory remote keyed by path.
    #[derive(Default)]
    struct MemoryStore {
        files: Mutex<HashMap<String, BlobId>>,
        writes: Mutex<Vec<FileWrite>>,
        probes: Mutex<Vec<String>>,
        reject_writes: HashSet<String>,
        broken_probes: HashSet<String>,
    }

    impl MemoryStore {
        fn with_file(self, path: &str, content: &[u8]) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), blob_id(content));
            self
        }

        fn writes(&self) -> Vec<FileWrite> {
            self.writes.lock().unwrap().clone()
        }

        fn probed(&self) -> Vec<String> {
            let mut probes = self.probes.lock().unwrap().clone();
            probes.sort();
            probes
        }
    }

    impl RemoteStore for MemoryStore {
        fn repository(
            &self,
        ) -> impl std::future::Future<Output = Result<RepositoryInfo, ApiError>> + Send {
            async {
                Ok(RepositoryInfo {
                    full_name: "octocat/sql-notes".to_string(),
                    default_branch: Some("main".to_string()),
                    private: false,
                })
            }
        }

        fn probe(&self, path: &str) -> impl std::future::Future<Output = Probe> + Send {
            self.probes.lock().unwrap().push(path.to_string());
            let probe = if self.broken_probes.contains(path) {
                Probe::Failed(ApiError::Status {
                    status: 500,
                    body: "server error".to_string(),
                })
            } else {
                match self.files.lock().unwrap().get(path) {
                    Some(sha) => Probe::Found(RemoteFileMetadata { sha: sha.clone() }),
                    None => Probe::Absent,
                }
            };
            async move { probe }
        }

        fn put(
            &self,
            write: &FileWrite,
        ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send {
            self.writes.lock().unwrap().push(write.clone());
            let result = if self.reject_writes.contains(&write.path) {
                Err(ApiError::Status {
                    status: 409,
                    body: "is at 1234 but expected 5678".to_string(),
                })
            } else {
                let mut files = self.files.lock().unwrap();
                let current = files.get(&write.path);
                if current != write.sha.as_ref() {
                    Err(ApiError::Status {
                        status: 422,
                        body: "sha mismatch".to_string(),
                    })
                } else {
                    let bytes = base64::engine::general_purpose::STANDARD
                        .decode(&write.content)
                        .unwrap();
                    files.insert(write.path.clone(), blob_id(&bytes));
                    Ok(())
                }
            };
            async move { result }
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    async fn push(store: &MemoryStore, root: &Path) -> (RunSummary, Vec<FileOutcome>) {
        let mut outcomes = Vec::new();
        let summary = Pusher::new(store, root, ".sql")
            .with_date(date())
            .run(|o| outcomes.push(o.clone()))
            .await;
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));
        (summary, outcomes)
    }

    #[tokio::test]
    async fn test_new_file_is_created() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 1;").unwrap();
        let store = MemoryStore::default();

        let (summary, outcomes) = push(&store, temp_dir.path()).await;

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].path, "a.sql");
        assert_eq!(writes[0].message, "Add a.sql on 2024-05-01");
        assert_eq!(writes[0].content, "U0VMRUNUIDE7");
        assert!(writes[0].sha.is_none());
        assert_eq!(summary.created, 1);
        assert_eq!(summary.total(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::Created);
    }

    #[tokio::test]
    async fn test_identical_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 1;").unwrap();
        let store = MemoryStore::default().with_file("a.sql", b"SELECT 1;");

        let (summary, _) = push(&store, temp_dir.path()).await;

        assert!(store.writes().is_empty());
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.created + summary.updated + summary.failed, 0);
    }

    #[tokio::test]
    async fn test_changed_file_is_updated_with_prior_sha() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 2;").unwrap();
        let store = MemoryStore::default().with_file("a.sql", b"SELECT 1;");

        let (summary, _) = push(&store, temp_dir.path()).await;

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].sha, Some(blob_id(b"SELECT 1;")));
        assert_eq!(writes[0].message, "Update a.sql on 2024-05-01");
        assert_eq!(summary.updated, 1);
        assert_eq!(
            store.files.lock().unwrap().get("a.sql"),
            Some(&blob_id(b"SELECT 2;"))
        );
    }

    #[tokio::test]
    async fn test_rejected_write_is_counted_and_walk_continues() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 1;").unwrap();
        fs::write(temp_dir.path().join("b.sql"), "SELECT 2;").unwrap();
        let store = MemoryStore {
            reject_writes: HashSet::from(["a.sql".to_string()]),
            ..MemoryStore::default()
        };

        let (summary, outcomes) = push(&store, temp_dir.path()).await;

        assert_eq!(store.writes().len(), 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 1);
        assert!(matches!(outcomes[0].kind, OutcomeKind::Failed { .. }));
        assert_eq!(outcomes[1].kind, OutcomeKind::Created);
    }

    #[tokio::test]
    async fn test_non_matching_files_are_never_probed() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("scripts")).unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 1;").unwrap();
        fs::write(temp_dir.path().join("README.md"), "# queries").unwrap();
        fs::write(temp_dir.path().join("scripts/load.py"), "print(1)").unwrap();
        let store = MemoryStore::default();

        let (summary, outcomes) = push(&store, temp_dir.path()).await;

        assert_eq!(store.probed(), vec!["a.sql"]);
        assert_eq!(summary.not_matching, 2);
        assert_eq!(summary.created, 1);
        let skipped: Vec<_> = outcomes
            .iter()
            .filter(|o| o.kind == OutcomeKind::NotMatching)
            .map(|o| o.path.replace('\\', "/"))
            .collect();
        assert_eq!(skipped, vec!["README.md", "scripts/load.py"]);
    }

    #[tokio::test]
    async fn test_probe_failure_is_treated_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 1;").unwrap();
        let store = MemoryStore {
            broken_probes: HashSet::from(["a.sql".to_string()]),
            ..MemoryStore::default()
        };

        let (summary, _) = push(&store, temp_dir.path()).await;

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].sha.is_none());
        assert_eq!(summary.created, 1);
    }

    #[tokio::test]
    async fn test_stale_probe_fails_update() {
        // The remote already holds the content but the probe missed it, so
        // the create goes out without a sha and the store rejects it.
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.sql"), "SELECT 2;").unwrap();
        let store = MemoryStore {
            broken_probes: HashSet::from(["a.sql".to_string()]),
            ..MemoryStore::default()
        }
        .with_file("a.sql", b"SELECT 1;");

        let (summary, _) = push(&store, temp_dir.path()).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(
            store.files.lock().unwrap().get("a.sql"),
            Some(&blob_id(b"SELECT 1;"))
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_file_is_counted_and_walk_continues() {
        let temp_dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("missing"),
            temp_dir.path().join("a.sql"),
        )
        .unwrap();
        fs::write(temp_dir.path().join("b.sql"), "SELECT 2;").unwrap();
        let store = MemoryStore::default();

        let (summary, outcomes) = push(&store, temp_dir.path()).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(store.probed(), vec!["b.sql"]);
        assert!(matches!(
            &outcomes[0].kind,
            OutcomeKind::Failed { reason } if reason.starts_with("read failed")
        ));
        assert_eq!(outcomes[1].kind, OutcomeKind::Created);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("new.sql"), "SELECT 1;").unwrap();
        fs::write(temp_dir.path().join("old.sql"), "SELECT 2;").unwrap();
        let store = MemoryStore::default().with_file("old.sql", b"SELECT 1;");

        let mut outcomes = Vec::new();
        let summary = Pusher::new(&store, temp_dir.path(), ".sql")
            .dry_run(true)
            .run(|o| outcomes.push(o.clone()))
            .await;
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));

        assert!(store.writes().is_empty());
        assert!(summary.dry_run);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::WouldCreate);
        assert_eq!(outcomes[1].kind, OutcomeKind::WouldUpdate);
    }

    #[tokio::test]
    async fn test_nested_paths_use_forward_slashes() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("2024/may")).unwrap();
        fs::write(temp_dir.path().join("2024/may/q.sql"), "SELECT 1;").unwrap();
        let store = MemoryStore::default();

        push(&store, temp_dir.path()).await;

        assert_eq!(store.writes()[0].path, "2024/may/q.sql");
    }

    #[tokio::test]
    async fn test_empty_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::default();

        let (summary, outcomes) = push(&store, temp_dir.path()).await;

        assert_eq!(summary, RunSummary::default());
        assert!(outcomes.is_empty());
    }
}
