//! Push command implementation.
//!
//! Resolves settings, checks the repository is reachable, then runs the
//! sync workflow. Any failed file makes the command exit non-zero after the
//! summary has been printed.

use crate::cli::PushArgs;
use crate::config::{Overrides, Settings, load_file_config, resolve_settings};
use crate::error::{Error, Result};
use crate::remote::{GitHubClient, RemoteStore};
use crate::sync::{FileOutcome, Pusher, RunSummary, print_progress, print_summary};
use serde::Serialize;

#[derive(Serialize)]
struct PushOutput<'a> {
    success: bool,
    repository: &'a str,
    root: String,
    extension: &'a str,
    branch: Option<&'a str>,
    summary: &'a RunSummary,
    skipped: usize,
    files: &'a [FileOutcome],
}

impl From<&PushArgs> for Overrides {
    fn from(args: &PushArgs) -> Self {
        Self {
            root: args.root.clone(),
            repo: args.repo.clone(),
            token: args.token.clone(),
            extension: args.extension.clone(),
            branch: args.branch.clone(),
            api_url: args.api_url.clone(),
            timeout_secs: args.timeout,
        }
    }
}

/// Execute the push command.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the repository cannot be
/// reached, or any file failed to sync.
pub fn execute(args: &PushArgs, dry_run: bool, json: bool) -> Result<()> {
    let file_config = load_file_config(args.config.as_deref())?;
    let settings = resolve_settings(Overrides::from(args), file_config)?;
    let client = GitHubClient::new(&settings)?;

    // Create tokio runtime for the HTTP client
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(async { execute_async(&client, &settings, dry_run, json).await })
}

async fn execute_async(
    client: &GitHubClient,
    settings: &Settings,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let repo = client
        .repository()
        .await
        .map_err(|e| Error::RepositoryUnreachable {
            repo: settings.repo.to_string(),
            reason: e.to_string(),
        })?;
    tracing::info!(repo = %repo.full_name, private = repo.private, "Connected");

    if !json {
        println!("Connected to: {}", repo.full_name);
        if dry_run {
            println!("Dry run: nothing will be written.");
        }
        println!();
    }

    let pusher = Pusher::new(client, &settings.root, &settings.extension).dry_run(dry_run);

    let mut files = Vec::new();
    let summary = pusher
        .run(|outcome| {
            if json {
                files.push(outcome.clone());
            } else {
                print_progress(outcome);
            }
        })
        .await;

    if json {
        let output = PushOutput {
            success: !summary.has_failures(),
            repository: &repo.full_name,
            root: settings.root.display().to_string(),
            extension: &settings.extension,
            branch: settings
                .branch
                .as_deref()
                .or(repo.default_branch.as_deref()),
            summary: &summary,
            skipped: summary.skipped(),
            files: &files,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_summary(&summary, &settings.extension);
    }

    if summary.has_failures() {
        return Err(Error::SyncIncomplete {
            failed: summary.failed,
        });
    }
    Ok(())
}
