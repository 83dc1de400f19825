//! Hash command implementation.
//!
//! Prints the git blob id of each file, the same value `git hash-object`
//! prints and the GitHub contents API reports as `sha`.

use crate::error::{Error, Result};
use crate::sync::blob_id;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct HashOutput {
    path: String,
    sha: String,
    size: usize,
}

/// Execute the hash command.
///
/// # Errors
///
/// Returns an error if any file cannot be read.
pub fn execute(files: &[PathBuf], json: bool) -> Result<()> {
    let mut hashes = Vec::with_capacity(files.len());

    for path in files {
        let content = fs::read(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        hashes.push(HashOutput {
            path: path.display().to_string(),
            sha: blob_id(&content).to_string(),
            size: content.len(),
        });
    }

    if json {
        println!("{}", serde_json::to_string(&hashes)?);
        return Ok(());
    }

    for hash in &hashes {
        println!("{}  {}", hash.sha, hash.path);
    }
    Ok(())
}
