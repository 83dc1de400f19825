//! sqlpush - Sync a local tree of SQL files to a GitHub repository
//!
//! Walks a directory, hashes each matching file the way git does, and only
//! uploads files whose blob id differs from what GitHub already holds.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Settings resolution (flags, environment, config file)
//! - [`remote`] - Remote store trait and the GitHub contents API client
//! - [`sync`] - Walk, hash, decide, and upload workflow
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod remote;
pub mod sync;

pub use error::{Error, Result};
