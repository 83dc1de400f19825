//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// sqlpush - Sync a local tree of SQL files to a GitHub repository
#[derive(Parser, Debug)]
#[command(name = "sqlpush", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Decide what would change without writing to GitHub
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload new and changed files to a GitHub repository
    Push(PushArgs),

    /// Print the git blob id of local files
    Hash {
        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PushArgs {
    /// Local directory to walk (default: current directory)
    #[arg(long, env = "SQLPUSH_ROOT")]
    pub root: Option<PathBuf>,

    /// Target repository as OWNER/NAME
    #[arg(long, env = "SQLPUSH_REPO")]
    pub repo: Option<String>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File suffix to sync (default: .sql)
    #[arg(long, short = 'e')]
    pub extension: Option<String>,

    /// Branch to commit to (default: repository default branch)
    #[arg(long, env = "SQLPUSH_BRANCH")]
    pub branch: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Config file (default: ~/.sqlpush/config.json)
    #[arg(long, env = "SQLPUSH_CONFIG")]
    pub config: Option<PathBuf>,
}
