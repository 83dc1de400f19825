//! Progress and summary output.
//!
//! Human-readable only; `--json` output is produced by the push command.

use colored::Colorize;

use crate::sync::types::{FileOutcome, OutcomeKind, RunSummary};

const RULE_WIDTH: usize = 30;

/// Minimum label column width, including the gap before the count.
const LABEL_WIDTH: usize = 21;

/// Print one line for a finished entry.
///
/// Entries skipped for their extension are only logged, to keep the output
/// focused on files that matter.
pub fn print_progress(outcome: &FileOutcome) {
    let path = &outcome.path;
    match &outcome.kind {
        OutcomeKind::Created => println!("{} {path}", "created  ".green()),
        OutcomeKind::Updated => println!("{} {path}", "updated  ".cyan()),
        OutcomeKind::Unchanged => println!("{} {path}", "unchanged".dimmed()),
        OutcomeKind::WouldCreate => println!("{} {path}", "would add".green()),
        OutcomeKind::WouldUpdate => println!("{} {path}", "would upd".cyan()),
        OutcomeKind::Failed { reason } => {
            println!("{} {path}", "failed   ".red().bold());
            println!("          {}", reason.red());
        }
        OutcomeKind::NotMatching => tracing::debug!(path = %path, "Skipped (extension)"),
    }
}

/// Render the fixed-width summary block.
#[must_use]
pub fn summary_text(summary: &RunSummary, extension: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let title = if summary.dry_run {
        "UPLOAD SUMMARY (dry run)"
    } else {
        "UPLOAD SUMMARY"
    };
    let (created_label, updated_label) = if summary.dry_run {
        ("Would upload:", "Would update:")
    } else {
        ("New files uploaded:", "Files updated:")
    };
    let skipped_label = format!("Skipped (not {extension}):");

    let rows = [
        (created_label, summary.created),
        (updated_label, summary.updated),
        ("Unchanged:", summary.unchanged),
        ("Failed:", summary.failed),
        (skipped_label.as_str(), summary.not_matching),
    ];

    let width = rows
        .iter()
        .map(|(label, _)| label.len() + 1)
        .max()
        .unwrap_or(0)
        .max(LABEL_WIDTH);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for (label, count) in rows {
        out.push_str(&format!("{label:<width$}{count}\n"));
    }
    out.push_str(&rule);
    out
}

/// Print the summary block to stdout.
pub fn print_summary(summary: &RunSummary, extension: &str) {
    println!();
    let text = summary_text(summary, extension);
    if summary.has_failures() {
        println!("{}", text.yellow());
    } else {
        println!("{text}");
    }
}
