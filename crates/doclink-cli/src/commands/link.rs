//! The mirror run: fetch, resolve, link, sweep, report

use colored::Colorize;

use doclink_api::{Connection, PaperlessClient};
use doclink_core::{Action, Mirror, SyncReport};

use crate::error::Result;
use crate::settings::Settings;

/// Run one mirror pass and print its report.
pub fn run_link(settings: &Settings, json: bool) -> Result<SyncReport> {
    let connection = Connection::new(settings.connection_config())?;
    let client = PaperlessClient::new(connection).with_page_size(settings.page_size);

    if !json {
        let verb = if settings.dry_run { "Previewing" } else { "Mirroring" };
        println!(
            "{} {} documents into {}",
            "=>".blue().bold(),
            verb,
            settings.dst_dir.display()
        );
    }

    let report = Mirror::new(&client, settings.mirror_config()).run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(report)
}

fn print_report(report: &SyncReport) {
    for (action, line) in report.actions.iter().zip(report.action_lines()) {
        match action {
            Action::CreateDir { .. } | Action::Link { .. } => {
                println!("   {} {}", "+".green(), line)
            }
            Action::RemoveFile { .. } | Action::RemoveDir { .. } => {
                println!("   {} {}", "-".red(), line)
            }
        }
    }

    for warning in &report.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }

    if report.is_noop() && report.warnings.is_empty() {
        println!("{} Already in sync. No changes needed.", "OK".green().bold());
    } else if report.dry_run {
        println!("{} {}", "DRY RUN".yellow().bold(), summary(report));
    } else {
        println!("{} {}", "OK".green().bold(), summary(report));
    }
}

/// One-line run summary.
pub fn summary(report: &SyncReport) -> String {
    let mut line = format!(
        "{} documents: {} linked, {} unchanged, {} without source; {} stale files and {} directories removed",
        report.documents,
        report.linked,
        report.unchanged,
        report.unresolved,
        report.removed_files(),
        report.removed_dirs()
    );
    if !report.warnings.is_empty() {
        line.push_str(&format!(" ({} warnings)", report.warnings.len()));
    }
    line
}
