use colored::Colorize;

use appver_core::{PlatformOutcome, SyncReport};

pub fn warn(message: &str) {
    println!(
        "{} {}",
        "WARNING:".yellow().bold().underline(),
        message.yellow()
    );
}

/// Final per-file summary: old → new for everything updated, an explicit
/// warning line for everything skipped.
pub fn print_report(report: &SyncReport) {
    println!();
    println!(
        "{} {} → {}",
        "package.json:".bold(),
        report.manifest_previous().unwrap_or("none"),
        report.manifest_version()
    );

    for entry in report.platforms() {
        match entry.outcome() {
            PlatformOutcome::Updated {
                previous,
                effective,
            } => {
                let from = previous
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string);
                println!(
                    "{} {} → {}",
                    format!("{}:", entry.platform()).bold(),
                    from,
                    effective
                );
            }
            PlatformOutcome::SkippedMissingFile => warn(&format!(
                "{}: file not found. This platform was skipped",
                entry.platform()
            )),
            PlatformOutcome::SkippedNoVersionKey => warn(&format!(
                "{}: no version keys found. This platform was skipped",
                entry.platform()
            )),
        }
    }
    println!();
}
