use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use appver_core::SyncPaths;

pub mod report;
pub mod sync;

#[derive(Parser, Debug)]
#[command(
    name = "appver",
    author,
    version,
    disable_version_flag = true,
    about = "Synchronize the app version and build number across package.json, Info.plist, build.gradle and AndroidManifest.xml",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    /// Version to set, e.g. "1.2.3"
    version: String,

    /// Build number / version code; a non-numeric value coerces to 0, an
    /// absent one keeps each platform's current build number
    build: Option<String>,

    /// Project root containing package.json
    #[arg(short, long, default_value = ".")]
    path: PathBuf,
}

/// A present but non-numeric build argument is an explicit 0.
fn coerce_build(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// # Errors
/// Returns error when the requested version is malformed or the project
/// manifest cannot be loaded; per-platform conditions only produce warnings.
pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);

    let paths = SyncPaths::relative_to(&cli.path);
    let explicit_build = cli.build.as_deref().map(coerce_build);

    let report = sync::run_sync(&paths, &cli.version, explicit_build).await?;
    report::print_report(&report);
    Ok(())
}
