use serde::Serialize;

use crate::version::VersionRecord;

/// Result of one platform's write attempt.
///
/// Skips are ordinary values, not errors: the orchestrator records them and
/// moves on to the next platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PlatformOutcome {
    /// File rewritten with the effective record
    #[serde(rename_all = "camelCase")]
    Updated {
        /// Version state read from the file before the write, if any
        previous: Option<VersionRecord>,
        effective: VersionRecord,
    },
    /// Platform not present in this project
    SkippedMissingFile,
    /// File exists but carries no recognizable version key
    SkippedNoVersionKey,
}

/// One platform's entry in the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformReport {
    platform: String,
    outcome: PlatformOutcome,
}

impl PlatformReport {
    #[must_use]
    pub fn new(platform: impl Into<String>, outcome: PlatformOutcome) -> Self {
        Self {
            platform: platform.into(),
            outcome,
        }
    }

    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }

    #[must_use]
    pub const fn outcome(&self) -> &PlatformOutcome {
        &self.outcome
    }
}

/// Full result of a synchronization run: the manifest transition plus one
/// typed outcome per platform, in the order the platforms were processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    manifest_previous: Option<String>,
    manifest_version: String,
    platforms: Vec<PlatformReport>,
}

impl SyncReport {
    #[must_use]
    pub fn new(manifest_previous: Option<String>, manifest_version: String) -> Self {
        Self {
            manifest_previous,
            manifest_version,
            platforms: Vec::new(),
        }
    }

    pub fn push(&mut self, report: PlatformReport) {
        self.platforms.push(report);
    }

    #[must_use]
    pub fn manifest_previous(&self) -> Option<&str> {
        self.manifest_previous.as_deref()
    }

    #[must_use]
    pub fn manifest_version(&self) -> &str {
        &self.manifest_version
    }

    #[must_use]
    pub fn platforms(&self) -> &[PlatformReport] {
        &self.platforms
    }

    /// True when at least one platform was skipped for any reason.
    #[must_use]
    pub fn has_skips(&self) -> bool {
        self.platforms
            .iter()
            .any(|report| !matches!(report.outcome(), PlatformOutcome::Updated { .. }))
    }
}
