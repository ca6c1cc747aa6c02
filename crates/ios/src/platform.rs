use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs::{read_to_string, write};

use appver_core::{Platform, PlatformOutcome, SyncPaths, VersionRecord, parse_version};

use crate::plist::{read_plist_versions, update_plist_versions};

/// iOS version storage: the app's Info.plist.
///
/// `CFBundleShortVersionString` carries the dotted triple; the build number is
/// the last dot-separated component of `CFBundleVersion` and is written back
/// as the whole key value.
#[derive(Debug)]
pub struct IosPlatform {
    info_plist: PathBuf,
}

impl IosPlatform {
    #[must_use]
    pub fn new(paths: &SyncPaths, app_name: &str) -> Self {
        Self {
            info_plist: paths.resolved_info_plist(app_name),
        }
    }

    fn record_from_plist(content: &str) -> Option<VersionRecord> {
        // Malformed plist XML is treated the same as missing keys
        let versions = read_plist_versions(content).ok()?;
        let short_version = versions.short_version?;
        let bundle_version = versions.bundle_version?;
        let build = bundle_version
            .rsplit('.')
            .next()
            .and_then(|last| last.parse::<u64>().ok())
            .unwrap_or(0);
        parse_version(&short_version, None, Some(build)).ok()
    }
}

#[async_trait]
impl Platform for IosPlatform {
    fn name(&self) -> &'static str {
        "iOS"
    }

    async fn current_version(&self) -> Result<Option<VersionRecord>> {
        let Ok(content) = read_to_string(&self.info_plist).await else {
            return Ok(None);
        };
        Ok(Self::record_from_plist(&content))
    }

    async fn write_version(&self, record: &VersionRecord) -> Result<PlatformOutcome> {
        let Ok(content) = read_to_string(&self.info_plist).await else {
            return Ok(PlatformOutcome::SkippedMissingFile);
        };

        let previous = Self::record_from_plist(&content);
        let updated = update_plist_versions(
            &content,
            &record.short_version(),
            &record.build_number().to_string(),
        )
        .ok()
        .flatten();
        let Some(updated) = updated else {
            return Ok(PlatformOutcome::SkippedNoVersionKey);
        };

        write(&self.info_plist, updated).await.context(format!(
            "Failed to write {}",
            self.info_plist.display()
        ))?;

        Ok(PlatformOutcome::Updated {
            previous,
            effective: record.clone(),
        })
    }
}
