use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs::{read_to_string, write};

use appver_core::{Platform, PlatformOutcome, SyncPaths, VersionRecord, parse_version};

use crate::gradle::{read_gradle_version, update_gradle_version};
use crate::manifest_xml::{has_version_attributes, update_manifest_version};

/// Android version storage: build.gradle plus the optional AndroidManifest.xml
/// version attributes.
///
/// The build script is authoritative. The manifest is only rewritten when it
/// already declares a version attribute; when the gradle keys are missing the
/// whole platform is skipped, manifest included.
#[derive(Debug)]
pub struct AndroidPlatform {
    build_gradle: PathBuf,
    android_manifest: PathBuf,
}

impl AndroidPlatform {
    #[must_use]
    pub fn new(paths: &SyncPaths) -> Self {
        Self {
            build_gradle: paths.build_gradle.clone(),
            android_manifest: paths.android_manifest.clone(),
        }
    }

    fn record_from_gradle(content: &str) -> Option<VersionRecord> {
        let (version_name, version_code) = read_gradle_version(content)?;
        // A stored version that no longer parses is treated the same as a
        // missing one
        parse_version(&version_name, None, Some(version_code)).ok()
    }
}

#[async_trait]
impl Platform for AndroidPlatform {
    fn name(&self) -> &'static str {
        "Android"
    }

    async fn current_version(&self) -> Result<Option<VersionRecord>> {
        let Ok(content) = read_to_string(&self.build_gradle).await else {
            return Ok(None);
        };
        Ok(Self::record_from_gradle(&content))
    }

    async fn write_version(&self, record: &VersionRecord) -> Result<PlatformOutcome> {
        let Ok(content) = read_to_string(&self.build_gradle).await else {
            return Ok(PlatformOutcome::SkippedMissingFile);
        };

        let previous = Self::record_from_gradle(&content);
        let Some(updated) =
            update_gradle_version(&content, &record.short_version(), record.build_number())
        else {
            return Ok(PlatformOutcome::SkippedNoVersionKey);
        };
        write(&self.build_gradle, updated).await.context(format!(
            "Failed to write {}",
            self.build_gradle.display()
        ))?;

        // Manifest attributes are an optional override; only rewrite what is
        // already declared
        if let Ok(manifest) = read_to_string(&self.android_manifest).await
            && has_version_attributes(&manifest)
        {
            let updated =
                update_manifest_version(&manifest, &record.short_version(), record.build_number());
            write(&self.android_manifest, updated).await.context(format!(
                "Failed to write {}",
                self.android_manifest.display()
            ))?;
        }

        Ok(PlatformOutcome::Updated {
            previous,
            effective: record.clone(),
        })
    }
}
