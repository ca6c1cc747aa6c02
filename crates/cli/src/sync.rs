use anyhow::{Context, Result};
use colored::Colorize;

use appver_android::AndroidPlatform;
use appver_core::{
    Platform, PlatformOutcome, PlatformReport, SyncError, SyncPaths, SyncReport, parse_version,
};
use appver_ios::IosPlatform;
use appver_node::PackageManifest;

use crate::report::warn;

/// Drive one synchronization run over every platform file.
///
/// Order is fixed (manifest → Android → iOS) for deterministic output. Only a
/// malformed version request or an unusable package.json is fatal; everything
/// platform-specific degrades to a warning plus a typed skip in the report.
///
/// # Errors
/// Returns [`SyncError::InvalidVersionFormat`] or
/// [`SyncError::ManifestUnavailable`]; both abort before or at the manifest
/// step, so no platform file is ever half-updated by a fatal error.
pub async fn run_sync(
    paths: &SyncPaths,
    version_text: &str,
    explicit_build: Option<u64>,
) -> Result<SyncReport> {
    // Reject a malformed request before any file is touched
    let requested = parse_version(version_text, None, explicit_build)?;

    let manifest = PackageManifest::load(&paths.package_json)
        .await
        .map_err(|source| SyncError::ManifestUnavailable {
            path: paths.package_json.clone(),
            source,
        })?;

    println!(
        "{} {}",
        "Will set package version to".yellow(),
        requested.short_version().bold().underline().yellow()
    );
    manifest
        .set_version(&requested.short_version())
        .await
        .context(format!(
            "Failed to write {}",
            paths.package_json.display()
        ))?;
    println!(
        "{} {}",
        "Version replaced in".green(),
        "package.json".bold().green()
    );

    let mut report = SyncReport::new(
        Some(manifest.version().to_string()),
        requested.short_version(),
    );

    let platforms: Vec<Box<dyn Platform>> = vec![
        Box::new(AndroidPlatform::new(paths)),
        Box::new(IosPlatform::new(paths, manifest.app_name())),
    ];

    for platform in &platforms {
        // A read failure never prevents the write attempt with defaults
        let current = platform.current_version().await.unwrap_or(None);
        let effective = parse_version(version_text, current.as_ref(), explicit_build)?;

        let outcome = match platform.write_version(&effective).await {
            Ok(outcome) => outcome,
            Err(err) => {
                // One platform's write failure never aborts the others
                warn(&format!(
                    "Cannot update {}: {err:#}. This platform will be skipped",
                    platform.name()
                ));
                PlatformOutcome::SkippedMissingFile
            }
        };

        match &outcome {
            PlatformOutcome::Updated { .. } => {
                println!(
                    "{} {}",
                    "Version replaced for".green(),
                    platform.name().bold().green()
                );
            }
            PlatformOutcome::SkippedMissingFile => warn(&format!(
                "Cannot find a version file for {}. This platform will be skipped",
                platform.name()
            )),
            PlatformOutcome::SkippedNoVersionKey => warn(&format!(
                "Cannot find version keys for {}. This platform will be skipped",
                platform.name()
            )),
        }

        report.push(PlatformReport::new(platform.name(), outcome));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const PACKAGE_JSON: &str =
        "{\n\t\"name\": \"my-app\",\n\t\"appName\": \"MyApp\",\n\t\"version\": \"1.0.0\"\n}\n";

    const BUILD_GRADLE: &str = r#"android {
    defaultConfig {
        applicationId "com.example.myapp"
        versionCode 44
        versionName "1.0.0"
    }
}
"#;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleShortVersionString</key>
	<string>1.0.0</string>
	<key>CFBundleVersion</key>
	<string>1.0.44</string>
	<key>NSCameraUsageDescription</key>
	<string>Scan codes</string>
</dict>
</plist>
"#;

    fn write_project(root: &Path) {
        fs::write(root.join("package.json"), PACKAGE_JSON).unwrap();

        let gradle = root.join("android/app/build.gradle");
        fs::create_dir_all(gradle.parent().unwrap()).unwrap();
        fs::write(gradle, BUILD_GRADLE).unwrap();

        let plist = root.join("ios/MyApp/Info.plist");
        fs::create_dir_all(plist.parent().unwrap()).unwrap();
        fs::write(plist, INFO_PLIST).unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_updates_all_platforms() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path());
        let paths = SyncPaths::relative_to(temp_dir.path());

        let report = run_sync(&paths, "1.2.3", Some(45)).await.unwrap();

        assert_eq!(report.manifest_previous(), Some("1.0.0"));
        assert_eq!(report.manifest_version(), "1.2.3");
        assert!(!report.has_skips());

        let package = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
        assert!(package.contains("\"version\": \"1.2.3\""));

        let gradle =
            fs::read_to_string(temp_dir.path().join("android/app/build.gradle")).unwrap();
        assert!(gradle.contains("versionCode 45"));
        assert!(gradle.contains(r#"versionName "1.2.3""#));

        let plist = fs::read_to_string(temp_dir.path().join("ios/MyApp/Info.plist")).unwrap();
        assert!(plist.contains("<string>1.2.3</string>"));
        assert!(plist.contains("<string>45</string>"));
        assert!(plist.contains("<string>Scan codes</string>"));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_platform_order_is_android_then_ios() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path());
        let paths = SyncPaths::relative_to(temp_dir.path());

        let report = run_sync(&paths, "1.2.3", Some(45)).await.unwrap();
        let names = report
            .platforms()
            .iter()
            .map(PlatformReport::platform)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Android", "iOS"]);

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_invalid_version_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path());
        let paths = SyncPaths::relative_to(temp_dir.path());

        let result = run_sync(&paths, "1.x.3", Some(45)).await;
        assert!(result.is_err());

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
            PACKAGE_JSON
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("android/app/build.gradle")).unwrap(),
            BUILD_GRADLE
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("ios/MyApp/Info.plist")).unwrap(),
            INFO_PLIST
        );

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_missing_manifest_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SyncPaths::relative_to(temp_dir.path());

        let result = run_sync(&paths, "1.2.3", Some(45)).await;
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<SyncError>().is_some());

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_missing_android_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path());
        fs::remove_file(temp_dir.path().join("android/app/build.gradle")).unwrap();
        let paths = SyncPaths::relative_to(temp_dir.path());

        let report = run_sync(&paths, "1.2.3", Some(45)).await.unwrap();

        assert_eq!(
            report.platforms()[0].outcome(),
            &PlatformOutcome::SkippedMissingFile
        );
        assert!(matches!(
            report.platforms()[1].outcome(),
            PlatformOutcome::Updated { .. }
        ));

        // The manifest and plist still got updated
        let package = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
        assert!(package.contains("\"version\": \"1.2.3\""));
        let plist = fs::read_to_string(temp_dir.path().join("ios/MyApp/Info.plist")).unwrap();
        assert!(plist.contains("<string>1.2.3</string>"));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_carries_build_forward_without_explicit() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path());
        let paths = SyncPaths::relative_to(temp_dir.path());

        let report = run_sync(&paths, "1.2.3", None).await.unwrap();

        for entry in report.platforms() {
            match entry.outcome() {
                PlatformOutcome::Updated { previous, effective } => {
                    let previous = previous.as_ref().unwrap();
                    assert_eq!(previous.build_number(), 44);
                    assert_eq!(effective.build_number(), 44);
                }
                other => panic!("Expected Updated, got {:?}", other),
            }
        }

        let gradle =
            fs::read_to_string(temp_dir.path().join("android/app/build.gradle")).unwrap();
        assert!(gradle.contains("versionCode 44"));
        assert!(gradle.contains(r#"versionName "1.2.3""#));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_run_sync_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        write_project(temp_dir.path());
        let paths = SyncPaths::relative_to(temp_dir.path());

        run_sync(&paths, "1.2.3", Some(45)).await.unwrap();
        let package_first = fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
        let gradle_first =
            fs::read_to_string(temp_dir.path().join("android/app/build.gradle")).unwrap();
        let plist_first =
            fs::read_to_string(temp_dir.path().join("ios/MyApp/Info.plist")).unwrap();

        run_sync(&paths, "1.2.3", Some(45)).await.unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("package.json")).unwrap(),
            package_first
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("android/app/build.gradle")).unwrap(),
            gradle_first
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("ios/MyApp/Info.plist")).unwrap(),
            plist_first
        );

        temp_dir.close().unwrap();
    }
}
