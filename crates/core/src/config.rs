use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder in the plist path, replaced with the manifest's `appName`.
pub const APP_NAME_PLACEHOLDER: &str = "<APP_NAME>";

/// Explicit map of platform file locations for one project.
///
/// Defaults match the conventional React Native layout. Constructed relative
/// to a project root and passed into the orchestrator, so there is no
/// process-wide path state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncPaths {
    /// JSON manifest, mandatory; also supplies the app name
    #[serde(default = "default_package_json")]
    pub package_json: PathBuf,

    /// Android build script holding versionCode / versionName
    #[serde(default = "default_build_gradle")]
    pub build_gradle: PathBuf,

    /// Android manifest with optional version attributes
    #[serde(default = "default_android_manifest")]
    pub android_manifest: PathBuf,

    /// iOS property list; may contain [`APP_NAME_PLACEHOLDER`]
    #[serde(default = "default_info_plist")]
    pub info_plist: PathBuf,
}

fn default_package_json() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_build_gradle() -> PathBuf {
    PathBuf::from("android/app/build.gradle")
}

fn default_android_manifest() -> PathBuf {
    PathBuf::from("android/app/src/main/AndroidManifest.xml")
}

fn default_info_plist() -> PathBuf {
    PathBuf::from(format!("ios/{APP_NAME_PLACEHOLDER}/Info.plist"))
}

impl Default for SyncPaths {
    fn default() -> Self {
        Self {
            package_json: default_package_json(),
            build_gradle: default_build_gradle(),
            android_manifest: default_android_manifest(),
            info_plist: default_info_plist(),
        }
    }
}

impl SyncPaths {
    /// Default layout anchored at `root`.
    #[must_use]
    pub fn relative_to(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            package_json: root.join(defaults.package_json),
            build_gradle: root.join(defaults.build_gradle),
            android_manifest: root.join(defaults.android_manifest),
            info_plist: root.join(defaults.info_plist),
        }
    }

    /// Plist path with the app-name placeholder resolved.
    #[must_use]
    pub fn resolved_info_plist(&self, app_name: &str) -> PathBuf {
        PathBuf::from(
            self.info_plist
                .to_string_lossy()
                .replace(APP_NAME_PLACEHOLDER, app_name),
        )
    }
}
