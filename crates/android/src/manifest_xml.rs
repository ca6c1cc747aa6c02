use std::sync::LazyLock;

use regex::Regex;

static MANIFEST_VERSION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"android:versionCode="\d*""#).expect("hardcoded regex must compile")
});

static MANIFEST_VERSION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"android:versionName="[^"]*""#).expect("hardcoded regex must compile")
});

/// Whether the manifest declares either version attribute.
///
/// Projects that externalize versioning to build.gradle carry neither
/// attribute; injecting them would change build behavior, so such manifests
/// are left alone.
#[must_use]
pub fn has_version_attributes(content: &str) -> bool {
    MANIFEST_VERSION_CODE.is_match(content) || MANIFEST_VERSION_NAME.is_match(content)
}

/// Substitute whichever version attributes are present; everything else stays
/// byte-identical.
#[must_use]
pub fn update_manifest_version(content: &str, version_name: &str, version_code: u64) -> String {
    let updated = MANIFEST_VERSION_CODE
        .replace_all(content, format!(r#"android:versionCode="{version_code}""#))
        .to_string();
    MANIFEST_VERSION_NAME
        .replace_all(&updated, format!(r#"android:versionName="{version_name}""#))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.myapp"
    android:versionCode="44"
    android:versionName="1.0.0">

    <uses-permission android:name="android.permission.INTERNET" />

    <application android:label="@string/app_name">
    </application>
</manifest>
"#;

    #[test]
    fn test_has_version_attributes() {
        assert!(has_version_attributes(MANIFEST));
        assert!(has_version_attributes(r#"<manifest android:versionCode="1">"#));
        assert!(has_version_attributes(r#"<manifest android:versionName="1.0">"#));
        assert!(!has_version_attributes("<manifest package=\"com.example\">"));
    }

    #[test]
    fn test_update_manifest_version() {
        let updated = update_manifest_version(MANIFEST, "1.2.3", 45);
        assert!(updated.contains(r#"android:versionCode="45""#));
        assert!(updated.contains(r#"android:versionName="1.2.3""#));
        assert!(!updated.contains(r#"android:versionCode="44""#));
    }

    #[test]
    fn test_update_preserves_unrelated_attributes() {
        let updated = update_manifest_version(MANIFEST, "1.2.3", 45);
        assert!(updated.contains(r#"package="com.example.myapp""#));
        assert!(updated.contains(r#"<uses-permission android:name="android.permission.INTERNET" />"#));
        assert!(updated.contains(r#"<application android:label="@string/app_name">"#));
    }

    #[test]
    fn test_update_with_empty_version_code() {
        let content = r#"<manifest android:versionCode="" android:versionName="">"#;
        let updated = update_manifest_version(content, "1.2.3", 45);
        assert!(updated.contains(r#"android:versionCode="45""#));
        assert!(updated.contains(r#"android:versionName="1.2.3""#));
    }

    #[test]
    fn test_update_idempotent() {
        let first = update_manifest_version(MANIFEST, "1.2.3", 45);
        let second = update_manifest_version(&first, "1.2.3", 45);
        assert_eq!(first, second);
    }
}
