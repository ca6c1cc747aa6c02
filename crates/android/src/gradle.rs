use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static DEFAULT_CONFIG_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*defaultConfig\s*\{").expect("hardcoded regex must compile")
});

static VERSION_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*versionName\s+"([^"]*)""#).expect("hardcoded regex must compile")
});

static VERSION_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*versionCode\s+(\d+)").expect("hardcoded regex must compile")
});

static VERSION_NAME_SUB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(\s*versionName\s+)"[^"]*""#).expect("hardcoded regex must compile")
});

static VERSION_CODE_SUB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*versionCode\s+)\d+").expect("hardcoded regex must compile")
});

/// Byte range of the `defaultConfig { … }` block body.
///
/// Locates the block header, then matches braces to find the body. Substitution
/// is confined to this range so that unrelated script content mentioning
/// `versionCode`/`versionName` (comments, task definitions) is never touched.
fn default_config_block(content: &str) -> Option<Range<usize>> {
    let header = DEFAULT_CONFIG_OPEN.find(content)?;
    let body_start = header.end();

    let mut depth = 1usize;
    for (offset, ch) in content[body_start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(body_start..body_start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Current `versionName` and `versionCode` declared inside `defaultConfig`.
#[must_use]
pub fn read_gradle_version(content: &str) -> Option<(String, u64)> {
    let block = default_config_block(content)?;
    let body = &content[block];

    let version_name = VERSION_NAME_PATTERN
        .captures(body)?
        .get(1)?
        .as_str()
        .to_string();
    let version_code = VERSION_CODE_PATTERN
        .captures(body)?
        .get(1)?
        .as_str()
        .parse::<u64>()
        .ok()?;

    Some((version_name, version_code))
}

/// Substitute the two version assignments inside `defaultConfig`, leaving the
/// rest of the script byte-identical. Returns `None` when the block or either
/// assignment is missing.
#[must_use]
pub fn update_gradle_version(
    content: &str,
    version_name: &str,
    version_code: u64,
) -> Option<String> {
    let block = default_config_block(content)?;
    let body = &content[block.clone()];

    if !VERSION_NAME_SUB.is_match(body) || !VERSION_CODE_SUB.is_match(body) {
        return None;
    }

    let body = VERSION_CODE_SUB
        .replace(body, format!("${{1}}{version_code}"))
        .to_string();
    let body = VERSION_NAME_SUB
        .replace(&body, format!(r#"${{1}}"{version_name}""#))
        .to_string();

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..block.start]);
    updated.push_str(&body);
    updated.push_str(&content[block.end..]);
    Some(updated)
}
