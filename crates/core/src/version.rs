use std::fmt::Display;

use serde::Serialize;

use crate::error::SyncError;

/// One parsed version state: the dotted triple plus the platform build code.
///
/// Records are immutable once constructed; deriving a new version always goes
/// through [`parse_version`] and yields a fresh record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    major: u64,
    minor: u64,
    patch: u64,
    /// Store-facing build code, independent of the dotted triple
    build_number: u64,
    /// Original input text, kept for display only
    raw: String,
}

impl VersionRecord {
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    #[must_use]
    pub const fn build_number(&self) -> u64 {
        self.build_number
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `major.minor.patch` form written into every target file.
    #[must_use]
    pub fn short_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Display for VersionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{} (build {})",
            self.major, self.minor, self.patch, self.build_number
        )
    }
}

/// Parse a requested version string into a [`VersionRecord`].
///
/// `current` is only consulted to carry the build number forward; it never
/// overrides the requested major/minor/patch. Build-number policy, applied
/// uniformly for every platform: an explicit build number wins verbatim,
/// otherwise the current build number is kept unchanged, otherwise 0.
///
/// Missing trailing components default to 0 (`"1.2"` parses as `1.2.0`).
///
/// # Errors
/// Returns [`SyncError::InvalidVersionFormat`] if the text is empty, has more
/// than three dotted components, or any component is not a non-negative
/// integer.
pub fn parse_version(
    version_text: &str,
    current: Option<&VersionRecord>,
    explicit_build: Option<u64>,
) -> Result<VersionRecord, SyncError> {
    let invalid = || SyncError::InvalidVersionFormat {
        input: version_text.to_string(),
    };

    let trimmed = version_text.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let parts = trimmed.split('.').collect::<Vec<_>>();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let mut numbers = [0u64; 3];
    for (index, part) in parts.iter().enumerate() {
        numbers[index] = part.parse::<u64>().map_err(|_| invalid())?;
    }

    let build_number = match explicit_build {
        Some(build) => build,
        None => current.map_or(0, VersionRecord::build_number),
    };

    Ok(VersionRecord {
        major: numbers[0],
        minor: numbers[1],
        patch: numbers[2],
        build_number,
        raw: version_text.to_string(),
    })
}
