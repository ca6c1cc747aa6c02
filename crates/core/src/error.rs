use std::path::PathBuf;

use thiserror::Error;

/// Fatal sync failures that abort the whole run.
///
/// Everything platform-specific (missing file, missing version key) is not an
/// error at all: those degrade to [`crate::PlatformOutcome`] values so the
/// remaining platforms still get updated.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The requested version text is not a numeric dotted triple.
    #[error("invalid version format {input:?}: expected numeric major.minor.patch")]
    InvalidVersionFormat { input: String },

    /// The JSON manifest is missing or unparseable. The manifest supplies the
    /// app name used to locate the iOS property list, so nothing can proceed.
    #[error("cannot read project manifest at {path}")]
    ManifestUnavailable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
