use anyhow::Result;
use async_trait::async_trait;

use crate::outcome::PlatformOutcome;
use crate::version::VersionRecord;

/// One mobile platform's version storage.
///
/// Each file format implements this trait to expose its current version state
/// and to render an effective record back into its native syntax. Readers
/// never mutate the file; writers preserve all unrelated content.
#[async_trait]
pub trait Platform: std::fmt::Debug + Send + Sync {
    /// Display name used in the console report ("Android", "iOS").
    fn name(&self) -> &'static str;

    /// Current version state stored in the platform's file.
    ///
    /// A missing file or a file without the expected keys is `Ok(None)`, not
    /// an error: the orchestrator proceeds with defaults.
    ///
    /// # Errors
    /// Returns error only for genuinely unexpected I/O failures.
    async fn current_version(&self) -> Result<Option<VersionRecord>>;

    /// Write the effective record into the platform's file.
    ///
    /// # Errors
    /// Returns error only when the file exists but cannot be rewritten.
    async fn write_version(&self, record: &VersionRecord) -> Result<PlatformOutcome>;
}
