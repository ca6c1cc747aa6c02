pub mod config;
pub mod error;
pub mod outcome;
pub mod platform;
pub mod version;

// Re-export the common surface for convenience
pub use config::SyncPaths;
pub use error::SyncError;
pub use outcome::{PlatformOutcome, PlatformReport, SyncReport};
pub use platform::Platform;
pub use version::{VersionRecord, parse_version};
