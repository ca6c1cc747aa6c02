use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use tokio::fs::{read_to_string, write};

/// The project's package.json: the one mandatory file of a run.
///
/// Supplies the app name used to locate the iOS property list, so a project
/// where it cannot be loaded has nothing to synchronize against.
#[derive(Debug)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
    version: String,
    app_name: String,
}

impl PackageManifest {
    /// # Errors
    /// Returns error if the file is missing, is not a JSON object, or lacks
    /// the `version` / `appName` string fields.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = read_to_string(path)
            .await
            .context(format!("Cannot find file with name {}", path.display()))?;
        let document: Value = serde_json::from_str(&raw)
            .context(format!("Invalid JSON in {}", path.display()))?;
        let document = match document {
            Value::Object(map) => map,
            _ => anyhow::bail!("Expected a JSON object in {}", path.display()),
        };

        let version = document
            .get("version")
            .and_then(Value::as_str)
            .context(format!("Version not found - {}", path.display()))?
            .to_string();
        let app_name = document
            .get("appName")
            .and_then(Value::as_str)
            .context(format!("App name not found - {}", path.display()))?
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            document,
            version,
            app_name,
        })
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Rewrite only the `version` field, preserving every other field.
    ///
    /// The manifest format uses tab indentation and a trailing newline.
    ///
    /// # Errors
    /// Returns error if serialization or the file write fails.
    pub async fn set_version(&self, version: &str) -> Result<()> {
        let mut document = self.document.clone();
        document.insert(
            "version".to_string(),
            Value::String(version.to_string()),
        );

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        document
            .serialize(&mut serializer)
            .context("Failed to serialize package.json")?;
        buf.push(b'\n');

        write(&self.path, buf)
            .await
            .context(format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
