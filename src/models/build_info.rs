//! Build metadata shown on the about screen.
//!
//! `build-info.json` is produced at build time (`saver build-info`) and read
//! back by `saver about`. A missing or malformed file falls back to fixed
//! placeholder values.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub build_time: String,
    pub build_id: String,
    pub version: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            build_time: "2024-01-20 15:30:00".to_string(),
            build_id: "00000000".to_string(),
            version: "beta.0.1".to_string(),
        }
    }
}

impl BuildInfo {
    /// Describe a build happening now.
    pub fn generate(version: impl Into<String>) -> Self {
        let now = Utc::now();
        let build_time = now.to_rfc3339();

        let mut hasher = Sha256::new();
        hasher.update(build_time.as_bytes());
        hasher.update(std::process::id().to_le_bytes());
        hasher.update(now.timestamp_subsec_nanos().to_le_bytes());
        let digest = hex::encode(hasher.finalize());

        Self {
            build_time,
            build_id: digest[..8].to_string(),
            version: version.into(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load build info or return the placeholder if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("Build info unavailable at {:?}: {}", path.as_ref(), e);
            Self::default()
        })
    }

    /// Write pretty JSON atomically (temp file, then rename).
    pub async fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// `version-buildId`
    pub fn label(&self) -> String {
        format!("{}-{}", self.version, self.build_id)
    }

    /// Build time in local time, or verbatim when it is not RFC 3339.
    pub fn display_time(&self) -> String {
        DateTime::parse_from_rfc3339(&self.build_time)
            .map(|t| {
                t.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| self.build_time.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_is_eight_hex_chars() {
        let info = BuildInfo::generate("beta.0.1");
        assert_eq!(info.build_id.len(), 8);
        assert!(info.build_id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert!(DateTime::parse_from_rfc3339(&info.build_time).is_ok());
        assert_eq!(info.label(), format!("beta.0.1-{}", info.build_id));
    }

    #[test]
    fn missing_file_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let info = BuildInfo::load_or_default(dir.path().join("build-info.json"));
        assert_eq!(info, BuildInfo::default());
        assert_eq!(info.display_time(), "2024-01-20 15:30:00");
    }

    #[test]
    fn malformed_file_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build-info.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(BuildInfo::load_or_default(&path), BuildInfo::default());
    }

    #[tokio::test]
    async fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/build-info.json");
        let info = BuildInfo::generate("1.2.3");
        info.write(&path).await.unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"buildTime\""));
        assert_eq!(BuildInfo::load(&path).unwrap(), info);
        assert!(!path.with_extension("tmp").exists());
    }
}
