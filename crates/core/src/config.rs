//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3232").
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Upload limit configuration.
///
/// Both ceilings are enforced before any parsing work begins so one
/// request cannot consume unbounded resources.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum font files accepted per request.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Nominal per-file size in bytes; the body ceiling is derived from it.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl LimitsConfig {
    /// Hard ceiling on the whole multipart request body.
    pub fn max_body_bytes(&self) -> usize {
        self.max_files.saturating_mul(self.max_file_bytes)
    }
}

/// Artifact storage configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for generated subset artifacts.
    #[serde(default = "default_upload_root")]
    pub upload_root: PathBuf,
}

/// External subsetting tool configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubsetterConfig {
    /// Command invoked to subset fonts.
    #[serde(default = "default_command")]
    pub command: String,
}

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub subsetter: SubsetterConfig,
}

impl AppConfig {
    /// Configuration for tests: an ephemeral upload root, default limits.
    ///
    /// **For testing only.**
    pub fn for_testing(upload_root: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig {
                upload_root: upload_root.into(),
            },
            ..Self::default()
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3232".to_string()
}

fn default_max_files() -> usize {
    10
}

fn default_max_file_bytes() -> usize {
    1 << 20 // 1 MiB
}

fn default_upload_root() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_command() -> String {
    "pyftsubset".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
        }
    }
}

impl Default for SubsetterConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}
