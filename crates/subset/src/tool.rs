//! The external subsetting tool boundary.

use crate::error::ToolError;
use async_trait::async_trait;
use glyphpress_core::UnicodeRange;
use std::path::Path;
use tokio::process::Command;

/// Container flavor requested from the subsetting tool.
pub const FLAVOR: &str = "woff2";

/// Black-box subsetting capability: a raw font file in, a subsetted
/// artifact out. Only the exit status and the presence of the output file
/// are part of the contract.
///
/// Modeled as a trait so the pipeline's control flow and cleanup logic can
/// be exercised without spawning a real process.
#[async_trait]
pub trait SubsetTool: Send + Sync {
    /// Subset `input` to `range`, writing the artifact to `output`.
    async fn run(
        &self,
        input: &Path,
        range: UnicodeRange,
        output: &Path,
    ) -> Result<(), ToolError>;
}

/// `pyftsubset` process invocation.
pub struct Pyftsubset {
    command: String,
}

impl Pyftsubset {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl SubsetTool for Pyftsubset {
    async fn run(
        &self,
        input: &Path,
        range: UnicodeRange,
        output: &Path,
    ) -> Result<(), ToolError> {
        let out = Command::new(&self.command)
            .arg(input)
            .arg(format!("--unicodes={range}"))
            .arg(format!("--flavor={FLAVOR}"))
            .arg(format!("--output-file={}", output.display()))
            .output()
            .await
            .map_err(ToolError::Spawn)?;

        if out.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&out.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&out.stderr));
        Err(ToolError::Failed {
            status: out.status,
            output: combined,
        })
    }
}
