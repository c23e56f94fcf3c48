//! Cache-check-then-generate for one subset artifact.

use crate::error::{PipelineError, PipelineResult};
use crate::singleflight::KeyLocks;
use crate::tool::SubsetTool;
use bytes::Bytes;
use glyphpress_core::SubsetRequest;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// One generated (or cache-hit) artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSubset {
    /// Subset identifier the artifact was produced for.
    pub subset_id: String,
    /// Final artifact path under the upload root.
    pub path: PathBuf,
    /// Whether this request created the artifact. False on a cache hit;
    /// only fresh artifacts are eligible for batch rollback.
    pub fresh: bool,
}

/// Drives the external tool behind the per-key single-flight guard.
pub struct SubsetGenerator {
    tool: Arc<dyn SubsetTool>,
    locks: KeyLocks,
}

impl SubsetGenerator {
    pub fn new(tool: Arc<dyn SubsetTool>) -> Self {
        Self {
            tool,
            locks: KeyLocks::new(),
        }
    }

    /// Produce the artifact for one subset request.
    ///
    /// Idempotent: an artifact already present at the target path is reused
    /// without invoking the tool. At most one generation per artifact path
    /// runs at a time; concurrent requesters for the same path serialize
    /// here and the laggards take the cache-hit branch.
    pub async fn generate(
        &self,
        payload: &Bytes,
        request: &SubsetRequest,
        artifact_path: &Path,
    ) -> PipelineResult<GeneratedSubset> {
        let key = artifact_path.to_string_lossy().into_owned();
        let _guard = self.locks.acquire(&key).await;

        if fs::try_exists(artifact_path).await? {
            debug!(artifact = %artifact_path.display(), "cache hit, skipping generation");
            return Ok(GeneratedSubset {
                subset_id: request.id.clone(),
                path: artifact_path.to_path_buf(),
                fresh: false,
            });
        }

        // The tool wants a real file handle independent of the in-memory
        // buffer; stage the payload in a scratch file. The tempfile is
        // removed on drop, covering every exit path below.
        let scratch = tempfile::Builder::new().prefix("font-").tempfile()?;
        fs::write(scratch.path(), payload).await?;

        match self
            .tool
            .run(scratch.path(), request.range, artifact_path)
            .await
        {
            Ok(()) => {
                info!(
                    artifact = %artifact_path.display(),
                    subset = %request.id,
                    "subset generated"
                );
                Ok(GeneratedSubset {
                    subset_id: request.id.clone(),
                    path: artifact_path.to_path_buf(),
                    fresh: true,
                })
            }
            Err(err) => {
                // Never leave a partial artifact at the target path.
                remove_if_exists(artifact_path).await;
                Err(PipelineError::Generation {
                    subset_id: request.id.clone(),
                    source: err,
                })
            }
        }
    }
}

/// Best-effort removal; missing files are fine, anything else is logged.
pub(crate) async fn remove_if_exists(path: &Path) {
    if let Err(err) = fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "failed to remove artifact");
        }
    }
}
