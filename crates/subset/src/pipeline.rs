//! The upload pipeline: one uploaded font in, a batch of subset artifacts
//! out, or a single classified failure with nothing left behind.

use crate::error::{PipelineError, PipelineResult};
use crate::generator::{GeneratedSubset, SubsetGenerator};
use crate::paths;
use crate::tool::{SubsetTool, FLAVOR};
use bytes::Bytes;
use glyphpress_core::{FontIdentity, SubsetCatalog, UploadedFont};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Top-level orchestrator, shared across requests.
///
/// A run is single-pass and fail-fast: sniff, parse, validate, derive the
/// destination, then generate subsets in client order. Artifacts freshly
/// generated by a run are rolled back if a later subset in the same run
/// fails; cache hits from earlier requests are never touched.
pub struct UploadPipeline {
    root: PathBuf,
    catalog: SubsetCatalog,
    generator: SubsetGenerator,
}

impl UploadPipeline {
    /// Create the pipeline, ensuring the upload root exists.
    pub async fn new(
        root: impl Into<PathBuf>,
        catalog: SubsetCatalog,
        tool: Arc<dyn SubsetTool>,
    ) -> PipelineResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            catalog,
            generator: SubsetGenerator::new(tool),
        })
    }

    /// The subset catalog this pipeline resolves identifiers against.
    pub fn catalog(&self) -> &SubsetCatalog {
        &self.catalog
    }

    /// Run one font plus subset batch through the pipeline.
    #[instrument(skip_all, fields(subsets = subset_ids.len()))]
    pub async fn process(
        &self,
        payload: Bytes,
        subset_ids: &[String],
    ) -> PipelineResult<Vec<GeneratedSubset>> {
        if subset_ids.is_empty() {
            return Err(PipelineError::NoSubsets);
        }
        // Unknown identifiers are rejected before any font parsing happens.
        let requests = self.catalog.resolve_all(subset_ids)?;

        let font = UploadedFont::sniff(payload)?;
        let identity = FontIdentity::extract(font.payload())?;
        identity.validate()?;

        let dest_dir = self.destination(&identity).await?;
        fs::create_dir_all(&dest_dir).await?;

        let mut generated: Vec<GeneratedSubset> = Vec::with_capacity(requests.len());
        for request in &requests {
            let file_name = identity.artifact_file_name(&request.id, FLAVOR);
            paths::ensure_single_component(&file_name)?;
            let artifact_path = dest_dir.join(&file_name);

            match self
                .generator
                .generate(font.payload(), request, &artifact_path)
                .await
            {
                Ok(subset) => generated.push(subset),
                Err(err) => {
                    self.rollback(&generated).await;
                    return Err(err);
                }
            }
        }

        info!(
            family = %identity.family,
            subfamily = %identity.subfamily,
            media_type = font.media_type().as_str(),
            count = generated.len(),
            "upload processed"
        );
        Ok(generated)
    }

    /// Derive and confine the destination directory for an identity.
    ///
    /// Canonicalization hits the filesystem, so it runs off the async
    /// executor.
    async fn destination(&self, identity: &FontIdentity) -> PipelineResult<PathBuf> {
        let root = self.root.clone();
        let segment = identity.directory_name();
        tokio::task::spawn_blocking(move || paths::confine(&root, &segment))
            .await
            .map_err(|err| PipelineError::Io(std::io::Error::other(err)))?
    }

    /// Delete artifacts created by this request; cache hits are kept.
    async fn rollback(&self, generated: &[GeneratedSubset]) {
        for subset in generated.iter().filter(|s| s.fresh) {
            warn!(path = %subset.path.display(), "rolling back artifact from failed batch");
            crate::generator::remove_if_exists(&subset.path).await;
        }
    }
}
