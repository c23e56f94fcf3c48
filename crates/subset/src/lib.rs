//! Subset generation for glyphpress: the external tool boundary, per-key
//! single flight, cache-or-generate logic and the upload pipeline
//! orchestrator.

pub mod error;
pub mod generator;
pub mod paths;
pub mod pipeline;
pub mod singleflight;
pub mod tool;

pub use error::{PipelineError, PipelineResult, ToolError};
pub use generator::{GeneratedSubset, SubsetGenerator};
pub use pipeline::UploadPipeline;
pub use tool::{Pyftsubset, SubsetTool, FLAVOR};
