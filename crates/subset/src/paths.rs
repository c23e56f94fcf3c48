//! Destination path derivation, confined to the upload root.

use crate::error::{PipelineError, PipelineResult};
use std::path::{Component, Path, PathBuf};

/// Reject anything that is not exactly one normal path component.
pub(crate) fn ensure_single_component(segment: &str) -> PipelineResult<()> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(PipelineError::RootEscape(segment.to_string())),
    }
}

/// Join `segment` onto `root` and verify the result cannot escape it.
///
/// The segment has already passed the identity character-class check; this
/// is the second, structural line of defense: the joined path must be a
/// single normal component and its canonical form (or that of its nearest
/// existing ancestor, for paths not created yet) must stay inside the
/// canonicalized root. Symlinks planted inside the root are resolved and
/// checked rather than trusted.
pub(crate) fn confine(root: &Path, segment: &str) -> PipelineResult<PathBuf> {
    ensure_single_component(segment)?;

    let root_canonical = root.canonicalize()?;
    let path = root.join(segment);

    let mut ancestor = path.as_path();
    loop {
        match std::fs::symlink_metadata(ancestor) {
            Ok(_) => {
                let canonical = ancestor.canonicalize()?;
                if !canonical.starts_with(&root_canonical) {
                    return Err(PipelineError::RootEscape(segment.to_string()));
                }
                break;
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        ancestor = match ancestor.parent() {
            Some(parent) => parent,
            None => return Err(PipelineError::RootEscape(segment.to_string())),
        };
    }

    Ok(path)
}
