//! Copying declared source paths out of a checkout

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{GitError, Result};

/// Copy each of `paths` (relative to `<checkout>/<sparse_folder>`)
/// into `dest`, preserving directory structure.
pub fn copy_paths(checkout: &Path, sparse_folder: &str, paths: &[String], dest: &Path) -> Result<()> {
    for rel in paths {
        let from = checkout.join(sparse_folder).join(rel);
        let to = dest.join(rel);
        copy_tree(&from, &to)?;
    }
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|err| GitError::Copy {
                path: entry.path().display().to_string(),
                message: err.to_string(),
            })?;
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn copies_nested_paths_preserving_structure() {
        let checkout = TempDir::new().unwrap();
        let overlay = checkout.path().join("nginx-1").join("overlay").join("base");
        fs::create_dir_all(&overlay).unwrap();
        fs::write(overlay.join("kustomization.yaml"), "resources: []").unwrap();

        let dest = TempDir::new().unwrap();
        copy_paths(
            checkout.path(),
            "nginx-1",
            &["overlay".to_string()],
            dest.path(),
        )
        .unwrap();

        let copied = dest
            .path()
            .join("overlay")
            .join("base")
            .join("kustomization.yaml");
        assert_eq!(fs::read_to_string(copied).unwrap(), "resources: []");
    }
}
