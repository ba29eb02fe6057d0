//! Output writing with path validation.
//!
//! Every emitted filename is cleaned and joined onto the output directory; a
//! name that would land outside it (`../`, absolute paths, null bytes) is
//! rejected before anything is written.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rolldown::BundleOutput;
use rolldown_common::Output;

use crate::{Error, Result};

/// Write every chunk and asset of `output` under `dir`.
///
/// Returns the written paths in emission order.
pub async fn write_bundle(output: &BundleOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    let files: Vec<(&str, &[u8])> = output
        .assets
        .iter()
        .map(|item| match item {
            Output::Chunk(chunk) => (chunk.filename.as_str(), chunk.code.as_bytes()),
            Output::Asset(asset) => (asset.filename.as_str(), asset.source.as_bytes()),
        })
        .collect();

    write_files(dir, &files).await
}

/// Validate all targets first, then write them, creating parent directories.
pub async fn write_files(dir: &Path, files: &[(&str, &[u8])]) -> Result<Vec<PathBuf>> {
    let dir = dir.to_path_buf().clean();

    let targets = files
        .iter()
        .map(|(filename, content)| Ok((validate_output_path(&dir, filename)?, *content)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(targets.len());
    for (target, content) in targets {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(&target, content).await.map_err(|e| {
            Error::WriteFailure(format!("Failed to write '{}': {}", target.display(), e))
        })?;

        tracing::trace!("Wrote {}", target.display());
        written.push(target);
    }

    Ok(written)
}

/// Join `filename` onto `base_dir` and make sure the result stays inside it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn validate_output_path_nested() {
        let base = Path::new("/tmp/output");
        let result = validate_output_path(base, "assets/logo-abc123.png").unwrap();
        assert_eq!(result, Path::new("/tmp/output/assets/logo-abc123.png"));
    }

    #[test]
    fn validate_output_path_current_dir() {
        let base = Path::new("/tmp/output");
        let result = validate_output_path(base, "./index.js").unwrap();
        assert_eq!(result, Path::new("/tmp/output/index.js"));
    }

    #[test]
    fn validate_output_path_rejects_traversal() {
        let base = Path::new("/tmp/output");
        assert!(matches!(
            validate_output_path(base, "../etc/passwd"),
            Err(Error::InvalidOutputPath(_))
        ));
        assert!(validate_output_path(base, "safe/../../../../etc/passwd").is_err());
        assert!(validate_output_path(base, "/etc/passwd").is_err());
        assert!(validate_output_path(base, ".").is_err());
    }

    #[test]
    fn validate_output_path_rejects_null_byte() {
        let base = Path::new("/tmp/output");
        assert!(validate_output_path(base, "file\0name.js").is_err());
    }

    #[tokio::test]
    async fn writes_nested_files() {
        let temp = TempDir::new().unwrap();
        let written = write_files(
            temp.path(),
            &[
                ("index.js", b"export {};".as_slice()),
                ("assets/style-1a2b.css", b".a{}".as_slice()),
            ],
        )
        .await
        .unwrap();

        assert_eq!(written.len(), 2);
        let css = std::fs::read_to_string(temp.path().join("assets/style-1a2b.css")).unwrap();
        assert_eq!(css, ".a{}");
    }

    #[tokio::test]
    async fn invalid_name_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let result = write_files(
            temp.path(),
            &[
                ("index.js", b"export {};".as_slice()),
                ("../escape.js", b"bad".as_slice()),
            ],
        )
        .await;

        assert!(result.is_err());
        assert!(!temp.path().join("index.js").exists());
    }
}
