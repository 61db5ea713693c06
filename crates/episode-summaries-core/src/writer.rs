//! Output writer for the assembled document
//!
//! The document is written once, whole. It goes to a uniquely named
//! temporary file in the target's directory and is then persisted over the
//! target, so a failed run leaves any previous output untouched and
//! concurrent runs never share a temporary file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::{Result, ScraperError};

/// Extension of the generated markdown file
const MARKDOWN_EXTENSION: &str = "md";

/// Derive the output file for a script: `<dir>/<stem>.md`.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use episode_summaries_core::writer::output_path_for;
///
/// assert_eq!(
///     output_path_for(Path::new("shows/adventure_time.py")),
///     PathBuf::from("shows/adventure_time.md"),
/// );
/// ```
pub fn output_path_for(script_path: &Path) -> PathBuf {
    script_path.with_extension(MARKDOWN_EXTENSION)
}

/// Overwrite `path` with `text`, UTF-8 encoded.
///
/// # Errors
/// Returns `ScraperError::WriteError` if the file cannot be written, e.g.
/// the parent directory is missing or not writable.
#[instrument(level = "debug", skip(path, text), fields(path = %path.display(), bytes = text.len()))]
pub async fn write_document(path: &Path, text: &str) -> Result<()> {
    let target = path.to_path_buf();
    let contents = text.to_owned();

    let written = tokio::task::spawn_blocking(move || persist_document(&target, &contents))
        .await
        .unwrap_or_else(|join_error| Err(std::io::Error::other(join_error)));

    if let Err(source) = written {
        return Err(ScraperError::WriteError {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!("document written");
    Ok(())
}

/// Write into a temporary sibling of `path`, then rename it into place.
///
/// The temporary file is deleted when dropped, so nothing is left behind on
/// failure.
fn persist_document(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_replaces_extension() {
        assert_eq!(
            output_path_for(Path::new("/scripts/the_office.py")),
            PathBuf::from("/scripts/the_office.md")
        );
    }

    #[test]
    fn test_output_path_for_bare_name() {
        assert_eq!(
            output_path_for(Path::new("episode_summaries")),
            PathBuf::from("episode_summaries.md")
        );
    }

    #[test]
    fn test_output_path_for_manifest_anchored_script() {
        let script = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/adventure_time.rs");
        let output = output_path_for(Path::new(script));

        assert!(output.is_absolute());
        assert!(output.parent().unwrap().is_dir());
        assert_eq!(output.file_name().unwrap(), "adventure_time.md");
    }

    #[tokio::test]
    async fn test_write_document_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show.md");
        std::fs::write(&path, "old contents that are longer").unwrap();

        write_document(&path, "# New\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# New\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_document_concurrent_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("show.md");
        let first = "# First\n".repeat(2000);
        let second = "# Second\n".repeat(2000);

        let (a, b) = tokio::join!(write_document(&path, &first), write_document(&path, &second));

        assert!(a.is_ok());
        assert!(b.is_ok());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents == first || contents == second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_document_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("show.md");

        match write_document(&path, "# Show\n").await {
            Err(ScraperError::WriteError { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected WriteError, got {:?}", other),
        }
        assert!(!path.exists());
    }
}
