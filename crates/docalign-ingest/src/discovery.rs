//! Input document discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// File extensions treated as scanned documents (compared case-insensitively).
pub const DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Lists all scanned documents in a directory.
///
/// Returns files sorted by filename. Subdirectories are not searched.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::InputNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_file() && is_document(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Whether the path has one of [`DOCUMENT_EXTENSIONS`].
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// File stem used to name a document's outputs.
pub fn document_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("document")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn recognizes_document_extensions() {
        assert!(is_document(Path::new("scan.PDF")));
        assert!(is_document(Path::new("scan.jpeg")));
        assert!(!is_document(Path::new("scan.txt")));
        assert!(!is_document(Path::new("scan")));
    }

    #[test]
    fn not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("scan.png");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_documents(&file_path);
        assert!(matches!(result, Err(IngestError::InputNotFound { .. })));
    }

    #[test]
    fn stem_of_document() {
        assert_eq!(document_stem(Path::new("/in/invoice_01.png")), "invoice_01");
    }
}
