use std::path::PathBuf;

/// Outcome of one document in a batch.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub stem: String,
    pub source: PathBuf,
    /// OCR lines read for the document.
    pub lines: usize,
    /// Template keys that received a non-empty value.
    pub filled: usize,
    pub keys: usize,
    /// Directory holding `aligned.txt` and `raw_ocr.txt`.
    pub output_dir: Option<PathBuf>,
    pub error: Option<String>,
}

impl DocumentSummary {
    pub fn failed(stem: String, source: PathBuf, keys: usize, error: String) -> Self {
        Self {
            stem,
            source,
            lines: 0,
            filled: 0,
            keys,
            output_dir: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub struct BatchResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report: Option<PathBuf>,
    pub documents: Vec<DocumentSummary>,
    pub has_errors: bool,
}

impl BatchResult {
    pub fn failed_count(&self) -> usize {
        self.documents.iter().filter(|doc| !doc.is_ok()).count()
    }
}
