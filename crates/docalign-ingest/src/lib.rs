//! Template loading, input discovery and OCR text sources.

pub mod discovery;
pub mod error;
pub mod ocr;
pub mod template;

pub use discovery::{DOCUMENT_EXTENSIONS, document_stem, is_document, list_documents};
pub use error::{IngestError, Result};
pub use ocr::{SidecarRecognizer, TextRecognizer, parse_export, parse_plain, read_ocr_dump};
pub use template::load_template;
