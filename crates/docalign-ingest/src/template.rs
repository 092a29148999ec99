//! Template file loading.

use std::path::Path;

use docalign_model::Template;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Loads a newline-delimited template file.
///
/// Blank lines are skipped and keys trimmed. A leading byte order mark is
/// ignored.
pub fn load_template(path: &Path) -> Result<Template> {
    if !path.is_file() {
        return Err(IngestError::TemplateMissing {
            path: path.to_path_buf(),
        });
    }
    let source = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let template = Template::parse(source.trim_start_matches('\u{feff}')).map_err(|e| {
        IngestError::Template {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    debug!(
        path = %path.display(),
        key_count = template.len(),
        "loaded template"
    );
    Ok(template)
}
