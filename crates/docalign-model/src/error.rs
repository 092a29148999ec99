use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("template key must not be empty")]
    EmptyTemplateKey,
    #[error("duplicate template key '{key}' on line {line}")]
    DuplicateTemplateKey { key: String, line: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
