#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// An expected field label of a document class.
///
/// Always non-empty and trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateKey(String);

impl TemplateKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyTemplateKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of whitespace-separated tokens in the label.
    pub fn token_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TemplateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TemplateKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateKey> for String {
    fn from(key: TemplateKey) -> Self {
        key.0
    }
}

/// The ordered list of keys expected in one document class.
///
/// Serialized as a plain list of keys; deserialization goes through
/// [`Template::new`] and so rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TemplateKey>", into = "Vec<TemplateKey>")]
pub struct Template {
    keys: Vec<TemplateKey>,
}

impl Template {
    /// Builds a template from already validated keys.
    ///
    /// Duplicates are rejected with the same case-insensitive comparison
    /// used by [`Template::parse`].
    pub fn new(keys: Vec<TemplateKey>) -> Result<Self, ModelError> {
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, key) in keys.iter().enumerate() {
            if seen.insert(key.as_str().to_lowercase(), idx).is_some() {
                return Err(ModelError::DuplicateTemplateKey {
                    key: key.as_str().to_string(),
                    line: idx + 1,
                });
            }
        }
        Ok(Self { keys })
    }

    /// Parses a newline-delimited key list.
    ///
    /// Lines are trimmed and blank lines skipped. Line numbers in errors are
    /// 1-based and refer to the source text.
    pub fn parse(source: &str) -> Result<Self, ModelError> {
        let mut keys = Vec::new();
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = TemplateKey::new(trimmed)?;
            if seen.insert(key.as_str().to_lowercase(), idx + 1).is_some() {
                return Err(ModelError::DuplicateTemplateKey {
                    key: key.as_str().to_string(),
                    line: idx + 1,
                });
            }
            keys.push(key);
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[TemplateKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateKey> {
        self.keys.iter()
    }

    pub fn into_keys(self) -> Vec<TemplateKey> {
        self.keys
    }
}

impl TryFrom<Vec<TemplateKey>> for Template {
    type Error = ModelError;

    fn try_from(keys: Vec<TemplateKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<Template> for Vec<TemplateKey> {
    fn from(template: Template) -> Self {
        template.keys
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a TemplateKey;
    type IntoIter = std::slice::Iter<'a, TemplateKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_trimmed() {
        let key = TemplateKey::new("  Invoice Number \t").unwrap();
        assert_eq!(key.as_str(), "Invoice Number");
        assert_eq!(key.token_count(), 2);
    }

    #[test]
    fn blank_key_is_rejected() {
        assert_eq!(TemplateKey::new("   "), Err(ModelError::EmptyTemplateKey));
    }

    #[test]
    fn parse_skips_blank_lines_and_keeps_order() {
        let template = Template::parse("Name\n\n  Date  \r\nTotal\n").unwrap();
        let keys: Vec<&str> = template.iter().map(TemplateKey::as_str).collect();
        assert_eq!(keys, vec!["Name", "Date", "Total"]);
    }

    #[test]
    fn parse_rejects_case_insensitive_duplicates() {
        let err = Template::parse("Total\nName\nTOTAL").unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateTemplateKey {
                key: "TOTAL".to_string(),
                line: 3,
            }
        );
    }
}
