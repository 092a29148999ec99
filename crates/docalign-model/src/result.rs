use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ResolvedOccurrence, TemplateKey};

/// One template key and the value extracted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedField {
    pub key: TemplateKey,
    pub value: String,
}

/// The key/value mapping of one document.
///
/// Holds exactly one field per distinct template key, in template order.
/// Keys never located in the text carry an empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    fields: Vec<AlignedField>,
    occurrences: Vec<ResolvedOccurrence>,
}

impl AlignmentResult {
    pub fn new(fields: Vec<AlignedField>, occurrences: Vec<ResolvedOccurrence>) -> Self {
        Self {
            fields,
            occurrences,
        }
    }

    /// Value for `key`, or `None` when the key is not part of the template.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key.as_str() == key)
            .map(|field| field.value.as_str())
    }

    pub fn fields(&self) -> &[AlignedField] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TemplateKey, &str)> {
        self.fields
            .iter()
            .map(|field| (&field.key, field.value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &TemplateKey> {
        self.fields.iter().map(|field| &field.key)
    }

    /// Resolved label occurrences in document order.
    pub fn occurrences(&self) -> &[ResolvedOccurrence] {
        &self.occurrences
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with a non-empty value.
    pub fn filled_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.value.is_empty()).count()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.key.as_str().to_string(), field.value.clone()))
            .collect()
    }
}
