//! Note store configuration.
//!
//! # Invariants
//! - `page_size` of 0 is never used directly; see `normalize_page_size`.
//! - Omitted JSON fields fall back to `NoteStoreConfig::default()`.

use crate::model::note::ValidationPolicy;
use serde::Deserialize;

/// Page size used when none (or zero) is configured.
pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_NOTES_KEY: &str = "notes";
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Runtime options for `NoteStore` and `NoteSession`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoteStoreConfig {
    pub validation_policy: ValidationPolicy,
    pub page_size: usize,
    /// Key holding the JSON note array.
    pub notes_key: String,
    /// Key holding the `"dark"`/`"light"` literal.
    pub theme_key: String,
}

impl Default for NoteStoreConfig {
    fn default() -> Self {
        Self {
            validation_policy: ValidationPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            notes_key: DEFAULT_NOTES_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl NoteStoreConfig {
    /// Parses a (possibly partial) JSON config document.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation_policy = policy;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Effective page size after normalization.
    pub fn effective_page_size(&self) -> usize {
        normalize_page_size(self.page_size)
    }
}

/// Normalizes a page size: zero maps to `DEFAULT_PAGE_SIZE`.
pub fn normalize_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}
