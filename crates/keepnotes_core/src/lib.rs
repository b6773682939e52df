//! Core domain logic for KeepNotes.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{NoteStoreConfig, DEFAULT_PAGE_SIZE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{DraftField, Note, NoteDraft, NoteId, NoteValidationError, ValidationPolicy};
pub use model::theme::Theme;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use repo::note_repo::{DecodedNotes, LoadStatus};
pub use service::editor::{DraftEditor, EditMode};
pub use service::note_store::{NoteStore, NoteStoreError, NoteStoreResult};
pub use service::pagination::PageCursor;
pub use service::session::NoteSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
