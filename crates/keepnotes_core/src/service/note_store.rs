//! Note collection owner.
//!
//! # Responsibility
//! - Own the in-memory note collection and its persistence.
//! - Enforce the configured validation policy on create/update.
//! - Derive the pin-first display order and page windows.
//!
//! # Invariants
//! - Every successful mutation is followed by a full-collection save.
//! - A rejected draft or unknown id leaves the collection untouched and
//!   triggers no save.
//! - Pin ordering uses a stable sort; equal pin states keep relative order.
//! - A failed save never fails the mutation; the store stays dirty until a
//!   later save succeeds.

use crate::config::{normalize_page_size, NoteStoreConfig};
use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::kv_store::{KeyValueStore, StoreError};
use crate::repo::note_repo::{load_notes, save_notes, LoadStatus};
use crate::service::pagination::{page_bounds, total_pages};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for note store operations.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Draft rejected by the active validation policy.
    Validation(NoteValidationError),
    /// Id does not address a note in the collection (stale handle).
    NoteNotFound(NoteId),
    /// Persistence-layer failure, only from explicit writes like `flush`.
    Storage(StoreError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NoteNotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteStoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for NoteStoreError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

pub type NoteStoreResult<T> = Result<T, NoteStoreError>;

/// Owner of the note collection and its backing store.
pub struct NoteStore<S: KeyValueStore> {
    storage: S,
    config: NoteStoreConfig,
    notes: Vec<Note>,
    load_status: LoadStatus,
    dirty: bool,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Loads the collection from `storage`.
    ///
    /// Never fails: absent or unreadable data yields an empty collection, see
    /// `load_status`.
    pub fn load(storage: S, config: NoteStoreConfig) -> Self {
        let (notes, load_status) = load_notes(&storage, &config.notes_key);
        Self {
            storage,
            config,
            notes,
            load_status,
            dirty: false,
        }
    }

    /// Creates a note from a valid draft and appends it.
    pub fn create_note(&mut self, draft: &NoteDraft) -> NoteStoreResult<Note> {
        if let Err(err) = self.config.validation_policy.check(draft) {
            info!("event=note_create module=store status=rejected reason={err:?}");
            return Err(err.into());
        }

        let note = Note::from_draft(draft);
        self.notes.push(note.clone());
        info!(
            "event=note_create module=store status=ok note_id={} pinned={} count={}",
            note.id,
            note.is_pinned,
            self.notes.len()
        );
        self.persist();
        Ok(note)
    }

    /// Replaces content of an existing note in place.
    pub fn update_note(&mut self, id: NoteId, draft: &NoteDraft) -> NoteStoreResult<Note> {
        let index = self.position(id)?;
        if let Err(err) = self.config.validation_policy.check(draft) {
            info!("event=note_update module=store status=rejected note_id={id} reason={err:?}");
            return Err(err.into());
        }

        let note = &mut self.notes[index];
        note.apply_draft(draft);
        let updated = note.clone();
        info!("event=note_update module=store status=ok note_id={id}");
        self.persist();
        Ok(updated)
    }

    /// Removes a note and returns it.
    pub fn delete_note(&mut self, id: NoteId) -> NoteStoreResult<Note> {
        let index = self.position(id)?;
        let removed = self.notes.remove(index);
        info!(
            "event=note_delete module=store status=ok note_id={id} count={}",
            self.notes.len()
        );
        self.persist();
        Ok(removed)
    }

    /// Flips the pin flag, then re-sorts the collection pinned first.
    ///
    /// Returns the new pin state.
    pub fn toggle_pin(&mut self, id: NoteId) -> NoteStoreResult<bool> {
        let index = self.position(id)?;
        let note = &mut self.notes[index];
        note.is_pinned = !note.is_pinned;
        let pinned = note.is_pinned;
        sort_pinned_first(&mut self.notes);
        info!("event=note_pin module=store status=ok note_id={id} pinned={pinned}");
        self.persist();
        Ok(pinned)
    }

    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Notes in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Collection reordered pinned first, recomputed on every call.
    pub fn sorted_view(&self) -> Vec<Note> {
        let mut view = self.notes.clone();
        sort_pinned_first(&mut view);
        view
    }

    /// One page of `sorted_view`, 1-indexed; out of range yields empty.
    pub fn page(&self, page_number: usize, page_size: usize) -> Vec<Note> {
        let view = self.sorted_view();
        let bounds = page_bounds(page_number, page_size, view.len());
        view[bounds].to_vec()
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        total_pages(self.notes.len(), page_size)
    }

    /// Page size from config, normalized.
    pub fn page_size(&self) -> usize {
        normalize_page_size(self.config.page_size)
    }

    pub fn config(&self) -> &NoteStoreConfig {
        &self.config
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    /// Whether the last save attempt failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the full collection now.
    ///
    /// # Errors
    /// - `Storage` when the backend write fails; the store stays dirty.
    pub fn flush(&mut self) -> NoteStoreResult<()> {
        match save_notes(&mut self.storage, &self.config.notes_key, &self.notes) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                Err(err.into())
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: NoteId) -> NoteStoreResult<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| {
                warn!("event=note_lookup module=store status=error error_code=note_not_found note_id={id}");
                NoteStoreError::NoteNotFound(id)
            })
    }

    fn persist(&mut self) {
        if let Err(err) = self.flush() {
            error!(
                "event=notes_save module=store status=error error_code=store_write_failed count={} error={}",
                self.notes.len(),
                err
            );
        }
    }
}

/// Stable sort putting pinned notes first.
fn sort_pinned_first(notes: &mut [Note]) {
    notes.sort_by_key(|note| !note.is_pinned);
}
