//! Session facade bound by the rendering layer.
//!
//! # Responsibility
//! - Compose the note store, draft editor, page cursor and theme flag.
//! - Keep editor and cursor consistent with collection changes.
//!
//! # Invariants
//! - Deleting the note under edit abandons the edit session.
//! - The page cursor is re-clamped after every collection change.
//! - A rejected commit keeps the draft so the user can fix it.

use crate::config::NoteStoreConfig;
use crate::model::note::{DraftField, Note, NoteDraft, NoteId};
use crate::model::theme::Theme;
use crate::repo::kv_store::KeyValueStore;
use crate::repo::note_repo::{load_theme, save_theme};
use crate::service::editor::{DraftEditor, EditMode};
use crate::service::note_store::{NoteStore, NoteStoreError, NoteStoreResult};
use crate::service::pagination::PageCursor;
use log::{error, info};

/// One user's interactive note session over an injected store.
pub struct NoteSession<S: KeyValueStore> {
    store: NoteStore<S>,
    editor: DraftEditor,
    cursor: PageCursor,
    theme: Theme,
}

impl<S: KeyValueStore> NoteSession<S> {
    /// Loads notes and theme from `storage`. Never fails.
    pub fn open(storage: S, config: NoteStoreConfig) -> Self {
        let theme = load_theme(&storage, &config.theme_key);
        let store = NoteStore::load(storage, config);
        info!(
            "event=session_open module=session status=ok count={} theme={} load_status={:?}",
            store.len(),
            theme.as_str(),
            store.load_status()
        );
        Self {
            store,
            editor: DraftEditor::default(),
            cursor: PageCursor::default(),
            theme,
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn into_store(self) -> NoteStore<S> {
        self.store
    }

    /// Mutable access to the backing storage, for hosts that swap or repair it.
    pub fn storage_mut(&mut self) -> &mut S {
        self.store.storage_mut()
    }

    /// Whether a note write failed and has not been retried successfully.
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Writes the full note collection now, clearing the dirty flag on success.
    pub fn flush(&mut self) -> NoteStoreResult<()> {
        self.store.flush()
    }

    /// Notes on the current page, pinned first.
    pub fn current_page_notes(&self) -> Vec<Note> {
        self.store.page(self.cursor.current(), self.store.page_size())
    }

    pub fn current_page(&self) -> usize {
        self.cursor.current()
    }

    pub fn total_pages(&self) -> usize {
        self.store.total_pages(self.store.page_size())
    }

    pub fn first_page(&mut self) -> usize {
        self.cursor.first()
    }

    pub fn prev_page(&mut self) -> usize {
        let total = self.total_pages();
        self.cursor.prev(total)
    }

    pub fn next_page(&mut self) -> usize {
        let total = self.total_pages();
        self.cursor.next(total)
    }

    pub fn last_page(&mut self) -> usize {
        let total = self.total_pages();
        self.cursor.last(total)
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total = self.total_pages();
        self.cursor.go_to(page, total)
    }

    pub fn draft(&self) -> &NoteDraft {
        self.editor.draft()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.editor.mode()
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.editor.set_field(field, value);
    }

    pub fn set_draft_pinned(&mut self, is_pinned: bool) {
        self.editor.set_pinned(is_pinned);
    }

    /// Opens an existing note for editing.
    pub fn begin_edit(&mut self, id: NoteId) -> NoteStoreResult<()> {
        let note = self
            .store
            .get_note(id)
            .ok_or(NoteStoreError::NoteNotFound(id))?;
        self.editor.begin_edit(note);
        Ok(())
    }

    /// Commits the draft: creates in compose mode, updates in edit mode.
    ///
    /// On success the draft is cleared and edit mode exits. On failure the
    /// draft is kept, except when the edited note vanished, which abandons
    /// the edit.
    pub fn commit_draft(&mut self) -> NoteStoreResult<Note> {
        let draft = self.editor.draft().clone();
        let result = match self.editor.mode() {
            EditMode::Composing => self.store.create_note(&draft),
            EditMode::Editing(id) => self.store.update_note(id, &draft),
        };

        match &result {
            Ok(_) => {
                self.editor.discard();
                self.clamp_cursor();
            }
            Err(NoteStoreError::NoteNotFound(_)) => self.editor.discard(),
            Err(_) => {}
        }
        result
    }

    pub fn discard_draft(&mut self) {
        self.editor.discard();
    }

    /// Deletes a note, abandoning the edit session if it targeted that note.
    pub fn delete_note(&mut self, id: NoteId) -> NoteStoreResult<Note> {
        let removed = self.store.delete_note(id)?;
        if self.editor.editing_id() == Some(id) {
            info!("event=edit_abandon module=session status=ok note_id={id}");
            self.editor.discard();
        }
        self.clamp_cursor();
        Ok(removed)
    }

    pub fn toggle_pin(&mut self, id: NoteId) -> NoteStoreResult<bool> {
        self.store.toggle_pin(id)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists it.
    ///
    /// The in-memory flag flips even when the write fails.
    pub fn toggle_theme(&mut self) -> NoteStoreResult<Theme> {
        self.theme = self.theme.toggled();
        let key = self.store.config().theme_key.clone();
        if let Err(err) = save_theme(self.store.storage_mut(), &key, self.theme) {
            error!(
                "event=theme_save module=session status=error error_code=store_write_failed error={}",
                err
            );
            return Err(err.into());
        }
        info!(
            "event=theme_toggle module=session status=ok theme={}",
            self.theme.as_str()
        );
        Ok(self.theme)
    }

    fn clamp_cursor(&mut self) {
        let total = self.total_pages();
        self.cursor.clamp(total);
    }
}
