//! Explicit draft buffer for composing and editing notes.
//!
//! # Invariants
//! - The editor is either composing a new note or editing exactly one id.
//! - `discard` always returns to an empty composing draft.

use crate::model::note::{DraftField, Note, NoteDraft, NoteId};

/// What a commit of the current draft will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Commit creates a new note.
    Composing,
    /// Commit updates the note with this id.
    Editing(NoteId),
}

/// Draft buffer owned by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEditor {
    draft: NoteDraft,
    mode: EditMode,
}

impl Default for DraftEditor {
    fn default() -> Self {
        Self {
            draft: NoteDraft::default(),
            mode: EditMode::Composing,
        }
    }
}

impl DraftEditor {
    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Id under edit, if any.
    pub fn editing_id(&self) -> Option<NoteId> {
        match self.mode {
            EditMode::Editing(id) => Some(id),
            EditMode::Composing => None,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn set_pinned(&mut self, is_pinned: bool) {
        self.draft.is_pinned = Some(is_pinned);
    }

    /// Loads `note` into the buffer and switches to edit mode.
    ///
    /// Any unsaved draft is replaced.
    pub fn begin_edit(&mut self, note: &Note) {
        self.draft = note.to_draft();
        self.mode = EditMode::Editing(note.id);
    }

    /// Clears the buffer and leaves edit mode.
    pub fn discard(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftEditor, EditMode};
    use crate::model::note::{DraftField, Note, NoteDraft};

    #[test]
    fn begin_edit_then_discard_resets_everything() {
        let note = Note::from_draft(&NoteDraft::new("t", "g", "b").pinned(true));
        let mut editor = DraftEditor::default();
        editor.set_field(DraftField::Title, "unsaved");

        editor.begin_edit(&note);
        assert_eq!(editor.mode(), EditMode::Editing(note.id));
        assert_eq!(editor.draft().title, "t");
        assert_eq!(editor.draft().is_pinned, None);

        editor.set_pinned(false);
        assert_eq!(editor.draft().is_pinned, Some(false));

        editor.discard();
        assert_eq!(editor, DraftEditor::default());
        assert_eq!(editor.editing_id(), None);
    }
}
