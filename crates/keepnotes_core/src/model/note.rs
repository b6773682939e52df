//! Note domain model and draft validation.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its stable identity.
//! - Define the editable `NoteDraft` shape bound by the rendering layer.
//! - Own the two content validation policies.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another note.
//! - Blank checks always trim whitespace first.
//! - A draft that fails the active policy never becomes a `Note`.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one note.
pub type NoteId = Uuid;

/// One user-authored note.
///
/// Serialized with camelCase keys so the stored blob keeps the
/// `title/tagline/body/isPinned` shape written by earlier app versions.
/// Missing or `null` fields decode to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Legacy blobs carry no id; a fresh one is generated while decoding.
    /// A `null` id decodes as nil and is repaired by the blob loader.
    #[serde(default = "Uuid::new_v4", deserialize_with = "null_as_default")]
    pub id: NoteId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Empty string means no tagline.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_pinned: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Note {
    /// Builds a note from a draft with a freshly generated id.
    ///
    /// Does not validate; callers go through `ValidationPolicy::check` first.
    pub fn from_draft(draft: &NoteDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            tagline: draft.tagline.clone(),
            body: draft.body.clone(),
            is_pinned: draft.is_pinned.unwrap_or(false),
        }
    }

    /// Replaces content fields from a draft, keeping identity.
    ///
    /// The pin flag only changes when the draft sets it explicitly.
    pub fn apply_draft(&mut self, draft: &NoteDraft) {
        self.title = draft.title.clone();
        self.tagline = draft.tagline.clone();
        self.body = draft.body.clone();
        if let Some(pinned) = draft.is_pinned {
            self.is_pinned = pinned;
        }
    }

    /// Returns an editable draft snapshot of this note.
    ///
    /// The pin flag is left unset so a later commit keeps whatever pin state
    /// the note has at that time.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            tagline: self.tagline.clone(),
            body: self.body.clone(),
            is_pinned: None,
        }
    }
}

/// Editable text field of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Tagline,
    Body,
}

/// In-progress note content, not yet committed to the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub tagline: String,
    pub body: String,
    /// `None` means "not set": new notes start unpinned and updates keep
    /// the existing flag.
    pub is_pinned: Option<bool>,
}

impl NoteDraft {
    /// Convenience constructor used by callers that build drafts directly.
    pub fn new(
        title: impl Into<String>,
        tagline: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            tagline: tagline.into(),
            body: body.into(),
            is_pinned: None,
        }
    }

    /// Returns a copy with an explicit pin flag.
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = Some(is_pinned);
        self
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Tagline => &self.tagline,
            DraftField::Body => &self.body,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Tagline => self.tagline = value,
            DraftField::Body => self.body = value,
        }
    }

    /// Returns whether every text field is blank.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.title) && is_blank(&self.tagline) && is_blank(&self.body)
    }
}

/// Content rule applied on create and update.
///
/// Two incompatible rules existed in earlier versions of the app; the store
/// is configured with exactly one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// At least one of title, tagline or body must be non-blank.
    #[default]
    AnyField,
    /// Title and body must both be non-blank; tagline stays optional.
    TitleAndBody,
}

impl ValidationPolicy {
    /// Checks a draft against this policy.
    ///
    /// # Errors
    /// - `EmptyNote` under `AnyField` when all fields are blank.
    /// - `MissingTitle`, then `MissingBody`, under `TitleAndBody`.
    pub fn check(self, draft: &NoteDraft) -> Result<(), NoteValidationError> {
        match self {
            Self::AnyField => {
                if draft.is_blank() {
                    return Err(NoteValidationError::EmptyNote);
                }
            }
            Self::TitleAndBody => {
                if is_blank(&draft.title) {
                    return Err(NoteValidationError::MissingTitle);
                }
                if is_blank(&draft.body) {
                    return Err(NoteValidationError::MissingBody);
                }
            }
        }
        Ok(())
    }
}

/// Draft rejected by the active validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyNote,
    MissingTitle,
    MissingBody,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(
                f,
                "at least one of the fields (title, tagline, or body) must be filled"
            ),
            Self::MissingTitle => write!(f, "note title must not be blank"),
            Self::MissingBody => write!(f, "note body must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{DraftField, Note, NoteDraft, NoteValidationError, ValidationPolicy};

    #[test]
    fn any_field_accepts_tagline_only() {
        let draft = NoteDraft::new("", "just a tagline", "  ");
        assert_eq!(ValidationPolicy::AnyField.check(&draft), Ok(()));
    }

    #[test]
    fn any_field_rejects_whitespace_only() {
        let draft = NoteDraft::new(" ", "\t", "\n");
        assert_eq!(
            ValidationPolicy::AnyField.check(&draft),
            Err(NoteValidationError::EmptyNote)
        );
    }

    #[test]
    fn title_and_body_reports_title_first() {
        let policy = ValidationPolicy::TitleAndBody;
        assert_eq!(
            policy.check(&NoteDraft::new("", "tag", "")),
            Err(NoteValidationError::MissingTitle)
        );
        assert_eq!(
            policy.check(&NoteDraft::new("title", "tag", "  ")),
            Err(NoteValidationError::MissingBody)
        );
        assert_eq!(policy.check(&NoteDraft::new("title", "", "body")), Ok(()));
    }

    #[test]
    fn apply_draft_keeps_pin_unless_overridden() {
        let mut note = Note::from_draft(&NoteDraft::new("a", "", "b").pinned(true));
        let id = note.id;

        note.apply_draft(&NoteDraft::new("c", "", "d"));
        assert!(note.is_pinned);
        assert_eq!(note.id, id);
        assert_eq!(note.title, "c");

        note.apply_draft(&NoteDraft::new("c", "", "d").pinned(false));
        assert!(!note.is_pinned);
    }

    #[test]
    fn to_draft_leaves_pin_unset() {
        let note = Note::from_draft(&NoteDraft::new("a", "t", "b").pinned(true));
        let draft = note.to_draft();
        assert_eq!(draft.is_pinned, None);
        assert_eq!(draft.tagline, "t");
    }

    #[test]
    fn null_fields_decode_to_defaults() {
        let note: Note = serde_json::from_str(
            r#"{"id":null,"title":"kept","tagline":null,"body":null,"isPinned":null}"#,
        )
        .unwrap();
        assert!(note.id.is_nil());
        assert_eq!(note.title, "kept");
        assert_eq!(note.tagline, "");
        assert_eq!(note.body, "");
        assert!(!note.is_pinned);
    }

    #[test]
    fn set_field_targets_single_field() {
        let mut draft = NoteDraft::default();
        draft.set_field(DraftField::Tagline, "tag");
        assert_eq!(draft.field(DraftField::Tagline), "tag");
        assert!(draft.title.is_empty());
        assert!(draft.body.is_empty());
    }
}
