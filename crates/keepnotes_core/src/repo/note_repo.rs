//! Note collection and theme blob codecs over a `KeyValueStore`.
//!
//! # Responsibility
//! - Decode the stored note array into a clean collection on start.
//! - Encode and write the full collection after every change.
//! - Read/write the theme literal under its own key.
//!
//! # Invariants
//! - Loading never fails: absent, `null`, malformed or unreadable blobs all
//!   yield an empty collection with a matching `LoadStatus`.
//! - One undecodable array element is skipped; its siblings still load.
//! - Loaded notes have unique, non-nil ids.
//! - Logs carry counts and ids only, never note text.

use crate::model::note::Note;
use crate::model::theme::Theme;
use crate::repo::kv_store::{KeyValueStore, StoreResult};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

/// Outcome of reading the note blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Blob decoded; carries the number of notes.
    Loaded(usize),
    /// Array decoded, but some elements were not notes and were skipped.
    Partial { loaded: usize, skipped: usize },
    /// Key absent or blob is JSON `null`.
    Missing,
    /// Blob present but not a valid note array.
    Malformed,
    /// Backend read failed.
    Unreadable,
}

/// Loads the note collection stored under `key`.
pub fn load_notes<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> (Vec<Note>, LoadStatus) {
    let blob = match store.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=notes_load module=repo status=ok outcome=missing");
            return (Vec::new(), LoadStatus::Missing);
        }
        Err(err) => {
            error!(
                "event=notes_load module=repo status=error error_code=store_read_failed error={}",
                err
            );
            return (Vec::new(), LoadStatus::Unreadable);
        }
    };

    match decode_notes(&blob) {
        Ok(Some(DecodedNotes { notes, skipped: 0 })) => {
            let count = notes.len();
            info!("event=notes_load module=repo status=ok outcome=loaded count={count}");
            (notes, LoadStatus::Loaded(count))
        }
        Ok(Some(DecodedNotes { notes, skipped })) => {
            let loaded = notes.len();
            warn!(
                "event=notes_load module=repo status=degraded outcome=partial count={loaded} skipped={skipped}"
            );
            (notes, LoadStatus::Partial { loaded, skipped })
        }
        Ok(None) => {
            info!("event=notes_load module=repo status=ok outcome=null_blob");
            (Vec::new(), LoadStatus::Missing)
        }
        Err(err) => {
            warn!(
                "event=notes_load module=repo status=degraded outcome=malformed blob_len={} error={}",
                blob.len(),
                err
            );
            (Vec::new(), LoadStatus::Malformed)
        }
    }
}

/// Writes the full collection under `key`, replacing the previous blob.
pub fn save_notes<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    notes: &[Note],
) -> StoreResult<()> {
    let blob = encode_notes(notes)?;
    store.set(key, &blob)
}

/// Notes recovered from one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNotes {
    pub notes: Vec<Note>,
    /// Array elements that could not be read as a note.
    pub skipped: usize,
}

/// Decodes a stored note array element by element.
///
/// Returns `Ok(None)` for a JSON `null` blob and `Err` only when the blob is
/// not a JSON array at all. Elements that fail to decode are skipped. Ids
/// that are nil or repeated are replaced with fresh ones so every loaded
/// note stays addressable.
pub fn decode_notes(blob: &str) -> Result<Option<DecodedNotes>, serde_json::Error> {
    let Some(values) = serde_json::from_str::<Option<Vec<Value>>>(blob)? else {
        return Ok(None);
    };

    let mut notes = Vec::with_capacity(values.len());
    let mut skipped = 0usize;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Note>(value) {
            Ok(note) => notes.push(note),
            Err(err) => {
                warn!(
                    "event=notes_decode module=repo status=degraded outcome=skip_element index={index} error={err}"
                );
                skipped += 1;
            }
        }
    }

    let mut seen = HashSet::with_capacity(notes.len());
    let mut reassigned = 0usize;
    for note in &mut notes {
        if note.id.is_nil() || !seen.insert(note.id) {
            note.id = Uuid::new_v4();
            seen.insert(note.id);
            reassigned += 1;
        }
    }
    if reassigned > 0 {
        warn!("event=notes_decode module=repo status=degraded reassigned_ids={reassigned}");
    }

    Ok(Some(DecodedNotes { notes, skipped }))
}

pub fn encode_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Loads the theme flag, defaulting to `Light` on absence or read failure.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Theme {
    match store.get(key) {
        Ok(Some(value)) => Theme::from_stored(&value),
        Ok(None) => Theme::default(),
        Err(err) => {
            error!(
                "event=theme_load module=repo status=error error_code=store_read_failed error={}",
                err
            );
            Theme::default()
        }
    }
}

pub fn save_theme<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    theme: Theme,
) -> StoreResult<()> {
    store.set(key, theme.as_str())
}
