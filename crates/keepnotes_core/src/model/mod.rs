//! Domain model for notes and user preferences.
//!
//! # Responsibility
//! - Define canonical data structures used by the note store and session.
//! - Own draft validation rules.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Display order is derived, never stored on the model.

pub mod note;
pub mod theme;
