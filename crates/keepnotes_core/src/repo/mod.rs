//! Persistence contracts and blob codecs.
//!
//! # Responsibility
//! - Define the key-value contract the core persists through.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Read paths degrade to defaults instead of failing.
//! - Write paths always carry the full current state, never a delta.

pub mod kv_store;
pub mod note_repo;
