//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, ordering and persistence into use-case APIs.
//! - Keep the rendering layer decoupled from storage details.

pub mod editor;
pub mod note_store;
pub mod pagination;
pub mod session;
