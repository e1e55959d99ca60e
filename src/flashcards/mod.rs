//! Vocabulary flashcards
//!
//! This module provides:
//! - Card data models (input entries, lookups, output records)
//! - Deterministic cloze hints
//! - Field formatting (cloze explanation, examples, media markup)
//! - The generation pipeline tying the external services together

pub mod format;
pub mod generator;
pub mod hint;
pub mod models;

pub use generator::{CardGenerator, Collaborators, GenerateError, GeneratorPaths};
pub use hint::{hint, hint_random};
pub use models::*;
