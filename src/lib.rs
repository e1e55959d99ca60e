//! Cardsmith turns a vocabulary list into flashcards.
//!
//! Each `Keyword,Vietnamese` row is looked up in a dictionary service,
//! translated when needed, paired with a pronunciation and a stock photo,
//! and written out as one row of an Anki-ready CSV table.

pub mod config;
pub mod dictionary;
pub mod flashcards;
pub mod media;
pub mod table;
pub mod translate;

pub use config::CardsConfig;
pub use flashcards::{CardGenerator, GenerationReport};
