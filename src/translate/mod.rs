//! Translation fallback for entries without a user-supplied translation
//!
//! Backends are interchangeable behind the `Translator` trait. When a
//! backend cannot be set up the pipeline gets `UnavailableTranslator`, so
//! callers never check whether translation is possible.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub mod google;
pub mod mymemory;

pub use google::GoogleTranslator;
pub use mymemory::MyMemoryTranslator;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error: {status}")]
    Server { status: u16 },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Nothing to translate")]
    EmptyInput,
    #[error("Translation is not available")]
    Unavailable,
}

/// Translates a word from the source language into the target language
pub trait Translator {
    fn name(&self) -> &'static str;

    fn translate_to_target(&self, word: &str) -> Result<String, TranslateError>;
}

/// Translator used when no backend could be initialized
pub struct UnavailableTranslator;

impl Translator for UnavailableTranslator {
    fn name(&self) -> &'static str {
        "none"
    }

    fn translate_to_target(&self, _word: &str) -> Result<String, TranslateError> {
        Err(TranslateError::Unavailable)
    }
}

/// Available translation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorBackend {
    /// Public Google Translate endpoint
    #[default]
    Google,
    /// MyMemory translation memory API
    #[value(name = "mymemory")]
    MyMemory,
    /// Never translate
    #[serde(rename = "none")]
    #[value(name = "none")]
    Disabled,
}

/// Language pair used for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: "en".to_string(),
            target: "vi".to_string(),
        }
    }
}

/// Build the translator for `backend`, falling back to none on setup failure
pub fn build_translator(
    backend: TranslatorBackend,
    languages: LanguagePair,
    timeout: Duration,
) -> Box<dyn Translator> {
    let built: Result<Box<dyn Translator>, TranslateError> = match backend {
        TranslatorBackend::Google => {
            GoogleTranslator::new(languages, timeout).map(|t| Box::new(t) as Box<dyn Translator>)
        }
        TranslatorBackend::MyMemory => {
            MyMemoryTranslator::new(languages, timeout).map(|t| Box::new(t) as Box<dyn Translator>)
        }
        TranslatorBackend::Disabled => Ok(Box::new(UnavailableTranslator)),
    };

    built.unwrap_or_else(|e| {
        log::warn!("Translator unavailable, translations will be left empty: {}", e);
        Box::new(UnavailableTranslator)
    })
}
