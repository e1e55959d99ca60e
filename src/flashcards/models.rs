//! Data models for vocabulary cards

use serde::{Deserialize, Serialize};

/// One row of the vocabulary input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEntry {
    /// Word or phrase to study (trimmed, never empty)
    pub keyword: String,
    /// Translation supplied by the user, empty when the column was blank
    #[serde(default)]
    pub translation: String,
}

impl InputEntry {
    pub fn new(keyword: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            translation: translation.into(),
        }
    }

    /// Whether the user already provided a translation
    pub fn has_translation(&self) -> bool {
        !self.translation.is_empty()
    }
}

/// Structured word information returned by a definition lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    /// Absent or empty means the word was not found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// At most three example sentences, in dictionary order
    #[serde(default)]
    pub examples: Vec<String>,
}

impl LookupResult {
    /// Check whether the lookup resolved to a usable definition
    pub fn has_definition(&self) -> bool {
        self.definition.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// A finished card, one row of the output table.
///
/// Every field is a plain string; sub-lookups that failed leave their
/// field empty instead of dropping the card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "No")]
    pub id: String,
    #[serde(rename = "Image")]
    pub image_markup: String,
    #[serde(rename = "Vietnamese")]
    pub translation: String,
    #[serde(rename = "Suggestion")]
    pub hint: String,
    #[serde(rename = "Keyword")]
    pub keyword: String,
    #[serde(rename = "Transcription")]
    pub transcription: String,
    #[serde(rename = "Explanation")]
    pub explanation: String,
    #[serde(rename = "Sound")]
    pub sound_markup: String,
    #[serde(rename = "Example")]
    pub examples_markup: String,
}

/// Outcome of a full generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Cards in input order
    pub cards: Vec<OutputRecord>,
    /// Keywords the dictionary could not resolve, in input order
    pub skipped: Vec<String>,
}

impl GenerationReport {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
