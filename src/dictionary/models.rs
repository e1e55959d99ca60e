//! Dictionary API response models

use serde::Deserialize;

use crate::flashcards::format::MAX_EXAMPLES;
use crate::flashcards::LookupResult;

/// Locale preferred when several pronunciations are available
const PREFERRED_LOCALE: &str = "us";

/// Raw response of `GET /api/dictionary/en/{word}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryResponse {
    #[serde(default)]
    pub pronunciation: Vec<Pronunciation>,
    #[serde(default)]
    pub definition: Vec<Definition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pronunciation {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// IPA transcription
    #[serde(default)]
    pub pron: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub example: Vec<Example>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub text: String,
}

impl DictionaryResponse {
    /// Pick the US pronunciation, falling back to the first one listed
    fn preferred_pronunciation(&self) -> Option<&Pronunciation> {
        self.pronunciation
            .iter()
            .find(|p| {
                p.lang
                    .as_deref()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(PREFERRED_LOCALE))
            })
            .filter(|p| p.url.as_deref().is_some_and(|url| !url.is_empty()))
            .or_else(|| self.pronunciation.first())
    }

    /// Convert into the fields a card needs
    pub fn into_lookup(self, word: &str) -> LookupResult {
        let (pronunciation_url, transcription) = match self.preferred_pronunciation() {
            Some(p) => (p.url.clone(), p.pron.clone()),
            None => (None, None),
        };

        let definition = self
            .definition
            .first()
            .map(|d| d.text.trim().trim_end_matches(':').to_string());

        let examples = self
            .definition
            .iter()
            .flat_map(|d| d.example.iter())
            .map(|ex| ex.text.trim())
            .filter(|text| !text.is_empty())
            .take(MAX_EXAMPLES)
            .map(String::from)
            .collect();

        LookupResult {
            word: word.to_string(),
            pronunciation_url,
            transcription,
            definition,
            examples,
        }
    }
}
