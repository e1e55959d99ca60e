use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

use super::models::DictionaryResponse;
use crate::flashcards::LookupResult;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Word not found: {0}")]
    NotFound(String),
    #[error("Server error: {status}")]
    Server { status: u16 },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Looks up definitions, pronunciations and examples for a word
pub trait DefinitionLookup {
    fn lookup(&self, word: &str) -> Result<LookupResult, DictionaryError>;
}

/// HTTP client for the dictionary API
pub struct DictionaryClient {
    client: Client,
    base_url: String,
}

impl DictionaryClient {
    /// Create a new dictionary client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DictionaryError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Build the lookup URL for a word
    fn url(&self, word: &str) -> String {
        format!(
            "{}/api/dictionary/en/{}",
            self.base_url,
            urlencoding::encode(word)
        )
    }
}

impl DefinitionLookup for DictionaryClient {
    fn lookup(&self, word: &str) -> Result<LookupResult, DictionaryError> {
        let url = self.url(word);
        log::debug!("dictionary: GET {}", url);

        let response = self.client.get(&url).send()?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(DictionaryError::NotFound(word.to_string()));
            }
            status if !status.is_success() => {
                return Err(DictionaryError::Server {
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let data: DictionaryResponse = response.json()?;
        Ok(data.into_lookup(word))
    }
}
