use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error: {status}")]
    Server { status: u16 },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Finds an image URL for a search query
pub trait ImageSearch {
    /// `Ok(None)` when the search succeeded but matched nothing
    fn search(&self, query: &str) -> Result<Option<String>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    medium: String,
}

/// Pexels photo search client
pub struct PexelsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PexelsClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, SearchError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SearchError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

impl ImageSearch for PexelsClient {
    fn search(&self, query: &str) -> Result<Option<String>, SearchError> {
        let url = format!("{}/search", self.base_url);
        log::debug!("pexels: GET {} query={}", url, query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.api_key.as_str())
            .query(&[("query", query), ("per_page", "1"), ("orientation", "square")])
            .send()?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(SearchError::RateLimited),
            status if !status.is_success() => {
                return Err(SearchError::Server {
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let data: SearchResponse = response.json()?;
        Ok(data.photos.into_iter().next().map(|photo| photo.src.medium))
    }
}
