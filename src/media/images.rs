use std::time::Duration;

use super::download::{DownloadError, MediaDownloader};
use super::retry::RetryPolicy;
use super::search::ImageSearch;

/// Searches a photo for a keyword and downloads it
pub struct ImageDownloader {
    search: Option<Box<dyn ImageSearch>>,
    retry: RetryPolicy,
    downloader: MediaDownloader,
    sleep: Box<dyn Fn(Duration)>,
}

impl ImageDownloader {
    /// Create an image downloader
    ///
    /// Without a search backend (no API key) every lookup short-circuits.
    pub fn new(
        search: Option<Box<dyn ImageSearch>>,
        retry: RetryPolicy,
        downloader: MediaDownloader,
    ) -> Self {
        if search.is_none() {
            log::warn!(
                "Image search not configured (PEXELS_API_KEY missing), cards will have no images"
            );
        }

        Self {
            search,
            retry,
            downloader,
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// Replace the function used to wait between rate-limited attempts
    pub fn with_sleep(mut self, sleep: impl Fn(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.search.is_some()
    }

    /// Search for `keyword` and save the best match under the keyword's name
    ///
    /// Returns `Ok(None)` when search is not configured or found nothing.
    pub fn search_and_download(&self, keyword: &str) -> Result<Option<String>, DownloadError> {
        let Some(search) = self.search.as_deref() else {
            log::debug!("Image search not configured, skipping '{}'", keyword);
            return Ok(None);
        };

        let Some(url) = self
            .retry
            .run(keyword, || search.search(keyword), |d| (self.sleep)(d))
        else {
            return Ok(None);
        };

        self.downloader.download(&url, keyword).map(Some)
    }
}
