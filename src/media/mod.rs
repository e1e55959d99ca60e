//! Media assets for cards
//!
//! This module provides:
//! - Idempotent sound and image downloads (skip when the file exists)
//! - Stock-photo search with rate-limit backoff
//! - The `ImageDownloader` combining both for a keyword

pub mod download;
pub mod images;
pub mod retry;
pub mod search;

pub use download::{DownloadError, Fetcher, HttpFetcher, MediaDownloader, MediaKind};
pub use images::ImageDownloader;
pub use retry::RetryPolicy;
pub use search::{ImageSearch, PexelsClient, SearchError};
