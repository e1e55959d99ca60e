//! Idempotent media downloads
//!
//! Files are named `{base}{suffix}{ext}` inside the media directory. When the
//! target already exists the fetch is skipped and the existing name returned,
//! so re-running a vocabulary list only downloads what is missing.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error: {status} for {url}")]
    Server { status: u16, url: String },
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("No URL to download")]
    EmptyUrl,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Browser-like headers some pronunciation hosts require
const SOUND_HEADERS: [(&str, &str); 4] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "audio/webm,audio/ogg,audio/wav,audio/*;q=0.9,application/ogg;q=0.7,video/*;q=0.6,*/*;q=0.5",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Referer", "https://dictionary.cambridge.org/"),
];

/// Kind of media, which decides the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Sound,
    Image,
}

impl MediaKind {
    /// Infer the file extension from the source URL
    pub fn extension_for(&self, url: &str) -> &'static str {
        let url = url.to_lowercase();
        match self {
            Self::Sound => [".mp3", ".wav", ".ogg"]
                .into_iter()
                .find(|ext| url.contains(*ext))
                .unwrap_or(".mp3"),
            Self::Image => {
                let path = url.split('?').next().unwrap_or_default();
                if path.ends_with(".jpg") || path.ends_with(".jpeg") {
                    ".jpg"
                } else if path.ends_with(".png") {
                    ".png"
                } else if path.ends_with(".webp") {
                    ".webp"
                } else {
                    ".jpg"
                }
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Sound => "sound",
            Self::Image => "image",
        }
    }
}

/// Opens a byte stream for a URL
pub trait Fetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, DownloadError>;
}

/// Streams files over HTTP
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, headers: &[(&str, &str)]) -> Result<Self, DownloadError> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| DownloadError::InvalidHeader(name.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| DownloadError::InvalidHeader(name.to_string()))?;
            header_map.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(header_map)
            .build()?;

        Ok(Self { client })
    }

    /// Fetcher sending the headers pronunciation hosts expect
    pub fn for_sounds(timeout: Duration) -> Result<Self, DownloadError> {
        Self::new(timeout, &SOUND_HEADERS)
    }

    pub fn for_images(timeout: Duration) -> Result<Self, DownloadError> {
        Self::new(timeout, &[])
    }
}

impl Fetcher for HttpFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, DownloadError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Server {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Box::new(response))
    }
}

/// Downloads media into a directory, skipping files already present
pub struct MediaDownloader {
    output_dir: PathBuf,
    suffix: String,
    kind: MediaKind,
    fetcher: Box<dyn Fetcher>,
}

impl MediaDownloader {
    /// Create a downloader, making sure the output directory exists
    pub fn new(
        output_dir: impl Into<PathBuf>,
        suffix: impl Into<String>,
        kind: MediaKind,
        fetcher: Box<dyn Fetcher>,
    ) -> Result<Self, DownloadError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            suffix: suffix.into(),
            kind,
            fetcher,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name a download of `url` would be saved under
    pub fn target_name(&self, url: &str, base_name: &str) -> String {
        format!("{}{}{}", base_name, self.suffix, self.kind.extension_for(url))
    }

    /// Full path for a media file name
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }

    /// Download `url` as `base_name`, returning the saved file name
    pub fn download(&self, url: &str, base_name: &str) -> Result<String, DownloadError> {
        if url.is_empty() {
            return Err(DownloadError::EmptyUrl);
        }

        let filename = self.target_name(url, base_name);
        let path = self.file_path(&filename);

        if path.exists() {
            log::info!("{} already exists: {}", self.kind.label(), filename);
            return Ok(filename);
        }

        let mut source = self.fetcher.open(url)?;
        let mut file = File::create(&path)?;

        if let Err(e) = io::copy(&mut source, &mut file) {
            drop(file);
            // A truncated file would otherwise be reported as present next run
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }

        log::info!("Downloaded {}: {}", self.kind.label(), filename);
        Ok(filename)
    }
}
