//! Card generation pipeline
//!
//! Each vocabulary entry is resolved completely (lookup, translation, sound,
//! image, formatting) before the next one starts, so cards come out in input
//! order. Failures of a single field leave that field empty; only the input
//! and output tables can abort a run.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::{format_examples, format_explanation, image_markup, sound_markup};
use super::hint::hint;
use super::models::{GenerationReport, InputEntry, LookupResult, OutputRecord};
use crate::config::CardsConfig;
use crate::dictionary::{DefinitionLookup, DictionaryClient, DictionaryError};
use crate::media::{
    DownloadError, HttpFetcher, ImageDownloader, ImageSearch, MediaDownloader, MediaKind,
    PexelsClient, SearchError,
};
use crate::table::{write_skipped_log, CardWriter, TableError, VocabularyReader};
use crate::translate::{build_translator, Translator};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Dictionary setup failed: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Media setup failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Image search setup failed: {0}")]
    Search(#[from] SearchError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// External services a generator talks to
pub struct Collaborators {
    pub dictionary: Box<dyn DefinitionLookup>,
    pub translator: Box<dyn Translator>,
    /// `None` disables pronunciation downloads
    pub sounds: Option<MediaDownloader>,
    /// `None` disables images
    pub images: Option<ImageDownloader>,
}

/// Where a generator reads from and writes to
#[derive(Debug, Clone)]
pub struct GeneratorPaths {
    pub input: PathBuf,
    pub output: PathBuf,
    pub skipped_log: PathBuf,
}

/// Generates cards from a vocabulary table
pub struct CardGenerator {
    reader: VocabularyReader,
    writer: CardWriter,
    skipped_log: PathBuf,
    services: Collaborators,
    append: bool,
}

impl CardGenerator {
    pub fn new(paths: GeneratorPaths, services: Collaborators) -> Result<Self> {
        Ok(Self {
            reader: VocabularyReader::new(paths.input),
            writer: CardWriter::new(paths.output)?,
            skipped_log: paths.skipped_log,
            services,
            append: false,
        })
    }

    /// Append each card to the output as soon as it is built
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Build a generator with HTTP-backed services from `config`
    pub fn from_config(input: &Path, config: &CardsConfig) -> Result<Self> {
        let dictionary = DictionaryClient::new(&config.dictionary_url, config.api_timeout())?;
        let translator =
            build_translator(config.translator, config.language_pair(), config.api_timeout());

        let sounds = if config.sounds_enabled {
            Some(MediaDownloader::new(
                &config.sounds_dir,
                config.media_suffix.as_str(),
                MediaKind::Sound,
                Box::new(HttpFetcher::for_sounds(config.download_timeout())?),
            )?)
        } else {
            None
        };

        let images = if config.images_enabled {
            let search = match &config.pexels_api_key {
                Some(key) => Some(Box::new(PexelsClient::new(
                    &config.pexels_url,
                    key.clone(),
                    config.api_timeout(),
                )?) as Box<dyn ImageSearch>),
                None => None,
            };
            let downloader = MediaDownloader::new(
                &config.images_dir,
                config.media_suffix.as_str(),
                MediaKind::Image,
                Box::new(HttpFetcher::for_images(config.download_timeout())?),
            )?;
            Some(ImageDownloader::new(search, config.retry_policy(), downloader))
        } else {
            None
        };

        let paths = GeneratorPaths {
            input: input.to_path_buf(),
            output: config.output.clone(),
            skipped_log: config.skipped_log.clone(),
        };
        let services = Collaborators {
            dictionary: Box::new(dictionary),
            translator,
            sounds,
            images,
        };

        Ok(Self::new(paths, services)?.with_append(config.append))
    }

    /// Process every entry of the input table and write the results
    pub fn generate(&self) -> Result<GenerationReport> {
        let entries = self.reader.read_entries()?;
        let mut report = GenerationReport::default();

        for entry in &entries {
            log::info!("Processing: {}", entry.keyword);

            let Some(lookup) = self.lookup(&entry.keyword) else {
                log::info!("  -> Skipped (not found in dictionary)");
                report.skipped.push(entry.keyword.clone());
                continue;
            };

            let card = self.build_record(entry, &lookup);
            if self.append {
                self.writer.append(&card)?;
            }
            report.cards.push(card);
        }

        if !self.append {
            self.writer.write_all(&report.cards)?;
        }

        if report.has_skipped() {
            write_skipped_log(&self.skipped_log, &report.skipped)?;
        }

        Ok(report)
    }

    /// Look up a keyword, `None` when it has no usable definition
    fn lookup(&self, keyword: &str) -> Option<LookupResult> {
        match self.services.dictionary.lookup(keyword) {
            Ok(result) if result.has_definition() => Some(result),
            Ok(_) | Err(DictionaryError::NotFound(_)) => None,
            Err(e) => {
                log::warn!("Error fetching word '{}': {}", keyword, e);
                None
            }
        }
    }

    /// Assemble the card for an entry with a resolved lookup
    pub fn build_record(&self, entry: &InputEntry, lookup: &LookupResult) -> OutputRecord {
        let keyword = entry.keyword.as_str();

        // translate, then sound, then image
        let translation = self.translation_for(entry);
        let sound_file = self.fetch_sound(keyword, lookup);
        let image_file = self.fetch_image(keyword);
        let definition = lookup.definition.as_deref().unwrap_or_default();

        OutputRecord {
            id: keyword.to_string(),
            image_markup: image_markup(&image_file),
            translation,
            hint: hint(keyword, None),
            keyword: keyword.to_string(),
            transcription: lookup.transcription.clone().unwrap_or_default(),
            explanation: format_explanation(keyword, definition),
            sound_markup: sound_markup(&sound_file),
            examples_markup: format_examples(&lookup.examples),
        }
    }

    fn translation_for(&self, entry: &InputEntry) -> String {
        if entry.has_translation() {
            return entry.translation.clone();
        }

        let translator = &self.services.translator;
        translator
            .translate_to_target(&entry.keyword)
            .unwrap_or_else(|e| {
                log::warn!(
                    "Translation error for '{}' ({}): {}",
                    entry.keyword,
                    translator.name(),
                    e
                );
                String::new()
            })
    }

    fn fetch_sound(&self, keyword: &str, lookup: &LookupResult) -> String {
        let (Some(sounds), Some(url)) = (
            self.services.sounds.as_ref(),
            lookup.pronunciation_url.as_deref().filter(|u| !u.is_empty()),
        ) else {
            return String::new();
        };

        sounds.download(url, keyword).unwrap_or_else(|e| {
            log::warn!("Error downloading sound from {}: {}", url, e);
            String::new()
        })
    }

    fn fetch_image(&self, keyword: &str) -> String {
        let Some(images) = self.services.images.as_ref() else {
            return String::new();
        };

        match images.search_and_download(keyword) {
            Ok(name) => name.unwrap_or_default(),
            Err(e) => {
                log::warn!("Error downloading image for '{}': {}", keyword, e);
                String::new()
            }
        }
    }
}
