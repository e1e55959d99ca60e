//! Vocabulary input reader

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{Result, TableError};
use crate::flashcards::{InputEntry, OutputRecord};

/// Header of the keyword column
pub const KEYWORD_COLUMN: &str = "Keyword";
/// Header of the optional translation column
pub const TRANSLATION_COLUMN: &str = "Vietnamese";

/// Reads vocabulary entries from a `Keyword,Vietnamese` CSV file
pub struct VocabularyReader {
    path: PathBuf,
}

impl VocabularyReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries in file order
    ///
    /// Rows whose keyword is blank after trimming are dropped.
    pub fn read_entries(&self) -> Result<Vec<InputEntry>> {
        if !self.path.exists() {
            return Err(TableError::InputNotFound(self.path.clone()));
        }
        let file = File::open(&self.path)?;
        read_entries_from(file)
    }
}

/// Parse vocabulary entries from any reader
pub fn read_entries_from<R: Read>(input: R) -> Result<Vec<InputEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let keyword_col = headers.iter().position(|h| h == KEYWORD_COLUMN);
    let translation_col = headers.iter().position(|h| h == TRANSLATION_COLUMN);

    let Some(keyword_col) = keyword_col else {
        log::warn!("Input has no '{}' column, nothing to read", KEYWORD_COLUMN);
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;

        let keyword = record.get(keyword_col).unwrap_or_default().trim();
        if keyword.is_empty() {
            continue;
        }

        let translation = translation_col
            .and_then(|col| record.get(col))
            .unwrap_or_default()
            .trim();

        entries.push(InputEntry::new(keyword, translation));
    }

    Ok(entries)
}

/// Read an output table back into records
pub fn read_cards(path: &Path) -> Result<Vec<OutputRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let cards = reader
        .deserialize::<OutputRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(cards)
}
