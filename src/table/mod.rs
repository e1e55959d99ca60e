//! Tabular input and output
//!
//! - Vocabulary input: `Keyword,Vietnamese`
//! - Card output: `No,Image,Vietnamese,Suggestion,Keyword,Transcription,Explanation,Sound,Example`
//! - Skipped-word log for manual review

use std::path::PathBuf;

use thiserror::Error;

pub mod reader;
pub mod skipped;
pub mod writer;

pub use reader::{read_cards, VocabularyReader};
pub use skipped::write_skipped_log;
pub use writer::{CardWriter, OUTPUT_COLUMNS};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
