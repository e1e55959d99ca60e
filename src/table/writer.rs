//! Card output writer

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use super::Result;
use crate::flashcards::OutputRecord;

/// Output columns, in file order
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "No",
    "Image",
    "Vietnamese",
    "Suggestion",
    "Keyword",
    "Transcription",
    "Explanation",
    "Sound",
    "Example",
];

/// Writes cards to the output table
pub struct CardWriter {
    path: PathBuf,
}

impl CardWriter {
    /// Create a writer, making sure the parent directory exists
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole table: header followed by every card
    pub fn write_all(&self, cards: &[OutputRecord]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        writer.write_record(OUTPUT_COLUMNS)?;
        for card in cards {
            writer.serialize(card)?;
        }
        writer.flush()?;

        log::info!("Written {} cards to {}", cards.len(), self.path.display());
        Ok(())
    }

    /// Append a single card, creating the file with a header if needed
    pub fn append(&self, card: &OutputRecord) -> Result<()> {
        let exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !exists {
            writer.write_record(OUTPUT_COLUMNS)?;
        }
        writer.serialize(card)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_cards;
    use tempfile::TempDir;

    fn sample_card(keyword: &str) -> OutputRecord {
        OutputRecord {
            id: keyword.to_string(),
            image_markup: format!("<img src=\"{}_auto_tool.jpg\">", keyword),
            translation: "hút".to_string(),
            hint: "_ _ s _ r _".to_string(),
            keyword: keyword.to_string(),
            transcription: "/əbˈzɔːrb/".to_string(),
            explanation: format!("{{{{c1::{}}}}} - to take something in", keyword),
            sound_markup: format!("[sound:{}_auto_tool.mp3]", keyword),
            examples_markup: "- one<br>- two".to_string(),
        }
    }

    #[test]
    fn test_write_then_read_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let writer = CardWriter::new(&path).unwrap();

        let cards = vec![sample_card("absorb"), sample_card("abuse"), sample_card("cat")];
        writer.write_all(&cards).unwrap();

        let read = read_cards(&path).unwrap();
        assert_eq!(read, cards);
    }

    #[test]
    fn test_header_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        CardWriter::new(&path).unwrap().write_all(&[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "No,Image,Vietnamese,Suggestion,Keyword,Transcription,Explanation,Sound,Example"
        );
    }

    #[test]
    fn test_write_all_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let writer = CardWriter::new(&path).unwrap();

        writer.write_all(&[sample_card("absorb"), sample_card("abuse")]).unwrap();
        writer.write_all(&[sample_card("cat")]).unwrap();

        let read = read_cards(&path).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].keyword, "cat");
    }

    #[test]
    fn test_append_writes_header_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("out.csv");
        let writer = CardWriter::new(&path).unwrap();

        writer.append(&sample_card("absorb")).unwrap();
        writer.append(&sample_card("abuse")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("No,Image").count(), 1);

        let read = read_cards(&path).unwrap();
        let keywords: Vec<_> = read.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(keywords, ["absorb", "abuse"]);
    }
}
