//! Log of keywords the dictionary could not resolve

use std::fs;
use std::path::Path;

use super::Result;

const HEADER: &str =
    "# Words/phrases not found in dictionary\n# Add these manually or review later\n\n";

/// Overwrite `path` with the skipped keywords, one per line
pub fn write_skipped_log(path: &Path, skipped: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut content = String::from(HEADER);
    for word in skipped {
        content.push_str(word);
        content.push('\n');
    }
    fs::write(path, content)?;

    log::info!("Skipped words saved to: {}", path.display());
    Ok(())
}
