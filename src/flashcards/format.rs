//! Field formatting for the card output table
//!
//! Markup follows Anki's conventions: cloze deletions as `{{c1::...}}`,
//! media as `[sound:...]` and `<img src="...">`, line breaks as `<br>`.

/// Maximum number of example sentences shown on a card
pub const MAX_EXAMPLES: usize = 3;

/// Line break between example sentences
const EXAMPLE_SEPARATOR: &str = "<br>";

/// Format the explanation with the keyword as a cloze deletion
///
/// `"{{c1::absorb}} - to take something in"`, or just the cloze when the
/// definition is empty.
pub fn format_explanation(keyword: &str, definition: &str) -> String {
    if definition.is_empty() {
        format!("{{{{c1::{}}}}}", keyword)
    } else {
        format!("{{{{c1::{}}}}} - {}", keyword, definition)
    }
}

/// Format up to three examples as a bulleted list
pub fn format_examples<S: AsRef<str>>(examples: &[S]) -> String {
    examples
        .iter()
        .take(MAX_EXAMPLES)
        .map(|ex| format!("- {}", ex.as_ref()))
        .collect::<Vec<_>>()
        .join(EXAMPLE_SEPARATOR)
}

/// Wrap a sound filename in media markup, empty filename stays empty
pub fn sound_markup(filename: &str) -> String {
    if filename.is_empty() {
        String::new()
    } else {
        format!("[sound:{}]", filename)
    }
}

/// Wrap an image filename in media markup, empty filename stays empty
pub fn image_markup(filename: &str) -> String {
    if filename.is_empty() {
        String::new()
    } else {
        format!("<img src=\"{}\">", filename)
    }
}
