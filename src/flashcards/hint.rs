//! Cloze hint generation
//!
//! A hint shows a few letters of the answer and masks the rest:
//!
//! ```text
//! absorb      -> _ _ s _ r _
//! magnificent -> _ _ g _ _ f _ _ e _ _
//! ```
//!
//! The deterministic variant reveals evenly spaced positions so the same
//! keyword always produces the same card. The last letter is never shown.

use std::collections::BTreeSet;

use rand::seq::index;

/// Placeholder for a masked character
const MASK: char = '_';

/// Words this short are shown as-is
const MIN_MASKED_LEN: usize = 3;

/// Default number of revealed characters for a word of `length` characters
fn default_reveal_count(length: usize) -> usize {
    match length {
        0..=4 => 2,
        5..=7 => 2,
        _ => 3,
    }
}

/// Lowercase and trim, returning the characters of the normalized word
fn normalize(word: &str) -> Vec<char> {
    word.trim().to_lowercase().chars().collect()
}

/// Render the word, keeping characters whose index is in `revealed`
fn render(chars: &[char], revealed: &BTreeSet<usize>) -> String {
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if revealed.contains(&i) { *c } else { MASK })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compute evenly spaced reveal positions for a word of `length` characters
///
/// Positions colliding after truncation are merged, so fewer than
/// `reveal_count` indices may come back. Lengths below the masking
/// threshold reveal nothing.
pub fn reveal_positions(length: usize, reveal_count: usize) -> BTreeSet<usize> {
    if length < MIN_MASKED_LEN {
        return BTreeSet::new();
    }

    let reveal_count = reveal_count.min(length);
    let step = length as f64 / (reveal_count + 1) as f64;

    let mut positions: BTreeSet<usize> = (1..=reveal_count)
        .map(|i| (step * i as f64).floor() as usize)
        .collect();

    let last = length - 1;
    if positions.remove(&last) {
        let replacement = length - 2;
        if !positions.insert(replacement) {
            log::debug!(
                "hint: last-letter substitution collided with revealed index {} (length {})",
                replacement,
                length
            );
        }
    }

    positions
}

/// Generate a deterministic cloze hint
///
/// # Arguments
/// * `word` - The word to mask
/// * `reveal_count` - Characters to reveal (default: 2 or 3 by length)
///
/// # Returns
/// Characters joined with single spaces, masked ones shown as `_`.
/// Words of two characters or fewer are returned unmasked.
pub fn hint(word: &str, reveal_count: Option<usize>) -> String {
    let chars = normalize(word);
    let length = chars.len();

    if length < MIN_MASKED_LEN {
        return chars.into_iter().collect();
    }

    let reveal_count = reveal_count.unwrap_or_else(|| default_reveal_count(length));
    render(&chars, &reveal_positions(length, reveal_count))
}

/// Generate a cloze hint with randomly chosen revealed positions
///
/// Uses the same normalization and defaults as [`hint`]; the output differs
/// between calls and may reveal the last letter.
pub fn hint_random(word: &str, reveal_count: Option<usize>) -> String {
    let chars = normalize(word);
    let length = chars.len();

    if length < MIN_MASKED_LEN {
        return chars.into_iter().collect();
    }

    let reveal_count = reveal_count
        .unwrap_or_else(|| default_reveal_count(length))
        .min(length);

    let mut rng = rand::thread_rng();
    let revealed: BTreeSet<usize> = index::sample(&mut rng, length, reveal_count)
        .into_iter()
        .collect();

    render(&chars, &revealed)
}
