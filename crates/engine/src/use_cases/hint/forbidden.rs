//! Forbidden-word policy.
//!
//! Forbidden words are scoped to the whole theme: a hint may not name a
//! forbidden word of any character in the theme, not only the target's.

use std::collections::BTreeSet;

use charades_domain::Character;

/// Every forbidden word of the theme that occurs in `hint` as a
/// case-insensitive substring, deduplicated and sorted.
pub fn forbidden_words_in<'a>(hint: &str, theme_characters: &'a [Character]) -> Vec<&'a str> {
    let words: BTreeSet<&str> = theme_characters
        .iter()
        .flat_map(|c| c.forbidden_words.iter().map(|w| w.as_str()))
        .collect();

    if words.is_empty() {
        return Vec::new();
    }

    let hint = hint.to_lowercase();
    words
        .into_iter()
        .filter(|word| hint.contains(word))
        .collect()
}
