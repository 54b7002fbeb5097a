//! Corpus preparation helpers.
//! Pure string cleanup applied by callers before matching; the matcher
//! never invokes these implicitly.

use crate::matcher::vocab::TermFrequency;

/// Strip periods and commas, collapse whitespace runs to a single space,
/// and trim the ends.
pub fn remove_punctuation(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| *c != '.' && *c != ',').collect();
    collapse_whitespace(&stripped)
}

/// Lowercase and strip punctuation.
pub fn clean(text: &str) -> String {
    remove_punctuation(&text.to_lowercase())
}

/// Remove whole (whitespace-delimited) words from the string.
pub fn drop_words(text: &str, words: &[&str]) -> String {
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|word| !words.contains(word))
        .collect();
    kept.join(" ")
}

/// Word frequencies across documents.
pub fn word_counts<'a, I>(docs: I) -> TermFrequency
where
    I: IntoIterator<Item = &'a str>,
{
    let mut freq = TermFrequency::new();
    for doc in docs {
        for word in doc.split_whitespace() {
            freq.add_term(word);
        }
    }
    freq
}

/// Frequencies of each document's last word.
/// Useful for spotting legal-form suffixes ("inc", "ltd") worth dropping
/// before matching company names.
pub fn last_word_counts<'a, I>(docs: I) -> TermFrequency
where
    I: IntoIterator<Item = &'a str>,
{
    let mut freq = TermFrequency::new();
    for doc in docs {
        if let Some(word) = doc.split_whitespace().last() {
            freq.add_term(word);
        }
    }
    freq
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
