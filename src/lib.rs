/// This crate is a fuzzy text matching and join engine.
/// It vectorizes two string collections with character-n-gram tf-idf
/// weights, scores every pair by cosine similarity, and can join two
/// tables along the best matches.
pub mod error;
pub mod join;
pub mod matcher;
pub mod normalize;
pub mod utils;

/// Fuzzy Matcher
/// The top-level struct of this crate. It fits a shared tf-idf
/// vocabulary over a "From" and a "To" corpus, computes the pairwise
/// cosine similarity matrix, and reports every From string's best To
/// match(es) with ties preserved.
///
/// The matcher is stateless between calls: each `find_matches` or `join`
/// fits its own vocabulary, so results depend only on the inputs and the
/// analyzer configured at construction.
pub use matcher::FuzzyMatcher;

/// Match Result Table and its rows
/// One row per (From, best To) pair; a From string with k tied best
/// matches expands into k rows carrying the same score. From strings
/// with no non-zero similarity are omitted.
pub use matcher::{MatchRow, MatchTable};

/// Tokenizer seam and the default character-n-gram analyzer
/// `NgramAnalyzer` produces whitespace-free substrings for an inclusive
/// length range (trigrams by default). Implement `Analyzer` to plug in
/// your own token extraction.
pub use matcher::analyze::{Analyzer, NgramAnalyzer};

/// TF-IDF Engine Trait and the smoothed default
/// `SmoothTfIdfEngine` performs smoothed textbook tf-idf with
/// L2-normalized vectors, implemented for `f32` and `f64` parameters.
pub use matcher::tfidf::{SmoothTfIdfEngine, TfIdfEngine};

/// Term statistics
/// `TermFrequency` counts term occurrences within one string;
/// `Vocabulary` holds the lexicographically ordered dimension space and
/// document frequencies of one matching operation.
pub use matcher::vocab::{TermFrequency, Vocabulary};

/// Tables for the join engine
/// `Table` is a column-ordered in-memory table of `Cell` values; the
/// join operation combines two tables along matched row indices with
/// inner-join semantics.
pub use join::{Cell, Table};

/// Error type shared by all operations
pub use error::{MatchError, Result};
