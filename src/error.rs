use thiserror::Error;

/// Failure kinds for the matching and join operations.
/// The engine is deterministic, so a failed call fails identically on
/// retry; the input has to change, not the call.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Caller error: empty corpus, empty table, missing key column,
    /// column-name collision, or a bad n-gram range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The combined corpus produced no tokens at all, so there is no
    /// dimension to compare along. Distinct from `InvalidInput`: each
    /// input was individually well-formed.
    #[error("Empty vocabulary: no tokens could be extracted from the combined corpus")]
    EmptyVocabulary,
}

pub type Result<T> = std::result::Result<T, MatchError>;
