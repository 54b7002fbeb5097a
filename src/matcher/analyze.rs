use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Tokenizer seam of the matcher.
/// Implement this to substitute your own token extraction; the engine only
/// ever sees the token sequence.
pub trait Analyzer {
    fn analyze(&self, text: &str) -> Vec<String>;
}

/// Character n-gram analyzer.
/// Produces every contiguous substring whose length lies in the inclusive
/// `[min_len, max_len]` range and that contains no whitespace character.
/// Windows slide over characters, not bytes, so multi-byte input is safe.
///
/// # Examples
/// ```
/// use fuzzy_join::{Analyzer, NgramAnalyzer};
/// let analyzer = NgramAnalyzer::default(); // trigrams
/// assert_eq!(analyzer.analyze("hello"), vec!["hel", "ell", "llo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramAnalyzer {
    min_len: usize,
    max_len: usize,
}

impl NgramAnalyzer {
    /// Create an analyzer for the inclusive length range `[min_len, max_len]`.
    /// `min_len` must be at least 1 and `max_len` at least `min_len`.
    pub fn new(min_len: usize, max_len: usize) -> Result<Self> {
        if min_len < 1 {
            return Err(MatchError::InvalidInput(
                "n-gram min_len must be at least 1".to_string(),
            ));
        }
        if max_len < min_len {
            return Err(MatchError::InvalidInput(format!(
                "n-gram max_len {max_len} is smaller than min_len {min_len}"
            )));
        }
        Ok(NgramAnalyzer { min_len, max_len })
    }

    #[inline]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// Trigrams only.
impl Default for NgramAnalyzer {
    fn default() -> Self {
        NgramAnalyzer {
            min_len: 3,
            max_len: 3,
        }
    }
}

impl Analyzer for NgramAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        for n in self.min_len..=self.max_len {
            // 窓が取れない長さは単に飛ばす
            if chars.len() < n {
                continue;
            }
            for window in chars.windows(n) {
                if window.iter().any(|c| c.is_whitespace()) {
                    continue;
                }
                tokens.push(window.iter().collect());
            }
        }
        tokens
    }
}
