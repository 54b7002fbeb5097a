pub mod analyze;
pub(crate) mod scoring;
pub mod tfidf;
pub mod vocab;

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MatchError, Result};
use crate::join::{self, Table};
use crate::matcher::analyze::{Analyzer, NgramAnalyzer};
use crate::matcher::tfidf::{SmoothTfIdfEngine, TfIdfEngine};
use crate::matcher::vocab::{TermFrequency, Vocabulary};
use crate::utils::vector::SparseVec;

/// One best-match pair.
/// `from_index`/`to_index` are positions in the input corpora, `score` the
/// cosine similarity of the pair's tf-idf vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub from_index: usize,
    pub from: String,
    pub score: f64,
    pub to_index: usize,
    pub to: String,
}

/// Tie-expanded match result.
/// One row per (From, best To) pair: a From string with k tied best
/// matches contributes k rows carrying the same score. From rows whose
/// best score is zero are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTable {
    pub rows: Vec<MatchRow>,
}

impl MatchTable {
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, MatchRow> {
        self.rows.iter()
    }
}

impl fmt::Display for MatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MatchTable [")?;
        for row in &self.rows {
            writeln!(
                f,
                "    [{}] {:?} -> [{}] {:?} ({:.6})",
                row.from_index, row.from, row.to_index, row.to, row.score
            )?;
        }
        write!(f, "]")
    }
}

/// Fuzzy Matcher
/// Fits a tf-idf vocabulary over two string collections and finds, for
/// every From string, the best-matching To string(s) by cosine
/// similarity. Stateless between calls; the analyzer is the only
/// configuration and is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher<A = NgramAnalyzer> {
    analyzer: A,
}

impl FuzzyMatcher<NgramAnalyzer> {
    /// Matcher with the default trigram analyzer.
    pub fn new() -> Self {
        FuzzyMatcher {
            analyzer: NgramAnalyzer::default(),
        }
    }

    /// Matcher with an n-gram analyzer for `[min_len, max_len]`.
    pub fn with_ngram_range(min_len: usize, max_len: usize) -> Result<Self> {
        Ok(FuzzyMatcher {
            analyzer: NgramAnalyzer::new(min_len, max_len)?,
        })
    }
}

impl<A> FuzzyMatcher<A>
where
    A: Analyzer + Sync,
{
    /// Matcher with a custom analyzer.
    pub fn with_analyzer(analyzer: A) -> Self {
        FuzzyMatcher { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Find the best To match(es) for every From string.
    ///
    /// The vocabulary and IDF weights are fitted over the concatenation of
    /// both corpora, so scores are comparable across sides. Output rows are
    /// ordered by ascending From index, then ascending To index within a
    /// tie group.
    ///
    /// # Errors
    /// * `InvalidInput` - either corpus is empty
    /// * `EmptyVocabulary` - no string in either corpus produced a token
    pub fn find_matches<S, T>(&self, from: &[S], to: &[T]) -> Result<MatchTable>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        if from.is_empty() {
            return Err(MatchError::InvalidInput("From corpus is empty".to_string()));
        }
        if to.is_empty() {
            return Err(MatchError::InvalidInput("To corpus is empty".to_string()));
        }

        let from_tokens = self.tokenize(from);
        let to_tokens = self.tokenize(to);

        let vocab = Vocabulary::fit(
            from_tokens
                .iter()
                .map(|t| t.as_slice())
                .chain(to_tokens.iter().map(|t| t.as_slice())),
        );
        if vocab.is_empty() {
            return Err(MatchError::EmptyVocabulary);
        }
        debug!(
            from_len = from.len(),
            to_len = to.len(),
            vocab_len = vocab.len(),
            "fitted vocabulary"
        );

        let idf = <SmoothTfIdfEngine as TfIdfEngine<f64>>::idf_vec(&vocab);
        let from_vecs = Self::vectorize(&from_tokens, &vocab, &idf);
        let to_vecs = Self::vectorize(&to_tokens, &vocab, &idf);

        let mut rows = Vec::new();
        for (i, best) in scoring::best_rows(&from_vecs, &to_vecs)
            .into_iter()
            .enumerate()
        {
            let Some(best) = best else { continue };
            for j in best.to_indices {
                rows.push(MatchRow {
                    from_index: i,
                    from: from[i].as_ref().to_string(),
                    score: best.score,
                    to_index: j,
                    to: to[j].as_ref().to_string(),
                });
            }
        }
        debug!(rows = rows.len(), "matching finished");
        Ok(MatchTable { rows })
    }

    /// Join `left` and `right` on the best fuzzy match of
    /// `left[left_on]` against `right[right_on]`.
    ///
    /// Inner-join semantics: left rows with no match are absent from the
    /// output, and tied matches fan out into one row per pair. See
    /// [`crate::join::Table`] for the output column layout.
    pub fn join(
        &self,
        left: &Table,
        right: &Table,
        left_on: &str,
        right_on: &str,
    ) -> Result<Table> {
        let from = left.key_strings(left_on)?;
        let to = right.key_strings(right_on)?;
        let matches = self.find_matches(&from, &to)?;
        join::join_tables(left, right, &matches)
    }

    fn tokenize<S>(&self, corpus: &[S]) -> Vec<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        corpus
            .par_iter()
            .map(|text| self.analyzer.analyze(text.as_ref()))
            .collect()
    }

    fn vectorize(
        token_lists: &[Vec<String>],
        vocab: &Vocabulary,
        idf: &[f64],
    ) -> Vec<SparseVec<f64>> {
        token_lists
            .par_iter()
            .map(|tokens| {
                let mut freq = TermFrequency::new();
                freq.add_terms(tokens);
                SmoothTfIdfEngine::tfidf_vec(&freq, vocab, idf)
            })
            .collect()
    }
}
