use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Term occurrence counts for a single string.
/// Insertion-ordered; used as the base data for TF calculation and for
/// corpus statistics.
///
/// # Examples
/// ```
/// use fuzzy_join::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["cat", "ate", "cat"]);
/// assert_eq!(freq.term_count("cat"), 2);
/// assert_eq!(freq.total_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u32>,
    total_count: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_count: 0,
        }
    }

    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        let count = self.term_count.entry(term.to_string()).or_insert(0);
        *count += 1;
        self.total_count += 1;
        self
    }

    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Occurrence count of one term, zero if absent.
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Sum of all occurrence counts.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of distinct terms.
    #[inline]
    pub fn unique_count(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Iterate terms with their counts in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Terms sorted by descending count.
    #[inline]
    pub fn sorted_frequency_vec(&self) -> Vec<(String, u32)> {
        let mut list: Vec<(String, u32)> = self
            .term_count
            .iter()
            .map(|(term, &count)| (term.clone(), count))
            .collect();
        list.sort_by(|a, b| b.1.cmp(&a.1));
        list
    }
}

/// Shared dimension space for one matching operation.
/// Holds every distinct term of the combined From+To corpus in
/// lexicographic order together with its document frequency; the term's
/// position is the vector dimension every term vector of the operation
/// uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<Box<str>>,
    doc_freq: Vec<u32>,
    doc_num: u64,
}

impl Vocabulary {
    /// Fit over tokenized documents.
    /// Every document counts toward the document total, token-less ones
    /// included; a term seen in a single document still gets a dimension.
    pub fn fit<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        // BTreeMap が次元の辞書順を保証する
        let mut freq: BTreeMap<&str, u32> = BTreeMap::new();
        let mut doc_num = 0_u64;
        for tokens in docs {
            doc_num += 1;
            let uniq: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for term in uniq {
                *freq.entry(term).or_insert(0) += 1;
            }
        }
        let mut terms = Vec::with_capacity(freq.len());
        let mut doc_freq = Vec::with_capacity(freq.len());
        for (term, df) in freq {
            terms.push(Box::<str>::from(term));
            doc_freq.push(df);
        }
        Vocabulary {
            terms,
            doc_freq,
            doc_num,
        }
    }

    /// Number of dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of fitted documents.
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Dimension of a term, if it is part of the vocabulary.
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_ref().cmp(term)).ok()
    }

    /// Document frequency of the term at `index`.
    #[inline]
    pub fn doc_freq(&self, index: usize) -> u32 {
        self.doc_freq[index]
    }

    /// Terms in dimension order.
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }
}
