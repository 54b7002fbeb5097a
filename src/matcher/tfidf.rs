use num::Num;

use crate::matcher::vocab::{TermFrequency, Vocabulary};
use crate::utils::vector::SparseVec;

/// Weighting engine seam.
/// Implementing this trait plugs a different term-weighting strategy into
/// the matcher. The default, `SmoothTfIdfEngine`, performs smoothed
/// textbook tf-idf.
pub trait TfIdfEngine<N>
where
    N: Num + Copy,
{
    /// IDF weight per vocabulary dimension.
    /// # Arguments
    /// * `vocab` - fitted vocabulary of the combined corpus
    /// # Returns
    /// * `Vec<N>` - dense IDF vector in dimension order
    fn idf_vec(vocab: &Vocabulary) -> Vec<N>;

    /// Weighted term vector for one string.
    /// A string with no in-vocabulary terms yields the zero vector.
    fn tfidf_vec(freq: &TermFrequency, vocab: &Vocabulary, idf: &[N]) -> SparseVec<N>;
}

/// Smoothed tf-idf engine.
/// idf = ln((1 + doc_num) / (1 + doc_freq)) + 1, weight = count * idf,
/// vectors L2-normalized. IDF is computed over the combined corpus so
/// scores are comparable across both sides.
#[derive(Debug)]
pub struct SmoothTfIdfEngine;

impl SmoothTfIdfEngine {
    pub fn new() -> Self {
        SmoothTfIdfEngine
    }
}

impl Default for SmoothTfIdfEngine {
    fn default() -> Self {
        SmoothTfIdfEngine
    }
}

impl TfIdfEngine<f64> for SmoothTfIdfEngine {
    fn idf_vec(vocab: &Vocabulary) -> Vec<f64> {
        let doc_num = vocab.doc_num() as f64;
        (0..vocab.len())
            .map(|dim| ((1.0 + doc_num) / (1.0 + vocab.doc_freq(dim) as f64)).ln() + 1.0)
            .collect()
    }

    fn tfidf_vec(freq: &TermFrequency, vocab: &Vocabulary, idf: &[f64]) -> SparseVec<f64> {
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(freq.unique_count());
        for (term, count) in freq.iter() {
            if let Some(dim) = vocab.term_index(term) {
                entries.push((dim, count as f64 * idf[dim]));
            }
        }
        entries.sort_unstable_by_key(|&(dim, _)| dim);
        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        let mut vec = SparseVec::with_capacity(vocab.len(), entries.len());
        if norm > 0.0 {
            for (dim, w) in entries {
                vec.push(dim, w / norm);
            }
        }
        vec
    }
}

impl TfIdfEngine<f32> for SmoothTfIdfEngine {
    fn idf_vec(vocab: &Vocabulary) -> Vec<f32> {
        let doc_num = vocab.doc_num() as f64;
        (0..vocab.len())
            .map(|dim| (((1.0 + doc_num) / (1.0 + vocab.doc_freq(dim) as f64)).ln() + 1.0) as f32)
            .collect()
    }

    fn tfidf_vec(freq: &TermFrequency, vocab: &Vocabulary, idf: &[f32]) -> SparseVec<f32> {
        let mut entries: Vec<(usize, f32)> = Vec::with_capacity(freq.unique_count());
        for (term, count) in freq.iter() {
            if let Some(dim) = vocab.term_index(term) {
                entries.push((dim, count as f32 * idf[dim]));
            }
        }
        entries.sort_unstable_by_key(|&(dim, _)| dim);
        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        let mut vec = SparseVec::with_capacity(vocab.len(), entries.len());
        if norm > 0.0 {
            for (dim, w) in entries {
                vec.push(dim, w / norm);
            }
        }
        vec
    }
}
