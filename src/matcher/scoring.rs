use rayon::prelude::*;

use crate::utils::vector::{cosine_similarity, SparseVec};

/// Best-match set of one From row: the row maximum and every To index
/// attaining it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RowBest {
    pub score: f64,
    pub to_indices: Vec<usize>,
}

/// Row maxima of the From × To cosine similarity matrix.
/// Ties are not broken: every column index equal to the row maximum is
/// kept, in ascending order. A row whose maximum is 0 yields `None` — a
/// zero-similarity match carries no information.
pub(crate) fn best_rows(
    from_vecs: &[SparseVec<f64>],
    to_vecs: &[SparseVec<f64>],
) -> Vec<Option<RowBest>> {
    from_vecs
        .par_iter()
        .map(|from_vec| {
            let mut best = 0.0_f64;
            let mut ties: Vec<usize> = Vec::new();
            for (j, to_vec) in to_vecs.iter().enumerate() {
                // cosine can overshoot 1.0 by a few ulps; scores stay in [0, 1]
                let score = cosine_similarity(from_vec, to_vec).min(1.0);
                if score > best {
                    best = score;
                    ties.clear();
                    ties.push(j);
                } else if score == best && best > 0.0 {
                    // タイはすべて保持する
                    ties.push(j);
                }
            }
            if best == 0.0 {
                None
            } else {
                Some(RowBest {
                    score: best,
                    to_indices: ties,
                })
            }
        })
        .collect()
}
