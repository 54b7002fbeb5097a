use std::cmp::Ordering;

use num::Num;
use serde::{Deserialize, Serialize};

/// Sparse vector treating zero as the absent element.
/// Holds parallel index/value arrays; indices are ascending and `dim` is
/// the logical length of the vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    dim: usize,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new(dim: usize) -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
            dim,
        }
    }

    #[inline]
    pub fn with_capacity(dim: usize, cap: usize) -> Self {
        SparseVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            dim,
        }
    }

    /// Append an entry. `index` must be greater than every index already
    /// present; zero values are dropped instead of stored.
    #[inline]
    pub fn push(&mut self, index: usize, value: N) {
        debug_assert!(index < self.dim);
        debug_assert!(self.inds.last().map_or(true, |&last| (last as usize) < index));
        if value == N::zero() {
            return;
        }
        self.inds.push(index as u32);
        self.vals.push(value);
    }

    /// Logical length of the vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Value at `index`, zero if not stored.
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate the stored entries as (index, value) in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}

/// dot product
/// d(a, b) = Σ(a_i * b_i)
pub fn dot<N>(a: &SparseVec<N>, b: &SparseVec<N>) -> f64
where
    N: Num + Copy + Into<f64>,
{
    let mut a_it = a.raw_iter().fuse();
    let mut b_it = b.raw_iter().fuse();
    let mut a_next = a_it.next();
    let mut b_next = b_it.next();
    let mut acc = 0_f64;
    while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
        match ia.cmp(&ib) {
            Ordering::Equal => {
                let va: f64 = va.into();
                let vb: f64 = vb.into();
                acc += va * vb;
                a_next = a_it.next();
                b_next = b_it.next();
            }
            Ordering::Less => a_next = a_it.next(),
            Ordering::Greater => b_next = b_it.next(),
        }
    }
    acc
}

/// cosine similarity
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
/// A zero vector scores 0.0 against anything.
pub fn cosine_similarity<N>(a: &SparseVec<N>, b: &SparseVec<N>) -> f64
where
    N: Num + Copy + Into<f64>,
{
    let mut a_it = a.raw_iter().fuse();
    let mut b_it = b.raw_iter().fuse();
    let mut a_next = a_it.next();
    let mut b_next = b_it.next();
    let mut norm_a = 0_f64;
    let mut norm_b = 0_f64;
    let mut dot = 0_f64;
    while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
        let va: f64 = va.into();
        let vb: f64 = vb.into();
        match ia.cmp(&ib) {
            Ordering::Equal => {
                norm_a += va * va;
                norm_b += vb * vb;
                dot += va * vb;
                a_next = a_it.next();
                b_next = b_it.next();
            }
            Ordering::Less => {
                norm_a += va * va;
                a_next = a_it.next();
            }
            Ordering::Greater => {
                norm_b += vb * vb;
                b_next = b_it.next();
            }
        }
    }
    while let Some((_, va)) = a_next {
        let va: f64 = va.into();
        norm_a += va * va;
        a_next = a_it.next();
    }
    while let Some((_, vb)) = b_next {
        let vb: f64 = vb.into();
        norm_b += vb * vb;
        b_next = b_it.next();
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_entries(dim: usize, entries: &[(usize, f64)]) -> SparseVec<f64> {
        let mut v = SparseVec::with_capacity(dim, entries.len());
        for &(i, val) in entries {
            v.push(i, val);
        }
        v
    }

    #[test]
    fn push_and_get_keep_sparse_layout() {
        let v = from_entries(8, &[(1, 2.0), (4, 0.0), (6, -1.5)]);
        assert_eq!(v.dim(), 8);
        assert_eq!(v.nnz(), 2, "zero values must not be stored");
        assert_eq!(v.get(1), 2.0);
        assert_eq!(v.get(4), 0.0);
        assert_eq!(v.get(6), -1.5);
        assert_eq!(v.get(0), 0.0);
    }

    #[test]
    fn raw_iter_yields_ascending_entries() {
        let v = from_entries(5, &[(0, 1.0), (2, 2.0), (4, 3.0)]);
        let entries: Vec<(usize, f64)> = v.raw_iter().collect();
        assert_eq!(entries, vec![(0, 1.0), (2, 2.0), (4, 3.0)]);
    }

    #[test]
    fn dot_of_disjoint_vectors_is_zero() {
        let a = from_entries(6, &[(0, 1.0), (2, 3.0)]);
        let b = from_entries(6, &[(1, 5.0), (3, 7.0)]);
        assert_eq!(dot(&a, &b), 0.0);
    }

    #[test]
    fn dot_accumulates_overlapping_entries() {
        let a = from_entries(6, &[(0, 1.0), (2, 3.0), (5, 2.0)]);
        let b = from_entries(6, &[(2, 4.0), (5, 0.5)]);
        assert!((dot(&a, &b) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let a = from_entries(4, &[(0, 0.3), (1, 0.9), (3, 0.2)]);
        let s = cosine_similarity(&a, &a.clone());
        assert!((s - 1.0).abs() < 1e-12, "got {s}");
    }

    #[test]
    fn cosine_against_zero_vector_is_zero() {
        let a = from_entries(4, &[(0, 1.0)]);
        let z: SparseVec<f64> = SparseVec::new(4);
        assert_eq!(cosine_similarity(&a, &z), 0.0);
        assert_eq!(cosine_similarity(&z, &a), 0.0);
        assert_eq!(cosine_similarity(&z, &z.clone()), 0.0);
    }

    #[test]
    fn cosine_ignores_scale() {
        let a = from_entries(3, &[(0, 1.0), (2, 2.0)]);
        let b = from_entries(3, &[(0, 10.0), (2, 20.0)]);
        let s = cosine_similarity(&a, &b);
        assert!((s - 1.0).abs() < 1e-12, "got {s}");
    }

    #[test]
    fn cosine_works_for_f32_entries() {
        let mut a: SparseVec<f32> = SparseVec::new(2);
        a.push(0, 1.0);
        let mut b: SparseVec<f32> = SparseVec::new(2);
        b.push(0, 1.0);
        b.push(1, 1.0);
        let s = cosine_similarity(&a, &b);
        assert!((s - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6, "got {s}");
    }
}
