//! Subspaces of ℝⁿ held as explicit bases
//!
//! A `Subspace` is what the fundamental-subspace and eigenspace queries
//! hand back: an ambient dimension plus a basis. Construction from a
//! generating set rides on the matrix rank machinery to drop dependent
//! generators; equality is mutual containment, checked the same way.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// A linear subspace of ℝⁿ with an explicit basis
#[derive(Clone, Debug)]
pub struct Subspace {
    basis: Vec<Vector>,
    ambient: usize,
}

impl Subspace {
    /// Span of a generating set
    ///
    /// Reduces the generators to a basis by keeping the pivot columns of
    /// the matrix they form; zero and dependent generators are dropped.
    pub fn new(generators: &[Vector], ambient: usize, eps: f64) -> Result<Self> {
        for g in generators {
            if g.len() != ambient {
                return Err(Error::shape_mismatch(&[ambient], &[g.len()]));
            }
        }
        if generators.is_empty() {
            return Ok(Self {
                basis: Vec::new(),
                ambient,
            });
        }
        let m = Matrix::from_cols(generators)?;
        Ok(Self {
            basis: m.col_basis(eps),
            ambient,
        })
    }

    /// Wrap vectors already known to be a basis
    ///
    /// Lengths are validated; independence is trusted.
    pub fn from_basis(basis: Vec<Vector>, ambient: usize) -> Result<Self> {
        for v in &basis {
            if v.len() != ambient {
                return Err(Error::shape_mismatch(&[ambient], &[v.len()]));
            }
        }
        Ok(Self { basis, ambient })
    }

    /// Dimension of the subspace
    #[inline]
    pub fn dim(&self) -> usize {
        self.basis.len()
    }

    /// Dimension of the ambient space
    #[inline]
    pub fn ambient(&self) -> usize {
        self.ambient
    }

    /// The basis vectors
    #[inline]
    pub fn basis_vectors(&self) -> &[Vector] {
        &self.basis
    }

    /// The basis as a matrix of column vectors (ambient x dim)
    pub fn basis(&self) -> Matrix {
        if self.basis.is_empty() {
            return Matrix::zero(self.ambient, 0);
        }
        Matrix::from_cols(&self.basis).expect("basis vectors share the ambient length")
    }

    /// An orthonormal basis, via modified Gram–Schmidt
    pub fn on_basis(&self, eps: f64) -> Vec<Vector> {
        if self.basis.is_empty() {
            return Vec::new();
        }
        let qr = self.basis().qr(eps);
        (0..qr.q.ncols())
            .map(|j| qr.q.col(j).expect("column index in range"))
            .filter(|c| !c.is_zero(0.0))
            .collect()
    }

    /// Whether `v` lies in the subspace within `eps`
    pub fn contains(&self, v: &Vector, eps: f64) -> Result<bool> {
        if v.len() != self.ambient {
            return Err(Error::shape_mismatch(&[self.ambient], &[v.len()]));
        }
        if self.basis.is_empty() {
            return Ok(v.is_zero(eps));
        }
        let mut cols = self.basis.clone();
        cols.push(v.clone());
        Ok(Matrix::from_cols(&cols)?.rank(eps) == self.dim())
    }

    /// Whether two subspaces are equal within `eps`: same ambient space,
    /// same dimension, and a combined generating set of the same rank
    pub fn approx_eq(&self, other: &Subspace, eps: f64) -> bool {
        if self.ambient != other.ambient || self.dim() != other.dim() {
            return false;
        }
        if self.basis.is_empty() {
            return true;
        }
        let mut cols = self.basis.clone();
        cols.extend(other.basis.iter().cloned());
        match Matrix::from_cols(&cols) {
            Ok(m) => m.rank(eps) == self.dim(),
            Err(_) => false,
        }
    }
}
