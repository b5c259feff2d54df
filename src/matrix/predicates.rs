//! Tolerance-based structural predicates
//!
//! Every predicate taking `eps` treats entries with absolute value at
//! most `eps` as zero. Exact checks pass `0.0`.

use super::{Matrix, Pivot};
use crate::error::Result;

impl Matrix {
    /// Whether the matrix is square
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Whether every entry is zero within `eps`
    pub fn is_zero(&self, eps: f64) -> bool {
        self.rows.iter().all(|r| r.is_zero(eps))
    }

    /// Whether every entry below the main diagonal is zero within `eps`
    pub fn is_upper_triangular(&self, eps: f64) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(i, row)| row.iter().take(i.min(self.ncols)).all(|x| x.abs() <= eps))
    }

    /// Whether every entry above the main diagonal is zero within `eps`
    pub fn is_lower_triangular(&self, eps: f64) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(i, row)| row.iter().skip(i + 1).all(|x| x.abs() <= eps))
    }

    /// Whether the matrix is lower triangular with unit diagonal within
    /// `eps` (the shape of the `L` factor)
    pub fn is_unipotent(&self, eps: f64) -> bool {
        self.is_lower_triangular(eps)
            && self
                .diag()
                .iter()
                .all(|x| (x - 1.0).abs() <= eps)
    }

    /// Whether every off-diagonal entry is zero within `eps`
    pub fn is_diagonal(&self, eps: f64) -> bool {
        self.is_upper_triangular(eps) && self.is_lower_triangular(eps)
    }

    /// Whether the matrix equals its transpose within `eps`
    pub fn is_symmetric(&self, eps: f64) -> bool {
        self.is_square() && self.equals(&self.transpose(), eps)
    }

    /// Leading nonzero entry of each row: the first entry whose absolute
    /// value exceeds `eps`; rows without one are skipped
    pub(crate) fn leading_entries(&self, eps: f64) -> Vec<Pivot> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                row.iter()
                    .position(|x| x.abs() > eps)
                    .map(|j| Pivot { row: i, col: j })
            })
            .collect()
    }

    /// Whether the matrix is in row-echelon form within `eps`
    ///
    /// Leading entries must fill a prefix of the rows (zero rows only at
    /// the bottom) with strictly increasing column indices.
    pub fn is_echelon(&self, eps: f64) -> bool {
        let leads = self.leading_entries(eps);
        let mut prev_col = None;
        for (k, lead) in leads.iter().enumerate() {
            if lead.row != k {
                return false;
            }
            if let Some(pc) = prev_col {
                if lead.col <= pc {
                    return false;
                }
            }
            prev_col = Some(lead.col);
        }
        true
    }

    /// Whether the matrix is in reduced row-echelon form within `eps`
    ///
    /// Echelon, each leading entry equal to 1, and every entry above a
    /// leading entry equal to zero (both within `eps`).
    pub fn is_rref(&self, eps: f64) -> bool {
        if !self.is_echelon(eps) {
            return false;
        }
        for lead in self.leading_entries(eps) {
            if (self.rows[lead.row][lead.col] - 1.0).abs() > eps {
                return false;
            }
            for i in 0..lead.row {
                if self.rows[i][lead.col].abs() > eps {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the rows are linearly independent
    ///
    /// Short-circuits to `false` when `m > n` without computing rank.
    pub fn is_full_row_rank(&self, eps: f64) -> bool {
        if self.nrows() > self.ncols() {
            return false;
        }
        self.rank(eps) == self.nrows()
    }

    /// Whether the columns are linearly independent
    ///
    /// Short-circuits to `false` when `m < n` without computing rank.
    pub fn is_full_col_rank(&self, eps: f64) -> bool {
        if self.nrows() < self.ncols() {
            return false;
        }
        self.rank(eps) == self.ncols()
    }

    /// Whether the matrix is invertible: full row rank and full column
    /// rank
    pub fn is_invertible(&self, eps: f64) -> bool {
        self.is_full_row_rank(eps) && self.is_full_col_rank(eps)
    }

    /// Whether the matrix is square with orthonormal columns: AᵗA ≈ I
    /// within `eps`
    pub fn is_orthogonal(&self, eps: f64) -> bool {
        self.is_square() && self.normal().equals(&Matrix::identity(self.ncols(), 1.0), eps)
    }

    /// Whether the matrix admits an ordinary (real) diagonalization
    ///
    /// Delegates to [`Matrix::diagonalize`] without block mode; a real
    /// matrix with complex eigenvalues reports `false`.
    pub fn is_diagonalizable(&self, eps: f64) -> Result<bool> {
        Ok(self.diagonalize(eps, false, false)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_predicates() {
        let a = Matrix::new(vec![vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
        assert!(a.is_square());
        assert!(a.is_diagonal(0.0));
        assert!(a.is_upper_triangular(0.0));
        assert!(a.is_lower_triangular(0.0));
        assert!(!a.is_zero(0.0));
        assert!(Matrix::zero(2, 3).is_zero(0.0));
    }

    #[test]
    fn test_triangular_with_tolerance() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![1e-12, 3.0]]).unwrap();
        assert!(!a.is_upper_triangular(0.0));
        assert!(a.is_upper_triangular(1e-10));
    }

    #[test]
    fn test_unipotent() {
        let l = Matrix::new(vec![vec![1.0, 0.0], vec![5.0, 1.0]]).unwrap();
        assert!(l.is_unipotent(0.0));
        assert!(!Matrix::identity(2, 2.0).is_unipotent(0.0));
        let upper = Matrix::new(vec![vec![1.0, 3.0], vec![0.0, 1.0]]).unwrap();
        assert!(!upper.is_unipotent(0.0));
    }

    #[test]
    fn test_echelon() {
        let e = Matrix::new(vec![
            vec![2.0, 1.0, 0.0],
            vec![0.0, 0.0, 3.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert!(e.is_echelon(0.0));
        assert!(!e.is_rref(0.0)); // pivots not 1

        // Zero row in the middle is not echelon.
        let bad = Matrix::new(vec![
            vec![1.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 1.0],
        ])
        .unwrap();
        assert!(!bad.is_echelon(0.0));

        // Non-increasing pivot columns.
        let bad2 = Matrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert!(!bad2.is_echelon(0.0));
    }

    #[test]
    fn test_rref_predicate() {
        let r = Matrix::new(vec![
            vec![1.0, 0.0, 2.0],
            vec![0.0, 1.0, -1.0],
        ])
        .unwrap();
        assert!(r.is_rref(0.0));

        // Nonzero above a pivot.
        let bad = Matrix::new(vec![
            vec![1.0, 3.0, 0.0],
            vec![0.0, 1.0, 0.0],
        ])
        .unwrap();
        assert!(!bad.is_rref(0.0));
    }

    #[test]
    fn test_rank_predicates_short_circuit() {
        // Wide: full row rank possible, full col rank impossible.
        let wide = Matrix::new(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]).unwrap();
        assert!(wide.is_full_row_rank(1e-10));
        assert!(!wide.is_full_col_rank(1e-10));
        assert!(!wide.is_invertible(1e-10));

        let id = Matrix::identity(3, 1.0);
        assert!(id.is_invertible(1e-10));
    }

    #[test]
    fn test_orthogonal() {
        let rot = Matrix::new(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap();
        assert!(rot.is_orthogonal(1e-12));
        assert!(!Matrix::identity(2, 2.0).is_orthogonal(1e-12));
        assert!(!Matrix::zero(2, 3).is_orthogonal(1e-12));
    }

    #[test]
    fn test_symmetric() {
        let s = Matrix::new(vec![vec![1.0, 7.0], vec![7.0, 2.0]]).unwrap();
        assert!(s.is_symmetric(0.0));
        let a = Matrix::new(vec![vec![1.0, 7.0], vec![6.0, 2.0]]).unwrap();
        assert!(!a.is_symmetric(0.0));
    }
}
