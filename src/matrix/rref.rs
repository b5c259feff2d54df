//! Reduced row-echelon form, inverse, and the solve family
//!
//! Everything here is back-substitution on top of the PLU sweep: RREF
//! eliminates above the pivots of `U`, `solve` forward/back-substitutes
//! through `L` and `U`, and the least-squares variants route through the
//! normal equation, which is always consistent.

use super::{rowops, Matrix};
use crate::error::{Error, Result};
use crate::vector::Vector;

impl Matrix {
    /// Reduced row-echelon form, cached
    ///
    /// Pivot entries come out exactly 1 and the entries above them
    /// exactly 0, so `rref(eps).is_rref(0.0)` holds.
    pub fn rref(&self, eps: f64) -> Matrix {
        self.rref_pair(eps).0
    }

    /// Cumulative row-operation matrix `R` with `R * A = rref(A)`, cached
    pub fn row_ops(&self, eps: f64) -> Matrix {
        self.rref_pair(eps).1
    }

    fn rref_pair(&self, eps: f64) -> (Matrix, Matrix) {
        if let Some((cached_eps, rref, ops)) = &self.cache().borrow().rref {
            if *cached_eps == eps {
                return (rref.clone(), ops.clone());
            }
        }

        let plu = self.plu(eps);
        let mut rref = plu.u.clone();
        let mut ops = plu.e.clone();

        // Work pivots from last to first: scale each pivot row to 1,
        // then clear the column above it.
        for pivot in plu.pivots.iter().rev() {
            let pivot_val = rref.rows[pivot.row][pivot.col];
            rref.rows[pivot.row].scale(1.0 / pivot_val, pivot.col);
            ops.rows[pivot.row].scale(1.0 / pivot_val, 0);
            rref.rows[pivot.row][pivot.col] = 1.0;

            for i in 0..pivot.row {
                let factor = rref.rows[i][pivot.col];
                if factor != 0.0 {
                    rowops::replace_rows(&mut rref.rows, i, pivot.row, -factor, pivot.col)
                        .expect("distinct in-range rows");
                    rowops::replace_rows(&mut ops.rows, i, pivot.row, -factor, 0)
                        .expect("distinct in-range rows");
                }
                rref.rows[i][pivot.col] = 0.0;
            }
        }

        self.cache().borrow_mut().rref = Some((eps, rref.clone(), ops.clone()));
        (rref, ops)
    }

    /// Matrix inverse
    ///
    /// Requires a square, invertible matrix; the cumulative row-operation
    /// matrix of the RREF is the inverse once `R * A = I`.
    pub fn inverse(&self, eps: f64) -> Result<Matrix> {
        if !self.is_square() {
            return Err(Error::not_square("inverse", self.nrows(), self.ncols()));
        }
        if self.rank(eps) < self.ncols() {
            return Err(Error::Singular);
        }
        Ok(self.row_ops(eps))
    }

    /// Some solution of `A x = b`, or `None` when `b` is outside the
    /// column space
    ///
    /// Permutes `b`, forward-substitutes through `L`, rejects when the
    /// entries past the rank exceed `eps`, then back-substitutes through
    /// the pivot columns of `U` with free variables set to zero.
    pub fn solve(&self, b: &Vector, eps: f64) -> Result<Option<Vector>> {
        let m = self.nrows();
        let n = self.ncols();
        if b.len() != m {
            return Err(Error::shape_mismatch(&[m], &[b.len()]));
        }

        let plu = self.plu(eps);

        // y = L^{-1} P b, unit diagonal so no division.
        let mut y = vec![0.0; m];
        for i in 0..m {
            let mut sum = b[plu.perm[i]];
            for j in 0..i {
                sum -= plu.l.rows[i][j] * y[j];
            }
            y[i] = sum;
        }

        // Rows of U past the rank are zero; the system is consistent
        // only if the matching entries of y vanish.
        for val in y.iter().skip(plu.pivots.len()) {
            if val.abs() > eps {
                return Ok(None);
            }
        }

        let mut x = Vector::zero(n);
        for pivot in plu.pivots.iter().rev() {
            let mut sum = y[pivot.row];
            for j in (pivot.col + 1)..n {
                sum -= plu.u.rows[pivot.row][j] * x[j];
            }
            x[pivot.col] = sum / plu.u.rows[pivot.row][pivot.col];
        }
        Ok(Some(x))
    }

    /// The minimum-norm solution of `A x = b`, or `None` when
    /// inconsistent
    ///
    /// Projects an arbitrary solution onto the row space, which removes
    /// its null-space component.
    pub fn solve_shortest(&self, b: &Vector, eps: f64) -> Result<Option<Vector>> {
        match self.solve(b, eps)? {
            Some(x) => Ok(Some(self.project_row_space(&x, eps)?)),
            None => Ok(None),
        }
    }

    /// A least-squares solution: `x` minimizing `|A x - b|`
    ///
    /// Solves the normal equation `AᵗA x = Aᵗ b`, which is always
    /// consistent; when `A x = b` is consistent this is an exact
    /// solution.
    pub fn solve_least_squares(&self, b: &Vector, eps: f64) -> Result<Vector> {
        if b.len() != self.nrows() {
            return Err(Error::shape_mismatch(&[self.nrows()], &[b.len()]));
        }
        let rhs = self.transpose().apply(b)?;
        self.normal().solve(&rhs, eps)?.ok_or_else(|| {
            Error::Internal("normal equations reported inconsistent".to_string())
        })
    }

    /// The minimum-norm least-squares solution
    pub fn solve_least_squares_shortest(&self, b: &Vector, eps: f64) -> Result<Vector> {
        let x = self.solve_least_squares(b, eps)?;
        self.project_row_space(&x, eps)
    }

    /// Orthogonal projection of `b` onto the column space
    pub fn project_col_space(&self, b: &Vector, eps: f64) -> Result<Vector> {
        let x = self.solve_least_squares(b, eps)?;
        self.apply(&x)
    }

    /// Orthogonal projection of `v` onto the row space
    pub fn project_row_space(&self, v: &Vector, eps: f64) -> Result<Vector> {
        let t = self.transpose();
        let w = t.solve_least_squares(v, eps)?;
        t.apply(&w)
    }
}
