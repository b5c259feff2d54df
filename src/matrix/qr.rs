//! QR decomposition by modified Gram–Schmidt
//!
//! Column-by-column orthogonalization, independent of the PLU engine.
//! Each projection is taken against the current, partially-orthogonalized
//! residual rather than the original column — the "modified" variant,
//! which keeps the loss of orthogonality proportional to the condition
//! number instead of its square.

use super::Matrix;
use crate::vector::Vector;

/// QR decomposition result: `A = Q * R`
///
/// `Q` is m x n with orthonormal columns where the input columns were
/// independent and zero columns where they were not; `R` is n x n upper
/// triangular with a zero row for each dependent column.
#[derive(Clone, Debug)]
pub struct QrDecomposition {
    /// Orthonormal (or zero) columns, m x n
    pub q: Matrix,
    /// Upper triangular projection coefficients, n x n
    pub r: Matrix,
    /// Indices of input columns that were linear combinations of their
    /// predecessors
    pub dependent: Vec<usize>,
}

impl Matrix {
    /// QR decomposition by modified Gram–Schmidt, cached
    ///
    /// A residual with norm at most `eps` marks its column dependent:
    /// `Q` gets a zero column and `R` a zero diagonal entry there. As a
    /// side effect the rank (`n` minus the dependent count) lands in the
    /// rank cache if nothing else computed it first.
    pub fn qr(&self, eps: f64) -> QrDecomposition {
        if let Some((cached_eps, qr)) = &self.cache().borrow().qr {
            if *cached_eps == eps {
                return qr.clone();
            }
        }

        let m = self.nrows();
        let n = self.ncols();
        let mut q_cols: Vec<Vector> = Vec::with_capacity(n);
        let mut r = Matrix::zero(n, n);
        let mut dependent = Vec::new();

        for j in 0..n {
            let mut v = self.col(j).expect("column index in range");
            for (jj, q_col) in q_cols.iter().enumerate() {
                // Dependent columns are zero, so their coefficient is 0.
                let coeff = q_col.dot(&v).expect("columns share length m");
                r.rows[jj][j] = coeff;
                if coeff != 0.0 {
                    v.add_scaled(q_col, -coeff, 0).expect("columns share length m");
                }
            }
            let norm = v.norm();
            if norm > eps {
                v.scale(1.0 / norm, 0);
                r.rows[j][j] = norm;
                q_cols.push(v);
            } else {
                r.rows[j][j] = 0.0;
                dependent.push(j);
                q_cols.push(Vector::zero(m));
            }
        }

        let qr = QrDecomposition {
            q: Matrix::from_cols(&q_cols).expect("q columns share length m"),
            r,
            dependent,
        };

        let mut cache = self.cache().borrow_mut();
        if cache.rank.is_none() {
            cache.rank = Some((eps, n - qr.dependent.len()));
        }
        cache.qr = Some((eps, qr.clone()));
        qr
    }
}
