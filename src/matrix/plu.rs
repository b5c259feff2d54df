//! PLU factorization with partial pivoting
//!
//! The workhorse of the crate. One elimination sweep yields the
//! permutation, its sign, the unit-lower-triangular multiplier matrix,
//! the echelon form, the cumulative elementary-operation matrix, and the
//! pivot list; rank and every downstream derivation (RREF, solving, the
//! fundamental subspaces) read from this result.

use super::{rowops, Matrix};

/// Position of a leading nonzero entry in an echelon form
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pivot {
    /// Row index of the pivot
    pub row: usize,
    /// Column index of the pivot
    pub col: usize,
}

/// PLU factorization result: permuting the rows of `A` by `perm` equals
/// `L * U`, and `E * A = U`
///
/// `L` is unit lower triangular with the elimination multipliers below
/// the diagonal. `U` is in row-echelon form (upper triangular when `A`
/// is square and invertible). `E` is the invertible product of every
/// elementary operation applied during the sweep.
#[derive(Clone, Debug)]
pub struct PluDecomposition {
    /// Row permutation: row `i` of the permuted matrix is row `perm[i]`
    /// of the original
    pub perm: Vec<usize>,
    /// Determinant of the permutation matrix: +1 or -1, flipped on each
    /// row swap
    pub sign: f64,
    /// Unit lower triangular multiplier matrix, m x m
    pub l: Matrix,
    /// Echelon form of the input, m x n
    pub u: Matrix,
    /// Cumulative elementary-operation matrix with `E * A = U`, m x m
    pub e: Matrix,
    /// Pivot positions in `U`, one per nonzero row
    pub pivots: Vec<Pivot>,
}

impl PluDecomposition {
    /// The permutation as an explicit matrix `P` with `P * A = L * U`
    pub fn p(&self) -> Matrix {
        Matrix::permutation(&self.perm).expect("perm is tracked as a permutation")
    }
}

impl Matrix {
    /// PLU factorization with partial pivoting, cached
    ///
    /// Entries at most `eps` in absolute value are treated as zero when
    /// selecting pivots; sub-threshold column segments are zeroed
    /// explicitly to keep round-off out of `U`.
    pub fn plu(&self, eps: f64) -> PluDecomposition {
        if let Some((cached_eps, plu)) = &self.cache().borrow().plu {
            if *cached_eps == eps {
                return plu.clone();
            }
        }
        let plu = self.compute_plu(eps);
        let mut cache = self.cache().borrow_mut();
        cache.rank = Some((eps, plu.pivots.len()));
        cache.plu = Some((eps, plu.clone()));
        plu
    }

    /// Number of pivots of the echelon form, cached
    ///
    /// Served from whichever engine (PLU or QR) ran first under this
    /// tolerance.
    pub fn rank(&self, eps: f64) -> usize {
        if let Some((cached_eps, rank)) = self.cache().borrow().rank {
            if cached_eps == eps {
                return rank;
            }
        }
        self.plu(eps).pivots.len()
    }

    /// Dimension of the null space: `n - rank`
    pub fn nullity(&self, eps: f64) -> usize {
        self.ncols() - self.rank(eps)
    }

    /// Elimination sweep; pure with respect to the cache
    fn compute_plu(&self, eps: f64) -> PluDecomposition {
        let m = self.nrows();
        let n = self.ncols();
        let mut u = self.clone();
        let mut l = Matrix::identity(m, 1.0);
        let mut e = Matrix::identity(m, 1.0);
        let mut perm: Vec<usize> = (0..m).collect();
        let mut sign = 1.0;
        let mut pivots = Vec::new();

        let mut r = 0; // next pivot row
        for col in 0..n {
            if r >= m {
                break;
            }

            // Largest entry in the column at or below the pivot row.
            let mut best = r;
            let mut best_val = u.rows[r][col].abs();
            for i in (r + 1)..m {
                let val = u.rows[i][col].abs();
                if val > best_val {
                    best_val = val;
                    best = i;
                }
            }

            if best_val <= eps {
                // No pivot here; clear the segment so round-off cannot
                // resurface later, and move to the next column.
                for i in r..m {
                    u.rows[i][col] = 0.0;
                }
                continue;
            }

            if best != r {
                u.rows.swap(r, best);
                e.rows.swap(r, best);
                perm.swap(r, best);
                // Multipliers already stored travel with their rows.
                for j in 0..r {
                    let tmp = l.rows[r][j];
                    l.rows[r][j] = l.rows[best][j];
                    l.rows[best][j] = tmp;
                }
                sign = -sign;
            }

            let pivot_val = u.rows[r][col];
            for i in (r + 1)..m {
                let factor = u.rows[i][col] / pivot_val;
                if factor != 0.0 {
                    rowops::replace_rows(&mut u.rows, i, r, -factor, col)
                        .expect("distinct in-range rows");
                    rowops::replace_rows(&mut e.rows, i, r, -factor, 0)
                        .expect("distinct in-range rows");
                }
                u.rows[i][col] = 0.0;
                l.rows[i][r] = factor;
            }

            pivots.push(Pivot { row: r, col });
            r += 1;
        }

        PluDecomposition {
            perm,
            sign,
            l,
            u,
            e,
            pivots,
        }
    }

    /// Columns of `U` belonging to pivots, as a bitmap over `0..n`
    pub(crate) fn pivot_columns(&self, eps: f64) -> Vec<bool> {
        let mut is_pivot = vec![false; self.ncols()];
        for pivot in self.plu(eps).pivots {
            is_pivot[pivot.col] = true;
        }
        is_pivot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn check_plu(a: &Matrix) {
        let plu = a.plu(EPS);
        let pa = a.permute_rows(&plu.perm).unwrap();
        let lu = plu.l.mul(&plu.u).unwrap();
        assert!(
            pa.equals(&lu, 1e-8),
            "PA != LU for\n{a}\nPA =\n{pa}\nLU =\n{lu}"
        );
        let ea = plu.e.mul(a).unwrap();
        assert!(ea.equals(&plu.u, 1e-8), "EA != U for\n{a}");
        assert!(plu.u.is_echelon(0.0), "U not echelon:\n{}", plu.u);
        assert!(plu.l.is_unipotent(0.0), "L not unit lower:\n{}", plu.l);
    }

    #[test]
    fn test_plu_square() {
        let a = Matrix::new(vec![
            vec![1.0, 6.0, 4.0],
            vec![2.0, -1.0, 3.0],
            vec![5.0, 0.0, 1.0],
        ])
        .unwrap();
        check_plu(&a);
        assert_eq!(a.rank(EPS), 3);
    }

    #[test]
    fn test_plu_picks_largest_pivot() {
        let a = Matrix::new(vec![vec![1.0, 1.0], vec![4.0, 1.0]]).unwrap();
        let plu = a.plu(EPS);
        // Partial pivoting moves the 4 up.
        assert_eq!(plu.perm, vec![1, 0]);
        assert_eq!(plu.sign, -1.0);
        check_plu(&a);
    }

    #[test]
    fn test_plu_rank_deficient() {
        let a = Matrix::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 4.0, 6.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap();
        check_plu(&a);
        assert_eq!(a.rank(EPS), 2);
        let plu = a.plu(EPS);
        assert_eq!(plu.pivots.len(), 2);
        // Third row of U is identically zero.
        assert!(plu.u.row(2).unwrap().is_zero(0.0));
    }

    #[test]
    fn test_plu_rectangular() {
        let wide = Matrix::new(vec![vec![0.0, 2.0, 1.0], vec![0.0, 4.0, 3.0]]).unwrap();
        check_plu(&wide);
        assert_eq!(wide.rank(EPS), 2);
        let plu = wide.plu(EPS);
        assert_eq!(plu.pivots[0], Pivot { row: 0, col: 1 });

        let tall = Matrix::new(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        check_plu(&tall);
        assert_eq!(tall.rank(EPS), 1);
    }

    #[test]
    fn test_plu_zero_matrix() {
        let z = Matrix::zero(2, 3);
        let plu = z.plu(EPS);
        assert!(plu.pivots.is_empty());
        assert_eq!(z.rank(EPS), 0);
        assert_eq!(z.nullity(EPS), 3);
        check_plu(&z);
    }

    #[test]
    fn test_plu_permutation_matrix_form() {
        let a = Matrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let plu = a.plu(EPS);
        let pa = plu.p().mul(&a).unwrap();
        assert!(pa.equals(&plu.l.mul(&plu.u).unwrap(), 1e-12));
    }

    #[test]
    fn test_plu_cached_and_recomputed_per_eps() {
        let a = Matrix::new(vec![vec![1e-6, 1.0], vec![1.0, 1.0]]).unwrap();
        assert_eq!(a.rank(1e-10), 2);
        // A coarser tolerance flattens the tiny entry after pivoting
        // away from it; rank stays 2 here but the call must not serve
        // the 1e-10 cache blindly.
        assert_eq!(a.rank(1e-3), 2);
    }
}
