//! The four fundamental subspaces
//!
//! All four bases fall out of the PLU/RREF machinery: free columns give
//! the null space, pivot columns of the original matrix give the column
//! space, the nonzero rows of `U` give the row space, and the trailing
//! rows of `E` give the left null space.

use super::Matrix;
use crate::subspace::Subspace;
use crate::vector::Vector;

impl Matrix {
    /// Basis of the null space, cached
    ///
    /// One vector per free column: 1 in the free slot, the negated RREF
    /// entries in the earlier pivot slots, 0 elsewhere. Full column rank
    /// yields an empty basis; zero vectors are never emitted.
    pub fn null_basis(&self, eps: f64) -> Vec<Vector> {
        if let Some((cached_eps, basis)) = &self.cache().borrow().null_basis {
            if *cached_eps == eps {
                return basis.clone();
            }
        }

        let rref = self.rref(eps);
        let pivots = self.plu(eps).pivots;
        let is_pivot = self.pivot_columns(eps);

        let mut basis = Vec::new();
        for j in 0..self.ncols() {
            if is_pivot[j] {
                continue;
            }
            let mut v = Vector::zero(self.ncols());
            v[j] = 1.0;
            for pivot in &pivots {
                if pivot.col < j {
                    v[pivot.col] = -rref.rows[pivot.row][j];
                }
            }
            basis.push(v);
        }

        self.cache().borrow_mut().null_basis = Some((eps, basis.clone()));
        basis
    }

    /// Basis of the column space: the pivot columns of the original
    /// matrix (not of `U`), cached
    pub fn col_basis(&self, eps: f64) -> Vec<Vector> {
        if let Some((cached_eps, basis)) = &self.cache().borrow().col_basis {
            if *cached_eps == eps {
                return basis.clone();
            }
        }

        let basis: Vec<Vector> = self
            .plu(eps)
            .pivots
            .iter()
            .map(|p| self.col(p.col).expect("pivot column in range"))
            .collect();

        self.cache().borrow_mut().col_basis = Some((eps, basis.clone()));
        basis
    }

    /// Basis of the row space: the nonzero rows of `U`, cached
    pub fn row_basis(&self, eps: f64) -> Vec<Vector> {
        if let Some((cached_eps, basis)) = &self.cache().borrow().row_basis {
            if *cached_eps == eps {
                return basis.clone();
            }
        }

        let plu = self.plu(eps);
        let basis: Vec<Vector> = plu.u.rows[..plu.pivots.len()].to_vec();

        self.cache().borrow_mut().row_basis = Some((eps, basis.clone()));
        basis
    }

    /// Basis of the left null space: the last `m - rank` rows of `E`,
    /// cached
    ///
    /// Those rows of `E * A = U` are exactly the zero rows of `U`.
    pub fn left_null_basis(&self, eps: f64) -> Vec<Vector> {
        if let Some((cached_eps, basis)) = &self.cache().borrow().left_null_basis {
            if *cached_eps == eps {
                return basis.clone();
            }
        }

        let plu = self.plu(eps);
        let basis: Vec<Vector> = plu.e.rows[plu.pivots.len()..].to_vec();

        self.cache().borrow_mut().left_null_basis = Some((eps, basis.clone()));
        basis
    }

    /// The null space as a [`Subspace`], cached
    pub fn null_space(&self, eps: f64) -> Subspace {
        if let Some((cached_eps, space)) = &self.cache().borrow().null_space {
            if *cached_eps == eps {
                return space.clone();
            }
        }
        let space = Subspace::from_basis(self.null_basis(eps), self.ncols())
            .expect("null basis vectors live in R^n");
        self.cache().borrow_mut().null_space = Some((eps, space.clone()));
        space
    }

    /// The column space as a [`Subspace`], cached
    pub fn col_space(&self, eps: f64) -> Subspace {
        if let Some((cached_eps, space)) = &self.cache().borrow().col_space {
            if *cached_eps == eps {
                return space.clone();
            }
        }
        let space = Subspace::from_basis(self.col_basis(eps), self.nrows())
            .expect("column vectors live in R^m");
        self.cache().borrow_mut().col_space = Some((eps, space.clone()));
        space
    }

    /// The row space as a [`Subspace`], cached
    pub fn row_space(&self, eps: f64) -> Subspace {
        if let Some((cached_eps, space)) = &self.cache().borrow().row_space {
            if *cached_eps == eps {
                return space.clone();
            }
        }
        let space = Subspace::from_basis(self.row_basis(eps), self.ncols())
            .expect("row vectors live in R^n");
        self.cache().borrow_mut().row_space = Some((eps, space.clone()));
        space
    }

    /// The left null space as a [`Subspace`], cached
    pub fn left_null_space(&self, eps: f64) -> Subspace {
        if let Some((cached_eps, space)) = &self.cache().borrow().left_null_space {
            if *cached_eps == eps {
                return space.clone();
            }
        }
        let space = Subspace::from_basis(self.left_null_basis(eps), self.nrows())
            .expect("left null vectors live in R^m");
        self.cache().borrow_mut().left_null_space = Some((eps, space.clone()));
        space
    }
}
