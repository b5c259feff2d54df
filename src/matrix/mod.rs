//! Dense row-major matrix with cached derived state
//!
//! `Matrix` is the central type of matkit. It owns its rows outright
//! (value semantics: no two matrices share storage) and carries a private
//! cache of derived results — transpose, PLU, RREF, subspace bases, QR,
//! eigen-data — each computed lazily on first access and reused until a
//! mutation invalidates the whole record.
//!
//! The cache is deliberately wholesale: nearly every derived field depends
//! on the raw entries, so partial invalidation buys nothing. The type is
//! single-threaded by design; wrap each instance in an external lock if it
//! must cross threads.

mod eigen;
mod plu;
mod predicates;
mod qr;
mod rowops;
mod rref;
mod subspaces;

pub use eigen::{Diagonalization, SvdDecomposition};
pub use plu::{Pivot, PluDecomposition};
pub use qr::QrDecomposition;

use crate::complex::Complex;
use crate::error::{Error, Result};
use crate::polynomial::{Polynomial, Root};
use crate::subspace::Subspace;
use crate::vector::Vector;
use std::cell::RefCell;
use std::fmt;

/// Derived state memoized per matrix value
///
/// Tolerance-dependent entries remember the tolerance they were computed
/// with; a lookup under a different tolerance recomputes and replaces the
/// entry rather than serving a stale answer.
#[derive(Default)]
pub(crate) struct Cache {
    pub(crate) transpose: Option<Matrix>,
    pub(crate) normal: Option<Matrix>,
    pub(crate) charpoly: Option<Polynomial>,
    pub(crate) plu: Option<(f64, PluDecomposition)>,
    pub(crate) rank: Option<(f64, usize)>,
    /// `(eps, rref, row_ops)` — the reduced form and the cumulative
    /// row-operation matrix taking the original there
    pub(crate) rref: Option<(f64, Matrix, Matrix)>,
    pub(crate) null_basis: Option<(f64, Vec<Vector>)>,
    pub(crate) col_basis: Option<(f64, Vec<Vector>)>,
    pub(crate) row_basis: Option<(f64, Vec<Vector>)>,
    pub(crate) left_null_basis: Option<(f64, Vec<Vector>)>,
    pub(crate) null_space: Option<(f64, Subspace)>,
    pub(crate) col_space: Option<(f64, Subspace)>,
    pub(crate) row_space: Option<(f64, Subspace)>,
    pub(crate) left_null_space: Option<(f64, Subspace)>,
    pub(crate) qr: Option<(f64, QrDecomposition)>,
    pub(crate) eigenvalues: Option<Vec<(Root, usize)>>,
    /// Real eigenspaces keyed by `(lambda, eps)`, scanned linearly
    pub(crate) eigenspaces: Vec<(f64, f64, Subspace)>,
    /// Complex eigenspaces keyed by `(lambda, eps)`, scanned linearly
    pub(crate) complex_eigenspaces: Vec<(Complex, f64, Vec<(Vector, Vector)>)>,
}

/// Dense matrix of real numbers
///
/// Rows all have equal length; an empty matrix is 0x0. Operations either
/// return new matrices or mutate in place — mutation through the public
/// surface invalidates the derived-state cache eagerly.
pub struct Matrix {
    rows: Vec<Vector>,
    ncols: usize,
    cache: RefCell<Box<Cache>>,
}

impl Matrix {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a matrix from row data
    ///
    /// Errors when the rows have unequal lengths. An empty row list gives
    /// the 0x0 matrix.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows.into_iter().map(Vector::new).collect())
    }

    /// Create a matrix from row vectors
    pub fn from_rows(rows: Vec<Vector>) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vector::len);
        for row in &rows {
            if row.len() != ncols {
                return Err(Error::shape_mismatch(&[ncols], &[row.len()]));
            }
        }
        Ok(Self {
            rows,
            ncols,
            cache: RefCell::new(Box::default()),
        })
    }

    /// Create a matrix whose columns are the given vectors
    pub fn from_cols(cols: &[Vector]) -> Result<Self> {
        let nrows = cols.first().map_or(0, Vector::len);
        for col in cols {
            if col.len() != nrows {
                return Err(Error::shape_mismatch(&[nrows], &[col.len()]));
            }
        }
        let rows = (0..nrows)
            .map(|i| Vector::new(cols.iter().map(|c| c[i]).collect()))
            .collect();
        Ok(Self {
            rows,
            ncols: cols.len(),
            cache: RefCell::new(Box::default()),
        })
    }

    /// The m x n zero matrix
    pub fn zero(m: usize, n: usize) -> Self {
        let n = if m == 0 { 0 } else { n };
        Self {
            rows: (0..m).map(|_| Vector::zero(n)).collect(),
            ncols: n,
            cache: RefCell::new(Box::default()),
        }
    }

    /// The n x n identity scaled by `scale`
    pub fn identity(n: usize, scale: f64) -> Self {
        let mut out = Self::zero(n, n);
        for i in 0..n {
            out.rows[i][i] = scale;
        }
        out
    }

    /// Permutation matrix with a 1 in column `vals[i]` of row `i`
    ///
    /// Applied on the left, it sends row `vals[i]` of its operand to row
    /// `i`. Errors unless `vals` is a permutation of `0..vals.len()`.
    pub fn permutation(vals: &[usize]) -> Result<Self> {
        let n = vals.len();
        let mut seen = vec![false; n];
        for &v in vals {
            if v >= n {
                return Err(Error::index_oob(v, n));
            }
            if seen[v] {
                return Err(Error::invalid_argument(
                    "vals",
                    format!("index {v} repeats; not a permutation"),
                ));
            }
            seen[v] = true;
        }
        let mut out = Self::zero(n, n);
        for (i, &v) in vals.iter().enumerate() {
            out.rows[i][v] = 1.0;
        }
        Ok(out)
    }

    // ========================================================================
    // Shape and entry access
    // ========================================================================

    /// Number of rows
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Entry at `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        if i >= self.rows.len() {
            return Err(Error::index_oob(i, self.rows.len()));
        }
        self.rows[i].get(j)
    }

    /// Overwrite the entry at `(i, j)`, invalidating cached state
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<&mut Self> {
        if i >= self.rows.len() {
            return Err(Error::index_oob(i, self.rows.len()));
        }
        self.rows[i].set(j, value)?;
        self.invalidate();
        Ok(self)
    }

    /// Row `i` as a vector
    pub fn row(&self, i: usize) -> Result<Vector> {
        self.rows
            .get(i)
            .cloned()
            .ok_or_else(|| Error::index_oob(i, self.rows.len()))
    }

    /// Column `j` as a vector
    pub fn col(&self, j: usize) -> Result<Vector> {
        if j >= self.ncols {
            return Err(Error::index_oob(j, self.ncols));
        }
        Ok(Vector::new(self.rows.iter().map(|r| r[j]).collect()))
    }

    /// Main diagonal, length `min(m, n)`
    pub fn diag(&self) -> Vector {
        let k = self.rows.len().min(self.ncols);
        Vector::new((0..k).map(|i| self.rows[i][i]).collect())
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &Vector> {
        self.rows.iter()
    }

    /// Iterate over columns
    pub fn cols(&self) -> impl Iterator<Item = Vector> + '_ {
        (0..self.ncols).map(|j| Vector::new(self.rows.iter().map(|r| r[j]).collect()))
    }

    /// Copy `other` into this matrix with its top-left corner at
    /// `(i0, j0)`, invalidating cached state
    pub fn insert(&mut self, other: &Matrix, i0: usize, j0: usize) -> Result<&mut Self> {
        if i0 + other.nrows() > self.nrows() {
            return Err(Error::index_oob(i0 + other.nrows(), self.nrows()));
        }
        if j0 + other.ncols() > self.ncols() {
            return Err(Error::index_oob(j0 + other.ncols(), self.ncols()));
        }
        for (di, row) in other.rows.iter().enumerate() {
            for (dj, &x) in row.iter().enumerate() {
                self.rows[i0 + di][j0 + dj] = x;
            }
        }
        self.invalidate();
        Ok(self)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Entrywise sum
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_entries(other, |a, b| a + b)
    }

    /// Entrywise difference
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_entries(other, |a, b| a - b)
    }

    fn zip_entries(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Result<Matrix> {
        if self.nrows() != other.nrows() || self.ncols != other.ncols {
            return Err(Error::shape_mismatch(
                &[self.nrows(), self.ncols],
                &[other.nrows(), other.ncols],
            ));
        }
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| {
                Vector::new(a.iter().zip(b.iter()).map(|(x, y)| f(*x, *y)).collect())
            })
            .collect();
        Matrix::from_rows(rows)
    }

    /// Matrix product `self * other`
    pub fn mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncols != other.nrows() {
            return Err(Error::shape_mismatch(
                &[self.ncols],
                &[other.nrows()],
            ));
        }
        let mut out = Matrix::zero(self.nrows(), other.ncols());
        for i in 0..self.nrows() {
            for k in 0..self.ncols {
                let aik = self.rows[i][k];
                if aik == 0.0 {
                    continue;
                }
                for j in 0..other.ncols {
                    out.rows[i][j] += aik * other.rows[k][j];
                }
            }
        }
        Ok(out)
    }

    /// Every entry multiplied by `c`
    pub fn scalar_mul(&self, c: f64) -> Matrix {
        let rows = self
            .rows
            .iter()
            .map(|r| Vector::new(r.iter().map(|x| c * x).collect()))
            .collect();
        Matrix {
            rows,
            ncols: self.ncols,
            cache: RefCell::new(Box::default()),
        }
    }

    /// Matrix-vector product
    pub fn apply(&self, v: &Vector) -> Result<Vector> {
        if v.len() != self.ncols {
            return Err(Error::shape_mismatch(&[self.ncols], &[v.len()]));
        }
        let mut out = Vector::zero(self.nrows());
        for (i, row) in self.rows.iter().enumerate() {
            out[i] = row.dot(v)?;
        }
        Ok(out)
    }

    /// Sum of diagonal entries (square matrices only)
    pub fn trace(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(Error::not_square("trace", self.nrows(), self.ncols));
        }
        Ok((0..self.nrows()).map(|i| self.rows[i][i]).sum())
    }

    /// Transpose, cached
    pub fn transpose(&self) -> Matrix {
        if let Some(t) = &self.cache.borrow().transpose {
            return t.clone();
        }
        let t = Matrix {
            rows: (0..self.ncols)
                .map(|j| Vector::new(self.rows.iter().map(|r| r[j]).collect()))
                .collect(),
            ncols: self.nrows(),
            cache: RefCell::new(Box::default()),
        };
        self.cache.borrow_mut().transpose = Some(t.clone());
        t
    }

    /// The normal matrix AᵗA, cached
    pub fn normal(&self) -> Matrix {
        if let Some(n) = &self.cache.borrow().normal {
            return n.clone();
        }
        let t = self.transpose();
        let n = t.mul(self).expect("transpose dimensions always compose");
        self.cache.borrow_mut().normal = Some(n.clone());
        n
    }

    /// Entrywise comparison within `eps`; false on shape mismatch
    pub fn equals(&self, other: &Matrix, eps: f64) -> bool {
        self.nrows() == other.nrows()
            && self.ncols == other.ncols
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| a.approx_eq(b, eps))
    }

    /// New matrix whose row `i` is row `perm[i]` of this one
    pub fn permute_rows(&self, perm: &[usize]) -> Result<Matrix> {
        if perm.len() != self.nrows() {
            return Err(Error::shape_mismatch(&[self.nrows()], &[perm.len()]));
        }
        let mut rows = Vec::with_capacity(perm.len());
        for &p in perm {
            if p >= self.nrows() {
                return Err(Error::index_oob(p, self.nrows()));
            }
            rows.push(self.rows[p].clone());
        }
        Matrix::from_rows(rows)
    }

    // ========================================================================
    // Cache plumbing
    // ========================================================================

    /// Drop every cached derived value
    ///
    /// Called by every public mutator. In-place edits through any future
    /// raw access must call this too; nearly all cached state depends on
    /// the raw entries.
    pub fn invalidate(&mut self) {
        *self.cache.borrow_mut() = Box::default();
    }

    /// Shared access to the cache record for the algorithm modules
    #[inline]
    pub(crate) fn cache(&self) -> &RefCell<Box<Cache>> {
        &self.cache
    }
}

impl Clone for Matrix {
    /// Independent copy with an empty cache
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            ncols: self.ncols,
            cache: RefCell::new(Box::default()),
        }
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("ncols", &self.ncols)
            .finish()
    }
}

impl fmt::Display for Matrix {
    /// Fixed-precision rendering: four decimal places, right-aligned
    /// columns, one bracketed line per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .flat_map(|r| r.iter())
            .map(|x| format!("{x:.4}").len())
            .max()
            .unwrap_or(0);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", format!("{x:.4}"))?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
