//! Spectral engine: characteristic polynomial, eigenvalues, eigenspaces,
//! and diagonalization
//!
//! The characteristic polynomial comes from the trace-power recursion
//! (Newton's identities over powers of the matrix), eigenvalues from the
//! polynomial's closed-form factoring, real eigenspaces from the null
//! space of `A - λI`, and complex eigenspaces from a dedicated complex
//! Gaussian elimination. Matrices past 4x4 outrun the closed forms;
//! their eigenvalues must be seeded with [`Matrix::hint_eigenvalues`].

use super::Matrix;
use crate::complex::Complex;
use crate::error::{Error, Result};
use crate::polynomial::{Polynomial, Root};
use crate::subspace::Subspace;
use crate::vector::Vector;

/// Result of (block) diagonalization: `A * C = C * D`
///
/// `D` is diagonal, except for a 2x2 rotation-scaling block per complex
/// conjugate eigenvalue pair when block mode was requested.
#[derive(Clone, Debug)]
pub struct Diagonalization {
    /// Change-of-basis matrix whose columns are eigenvectors (or
    /// real/imaginary parts of complex ones)
    pub c: Matrix,
    /// Diagonal (or block diagonal) form
    pub d: Matrix,
}

/// Singular value decomposition result: `A = U * S * Vᵗ`
///
/// Placeholder surface only — see [`Matrix::svd`].
#[derive(Clone, Debug)]
pub struct SvdDecomposition {
    /// Left singular vectors
    pub u: Matrix,
    /// Diagonal matrix of singular values
    pub s: Matrix,
    /// Transposed right singular vectors
    pub vt: Matrix,
}

impl Matrix {
    /// Characteristic polynomial `p(λ) = det(λI - A)`, monic, cached
    ///
    /// Uses the trace-power recursion: compute `trace(A^k)` for
    /// `k = 1..n` and fold them into coefficients via Newton's
    /// identities. O(n⁴), fine at this scale.
    pub fn charpoly(&self) -> Result<Polynomial> {
        if !self.is_square() {
            return Err(Error::not_square("charpoly", self.nrows(), self.ncols()));
        }
        if let Some(p) = &self.cache().borrow().charpoly {
            return Ok(p.clone());
        }

        let n = self.nrows();
        let mut traces = Vec::with_capacity(n);
        let mut power = self.clone();
        for k in 1..=n {
            if k > 1 {
                power = power.mul(self)?;
            }
            traces.push(power.trace()?);
        }

        // c_k = -(s_k + sum_{j<k} c_j * s_{k-j}) / k
        let mut c = vec![0.0; n + 1];
        for k in 1..=n {
            let mut sum = traces[k - 1];
            for j in 1..k {
                sum += c[j] * traces[k - j - 1];
            }
            c[k] = -sum / k as f64;
        }

        let mut coeffs = vec![0.0; n + 1];
        coeffs[n] = 1.0;
        for k in 1..=n {
            coeffs[n - k] = c[k];
        }

        let p = Polynomial::new(coeffs);
        self.cache().borrow_mut().charpoly = Some(p.clone());
        Ok(p)
    }

    /// Determinant, via the characteristic polynomial
    ///
    /// `p(0) = det(-A)`, so the constant term is sign-adjusted by the
    /// parity of `n`.
    pub fn det(&self) -> Result<f64> {
        let p = self.charpoly()?;
        let p0 = p.coeff(0);
        Ok(if self.nrows() % 2 == 0 { p0 } else { -p0 })
    }

    /// Eigenvalues with algebraic multiplicities, cached
    ///
    /// Factors the characteristic polynomial; the order is the factoring
    /// order. Closed-form factoring stops at quartics, so matrices
    /// larger than 4x4 error out unless [`Matrix::hint_eigenvalues`]
    /// seeded the cache first.
    pub fn eigenvalues(&self, eps: f64) -> Result<Vec<(Root, usize)>> {
        if let Some(vals) = &self.cache().borrow().eigenvalues {
            return Ok(vals.clone());
        }
        if !self.is_square() {
            return Err(Error::not_square("eigenvalues", self.nrows(), self.ncols()));
        }
        if self.nrows() > 4 {
            return Err(Error::EigenvaluesUnavailable { size: self.nrows() });
        }

        let roots = self.charpoly()?.factor(eps)?;
        self.cache().borrow_mut().eigenvalues = Some(roots.clone());
        Ok(roots)
    }

    /// Seed the eigenvalue cache with externally computed values
    ///
    /// The escape hatch for matrices larger than 4x4: subsequent
    /// [`Matrix::eigenvalues`] calls return these pairs verbatim.
    pub fn hint_eigenvalues(&self, values: Vec<(Root, usize)>) {
        self.cache().borrow_mut().eigenvalues = Some(values);
    }

    /// Eigenspace of a real eigenvalue: the null space of `A - λI`,
    /// cached by approximate eigenvalue
    ///
    /// Errors when the space is zero-dimensional, i.e. `lambda` is not
    /// an eigenvalue within `eps`.
    pub fn eigenspace(&self, lambda: f64, eps: f64) -> Result<Subspace> {
        if !self.is_square() {
            return Err(Error::not_square("eigenspace", self.nrows(), self.ncols()));
        }
        {
            let cache = self.cache().borrow();
            for (key, key_eps, space) in &cache.eigenspaces {
                if (key - lambda).abs() <= eps && *key_eps == eps {
                    return Ok(space.clone());
                }
            }
        }

        let shifted = self.sub(&Matrix::identity(self.nrows(), lambda))?;
        let basis = shifted.null_basis(eps);
        if basis.is_empty() {
            return Err(Error::not_an_eigenvalue(lambda, eps));
        }
        let space = Subspace::from_basis(basis, self.ncols())?;
        self.cache()
            .borrow_mut()
            .eigenspaces
            .push((lambda, eps, space.clone()));
        Ok(space)
    }

    /// Eigenspace of a complex eigenvalue, as (real part, imaginary
    /// part) vector pairs, cached by approximate complex eigenvalue
    ///
    /// Runs a complex Gaussian elimination (partial pivoting on squared
    /// magnitude) over `A - λI`, reduces to RREF, and extracts the null
    /// basis. Each basis vector `x + iy` is returned as `(x, y)`.
    pub fn complex_eigenspace(
        &self,
        lambda: Complex,
        eps: f64,
    ) -> Result<Vec<(Vector, Vector)>> {
        if !self.is_square() {
            return Err(Error::not_square(
                "complex_eigenspace",
                self.nrows(),
                self.ncols(),
            ));
        }
        {
            let cache = self.cache().borrow();
            for (key, key_eps, pairs) in &cache.complex_eigenspaces {
                if key.approx_eq(lambda, eps) && *key_eps == eps {
                    return Ok(pairs.clone());
                }
            }
        }

        let pairs = self.complex_null_basis(lambda, eps);
        if pairs.is_empty() {
            return Err(Error::not_an_eigenvalue(lambda, eps));
        }
        self.cache()
            .borrow_mut()
            .complex_eigenspaces
            .push((lambda, eps, pairs.clone()));
        Ok(pairs)
    }

    /// Null basis of `A - λI` over the complex numbers
    fn complex_null_basis(&self, lambda: Complex, eps: f64) -> Vec<(Vector, Vector)> {
        let n = self.nrows();
        let eps_sq = eps * eps;

        // Promote A - λI to complex entries.
        let mut b: Vec<Vec<Complex>> = self
            .rows()
            .map(|row| row.iter().map(|&x| Complex::new(x, 0.0)).collect())
            .collect();
        for (i, row) in b.iter_mut().enumerate() {
            row[i] = row[i] - lambda;
        }

        // Gauss-Jordan with partial pivoting on |z|².
        let mut pivots: Vec<(usize, usize)> = Vec::new();
        let mut r = 0;
        for col in 0..n {
            if r >= n {
                break;
            }
            let mut best = r;
            let mut best_val = b[r][col].magnitude_squared();
            for (i, row) in b.iter().enumerate().skip(r + 1) {
                let val = row[col].magnitude_squared();
                if val > best_val {
                    best_val = val;
                    best = i;
                }
            }
            if best_val <= eps_sq {
                for row in b.iter_mut().skip(r) {
                    row[col] = Complex::ZERO;
                }
                continue;
            }
            b.swap(r, best);

            let inv = b[r][col].recip();
            for j in col..n {
                b[r][j] = b[r][j] * inv;
            }
            b[r][col] = Complex::ONE;

            for i in 0..n {
                if i == r {
                    continue;
                }
                let factor = b[i][col];
                if factor != Complex::ZERO {
                    for j in (col + 1)..n {
                        let delta = factor * b[r][j];
                        b[i][j] = b[i][j] - delta;
                    }
                    b[i][col] = Complex::ZERO;
                }
            }

            pivots.push((r, col));
            r += 1;
        }

        let mut is_pivot = vec![false; n];
        for &(_, col) in &pivots {
            is_pivot[col] = true;
        }

        let mut basis = Vec::new();
        for j in 0..n {
            if is_pivot[j] {
                continue;
            }
            let mut re = Vector::zero(n);
            let mut im = Vector::zero(n);
            re[j] = 1.0;
            for &(pr, pc) in &pivots {
                if pc < j {
                    re[pc] = -b[pr][j].re;
                    im[pc] = -b[pr][j].im;
                }
            }
            basis.push((re, im));
        }
        basis
    }

    /// (Block) diagonalize: find `C`, `D` with `A * C = C * D`
    ///
    /// Walks the eigenvalues, conjugate pairs once (the member with
    /// non-negative imaginary part). Real eigenvalues contribute
    /// eigenspace basis vectors (orthonormalized when `orthonormal` is
    /// set) and diagonal entries; complex ones require `block` mode and
    /// contribute a column pair plus a 2x2 `[[re, im], [-im, re]]`
    /// block. Returns `Ok(None)` when any eigenspace falls short of the
    /// algebraic multiplicity, or when a complex eigenvalue appears
    /// without block mode — non-diagonalizability is an expected
    /// outcome, not an error.
    pub fn diagonalize(
        &self,
        eps: f64,
        orthonormal: bool,
        block: bool,
    ) -> Result<Option<Diagonalization>> {
        if !self.is_square() {
            return Err(Error::not_square("diagonalize", self.nrows(), self.ncols()));
        }
        let n = self.nrows();
        let eigenvalues = self.eigenvalues(eps)?;

        let mut cols: Vec<Vector> = Vec::with_capacity(n);
        let mut d = Matrix::zero(n, n);
        let mut col = 0;

        for (root, mult) in eigenvalues {
            match root {
                Root::Real(lambda) => {
                    let space = match self.eigenspace(lambda, eps) {
                        Ok(space) => space,
                        Err(Error::NotAnEigenvalue { .. }) => return Ok(None),
                        Err(e) => return Err(e),
                    };
                    if space.dim() < mult {
                        return Ok(None);
                    }
                    let basis = if orthonormal {
                        space.on_basis(eps)
                    } else {
                        space.basis_vectors().to_vec()
                    };
                    for v in basis.into_iter().take(mult) {
                        if col >= n {
                            return Ok(None);
                        }
                        cols.push(v);
                        d.rows[col][col] = lambda;
                        col += 1;
                    }
                }
                Root::Complex(z) => {
                    if z.im < 0.0 {
                        // The conjugate partner covers this pair.
                        continue;
                    }
                    if !block {
                        return Ok(None);
                    }
                    let pairs = match self.complex_eigenspace(z, eps) {
                        Ok(pairs) => pairs,
                        Err(Error::NotAnEigenvalue { .. }) => return Ok(None),
                        Err(e) => return Err(e),
                    };
                    if pairs.len() < mult {
                        return Ok(None);
                    }
                    for (re, im) in pairs.into_iter().take(mult) {
                        if col + 1 >= n {
                            return Ok(None);
                        }
                        cols.push(re);
                        cols.push(im);
                        d.rows[col][col] = z.re;
                        d.rows[col][col + 1] = z.im;
                        d.rows[col + 1][col] = -z.im;
                        d.rows[col + 1][col + 1] = z.re;
                        col += 2;
                    }
                }
            }
        }

        if col != n {
            return Ok(None);
        }
        let c = Matrix::from_cols(&cols)?;
        Ok(Some(Diagonalization { c, d }))
    }

    /// Singular value decomposition — unimplemented
    ///
    /// The surface exists for callers that probe for it; no algorithm is
    /// provided yet.
    pub fn svd(&self) -> Result<SvdDecomposition> {
        Err(Error::NotImplemented {
            feature: "singular value decomposition",
        })
    }
}
