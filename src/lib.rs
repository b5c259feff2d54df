//! # matkit
//!
//! **Dense linear algebra for small matrices, built for correctness and
//! clear semantics.**
//!
//! matkit is a Gaussian-elimination, factorization, and spectral engine
//! for small-to-medium real matrices — the kind of workload interactive
//! and educational tools care about, where exact-looking answers and
//! well-defined edge-case behavior matter more than scale.
//!
//! ## Features
//!
//! - **PLU factorization**: partial-pivot elimination producing `P`, `L`,
//!   `U`, the cumulative elementary-operation matrix `E`, and the pivot
//!   list in one sweep
//! - **RREF and solving**: reduced row-echelon form, inverse, exact /
//!   least-squares / minimum-norm solutions, projections
//! - **Fundamental subspaces**: null, column, row, and left null space
//!   bases derived from the factorization
//! - **QR**: modified Gram–Schmidt with rank detection
//! - **Spectral analysis**: characteristic polynomial via the
//!   trace-power recursion, closed-form eigenvalues (up to 4x4), real and
//!   complex eigenspaces, (block) diagonalization
//! - **Cached derived state**: every factorization is computed lazily,
//!   once, and invalidated wholesale on mutation
//!
//! ## Quick Start
//!
//! ```
//! use matkit::prelude::*;
//!
//! let a = Matrix::new(vec![
//!     vec![1.0, 6.0, 4.0],
//!     vec![2.0, -1.0, 3.0],
//!     vec![5.0, 0.0, 1.0],
//! ])?;
//!
//! assert!((a.det()? - 97.0).abs() < 1e-8);
//!
//! let plu = a.plu(DEFAULT_EPS);
//! let pa = a.permute_rows(&plu.perm)?;
//! assert!(pa.equals(&plu.l.mul(&plu.u)?, 1e-8));
//! # Ok::<(), matkit::error::Error>(())
//! ```
//!
//! ## Tolerances
//!
//! Every numerically sensitive operation takes an explicit tolerance:
//! entries with absolute value at most `eps` count as zero. Pass
//! [`DEFAULT_EPS`] unless you have a reason not to; exact structural
//! predicates (`is_echelon`, `is_rref`, ...) are usually called with
//! `0.0`.
//!
//! ## Scope
//!
//! No arbitrary-precision arithmetic, no sparse or very large matrices,
//! no parallel or GPU kernels. A matrix and its cache are single-threaded
//! state; wrap instances in a lock if they must cross threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complex;
pub mod error;
pub mod matrix;
pub mod polynomial;
pub mod subspace;
pub mod vector;

pub use complex::Complex;
pub use error::{Error, Result};
pub use matrix::{
    Diagonalization, Matrix, Pivot, PluDecomposition, QrDecomposition, SvdDecomposition,
};
pub use polynomial::{Polynomial, Root};
pub use subspace::Subspace;
pub use vector::Vector;

/// Default tolerance for pivoting-sensitive operations
pub const DEFAULT_EPS: f64 = 1e-10;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::complex::Complex;
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{
        Diagonalization, Matrix, Pivot, PluDecomposition, QrDecomposition,
    };
    pub use crate::polynomial::{Polynomial, Root};
    pub use crate::subspace::Subspace;
    pub use crate::vector::Vector;
    pub use crate::DEFAULT_EPS;
}
