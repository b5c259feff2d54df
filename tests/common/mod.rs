//! Common test utilities
#![allow(dead_code)]

use matkit::matrix::Matrix;
use matkit::vector::Vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default tolerance for the property checks
pub const TOL: f64 = 1e-8;

/// Pivoting tolerance passed to the algorithms
pub const EPS: f64 = 1e-10;

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Random m x n matrix with entries in [-3, 3], deterministic per seed
pub fn random_matrix(rng: &mut StdRng, m: usize, n: usize) -> Matrix {
    let rows = (0..m)
        .map(|_| (0..n).map(|_| rng.random_range(-3.0..3.0)).collect())
        .collect();
    Matrix::new(rows).expect("generated rows share a length")
}

/// Random invertible n x n matrix: random entries plus a dominant
/// diagonal, which keeps the pivots comfortably away from zero
pub fn random_invertible(rng: &mut StdRng, n: usize) -> Matrix {
    let mut a = random_matrix(rng, n, n);
    for i in 0..n {
        let val = a.get(i, i).unwrap() + 10.0;
        a.set(i, i, val).unwrap();
    }
    a
}

/// Random vector with entries in [-3, 3]
pub fn random_vector(rng: &mut StdRng, n: usize) -> Vector {
    Vector::new((0..n).map(|_| rng.random_range(-3.0..3.0)).collect())
}

/// Deterministic RNG for a named test
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
