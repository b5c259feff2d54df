//! Integration tests for the spectral engine
//!
//! Tests verify:
//! - Characteristic polynomial roots reproduce known spectra
//! - Eigenvectors satisfy A v = λ v; eigenspace dimensions match
//! - Diagonalization reconstructs A = C D C⁻¹, block mode handles
//!   complex conjugate pairs, and defective matrices report `None`
//! - The 4x4 closed-form ceiling and the hint escape hatch

use matkit::prelude::*;

mod common;
use common::{seeded_rng, random_invertible, EPS, TOL};

#[test]
fn test_eigenvalues_concrete_case() {
    let a = Matrix::new(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
    let evs = a.eigenvalues(EPS).unwrap();
    assert_eq!(evs.len(), 2);
    assert!(matches!(evs[0], (Root::Real(x), 1) if x.abs() < TOL));
    assert!(matches!(evs[1], (Root::Real(x), 1) if (x - 2.0).abs() < TOL));
}

#[test]
fn test_eigenvalues_multiplicity() {
    // (λ - 2)² (λ - 5)
    let a = Matrix::new(vec![
        vec![2.0, 0.0, 0.0],
        vec![0.0, 2.0, 0.0],
        vec![0.0, 0.0, 5.0],
    ])
    .unwrap();
    let evs = a.eigenvalues(EPS).unwrap();
    let mut found = vec![];
    for (root, mult) in evs {
        match root {
            Root::Real(x) => found.push((x, mult)),
            Root::Complex(z) => panic!("unexpected complex eigenvalue {z}"),
        }
    }
    found.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert_eq!(found.len(), 2);
    assert!((found[0].0 - 2.0).abs() < TOL);
    assert_eq!(found[0].1, 2);
    assert!((found[1].0 - 5.0).abs() < TOL);
    assert_eq!(found[1].1, 1);
}

#[test]
fn test_eigenvector_relation() {
    let a = Matrix::new(vec![
        vec![4.0, 1.0, 0.0],
        vec![1.0, 4.0, 0.0],
        vec![0.0, 0.0, 7.0],
    ])
    .unwrap();
    for (root, _) in a.eigenvalues(EPS).unwrap() {
        let lambda = match root {
            Root::Real(x) => x,
            Root::Complex(z) => panic!("unexpected complex eigenvalue {z}"),
        };
        let space = a.eigenspace(lambda, EPS).unwrap();
        assert!(space.dim() >= 1);
        for v in space.basis_vectors() {
            let av = a.apply(v).unwrap();
            let mut lv = v.clone();
            lv.scale(lambda, 0);
            assert!(av.approx_eq(&lv, 1e-6), "A v != λ v for λ = {lambda}");
        }
    }
}

#[test]
fn test_eigenspace_rejects_non_eigenvalue() {
    let a = Matrix::identity(3, 2.0);
    assert!(matches!(
        a.eigenspace(1.0, EPS),
        Err(Error::NotAnEigenvalue { .. })
    ));
}

#[test]
fn test_charpoly_matches_det_and_trace() {
    let mut rng = seeded_rng(41);
    for n in 2..=4 {
        let a = random_invertible(&mut rng, n);
        let p = a.charpoly().unwrap();
        assert_eq!(p.degree(), n);
        // Monic, with -trace as the next coefficient.
        assert!((p.coeff(n) - 1.0).abs() < 1e-12);
        assert!((p.coeff(n - 1) + a.trace().unwrap()).abs() < 1e-6);
        // p(0) = det(-A) = (-1)^n det(A).
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        assert!((sign * p.coeff(0) - a.det().unwrap()).abs() < 1e-6);
    }
}

#[test]
fn test_diagonalize_reconstructs() {
    let a = Matrix::new(vec![
        vec![4.0, 1.0, 0.0],
        vec![1.0, 4.0, 0.0],
        vec![0.0, 0.0, 7.0],
    ])
    .unwrap();
    let diag = a.diagonalize(EPS, false, false).unwrap().unwrap();
    assert!(diag.d.is_diagonal(0.0));
    // A = C D C⁻¹.
    let c_inv = diag.c.inverse(EPS).unwrap();
    let rebuilt = diag.c.mul(&diag.d).unwrap().mul(&c_inv).unwrap();
    assert!(rebuilt.equals(&a, 1e-6), "C D C⁻¹ != A:\n{rebuilt}");
}

#[test]
fn test_diagonalize_orthonormal_for_symmetric() {
    let a = Matrix::new(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
    let diag = a.diagonalize(EPS, true, false).unwrap().unwrap();
    // Distinct eigenvalues of a symmetric matrix give orthogonal
    // eigenvectors; with orthonormalization C is orthogonal.
    assert!(diag.c.is_orthogonal(1e-8));
}

#[test]
fn test_defective_matrix_not_diagonalizable() {
    let a = Matrix::new(vec![vec![3.0, 1.0], vec![0.0, 3.0]]).unwrap();
    assert!(a.diagonalize(EPS, false, false).unwrap().is_none());
    assert!(!a.is_diagonalizable(EPS).unwrap());
}

#[test]
fn test_rotation_block_diagonalization() {
    let rot = Matrix::new(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap();
    // Ordinary diagonalization fails on complex eigenvalues.
    assert!(rot.diagonalize(EPS, false, false).unwrap().is_none());

    let diag = rot.diagonalize(EPS, false, true).unwrap().unwrap();
    let ac = rot.mul(&diag.c).unwrap();
    let cd = diag.c.mul(&diag.d).unwrap();
    assert!(ac.equals(&cd, TOL), "AC != CD");
}

#[test]
fn test_scaled_rotation_block_entries() {
    // Rotation-scaling with eigenvalues 3 ± 4i.
    let a = Matrix::new(vec![vec![3.0, 4.0], vec![-4.0, 3.0]]).unwrap();
    let diag = a.diagonalize(EPS, false, true).unwrap().unwrap();
    let ac = a.mul(&diag.c).unwrap();
    let cd = diag.c.mul(&diag.d).unwrap();
    assert!(ac.equals(&cd, 1e-6));
    // The block carries the eigenvalue's real part on the diagonal.
    assert!((diag.d.get(0, 0).unwrap() - 3.0).abs() < 1e-6);
    assert!((diag.d.get(1, 1).unwrap() - 3.0).abs() < 1e-6);
    assert!((diag.d.get(0, 1).unwrap().abs() - 4.0).abs() < 1e-6);
}

#[test]
fn test_mixed_spectrum_block_diagonalization() {
    let a = Matrix::new(vec![
        vec![1.0, -2.0, 0.0],
        vec![2.0, 1.0, 0.0],
        vec![0.0, 0.0, 3.0],
    ])
    .unwrap();
    let diag = a.diagonalize(EPS, false, true).unwrap().unwrap();
    let ac = a.mul(&diag.c).unwrap();
    let cd = diag.c.mul(&diag.d).unwrap();
    assert!(ac.equals(&cd, 1e-6));
}

#[test]
fn test_complex_eigenspace_pairs() {
    let a = Matrix::new(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap();
    let pairs = a.complex_eigenspace(Complex::I, EPS).unwrap();
    assert_eq!(pairs.len(), 1);
    let (x, y) = &pairs[0];
    // v = x + iy with A v = i v means A x = -y and A y = x.
    let ax = a.apply(x).unwrap();
    let mut neg_y = y.clone();
    neg_y.scale(-1.0, 0);
    assert!(ax.approx_eq(&neg_y, TOL));
    assert!(a.apply(y).unwrap().approx_eq(x, TOL));
}

#[test]
fn test_large_matrix_requires_hint() {
    let a = Matrix::identity(5, 2.0);
    assert!(matches!(
        a.eigenvalues(EPS),
        Err(Error::EigenvaluesUnavailable { size: 5 })
    ));

    a.hint_eigenvalues(vec![(Root::Real(2.0), 5)]);
    assert_eq!(a.eigenvalues(EPS).unwrap(), vec![(Root::Real(2.0), 5)]);

    // The seeded spectrum drives diagonalization too.
    let diag = a.diagonalize(EPS, false, false).unwrap().unwrap();
    assert!(diag.d.equals(&Matrix::identity(5, 2.0), 1e-8));
}

#[test]
fn test_eigen_4x4_closed_form() {
    // Block diagonal 4x4 with spectrum {1, 2, 3, 4}.
    let a = Matrix::new(vec![
        vec![1.0, 5.0, 0.0, 0.0],
        vec![0.0, 2.0, 0.0, 0.0],
        vec![0.0, 0.0, 3.0, 1.0],
        vec![0.0, 0.0, 0.0, 4.0],
    ])
    .unwrap();
    let mut vals: Vec<f64> = a
        .eigenvalues(EPS)
        .unwrap()
        .into_iter()
        .map(|(root, mult)| {
            assert_eq!(mult, 1);
            match root {
                Root::Real(x) => x,
                Root::Complex(z) => panic!("unexpected complex eigenvalue {z}"),
            }
        })
        .collect();
    vals.sort_by(f64::total_cmp);
    for (v, expected) in vals.iter().zip([1.0, 2.0, 3.0, 4.0]) {
        assert!((v - expected).abs() < 1e-6, "{v} vs {expected}");
    }
}
