//! Real polynomials with closed-form root finding
//!
//! Coefficients are stored in ascending degree order (numpy convention):
//! `coeffs[k]` multiplies `x^k`. The characteristic-polynomial engine
//! produces these, and [`Polynomial::factor`] turns them into eigenvalues.
//!
//! Root finding is symbolic-style: linear, quadratic, cubic (Cardano with
//! the trigonometric branch for three real roots), and quartic (resolvent
//! cubic, or the biquadratic shortcut). Degree 5 and up has no closed form
//! and is rejected.

use crate::complex::Complex;
use crate::error::{Error, Result};

/// A root of a real polynomial, tagged by kind
///
/// Real matrices produce real or conjugate-complex eigenvalues; keeping
/// the two cases as explicit variants avoids threading near-zero
/// imaginary parts through the spectral engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Root {
    /// A real root
    Real(f64),
    /// A root with nonzero imaginary part
    Complex(Complex),
}

impl Root {
    /// View the root as a complex number
    #[inline]
    pub fn as_complex(self) -> Complex {
        match self {
            Root::Real(x) => Complex::new(x, 0.0),
            Root::Complex(z) => z,
        }
    }

    /// Whether two roots agree within `eps` in both components
    #[inline]
    pub fn approx_eq(self, other: Root, eps: f64) -> bool {
        self.as_complex().approx_eq(other.as_complex(), eps)
    }
}

impl std::fmt::Display for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Root::Real(x) => write!(f, "{x}"),
            Root::Complex(z) => write!(f, "{z}"),
        }
    }
}

/// Real polynomial in one variable
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
    /// Ascending-degree coefficients; highest entry is nonzero (or the
    /// list is `[c]` for a constant)
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from ascending-degree coefficients
    ///
    /// Trailing zero coefficients are trimmed, so the reported degree is
    /// the true degree.
    pub fn new(coeffs: Vec<f64>) -> Self {
        let mut coeffs = coeffs;
        while coeffs.len() > 1 && coeffs[coeffs.len() - 1] == 0.0 {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0.0);
        }
        Self { coeffs }
    }

    /// Degree of the polynomial (0 for constants)
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Coefficient of `x^k` (0 past the degree)
    #[inline]
    pub fn coeff(&self, k: usize) -> f64 {
        self.coeffs.get(k).copied().unwrap_or(0.0)
    }

    /// Ascending-degree coefficient slice
    #[inline]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Multiply every coefficient by `c`
    pub fn scale(&self, c: f64) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Evaluate at a real point (Horner's rule)
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluate at a complex point (Horner's rule)
    pub fn eval_complex(&self, z: Complex) -> Complex {
        self.coeffs
            .iter()
            .rev()
            .fold(Complex::ZERO, |acc, &c| acc * z + Complex::new(c, 0.0))
    }

    /// Factor into roots with algebraic multiplicities
    ///
    /// Returns `(root, multiplicity)` pairs in the order the closed-form
    /// branches produce them. Roots closer than `eps` merge into one
    /// entry; imaginary parts within `eps` of zero collapse to real
    /// roots. Degrees above 4 have no closed form and error out.
    pub fn factor(&self, eps: f64) -> Result<Vec<(Root, usize)>> {
        let deg = self.degree();
        if deg == 0 {
            return Ok(Vec::new());
        }
        if deg > 4 {
            return Err(Error::UnsupportedDegree { degree: deg });
        }

        let c = &self.coeffs;
        let lead = c[deg];
        let raw = match deg {
            1 => vec![Complex::new(-c[0] / c[1], 0.0)],
            2 => roots_quadratic(c[2], c[1], c[0], eps),
            3 => roots_cubic_monic(c[2] / lead, c[1] / lead, c[0] / lead, eps),
            4 => roots_quartic_monic(
                c[3] / lead,
                c[2] / lead,
                c[1] / lead,
                c[0] / lead,
                eps,
            ),
            _ => unreachable!(),
        };

        Ok(merge_roots(raw, eps))
    }
}

impl std::fmt::Display for Polynomial {
    /// Render highest degree first, e.g. `x^2 - 2x + 0`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (printed, k) in (0..self.coeffs.len()).rev().enumerate() {
            let coeff = self.coeffs[k];
            if printed == 0 {
                write!(f, "{coeff}")?;
            } else if coeff >= 0.0 {
                write!(f, " + {coeff}")?;
            } else {
                write!(f, " - {}", -coeff)?;
            }
            match k {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{k}")?,
            }
        }
        Ok(())
    }
}

/// Roots of `a x^2 + b x + c`, split on the discriminant
///
/// Real roots come out `(-b - sqrt(D))/2a` first, then `(-b + sqrt(D))/2a`.
fn roots_quadratic(a: f64, b: f64, c: f64, eps: f64) -> Vec<Complex> {
    let disc = b * b - 4.0 * a * c;
    if disc.abs() <= eps {
        let r = -b / (2.0 * a);
        vec![Complex::new(r, 0.0), Complex::new(r, 0.0)]
    } else if disc > 0.0 {
        let sd = disc.sqrt();
        vec![
            Complex::new((-b - sd) / (2.0 * a), 0.0),
            Complex::new((-b + sd) / (2.0 * a), 0.0),
        ]
    } else {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a);
        vec![Complex::new(re, -im), Complex::new(re, im)]
    }
}

/// Roots of the monic cubic `x^3 + a x^2 + b x + c`
///
/// Depresses to `t^3 + p t + q` and branches on the discriminant:
/// one real root via Cardano (then deflation to a quadratic), three real
/// roots via the trigonometric form, or the double-root formulas on the
/// boundary.
fn roots_cubic_monic(a: f64, b: f64, c: f64, eps: f64) -> Vec<Complex> {
    let shift = -a / 3.0;
    let p = b - a * a / 3.0;
    let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;

    if p.abs() <= eps && q.abs() <= eps {
        // Triple root at the shift point.
        return vec![Complex::new(shift, 0.0); 3];
    }

    let disc = (q / 2.0) * (q / 2.0) + (p / 3.0) * (p / 3.0) * (p / 3.0);

    if disc > eps {
        // One real root, Cardano.
        let sd = disc.sqrt();
        let t = (-q / 2.0 + sd).cbrt() + (-q / 2.0 - sd).cbrt();
        let r0 = t + shift;
        // Deflate x^3 + a x^2 + b x + c by (x - r0).
        let b1 = a + r0;
        let c1 = b + r0 * b1;
        let mut roots = vec![Complex::new(r0, 0.0)];
        roots.extend(roots_quadratic(1.0, b1, c1, eps));
        roots
    } else if disc < -eps {
        // Three distinct real roots; p < 0 is guaranteed here.
        let m = 2.0 * (-p / 3.0).sqrt();
        let arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let phi = arg.acos();
        (0..3)
            .map(|k| {
                let t = m * ((phi - 2.0 * std::f64::consts::PI * k as f64) / 3.0).cos();
                Complex::new(t + shift, 0.0)
            })
            .collect()
    } else {
        // Zero discriminant with p != 0: one simple root, one double.
        let t_simple = 3.0 * q / p;
        let t_double = -3.0 * q / (2.0 * p);
        vec![
            Complex::new(t_simple + shift, 0.0),
            Complex::new(t_double + shift, 0.0),
            Complex::new(t_double + shift, 0.0),
        ]
    }
}

/// Roots of the monic quartic `x^4 + a x^3 + b x^2 + c x + d`
///
/// Depresses to `y^4 + p y^2 + q y + r`. When the linear term vanishes
/// the quartic is biquadratic; otherwise a resolvent cubic in `u^2`
/// splits it into two quadratics `(y^2 + u y + v)(y^2 - u y + w)`.
fn roots_quartic_monic(a: f64, b: f64, c: f64, d: f64, eps: f64) -> Vec<Complex> {
    let shift = -a / 4.0;
    let a2 = a * a;
    let p = b - 3.0 * a2 / 8.0;
    let q = c - a * b / 2.0 + a2 * a / 8.0;
    let r = d - a * c / 4.0 + a2 * b / 16.0 - 3.0 * a2 * a2 / 256.0;

    let shift_c = Complex::new(shift, 0.0);

    if q.abs() <= eps {
        return biquadratic_roots(p, r, eps)
            .into_iter()
            .map(|y| y + shift_c)
            .collect();
    }

    // Resolvent cubic in U = u^2: U^3 + 2p U^2 + (p^2 - 4r) U - q^2 = 0.
    // Its value at U = 0 is -q^2 < 0, so a positive real root exists.
    let resolvent = roots_cubic_monic(2.0 * p, p * p - 4.0 * r, -q * q, eps);
    let u_sq = resolvent
        .into_iter()
        .filter(|z| z.im == 0.0)
        .map(|z| z.re)
        .fold(f64::NEG_INFINITY, f64::max);

    if !u_sq.is_finite() || u_sq <= eps {
        // Degenerate resolvent; the quartic is numerically biquadratic.
        return biquadratic_roots(p, r, eps)
            .into_iter()
            .map(|y| y + shift_c)
            .collect();
    }

    let u = u_sq.sqrt();
    let v = (p + u_sq - q / u) / 2.0;
    let w = (p + u_sq + q / u) / 2.0;

    let mut roots = roots_quadratic(1.0, u, v, eps);
    roots.extend(roots_quadratic(1.0, -u, w, eps));
    roots.into_iter().map(|y| y + shift_c).collect()
}

/// Roots of `y^4 + p y^2 + r` via `z = y^2`
fn biquadratic_roots(p: f64, r: f64, eps: f64) -> Vec<Complex> {
    let mut roots = Vec::with_capacity(4);
    for z in roots_quadratic(1.0, p, r, eps) {
        let w = z.sqrt();
        roots.push(w);
        roots.push(-w);
    }
    roots
}

/// Collapse near-real roots and merge duplicates into multiplicities
fn merge_roots(raw: Vec<Complex>, eps: f64) -> Vec<(Root, usize)> {
    let mut merged: Vec<(Complex, usize)> = Vec::new();
    for z in raw {
        let z = if z.im.abs() <= eps {
            Complex::new(z.re, 0.0)
        } else {
            z
        };
        match merged.iter_mut().find(|(w, _)| w.approx_eq(z, eps)) {
            Some((_, m)) => *m += 1,
            None => merged.push((z, 1)),
        }
    }
    merged
        .into_iter()
        .map(|(z, m)| {
            if z.im == 0.0 {
                (Root::Real(z.re), m)
            } else {
                (Root::Complex(z), m)
            }
        })
        .collect()
}
