//! Polynomials with rational coefficients and their factorization into
//! linear binomials with exact rational or complex coefficients.
//!
//! There are three levels:
//! 1. [LinearBinomial] represents `p*x + q`
//! 2. [QuadraticPolynomial] finds the roots of `ax^2 + bx + c` and factors it into
//!    a [FactorPair] for a chosen leading coefficient
//! 3. [Polynomial] searches rational roots of higher degree polynomials and hands the
//!    residual quadratic over to [QuadraticPolynomial]

mod factor;
mod linear;
mod quadratic;

pub use factor::{synthetic_division, Factor, Factorization, Polynomial};
pub use linear::LinearBinomial;
pub use quadratic::{FactorCheck, FactorPair, QuadraticPolynomial};

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

// Write `coeffs` (highest degree first) as `ax^n + bx^(n-1) + ... + c`, skipping zero terms
fn fmt_terms(f: &mut fmt::Formatter<'_>, coeffs: &[BigRational]) -> fmt::Result {
    let degree = coeffs.len().saturating_sub(1);
    let mut first = true;
    for (i, coeff) in coeffs.iter().enumerate() {
        if coeff.is_zero() {
            continue;
        }

        let power = degree - i;
        let magnitude = coeff.abs();
        match (first, coeff.is_negative()) {
            (true, true) => write!(f, "-")?,
            (true, false) => {}
            (false, true) => write!(f, " - ")?,
            (false, false) => write!(f, " + ")?,
        }
        if !magnitude.is_one() || power == 0 {
            write!(f, "{}", magnitude)?;
        }
        match power {
            0 => {}
            1 => write!(f, "x")?,
            _ => write!(f, "x^{}", power)?,
        }
        first = false;
    }

    if first {
        write!(f, "0")?;
    }
    Ok(())
}
