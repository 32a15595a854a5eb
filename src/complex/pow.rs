//! Exponentiation of exact complex numbers.
//!
//! Integer exponents are computed exactly, negative ones through the exact inverse
//! of the base. Non-integer rational exponents use the polar form in `f64`, and
//! complex exponents fall back to `exp(w * ln(z))` in `f64` (requires the
//! `num-complex` feature). In both inexact cases the result is converted back
//! to an [ExactComplex], so the type is kept but not the accuracy.

use super::ExactComplex;
use crate::error::Error;
use crate::rational;
use crate::traits::ToExactComplex;
use log::trace;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, Zero};

/// Kind of an exponent, which determines how (and how exactly) a power is computed
#[derive(Clone, Debug, PartialEq)]
pub enum Exponent {
    /// Integer exponents give exact results
    Integer(BigInt),
    /// Rationals with a denominator other than one, computed with floats
    Rational(BigRational),
    /// Complex exponents, computed as a rational exponent when the imaginary part is zero
    Complex(ExactComplex),
    /// Exponents that can't be interpreted as a number (NaN, infinity)
    Unsupported(String),
}

impl Exponent {
    /// Classify a rational as an integer or a proper rational exponent
    pub fn from_rational(r: BigRational) -> Self {
        if r.is_integer() {
            Exponent::Integer(r.to_integer())
        } else {
            Exponent::Rational(r)
        }
    }
}

impl From<BigInt> for Exponent {
    #[inline]
    fn from(n: BigInt) -> Self {
        Exponent::Integer(n)
    }
}

impl From<i64> for Exponent {
    #[inline]
    fn from(n: i64) -> Self {
        Exponent::Integer(BigInt::from(n))
    }
}

impl From<i32> for Exponent {
    #[inline]
    fn from(n: i32) -> Self {
        Exponent::Integer(BigInt::from(n))
    }
}

impl From<BigRational> for Exponent {
    #[inline]
    fn from(r: BigRational) -> Self {
        Exponent::from_rational(r)
    }
}

impl From<ExactComplex> for Exponent {
    #[inline]
    fn from(z: ExactComplex) -> Self {
        Exponent::Complex(z)
    }
}

impl<'a> From<&'a ExactComplex> for Exponent {
    #[inline]
    fn from(z: &'a ExactComplex) -> Self {
        Exponent::Complex(z.clone())
    }
}

impl From<f64> for Exponent {
    /// Finite floats are taken at their exact rational value, other floats are unsupported
    fn from(x: f64) -> Self {
        match rational::from_f64(x) {
            Ok(r) => Exponent::from_rational(r),
            Err(_) => Exponent::Unsupported(format!("{}", x)),
        }
    }
}

#[cfg(feature = "num-complex")]
impl From<num_complex::Complex64> for Exponent {
    fn from(z: num_complex::Complex64) -> Self {
        match ExactComplex::try_from_f64_pair(z.re, z.im) {
            Ok(v) => Exponent::Complex(v),
            Err(_) => Exponent::Unsupported(format!("{}", z)),
        }
    }
}

impl ExactComplex {
    /// Raise the number to a power.
    ///
    /// - Integer exponents are exact. `z^0` is one for every `z`, including zero.
    ///   Negative powers of zero fail with [Error::DivisionByZero].
    /// - Other rational exponents are computed in `f64` from the polar form.
    /// - Complex exponents with zero imaginary part are handled as their real part,
    ///   other complex exponents are computed in `f64`. Zero raised to such an exponent
    ///   fails with [Error::DivisionByZero]. In particular `0^(0+0i)` is one like `0^0`,
    ///   and does not fail.
    /// - [Exponent::Unsupported] fails with [Error::InvalidOperation].
    pub fn pow<E: Into<Exponent>>(&self, exponent: E) -> Result<ExactComplex, Error> {
        match exponent.into() {
            Exponent::Integer(n) => self.powi_big(&n),
            Exponent::Rational(r) => self.powf_rational(&r),
            Exponent::Complex(z) => {
                if z.is_real() {
                    self.pow(Exponent::from_rational(z.re))
                } else {
                    self.powc_float(&z)
                }
            }
            Exponent::Unsupported(what) => Err(Error::invalid_operation(format!(
                "unsupported exponent {}",
                what
            ))),
        }
    }

    /// Raise the number to an integer power, always exact
    #[inline]
    pub fn powi(&self, n: i64) -> Result<ExactComplex, Error> {
        self.powi_big(&BigInt::from(n))
    }

    /// Compute `base ^ self`, i.e. exponentiation with `self` on the right hand side
    pub fn rpow<B: ToExactComplex + ?Sized>(&self, base: &B) -> Result<ExactComplex, Error> {
        base.to_exact_complex()?.pow(Exponent::Complex(self.clone()))
    }

    fn powi_big(&self, power: &BigInt) -> Result<ExactComplex, Error> {
        let n = power.magnitude();
        if n.is_zero() {
            return Ok(ExactComplex::one());
        }

        if power.is_negative() {
            // invert first so that all the multiplications stay exact
            Ok(self.recip()?.pow_unsigned(n))
        } else {
            Ok(self.pow_unsigned(n))
        }
    }

    // square and multiply, same result as n-fold multiplication
    fn pow_unsigned(&self, n: &BigUint) -> ExactComplex {
        let mut result = ExactComplex::one();
        let mut base = self.clone();
        let mut n = n.clone();
        loop {
            if n.is_odd() {
                result = &result * &base;
            }
            n = n >> 1usize;
            if n.is_zero() {
                break result;
            }
            base = &base * &base;
        }
    }

    fn powf_rational(&self, power: &BigRational) -> Result<ExactComplex, Error> {
        if self.is_zero() {
            return if power.is_positive() {
                Ok(ExactComplex::zero())
            } else {
                Err(Error::DivisionByZero)
            };
        }

        let p = rational::to_f64(power);
        let (re, im) = self.to_f64_pair();
        // atan2 gives the quadrant-correct angle, ±π/2 on the imaginary axis
        let theta = im.atan2(re);
        let modulus = re.hypot(im).powf(p);
        trace!("inexact power {}^{}: modulus {}, angle {}", self, power, modulus, theta);

        ExactComplex::try_from_f64_pair(modulus * (p * theta).cos(), modulus * (p * theta).sin())
    }

    #[cfg(feature = "num-complex")]
    fn powc_float(&self, power: &ExactComplex) -> Result<ExactComplex, Error> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let z = self.to_complex64().powc(power.to_complex64());
        trace!("inexact power {}^{} = {}", self, power, z);
        ExactComplex::try_from_f64_pair(z.re, z.im)
    }

    #[cfg(not(feature = "num-complex"))]
    fn powc_float(&self, _power: &ExactComplex) -> Result<ExactComplex, Error> {
        Err(Error::invalid_operation(
            "complex exponents require the `num-complex` feature",
        ))
    }
}

impl<'a, E: Into<Exponent>> Pow<E> for &'a ExactComplex {
    type Output = Result<ExactComplex, Error>;

    #[inline]
    fn pow(self, rhs: E) -> Self::Output {
        ExactComplex::pow(self, rhs)
    }
}

impl Pow<ExactComplex> for BigRational {
    type Output = Result<ExactComplex, Error>;

    #[inline]
    fn pow(self, rhs: ExactComplex) -> Self::Output {
        rhs.rpow(&self)
    }
}
