//! Complex numbers `a + b*i` where `a` and `b` are arbitrary precision rationals.
//!
//! Addition, subtraction, multiplication, division, conjugation and integer powers
//! are exact. Accuracy is lost (the type stays the same) in the following operations:
//! - [ExactComplex::abs], unless the squared magnitude is the square of a rational
//!   (otherwise it's a fixed precision integer square root)
//! - [ExactComplex::to_complex64] and [ExactComplex::to_f64_pair]
//! - powers with a non-integer rational exponent or a complex exponent, computed
//!   with `f64` and converted back
//! - conversions from floats, which are exact for the float but not for the decimal
//!   number the float was written as

mod pow;

pub use pow::Exponent;

use crate::error::Error;
use crate::rational;
use crate::traits::{Approximation, ToExactComplex};
use core::convert::TryFrom;
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// A complex number whose real and imaginary parts are exact rationals.
///
/// Both components are always reduced (inherited from [BigRational]), so the
/// derived equality and hash are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExactComplex {
    re: BigRational,
    im: BigRational,
}

impl ExactComplex {
    #[inline]
    pub fn new(re: BigRational, im: BigRational) -> Self {
        ExactComplex { re, im }
    }

    /// Create a complex number with zero imaginary part
    #[inline]
    pub fn from_real(re: BigRational) -> Self {
        ExactComplex {
            re,
            im: BigRational::zero(),
        }
    }

    /// The imaginary unit
    #[inline]
    pub fn i() -> Self {
        ExactComplex::new(BigRational::zero(), BigRational::one())
    }

    /// Create `re + im*i` from two values that are convertible to exact complex numbers.
    ///
    /// Either part may itself be complex, in which case the parts are combined
    /// algebraically, e.g. `try_new(1+2i, 3+4i) == (1-4) + (2+3)i`.
    ///
    /// Fails with [Error::InvalidValue] if a part is not representable as an exact rational.
    pub fn try_new<R, I>(re: &R, im: &I) -> Result<Self, Error>
    where
        R: ToExactComplex + ?Sized,
        I: ToExactComplex + ?Sized,
    {
        let re = re.to_exact_complex()?;
        let im = im.to_exact_complex()?;
        Ok(ExactComplex::new(re.re - im.im, re.im + im.re))
    }

    #[inline]
    pub fn re(&self) -> &BigRational {
        &self.re
    }

    #[inline]
    pub fn im(&self) -> &BigRational {
        &self.im
    }

    /// Get return-only references to the components `(re, im)`
    #[inline]
    pub fn parts(&self) -> (&BigRational, &BigRational) {
        (&self.re, &self.im)
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Return the complex conjugate `a - b*i`
    #[inline]
    pub fn conj(&self) -> Self {
        ExactComplex::new(self.re.clone(), -&self.im)
    }

    /// Squared magnitude `a² + b²`, always exact
    #[inline]
    pub fn norm_sqr(&self) -> BigRational {
        &self.re * &self.re + &self.im * &self.im
    }

    /// Magnitude `√(a² + b²)`.
    ///
    /// The result is exact only when the squared magnitude is the square of a rational,
    /// otherwise it's approximated by [rational::sqrt].
    pub fn abs(&self) -> Result<Approximation<BigRational>, Error> {
        rational::sqrt(&self.norm_sqr())
    }

    /// Multiplicative inverse.
    ///
    /// For `re = rn/rd` and `im = jn/jd` the inverse is
    /// `(rd*rn*jd² - rd²*jn*jd*i) / (rn²*jd² + rd²*jn²)`.
    pub fn recip(&self) -> Result<Self, Error> {
        let (rn, rd) = (self.re.numer(), self.re.denom());
        let (jn, jd) = (self.im.numer(), self.im.denom());
        let jd2 = jd * jd;
        let rd2 = rd * rd;

        let denom = rn * rn * &jd2 + &rd2 * jn * jn;
        if denom.is_zero() {
            return Err(Error::DivisionByZero);
        }

        Ok(ExactComplex::new(
            BigRational::new(rd * rn * jd2, denom.clone()),
            BigRational::new(-(rd2 * jn * jd), denom),
        ))
    }

    /// Divide by multiplying with the conjugate of the divisor,
    /// `(ac + bd) / (c² + d²) + (bc - ad) / (c² + d²) * i`
    pub fn try_div(&self, rhs: &ExactComplex) -> Result<Self, Error> {
        let denom = rhs.norm_sqr();
        if denom.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let re = &self.re * &rhs.re + &self.im * &rhs.im;
        let im = &self.im * &rhs.re - &self.re * &rhs.im;
        Ok(ExactComplex::new(re / &denom, im / denom))
    }

    /// Divide both components by a rational
    pub fn try_div_real(&self, rhs: &BigRational) -> Result<Self, Error> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(ExactComplex::new(&self.re / rhs, &self.im / rhs))
    }

    /// Limit the denominators of both components at the cost of some accuracy.
    /// See [rational::limit_denominator].
    pub fn limit_denominator(&self, max_denom: &BigInt) -> Result<Self, Error> {
        Ok(ExactComplex::new(
            rational::limit_denominator(&self.re, max_denom)?,
            rational::limit_denominator(&self.im, max_denom)?,
        ))
    }

    /// Convert both components to the nearest floats
    #[inline]
    pub fn to_f64_pair(&self) -> (f64, f64) {
        (rational::to_f64(&self.re), rational::to_f64(&self.im))
    }

    /// Create from a pair of floats, failing with [Error::InvalidValue] on NaN or infinity
    pub fn try_from_f64_pair(re: f64, im: f64) -> Result<Self, Error> {
        Ok(ExactComplex::new(
            rational::from_f64(re)?,
            rational::from_f64(im)?,
        ))
    }
}

#[cfg(feature = "num-complex")]
mod native {
    use super::*;
    use num_complex::Complex64;

    impl ExactComplex {
        /// Convert to a native floating point complex number (lossy)
        #[inline]
        pub fn to_complex64(&self) -> Complex64 {
            let (re, im) = self.to_f64_pair();
            Complex64::new(re, im)
        }
    }

    impl TryFrom<Complex64> for ExactComplex {
        type Error = Error;

        fn try_from(z: Complex64) -> Result<Self, Error> {
            ExactComplex::try_from_f64_pair(z.re, z.im)
        }
    }

    impl ToExactComplex for Complex64 {
        fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
            ExactComplex::try_from(*self)
        }
    }
}

impl From<BigRational> for ExactComplex {
    #[inline]
    fn from(re: BigRational) -> Self {
        ExactComplex::from_real(re)
    }
}

impl From<BigInt> for ExactComplex {
    #[inline]
    fn from(re: BigInt) -> Self {
        ExactComplex::from_real(BigRational::from_integer(re))
    }
}

impl From<i64> for ExactComplex {
    #[inline]
    fn from(re: i64) -> Self {
        ExactComplex::from(BigInt::from(re))
    }
}

impl From<i32> for ExactComplex {
    #[inline]
    fn from(re: i32) -> Self {
        ExactComplex::from(BigInt::from(re))
    }
}

impl From<(BigRational, BigRational)> for ExactComplex {
    #[inline]
    fn from((re, im): (BigRational, BigRational)) -> Self {
        ExactComplex::new(re, im)
    }
}

impl TryFrom<f64> for ExactComplex {
    type Error = Error;

    #[inline]
    fn try_from(re: f64) -> Result<Self, Error> {
        rational::from_f64(re).map(ExactComplex::from_real)
    }
}

impl ToExactComplex for ExactComplex {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        Ok(self.clone())
    }
}

impl ToExactComplex for BigRational {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        Ok(ExactComplex::from_real(self.clone()))
    }
}

impl ToExactComplex for BigInt {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        Ok(ExactComplex::from(self.clone()))
    }
}

impl ToExactComplex for i64 {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        Ok(ExactComplex::from(*self))
    }
}

impl ToExactComplex for i32 {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        Ok(ExactComplex::from(*self))
    }
}

impl ToExactComplex for f64 {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        rational::from_f64(*self).map(ExactComplex::from_real)
    }
}

impl PartialEq<BigRational> for ExactComplex {
    /// A complex number equals a real one iff its imaginary part is zero
    /// and the real parts are equal
    #[inline]
    fn eq(&self, other: &BigRational) -> bool {
        self.im.is_zero() && &self.re == other
    }
}

impl PartialEq<ExactComplex> for BigRational {
    #[inline]
    fn eq(&self, other: &ExactComplex) -> bool {
        other == self
    }
}

impl Zero for ExactComplex {
    #[inline]
    fn zero() -> Self {
        ExactComplex::new(BigRational::zero(), BigRational::zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl One for ExactComplex {
    #[inline]
    fn one() -> Self {
        ExactComplex::new(BigRational::one(), BigRational::zero())
    }
    #[inline]
    fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }
}

impl<'a, 'b> Add<&'b ExactComplex> for &'a ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn add(self, rhs: &'b ExactComplex) -> ExactComplex {
        ExactComplex::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl<'a, 'b> Sub<&'b ExactComplex> for &'a ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn sub(self, rhs: &'b ExactComplex) -> ExactComplex {
        ExactComplex::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

impl<'a, 'b> Mul<&'b ExactComplex> for &'a ExactComplex {
    type Output = ExactComplex;
    // (a+bi)(c+di) = (ac-bd) + (ad+bc)i
    #[inline]
    fn mul(self, rhs: &'b ExactComplex) -> ExactComplex {
        ExactComplex::new(
            &self.re * &rhs.re - &self.im * &rhs.im,
            &self.re * &rhs.im + &self.im * &rhs.re,
        )
    }
}

impl<'a, 'b> Div<&'b ExactComplex> for &'a ExactComplex {
    type Output = ExactComplex;

    /// # Panics
    /// if the divisor is zero, use [ExactComplex::try_div] to get an error instead
    #[inline]
    fn div(self, rhs: &'b ExactComplex) -> ExactComplex {
        match self.try_div(rhs) {
            Ok(v) => v,
            Err(_) => panic!("division by zero"),
        }
    }
}

impl<'a, 'b> Add<&'b BigRational> for &'a ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn add(self, rhs: &'b BigRational) -> ExactComplex {
        ExactComplex::new(&self.re + rhs, self.im.clone())
    }
}

impl<'a, 'b> Sub<&'b BigRational> for &'a ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn sub(self, rhs: &'b BigRational) -> ExactComplex {
        ExactComplex::new(&self.re - rhs, self.im.clone())
    }
}

impl<'a, 'b> Mul<&'b BigRational> for &'a ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn mul(self, rhs: &'b BigRational) -> ExactComplex {
        ExactComplex::new(&self.re * rhs, &self.im * rhs)
    }
}

impl<'a, 'b> Div<&'b BigRational> for &'a ExactComplex {
    type Output = ExactComplex;

    /// # Panics
    /// if the divisor is zero, use [ExactComplex::try_div_real] to get an error instead
    #[inline]
    fn div(self, rhs: &'b BigRational) -> ExactComplex {
        match self.try_div_real(rhs) {
            Ok(v) => v,
            Err(_) => panic!("division by zero"),
        }
    }
}

// Forward the owned and mixed-reference variants to the `&lhs op &rhs` implementation
macro_rules! forward_binop {
    (impl $imp:ident<$rhs:ty>, $method:ident) => {
        impl $imp<$rhs> for ExactComplex {
            type Output = ExactComplex;
            #[inline]
            fn $method(self, rhs: $rhs) -> ExactComplex {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $imp<&'a $rhs> for ExactComplex {
            type Output = ExactComplex;
            #[inline]
            fn $method(self, rhs: &'a $rhs) -> ExactComplex {
                (&self).$method(rhs)
            }
        }

        impl<'a> $imp<$rhs> for &'a ExactComplex {
            type Output = ExactComplex;
            #[inline]
            fn $method(self, rhs: $rhs) -> ExactComplex {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(impl Add<ExactComplex>, add);
forward_binop!(impl Sub<ExactComplex>, sub);
forward_binop!(impl Mul<ExactComplex>, mul);
forward_binop!(impl Div<ExactComplex>, div);
forward_binop!(impl Add<BigRational>, add);
forward_binop!(impl Sub<BigRational>, sub);
forward_binop!(impl Mul<BigRational>, mul);
forward_binop!(impl Div<BigRational>, div);

impl<'a> Neg for &'a ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn neg(self) -> ExactComplex {
        ExactComplex::new(-&self.re, -&self.im)
    }
}

impl Neg for ExactComplex {
    type Output = ExactComplex;
    #[inline]
    fn neg(self) -> ExactComplex {
        ExactComplex::new(-self.re, -self.im)
    }
}

impl fmt::Display for ExactComplex {
    /// Formats as `(a+bj)` or `(a-bj)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_negative() {
            write!(f, "({}-{}j)", self.re, -&self.im)
        } else {
            write!(f, "({}+{}j)", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn c(re: i64, im: i64) -> ExactComplex {
        ExactComplex::new(q(re, 1), q(im, 1))
    }

    #[test]
    fn construction_test() {
        assert_eq!(ExactComplex::from(3), c(3, 0));
        assert_eq!(
            ExactComplex::try_new(&q(1, 2), &12i64).unwrap(),
            ExactComplex::new(q(1, 2), q(12, 1))
        );
        assert_eq!(ExactComplex::try_new(&c(1, 2), &c(3, 4)).unwrap(), c(-3, 5));
        assert_eq!(
            ExactComplex::try_new(&0.25f64, &-1.5f64).unwrap(),
            ExactComplex::new(q(1, 4), q(-3, 2))
        );
        assert!(matches!(ExactComplex::try_new(&f64::NAN, &0i64), Err(Error::InvalidValue(_))));
        assert!(matches!(
            ExactComplex::try_new(&1i64, &f64::INFINITY),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(ExactComplex::try_from(f64::NEG_INFINITY), Err(Error::InvalidValue(_))));
    }

    #[test]
    fn equality_test() {
        assert_eq!(c(2, 3), c(2, 3));
        assert_ne!(c(2, 3), c(2, -3));
        assert_eq!(ExactComplex::new(q(2, 4), q(0, 1)), q(1, 2));
        assert!(c(2, 1) != q(2, 1));
        assert_eq!(q(1, 2), ExactComplex::new(q(2, 4), q(0, 1)));
        assert!(q(2, 1) != c(2, 1));
        assert!(c(0, 0).is_zero());
        assert!(c(1, 0).is_one());
    }

    #[test]
    fn arithmetic_test() {
        let a = ExactComplex::new(q(1, 2), q(-3, 4));
        let b = ExactComplex::new(q(-2, 3), q(5, 7));

        assert!((&a + &(-&a)).is_zero());
        assert_eq!(&a + &b, ExactComplex::new(q(-1, 6), q(-1, 28)));
        assert_eq!(&a - &b, ExactComplex::new(q(7, 6), q(-41, 28)));
        assert_eq!(c(2, 3) * c(4, -5), c(23, 2));
        assert_eq!(ExactComplex::i() * ExactComplex::i(), c(-1, 0));
        assert_eq!(c(2, 3) + q(1, 2), ExactComplex::new(q(5, 2), q(3, 1)));
        assert_eq!(c(2, 3) * q(1, 2), ExactComplex::new(q(1, 1), q(3, 2)));
        assert_eq!(c(2, 3) - q(2, 1), c(0, 3));

        // division round trip
        assert_eq!(&(&a * &b) / &b, a);
        assert_eq!(c(23, 2) / c(4, -5), c(2, 3));
        assert_eq!(c(21, -8).try_div(&c(4, 3)).unwrap(), ExactComplex::new(q(12, 5), q(-19, 5)));
        assert_eq!(c(3, 6) / q(3, 1), c(1, 2));
    }

    #[test]
    fn division_by_zero_test() {
        assert_eq!(c(1, 1).try_div(&c(0, 0)), Err(Error::DivisionByZero));
        assert_eq!(c(1, 1).try_div_real(&q(0, 1)), Err(Error::DivisionByZero));
        assert_eq!(c(0, 0).recip(), Err(Error::DivisionByZero));
    }

    #[test]
    #[should_panic]
    fn division_operator_panics_on_zero() {
        let _ = c(1, 1) / c(0, 0);
    }

    #[test]
    fn property_test() {
        assert_eq!(c(2, 3).conj(), c(2, -3));
        assert_eq!(c(3, -4).norm_sqr(), q(25, 1));
        assert_eq!(c(3, -4).abs().unwrap(), Approximation::Exact(q(5, 1)));

        let abs = c(1, 1).abs().unwrap();
        assert!(!abs.is_exact());
        assert!((rational::to_f64(abs.value_ref()) - std::f64::consts::SQRT_2).abs() < 1e-15);

        let z = ExactComplex::new(q(3, 7), q(-2, 5));
        assert!((&z * &z.recip().unwrap()).is_one());
        assert_eq!(c(0, 2).recip().unwrap(), ExactComplex::new(q(0, 1), q(-1, 2)));
        assert_eq!(c(4, 0).recip().unwrap(), q(1, 4));
    }

    #[test]
    fn limit_denominator_test() {
        let pi = std::f64::consts::PI;
        let z = ExactComplex::try_from_f64_pair(pi, -pi).unwrap();
        assert_eq!(
            z.limit_denominator(&BigInt::from(1000)).unwrap(),
            ExactComplex::new(q(355, 113), q(-355, 113))
        );
    }

    #[test]
    #[cfg(feature = "num-complex")]
    fn native_conversion_test() {
        use num_complex::Complex64;

        let cf = c(21, -8).try_div(&c(4, 3)).unwrap();
        let cm = Complex64::new(21., -8.) / Complex64::new(4., 3.);
        let z = cf.to_complex64();
        assert!((z.re - cm.re).abs() < 1e-12 && (z.im - cm.im).abs() < 1e-12);

        assert_eq!(
            ExactComplex::try_from(Complex64::new(0.5, -2.)).unwrap(),
            ExactComplex::new(q(1, 2), q(-2, 1))
        );
        assert!(ExactComplex::try_from(Complex64::new(f64::NAN, 0.)).is_err());
    }

    #[test]
    fn formatting_test() {
        assert_eq!(format!("{}", c(2, 3)), "(2+3j)");
        assert_eq!(format!("{}", c(2, -3)), "(2-3j)");
        assert_eq!(format!("{}", c(0, 0)), "(0+0j)");
        assert_eq!(format!("{}", ExactComplex::new(q(-1, 2), q(-5, 4))), "(-1/2-5/4j)");
    }
}
