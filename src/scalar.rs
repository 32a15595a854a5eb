use crate::complex::ExactComplex;
use crate::error::Error;
use crate::rational;
use crate::traits::{Approximation, FromSqrt, ToExactComplex};
use core::ops::{Add, Mul, Neg, Sub};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// A value that is either an exact rational or an exact complex number,
/// e.g. a root or a factor coefficient of a polynomial.
///
/// Arithmetic stays rational as long as both operands are rational and
/// promotes to complex otherwise. Equality is numerical, so
/// `Complex(2+0i) == Rational(2)`.
#[derive(Clone, Debug)]
pub enum Scalar {
    Rational(BigRational),
    Complex(ExactComplex),
}

impl Scalar {
    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self, Scalar::Complex(_))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Rational(r) => r.is_zero(),
            Scalar::Complex(z) => z.is_zero(),
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Scalar::Rational(r) => r.is_one(),
            Scalar::Complex(z) => z.is_one(),
        }
    }

    /// Promote to a complex number
    pub fn to_complex(&self) -> ExactComplex {
        match self {
            Scalar::Rational(r) => ExactComplex::from_real(r.clone()),
            Scalar::Complex(z) => z.clone(),
        }
    }

    /// The rational value, if the imaginary part is zero
    pub fn to_rational(&self) -> Option<BigRational> {
        match self {
            Scalar::Rational(r) => Some(r.clone()),
            Scalar::Complex(z) if z.is_real() => Some(z.re().clone()),
            Scalar::Complex(_) => None,
        }
    }

    pub fn try_div(&self, rhs: &Scalar) -> Result<Scalar, Error> {
        match (self, rhs) {
            (Scalar::Rational(a), Scalar::Rational(b)) => {
                if b.is_zero() {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(Scalar::Rational(a / b))
                }
            }
            (Scalar::Complex(a), Scalar::Rational(b)) => a.try_div_real(b).map(Scalar::Complex),
            (a, b) => a.to_complex().try_div(&b.to_complex()).map(Scalar::Complex),
        }
    }

    #[inline]
    pub fn to_f64_pair(&self) -> (f64, f64) {
        self.to_complex().to_f64_pair()
    }
}

impl From<BigRational> for Scalar {
    #[inline]
    fn from(r: BigRational) -> Self {
        Scalar::Rational(r)
    }
}

impl From<BigInt> for Scalar {
    #[inline]
    fn from(n: BigInt) -> Self {
        Scalar::Rational(BigRational::from_integer(n))
    }
}

impl From<i64> for Scalar {
    #[inline]
    fn from(n: i64) -> Self {
        Scalar::from(BigInt::from(n))
    }
}

impl From<i32> for Scalar {
    #[inline]
    fn from(n: i32) -> Self {
        Scalar::from(BigInt::from(n))
    }
}

impl From<ExactComplex> for Scalar {
    #[inline]
    fn from(z: ExactComplex) -> Self {
        Scalar::Complex(z)
    }
}

impl ToExactComplex for Scalar {
    #[inline]
    fn to_exact_complex(&self) -> Result<ExactComplex, Error> {
        Ok(self.to_complex())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Rational(a), Scalar::Rational(b)) => a == b,
            (Scalar::Complex(a), Scalar::Rational(b))
            | (Scalar::Rational(b), Scalar::Complex(a)) => a == b,
            (Scalar::Complex(a), Scalar::Complex(b)) => a == b,
        }
    }
}

impl Eq for Scalar {}

impl PartialEq<BigRational> for Scalar {
    #[inline]
    fn eq(&self, other: &BigRational) -> bool {
        match self {
            Scalar::Rational(r) => r == other,
            Scalar::Complex(z) => z == other,
        }
    }
}

impl Zero for Scalar {
    #[inline]
    fn zero() -> Self {
        Scalar::Rational(BigRational::zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        Scalar::is_zero(self)
    }
}

impl One for Scalar {
    #[inline]
    fn one() -> Self {
        Scalar::Rational(BigRational::one())
    }
}

impl FromSqrt<BigRational> for Scalar {
    type Error = Error;

    /// Square root of a rational, purely imaginary if the rational is negative
    fn from_sqrt(t: BigRational) -> Result<Approximation<Self>, Error> {
        if t.is_negative() {
            let root = rational::sqrt(&-t)?;
            Ok(root.map(|im| Scalar::Complex(ExactComplex::new(BigRational::zero(), im))))
        } else {
            Ok(rational::sqrt(&t)?.map(Scalar::Rational))
        }
    }
}

macro_rules! scalar_binop {
    (impl $imp:ident, $method:ident) => {
        impl<'a, 'b> $imp<&'b Scalar> for &'a Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &'b Scalar) -> Scalar {
                match (self, rhs) {
                    (Scalar::Rational(a), Scalar::Rational(b)) => Scalar::Rational(a.$method(b)),
                    (Scalar::Complex(a), Scalar::Rational(b)) => Scalar::Complex(a.$method(b)),
                    (a, b) => Scalar::Complex(a.to_complex().$method(b.to_complex())),
                }
            }
        }

        impl $imp<Scalar> for Scalar {
            type Output = Scalar;
            #[inline]
            fn $method(self, rhs: Scalar) -> Scalar {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $imp<&'a Scalar> for Scalar {
            type Output = Scalar;
            #[inline]
            fn $method(self, rhs: &'a Scalar) -> Scalar {
                (&self).$method(rhs)
            }
        }
    };
}

scalar_binop!(impl Add, add);
scalar_binop!(impl Sub, sub);
scalar_binop!(impl Mul, mul);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    #[inline]
    fn neg(self) -> Scalar {
        match self {
            Scalar::Rational(r) => Scalar::Rational(-r),
            Scalar::Complex(z) => Scalar::Complex(-z),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    #[inline]
    fn neg(self) -> Scalar {
        -&self
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Rational(r) => write!(f, "{}", r),
            Scalar::Complex(z) => write!(f, "{}", z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn arithmetic_test() {
        let half = Scalar::from(q(1, 2));
        let i = Scalar::from(ExactComplex::i());

        assert_eq!(&half + &half, Scalar::from(1));
        assert!(!(&half * &half).is_complex());
        assert!((&half + &i).is_complex());
        assert_eq!(&i * &i, Scalar::from(-1));
        assert_eq!(&half - &i, Scalar::from(ExactComplex::new(q(1, 2), q(-1, 1))));
        assert_eq!(-&i, Scalar::from(ExactComplex::new(q(0, 1), q(-1, 1))));

        assert_eq!(half.try_div(&Scalar::from(q(1, 4))).unwrap(), Scalar::from(2));
        assert_eq!(Scalar::from(1).try_div(&i).unwrap(), -i.clone());
        assert_eq!(half.try_div(&Scalar::zero()), Err(Error::DivisionByZero));
        assert_eq!(i.try_div(&Scalar::zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn demotion_test() {
        let real = Scalar::from(ExactComplex::from(q(3, 4)));
        assert!(real.is_complex());
        assert_eq!(real, Scalar::from(q(3, 4)));
        assert_eq!(real.to_rational(), Some(q(3, 4)));
        assert_eq!(Scalar::from(ExactComplex::i()).to_rational(), None);
    }

    #[test]
    fn from_sqrt_test() {
        assert_eq!(
            Scalar::from_sqrt(q(9, 4)).unwrap(),
            Approximation::Exact(Scalar::from(q(3, 2)))
        );
        assert_eq!(
            Scalar::from_sqrt(q(-16, 1)).unwrap(),
            Approximation::Exact(Scalar::from(ExactComplex::new(q(0, 1), q(4, 1))))
        );

        let root = Scalar::from_sqrt(q(-2, 1)).unwrap();
        assert!(!root.is_exact());
        let (re, im) = root.value().to_f64_pair();
        assert!(re == 0. && (im - 2f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn formatting_test() {
        assert_eq!(format!("{}", Scalar::from(q(-2, 3))), "-2/3");
        assert_eq!(format!("{}", Scalar::from(ExactComplex::new(q(1, 1), q(-2, 1)))), "(1-2j)");
    }
}
