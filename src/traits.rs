use crate::complex::ExactComplex;
use crate::error::Error;

/// The result of an operation that is exact only for some inputs,
/// e.g. the square root of a rational number.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Approximation<T> {
    Approximated(T),
    Exact(T),
}

impl<T> Approximation<T> {
    /// Unwrap the value regardless of its exactness
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) | Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn value_ref(&self) -> &T {
        match self {
            Approximation::Approximated(v) | Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }

    /// Transform the value while keeping the exactness flag
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Approximation<U> {
        match self {
            Approximation::Approximated(v) => Approximation::Approximated(f(v)),
            Approximation::Exact(v) => Approximation::Exact(f(v)),
        }
    }
}

/// In case there are multiple solution for square root,
/// only the principal (non-negative or positive imaginary) result will be returned.
pub trait FromSqrt<T>: Sized {
    type Error;

    fn from_sqrt(t: T) -> Result<Approximation<Self>, Self::Error>;
}

/// Explicit conversion of a value into an [ExactComplex].
///
/// Floating point inputs are converted to the exact rational value of the float,
/// so `0.1` becomes `3602879701896397/36028797018963968` rather than `1/10`.
pub trait ToExactComplex {
    fn to_exact_complex(&self) -> Result<ExactComplex, Error>;
}
