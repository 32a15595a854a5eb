//! Complex numbers with exact rational components, and factoring of polynomials
//! with rational coefficients on top of them.
//!
//! ```
//! use num_exact_complex::{ExactComplex, QuadraticPolynomial, Scalar};
//! use num_bigint::BigInt;
//! use num_rational::BigRational;
//!
//! let int = |n: i64| BigRational::from_integer(BigInt::from(n));
//!
//! let z = ExactComplex::from(3) + ExactComplex::i();
//! assert_eq!(z.powi(2).unwrap(), ExactComplex::new(int(8), int(6)));
//!
//! let f = QuadraticPolynomial::new(int(1), int(1), int(-6)).unwrap();
//! assert_eq!(f.roots(), &[Scalar::from(2), Scalar::from(-3)]);
//! ```

mod complex;
mod error;
pub mod poly;
pub mod rational;
mod scalar;
pub mod traits;

pub use complex::{ExactComplex, Exponent};
pub use error::Error;
pub use poly::{FactorPair, LinearBinomial, Polynomial, QuadraticPolynomial};
pub use scalar::Scalar;
pub use traits::{Approximation, FromSqrt, ToExactComplex};
