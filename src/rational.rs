//! Helpers on arbitrary precision rationals ([BigRational]) that are not
//! provided by `num-rational` itself.

use crate::error::Error;
use crate::traits::Approximation;
use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::mem::replace;

/// Exact rational value of a finite float.
pub fn from_f64(x: f64) -> Result<BigRational, Error> {
    BigRational::from_float(x)
        .ok_or_else(|| Error::invalid_value(format!("{} is not a finite rational value", x)))
}

/// Nearest float to the rational, NaN if the conversion is impossible
#[inline]
pub(crate) fn to_f64(r: &BigRational) -> f64 {
    r.to_f64().unwrap_or(f64::NAN)
}

/// Return the square root of `r` if it's a rational number.
pub fn exact_sqrt(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }

    let nroot = Roots::sqrt(r.numer());
    if &(&nroot * &nroot) != r.numer() {
        return None;
    }
    let droot = Roots::sqrt(r.denom());
    if &(&droot * &droot) != r.denom() {
        return None;
    }
    Some(BigRational::new(nroot, droot))
}

/// Fractional bits kept by the approximated square root
const SQRT_PRECISION_BITS: usize = 64;

/// Square root of a non-negative rational. Perfect squares are returned exactly,
/// other values are approximated with integer square roots to
/// [SQRT_PRECISION_BITS] bits after scaling, so the result never overflows or
/// underflows the way an `f64` would.
pub fn sqrt(r: &BigRational) -> Result<Approximation<BigRational>, Error> {
    if r.is_negative() {
        return Err(Error::invalid_value(format!(
            "square root of negative value {}",
            r
        )));
    }

    match exact_sqrt(r) {
        Some(root) => Ok(Approximation::Exact(root)),
        None => {
            // √(n/d) = √(n·d·4^k) / (d·2^k)
            let (n, d) = (r.numer(), r.denom());
            let scaled = n * d << (2 * SQRT_PRECISION_BITS);
            Ok(Approximation::Approximated(BigRational::new(
                Roots::sqrt(&scaled),
                d << SQRT_PRECISION_BITS,
            )))
        }
    }
}

/// Find the closest rational to `r` whose denominator is at most `max_denom`.
///
/// The result is the last convergent of the continued fraction expansion of `r`
/// within the limit, or the semiconvergent after it if that one is closer.
pub fn limit_denominator(r: &BigRational, max_denom: &BigInt) -> Result<BigRational, Error> {
    if max_denom < &BigInt::one() {
        return Err(Error::invalid_value("max denominator should be at least 1"));
    }
    if r.denom() <= max_denom {
        return Ok(r.clone());
    }

    // p_(k-2), q_(k-2), p_(k-1), q_(k-1)
    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let (mut n, mut d) = (r.numer().clone(), r.denom().clone());
    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_denom {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = replace(&mut p1, p2);
        q0 = replace(&mut q1, q2);
        let rem = &n - &a * &d;
        n = replace(&mut d, rem);
    }

    let k = (max_denom - &q0).div_floor(&q1);
    let semi = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let conv = BigRational::new(p1, q1);
    if (&conv - r).abs() <= (&semi - r).abs() {
        Ok(conv)
    } else {
        Ok(semi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn sqrt_test() {
        assert_eq!(sqrt(&q(25, 4)).unwrap(), Approximation::Exact(q(5, 2)));
        assert_eq!(sqrt(&q(0, 1)).unwrap(), Approximation::Exact(q(0, 1)));
        assert_eq!(exact_sqrt(&q(2, 1)), None);
        assert_eq!(exact_sqrt(&q(-4, 1)), None);

        let root2 = sqrt(&q(2, 1)).unwrap();
        assert!(!root2.is_exact());
        assert!((to_f64(root2.value_ref()) - 1.4142135623730951).abs() < 1e-15);

        assert!(matches!(sqrt(&q(-1, 1)), Err(Error::InvalidValue(_))));
    }

    #[test]
    fn sqrt_out_of_float_range_test() {
        let big = BigInt::from(10).pow(200u32);

        // larger than f64::MAX
        let huge = BigRational::from_integer(&big * &big + BigInt::from(1));
        let root = sqrt(&huge).unwrap();
        assert!(!root.is_exact());
        assert!((root.value() - BigRational::from_integer(big.clone())).abs() < q(1, 1));

        // smaller than f64::MIN_POSITIVE
        let tiny = BigRational::new(BigInt::from(2), &big * &big);
        let root = sqrt(&tiny).unwrap();
        assert!(!root.is_exact());
        let scaled = root.value() * BigRational::from_integer(big);
        assert!((to_f64(&scaled) - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn from_f64_test() {
        assert_eq!(from_f64(0.5).unwrap(), q(1, 2));
        assert_eq!(from_f64(-3.0).unwrap(), q(-3, 1));
        assert!(from_f64(f64::NAN).is_err());
        assert!(from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn limit_denominator_test() {
        let pi = from_f64(std::f64::consts::PI).unwrap();
        assert_eq!(limit_denominator(&pi, &BigInt::from(1000)).unwrap(), q(355, 113));
        assert_eq!(limit_denominator(&pi, &BigInt::from(7)).unwrap(), q(22, 7));
        assert_eq!(limit_denominator(&pi, &BigInt::from(1)).unwrap(), q(3, 1));

        let tenth = from_f64(0.1).unwrap();
        assert_eq!(limit_denominator(&tenth, &BigInt::from(10)).unwrap(), q(1, 10));
        let n_tenth = from_f64(-0.1).unwrap();
        assert_eq!(limit_denominator(&n_tenth, &BigInt::from(10)).unwrap(), q(-1, 10));

        // already within the limit
        assert_eq!(limit_denominator(&q(3, 7), &BigInt::from(7)).unwrap(), q(3, 7));
        assert!(limit_denominator(&q(3, 7), &BigInt::from(0)).is_err());
    }
}
