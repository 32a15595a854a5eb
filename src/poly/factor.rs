use super::fmt_terms;
use super::linear::LinearBinomial;
use super::quadratic::QuadraticPolynomial;
use crate::error::Error;
use crate::scalar::Scalar;
use log::{debug, trace};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::BTreeSet;
use std::fmt;

/// Polynomial of degree three or higher with rational coefficients,
/// stored from the highest degree down to the constant term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<BigRational>,
}

impl Polynomial {
    /// Create a polynomial from coefficients ordered from the highest degree.
    /// Leading zeros are dropped, and the remaining degree must be at least three
    /// (use [QuadraticPolynomial] for lower degrees).
    pub fn new(coeffs: Vec<BigRational>) -> Result<Self, Error> {
        let start = coeffs
            .iter()
            .position(|c| !c.is_zero())
            .unwrap_or(coeffs.len());
        let coeffs = coeffs[start..].to_vec();
        if coeffs.len() < 4 {
            return Err(Error::invalid_value(format!(
                "a polynomial of degree at least 3 is required, got {} coefficients",
                coeffs.len()
            )));
        }
        Ok(Polynomial { coeffs })
    }

    #[inline]
    pub fn coefficients(&self) -> &[BigRational] {
        &self.coeffs
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn evaluate(&self, x: &Scalar) -> Scalar {
        self.coeffs
            .iter()
            .fold(Scalar::zero(), |acc, c| acc * x + Scalar::from(c.clone()))
    }

    /// Split off linear factors `(x - root)` for every rational root found by the
    /// rational root theorem, then solve the remaining quadratic.
    ///
    /// If the search runs dry while the remainder is still of degree three or more,
    /// the remainder is reported as [Factor::Residual]. This is not an error.
    ///
    /// Candidate roots come from factoring the constant and leading coefficients by
    /// trial division up to `2^20`. If either coefficient has a cofactor above `2^40`
    /// that can't be split within that bound, the search stops there and the
    /// remainder is reported as [Factor::Residual], even if it has rational roots.
    pub fn factor(&self) -> Result<Factorization, Error> {
        let mut factors = Vec::new();
        let mut working = self.coeffs.clone();

        while working.len() > 3 {
            match find_rational_root(&working) {
                Some(root) => {
                    debug!("found rational root {} of {}", root, self);
                    let (quotient, _) = synthetic_division(&working, &root);
                    factors.push(Factor::Linear(LinearBinomial::new(
                        Scalar::one(),
                        Scalar::from(-root),
                    )));
                    working = quotient;
                }
                None => {
                    debug!("no rational roots left for a residual of degree {}", working.len() - 1);
                    factors.push(Factor::Residual(working));
                    return Ok(Factorization { factors });
                }
            }
        }

        debug!("handing the residual quadratic over to the quadratic solver");
        let mut rest = working.into_iter();
        let (a, b, c) = match (rest.next(), rest.next(), rest.next()) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => return Err(Error::invalid_operation("residual is not a quadratic")),
        };
        factors.push(Factor::Quadratic(QuadraticPolynomial::new(a, b, c)?));
        Ok(Factorization { factors })
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_terms(f, &self.coeffs)
    }
}

/// Divide the polynomial with coefficients `coeffs` (highest degree first) by `x - root`
/// using Horner's scheme. Returns the quotient coefficients and the remainder, which
/// is the value of the polynomial at `root`.
pub fn synthetic_division(
    coeffs: &[BigRational],
    root: &BigRational,
) -> (Vec<BigRational>, BigRational) {
    let mut acc = BigRational::zero();
    let mut quotient = Vec::with_capacity(coeffs.len());
    for c in coeffs {
        acc = acc * root + c;
        quotient.push(acc.clone());
    }
    let remainder = quotient.pop().unwrap_or_else(BigRational::zero);
    (quotient, remainder)
}

// Scale the rational coefficients by the lcm of their denominators
fn integer_coefficients(coeffs: &[BigRational]) -> Vec<BigInt> {
    let lcm = coeffs
        .iter()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
    coeffs
        .iter()
        .map(|c| (c * BigRational::from_integer(lcm.clone())).to_integer())
        .collect()
}

/// Largest trial divisor tried when factoring the coefficients
const TRIAL_DIVISION_LIMIT: u32 = 1 << 20;

// Prime factors of a positive integer with multiplicity, by trial division.
// None if a cofactor above TRIAL_DIVISION_LIMIT^2 is left unfactored.
fn prime_factors(n: &BigInt) -> Option<Vec<BigInt>> {
    let mut factors = Vec::new();
    let mut n = n.abs();
    let mut d = BigInt::from(2u8);
    while &d * &d <= n {
        if d > BigInt::from(TRIAL_DIVISION_LIMIT) {
            debug!("gave up factoring {} by trial division", n);
            return None;
        }
        while n.is_multiple_of(&d) {
            n /= &d;
            factors.push(d.clone());
        }
        d += 1u8;
    }
    if n > BigInt::one() {
        factors.push(n);
    }
    Some(factors)
}

// All positive divisors, built as the products over every subset of the prime factors
fn divisors(n: &BigInt) -> Option<BTreeSet<BigInt>> {
    let mut divisors = BTreeSet::new();
    divisors.insert(BigInt::one());
    for p in prime_factors(n)? {
        let products: Vec<BigInt> = divisors.iter().map(|d| d * &p).collect();
        divisors.extend(products);
    }
    Some(divisors)
}

// Candidates are ±(divisor of the constant term) / (divisor of the leading coefficient)
fn find_rational_root(coeffs: &[BigRational]) -> Option<BigRational> {
    if coeffs.last()?.is_zero() {
        return Some(BigRational::zero());
    }

    let ints = integer_coefficients(coeffs);
    let numers = divisors(ints.last()?)?;
    let denoms = divisors(ints.first()?)?;

    let mut candidates = BTreeSet::new();
    for p in &numers {
        for q in &denoms {
            let candidate = BigRational::new(p.clone(), q.clone());
            candidates.insert(-&candidate);
            candidates.insert(candidate);
        }
    }
    debug!(
        "testing {} candidate roots for a polynomial of degree {}",
        candidates.len(),
        coeffs.len() - 1
    );

    candidates.into_iter().find(|candidate| {
        let (_, remainder) = synthetic_division(coeffs, candidate);
        trace!("candidate {} leaves remainder {}", candidate, remainder);
        remainder.is_zero()
    })
}

/// A factor of a [Polynomial]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Factor {
    /// `(x - root)` for a rational root
    Linear(LinearBinomial),
    /// The quadratic left after all rational roots have been split off
    Quadratic(QuadraticPolynomial),
    /// A remainder of degree three or more without rational roots
    Residual(Vec<BigRational>),
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Linear(binomial) => write!(f, "{}", binomial),
            Factor::Quadratic(quad) => write!(f, "({})", quad),
            Factor::Residual(coeffs) => {
                write!(f, "(")?;
                fmt_terms(f, coeffs)?;
                write!(f, ")")
            }
        }
    }
}

/// Result of [Polynomial::factor], the factors in the order they were found
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    factors: Vec<Factor>,
}

impl Factorization {
    #[inline]
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn linear_factors(&self) -> impl Iterator<Item = &LinearBinomial> {
        self.factors.iter().filter_map(|f| match f {
            Factor::Linear(binomial) => Some(binomial),
            _ => None,
        })
    }

    pub fn residual_quadratic(&self) -> Option<&QuadraticPolynomial> {
        self.factors.iter().find_map(|f| match f {
            Factor::Quadratic(quad) => Some(quad),
            _ => None,
        })
    }

    /// Roots of the linear factors, with multiplicity
    pub fn rational_roots(&self) -> Vec<BigRational> {
        self.linear_factors()
            .filter_map(|binomial| binomial.root().ok())
            .filter_map(|root| root.to_rational())
            .collect()
    }

    #[inline]
    pub fn has_rational_roots(&self) -> bool {
        self.linear_factors().next().is_some()
    }

    /// Rational roots followed by the roots of the residual quadratic.
    /// A [Factor::Residual] contributes no roots.
    pub fn roots(&self) -> Vec<Scalar> {
        let mut roots: Vec<Scalar> = self.rational_roots().into_iter().map(Scalar::from).collect();
        if let Some(quad) = self.residual_quadratic() {
            roots.extend(quad.roots().iter().cloned());
        }
        roots
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, " · ")?;
            }
            write!(f, "{}", factor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::ExactComplex;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::new(coeffs.iter().map(|&c| q(c, 1)).collect()).unwrap()
    }

    #[test]
    fn construction_test() {
        let coeffs = vec![q(0, 1), q(0, 1), q(1, 1), q(0, 1), q(0, 1), q(-2, 1)];
        let p = Polynomial::new(coeffs).unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.coefficients(), &[q(1, 1), q(0, 1), q(0, 1), q(-2, 1)]);

        assert!(matches!(
            Polynomial::new(vec![q(1, 1), q(2, 1), q(1, 1)]),
            Err(Error::InvalidValue(_))
        ));
        assert!(matches!(Polynomial::new(vec![q(0, 1); 5]), Err(Error::InvalidValue(_))));
    }

    #[test]
    fn synthetic_division_test() {
        // x^3 - 6x^2 + 11x - 6 = (x - 1)(x^2 - 5x + 6)
        let (quotient, remainder) =
            synthetic_division(&[q(1, 1), q(-6, 1), q(11, 1), q(-6, 1)], &q(1, 1));
        assert_eq!(quotient, vec![q(1, 1), q(-5, 1), q(6, 1)]);
        assert!(remainder.is_zero());

        let (_, remainder) = synthetic_division(&[q(1, 1), q(0, 1), q(0, 1), q(-2, 1)], &q(3, 1));
        assert_eq!(remainder, q(25, 1));

        assert_eq!(synthetic_division(&[], &q(1, 1)), (vec![], q(0, 1)));
    }

    #[test]
    fn divisors_test() {
        let expected: BTreeSet<BigInt> =
            [1, 2, 3, 4, 6, 12].iter().map(|&d| BigInt::from(d)).collect();
        assert_eq!(divisors(&BigInt::from(12)), Some(expected));
        assert_eq!(prime_factors(&BigInt::from(360)).unwrap().len(), 6);
        assert_eq!(divisors(&BigInt::from(97)).unwrap().len(), 2);
        assert_eq!(divisors(&BigInt::from(1)).unwrap().len(), 1);

        // 2^31 - 1 is prime and below the trial division limit squared
        let mersenne = BigInt::from(2_147_483_647i64);
        assert_eq!(prime_factors(&mersenne), Some(vec![mersenne.clone()]));
        assert_eq!(prime_factors(&(&mersenne * &mersenne)), None);
        assert_eq!(
            integer_coefficients(&[q(1, 2), q(-1, 3), q(2, 1)]),
            vec![BigInt::from(3), BigInt::from(-2), BigInt::from(12)]
        );
    }

    #[test]
    fn cubic_test() {
        let p = poly(&[1, -6, 11, -6]);
        let factors = p.factor().unwrap();
        assert_eq!(factors.rational_roots(), vec![q(1, 1)]);
        let quad = factors.residual_quadratic().unwrap();
        assert_eq!(quad, &QuadraticPolynomial::new(q(1, 1), q(-5, 1), q(6, 1)).unwrap());
        assert_eq!(factors.roots(), vec![Scalar::from(1), Scalar::from(3), Scalar::from(2)]);
        for root in factors.roots() {
            assert!(p.evaluate(&root).is_zero());
        }
        assert_eq!(format!("{}", factors), "(x - 1) · (x^2 - 5x + 6)");
    }

    #[test]
    fn fractional_root_test() {
        let p = poly(&[2, -5, 1, 2]);
        let factors = p.factor().unwrap();
        assert_eq!(factors.rational_roots(), vec![q(-1, 2)]);
        let quad = factors.residual_quadratic().unwrap();
        assert_eq!(quad.coefficients(), [&q(2, 1), &q(-6, 1), &q(4, 1)]);
        assert_eq!(quad.roots(), &[Scalar::from(2), Scalar::from(1)]);
    }

    #[test]
    fn zero_root_test() {
        let p = poly(&[1, 0, -1, 0, 0]);
        let factors = p.factor().unwrap();
        assert_eq!(factors.rational_roots(), vec![q(0, 1), q(0, 1)]);
        assert_eq!(
            factors.residual_quadratic().unwrap().roots(),
            &[Scalar::from(1), Scalar::from(-1)]
        );
        assert_eq!(format!("{}", factors), "(x) · (x) · (x^2 - 1)");
    }

    #[test]
    fn rational_coefficients_test() {
        let p = Polynomial::new(vec![q(1, 2), q(0, 1), q(0, 1), q(-4, 1)]).unwrap();
        let factors = p.factor().unwrap();
        assert_eq!(factors.rational_roots(), vec![q(2, 1)]);

        // x^3 - 8 = (x - 2)(x^2 + 2x + 4), scaled by 1/2
        let roots = factors.residual_quadratic().unwrap().roots();
        assert!(roots.iter().all(|r| r.is_complex()));
        assert_eq!(roots[0].to_complex().re(), &q(-1, 1));
        assert_eq!(roots[0].to_complex().conj(), roots[1].to_complex());
        let (_, im) = roots[0].to_f64_pair();
        assert!((im - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn no_rational_roots_test() {
        let p = poly(&[1, 0, 0, -2]);
        let factors = p.factor().unwrap();
        assert!(!factors.has_rational_roots());
        assert!(factors.residual_quadratic().is_none());
        assert!(factors.roots().is_empty());
        assert_eq!(factors.factors(), &[Factor::Residual(p.coefficients().to_vec())]);

        // x^4 + 1 has no real roots, x^4 - 5x^2 + 6 only irrational ones
        assert!(!poly(&[1, 0, 0, 0, 1]).factor().unwrap().has_rational_roots());
        assert!(!poly(&[1, 0, -5, 0, 6]).factor().unwrap().has_rational_roots());

        // constant term (2^31 - 1)^2 is too large to factor by trial division
        let p = poly(&[1, 0, 1, 4_611_686_014_132_420_609]);
        let factors = p.factor().unwrap();
        assert_eq!(factors.factors(), &[Factor::Residual(p.coefficients().to_vec())]);
    }

    #[test]
    fn partial_factor_test() {
        // (x - 3)(x^3 - 2)
        let p = poly(&[1, -3, 0, -2, 6]);
        let factors = p.factor().unwrap();
        assert_eq!(factors.rational_roots(), vec![q(3, 1)]);
        assert_eq!(
            factors.factors()[1],
            Factor::Residual(vec![q(1, 1), q(0, 1), q(0, 1), q(-2, 1)])
        );
        assert_eq!(format!("{}", factors), "(x - 3) · (x^3 - 2)");
    }

    #[test]
    fn evaluate_test() {
        let p = poly(&[1, 0, 0, 1]);
        let i = Scalar::from(ExactComplex::i());
        assert_eq!(p.evaluate(&i), Scalar::from(ExactComplex::new(q(1, 1), q(-1, 1))));
        assert_eq!(p.evaluate(&Scalar::from(-1)), Scalar::from(0));
        assert_eq!(format!("{}", p), "x^3 + 1");
    }
}
