use super::fmt_terms;
use super::linear::LinearBinomial;
use crate::error::Error;
use crate::scalar::Scalar;
use crate::traits::{Approximation, FromSqrt};
use log::debug;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::collections::BTreeMap;
use std::fmt;

/// Quadratic polynomial `ax^2 + bx + c` with rational coefficients.
///
/// The roots are computed on construction. The polynomial degrades to the linear
/// `bx + c` when `a` is zero, and `a == b == 0` is rejected because there is no
/// finite root to find.
#[derive(Clone, Debug)]
pub struct QuadraticPolynomial {
    a: BigRational,
    b: BigRational,
    c: BigRational,
    discriminant: BigRational,
    radical: Approximation<Scalar>,
    roots: Vec<Scalar>,
    factorizations: BTreeMap<BigRational, FactorPair>,
}

impl QuadraticPolynomial {
    pub fn new(a: BigRational, b: BigRational, c: BigRational) -> Result<Self, Error> {
        if a.is_zero() && b.is_zero() {
            return Err(Error::invalid_operation(format!(
                "constant polynomial {} has no root",
                c
            )));
        }

        let discriminant = &b * &b - BigRational::from_integer(4.into()) * &a * &c;
        let radical = Scalar::from_sqrt(discriminant.clone())?;
        let roots = find_roots(&a, &b, &c, &discriminant, radical.value_ref())?;

        Ok(QuadraticPolynomial {
            a,
            b,
            c,
            discriminant,
            radical,
            roots,
            factorizations: BTreeMap::new(),
        })
    }

    /// Coefficients `[a, b, c]`
    #[inline]
    pub fn coefficients(&self) -> [&BigRational; 3] {
        [&self.a, &self.b, &self.c]
    }

    /// `b^2 - 4ac`
    #[inline]
    pub fn discriminant(&self) -> &BigRational {
        &self.discriminant
    }

    /// Square root of the discriminant, imaginary if the discriminant is negative.
    /// It's only exact if the discriminant is the square of a rational.
    #[inline]
    pub fn radical(&self) -> &Approximation<Scalar> {
        &self.radical
    }

    /// The roots of the polynomial. There are two roots ordered as `(-b + √Δ) / 2a`,
    /// `(-b - √Δ) / 2a`, unless the root is double or the polynomial is linear, in which
    /// case there's only one.
    #[inline]
    pub fn roots(&self) -> &[Scalar] {
        &self.roots
    }

    /// Factorizations computed so far, keyed by the chosen leading coefficient `p`
    #[inline]
    pub fn factorizations(&self) -> &BTreeMap<BigRational, FactorPair> {
        &self.factorizations
    }

    pub fn evaluate(&self, x: &Scalar) -> Scalar {
        (Scalar::from(self.a.clone()) * x + Scalar::from(self.b.clone())) * x
            + Scalar::from(self.c.clone())
    }

    /// Factor the polynomial as `(px + q)(rx + s)` with the given `p`.
    ///
    /// Returns [None] if `p` is zero. Results are cached, so repeating the call
    /// with the same `p` returns the same pair.
    pub fn factor(&mut self, p: &BigRational) -> Option<&FactorPair> {
        if !self.factorizations.contains_key(p) {
            let pair = self.solve_factor(p)?;
            let check = self.verify(&pair);
            debug!(
                "factor {} with p = {}: a=pr {}, b=qr+ps {}, c=qs {}",
                self, p, check.leading, check.middle, check.constant
            );
            self.factorizations.insert(p.clone(), pair);
        }
        self.factorizations.get(p)
    }

    /// Factor the polynomial for each `p` from `from` to `to` (inclusive) in increments
    /// of `step`, skipping `p = 0`.
    pub fn factor_range(
        &mut self,
        from: &BigRational,
        to: &BigRational,
        step: &BigRational,
    ) -> Result<Vec<FactorPair>, Error> {
        if !step.is_positive() {
            return Err(Error::invalid_value(format!(
                "step of a factor range must be positive, got {}",
                step
            )));
        }

        let mut pairs = Vec::new();
        let mut p = from.clone();
        while &p <= to {
            if let Some(pair) = self.factor(&p) {
                pairs.push(pair.clone());
            }
            p = p + step;
        }
        Ok(pairs)
    }

    /// Check the identities `a = pr`, `b = qr + ps` and `c = qs` for a factor pair.
    /// The constant identity fails when the radical is approximated.
    pub fn verify(&self, pair: &FactorPair) -> FactorCheck {
        let [a, b, c] = pair.expand_coefficients();
        FactorCheck {
            leading: a == self.a,
            middle: b == self.b,
            constant: c == self.c,
        }
    }

    fn solve_factor(&self, p: &BigRational) -> Option<FactorPair> {
        if p.is_zero() {
            return None;
        }

        let p = Scalar::from(p.clone());
        let b = Scalar::from(self.b.clone());
        let c = Scalar::from(self.c.clone());

        if self.a.is_zero() {
            // bx + c = (px + cp/b)(0x + b/p)
            let q = (&c * &p).try_div(&b).ok()?;
            let s = b.try_div(&p).ok()?;
            return Some(FactorPair::from_coefficients(p, q, Scalar::zero(), s));
        }

        let radical = self.radical.value_ref();
        let two = Scalar::from(2);
        let r = Scalar::from(self.a.clone()).try_div(&p).ok()?;
        let q = (&b - radical).try_div(&(&two * &r)).ok()?;
        let s = (&b + radical).try_div(&(&two * &p)).ok()?;
        Some(FactorPair::from_coefficients(p, q, r, s))
    }
}

fn find_roots(
    a: &BigRational,
    b: &BigRational,
    c: &BigRational,
    discriminant: &BigRational,
    radical: &Scalar,
) -> Result<Vec<Scalar>, Error> {
    let neg_b = Scalar::from(-b);

    if a.is_zero() {
        let root = Scalar::from(-c).try_div(&Scalar::from(b.clone()))?;
        return Ok(vec![root]);
    }

    let two_a = Scalar::from(a * BigRational::from_integer(2.into()));
    if discriminant.is_zero() {
        return Ok(vec![neg_b.try_div(&two_a)?]);
    }

    Ok(vec![
        (&neg_b + radical).try_div(&two_a)?,
        (&neg_b - radical).try_div(&two_a)?,
    ])
}

impl PartialEq for QuadraticPolynomial {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.c == other.c
    }
}

impl Eq for QuadraticPolynomial {}

impl fmt::Display for QuadraticPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_terms(f, &[self.a.clone(), self.b.clone(), self.c.clone()])
    }
}

/// Outcome of checking the coefficient identities of a [FactorPair]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactorCheck {
    /// `a = pr`
    pub leading: bool,
    /// `b = qr + ps`
    pub middle: bool,
    /// `c = qs`
    pub constant: bool,
}

impl FactorCheck {
    #[inline]
    pub fn all(&self) -> bool {
        self.leading && self.middle && self.constant
    }
}

/// Factorization of a quadratic polynomial as `(px + q)(rx + s)`
#[derive(Clone, Debug)]
pub struct FactorPair {
    binomials: [LinearBinomial; 2],
}

impl FactorPair {
    #[inline]
    pub fn new(first: LinearBinomial, second: LinearBinomial) -> Self {
        FactorPair {
            binomials: [first, second],
        }
    }

    /// Create `(px + q)(rx + s)`
    #[inline]
    pub fn from_coefficients(p: Scalar, q: Scalar, r: Scalar, s: Scalar) -> Self {
        FactorPair::new(LinearBinomial::new(p, q), LinearBinomial::new(r, s))
    }

    #[inline]
    pub fn binomials(&self) -> &[LinearBinomial; 2] {
        &self.binomials
    }

    #[inline]
    pub fn p(&self) -> &Scalar {
        self.binomials[0].slope()
    }
    #[inline]
    pub fn q(&self) -> &Scalar {
        self.binomials[0].intercept()
    }
    #[inline]
    pub fn r(&self) -> &Scalar {
        self.binomials[1].slope()
    }
    #[inline]
    pub fn s(&self) -> &Scalar {
        self.binomials[1].intercept()
    }

    /// Coefficients `[pr, ps + qr, qs]` of the product
    pub fn expand_coefficients(&self) -> [Scalar; 3] {
        let (p, q, r, s) = (self.p(), self.q(), self.r(), self.s());
        [p * r, p * s + q * r, q * s]
    }

    /// Multiply the binomials back into a quadratic polynomial.
    ///
    /// Fails with [Error::InvalidValue] if a coefficient of the product is not real.
    pub fn expand(&self) -> Result<QuadraticPolynomial, Error> {
        let [a, b, c] = self.expand_coefficients();
        let real = |v: Scalar| {
            v.to_rational().ok_or_else(|| {
                Error::invalid_value(format!("coefficient {} of {} is not real", v, self))
            })
        };
        QuadraticPolynomial::new(real(a)?, real(b)?, real(c)?)
    }
}

impl PartialEq for FactorPair {
    /// The order of the binomials doesn't matter
    fn eq(&self, other: &Self) -> bool {
        let [a0, a1] = &self.binomials;
        let [b0, b1] = &other.binomials;
        (a0 == b0 && a1 == b1) || (a0 == b1 && a1 == b0)
    }
}

impl Eq for FactorPair {}

impl fmt::Display for FactorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · {}", self.binomials[0], self.binomials[1])
    }
}
