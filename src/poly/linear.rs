use crate::error::Error;
use crate::scalar::Scalar;
use num_traits::{Signed, Zero};
use std::fmt;

/// Linear binomial `slope * x + intercept`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearBinomial {
    slope: Scalar,
    intercept: Scalar,
}

impl LinearBinomial {
    #[inline]
    pub fn new(slope: Scalar, intercept: Scalar) -> Self {
        LinearBinomial { slope, intercept }
    }

    #[inline]
    pub fn slope(&self) -> &Scalar {
        &self.slope
    }

    #[inline]
    pub fn intercept(&self) -> &Scalar {
        &self.intercept
    }

    pub fn evaluate(&self, x: &Scalar) -> Scalar {
        &self.slope * x + &self.intercept
    }

    /// Solve `slope * x + intercept = 0`
    pub fn root(&self) -> Result<Scalar, Error> {
        if self.slope.is_zero() {
            return Err(Error::invalid_operation(format!(
                "constant binomial {} has no root",
                self
            )));
        }
        (-&self.intercept).try_div(&self.slope)
    }
}

impl fmt::Display for LinearBinomial {
    /// Formats as `(px + q)`, `(x - q)`, `(-x)`, ...
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        match (self.slope.is_one(), (-&self.slope).is_one()) {
            (true, _) => {}
            (false, true) => write!(f, "-")?,
            (false, false) => write!(f, "{}", self.slope)?,
        }
        write!(f, "x")?;

        match &self.intercept {
            Scalar::Rational(r) if r.is_zero() => {}
            Scalar::Rational(r) if r.is_negative() => write!(f, " - {}", -r)?,
            intercept => write!(f, " + {}", intercept)?,
        }
        write!(f, ")")
    }
}
