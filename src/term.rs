use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Neg, Sub},
};

/// An expression of the form `a·x + b`.
///
/// Anything of a higher degree can't be represented, so multiplication and
/// division are only available through [`LinearTerm::checked_mul()`] and
/// [`LinearTerm::checked_div()`].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LinearTerm {
    /// The coefficient of `x`.
    pub a: f64,
    /// The constant part.
    pub b: f64,
}

impl LinearTerm {
    pub const fn new(a: f64, b: f64) -> Self { LinearTerm { a, b } }

    /// A plain number.
    pub const fn constant(value: f64) -> Self { LinearTerm::new(0.0, value) }

    /// The unknown, `x`, on its own.
    pub const fn variable() -> Self { LinearTerm::new(1.0, 0.0) }

    /// Does this term mention `x` at all?
    pub fn is_constant(&self) -> bool { self.a == 0.0 }

    fn scale(self, factor: f64) -> Self {
        // zero stays zero, even when the factor is infinite
        let scale = |value: f64| {
            if value == 0.0 {
                0.0
            } else {
                value * factor
            }
        };

        LinearTerm::new(scale(self.a), scale(self.b))
    }

    /// Multiply two terms, failing if the result would contain `x·x`.
    pub fn checked_mul(self, rhs: LinearTerm) -> Result<Self, ArithmeticError> {
        match (self.is_constant(), rhs.is_constant()) {
            (false, false) => Err(ArithmeticError::Nonlinear),
            (true, _) => Ok(rhs.scale(self.b)),
            (false, true) => Ok(self.scale(rhs.b)),
        }
    }

    /// Divide by a constant, non-zero term.
    pub fn checked_div(self, rhs: LinearTerm) -> Result<Self, ArithmeticError> {
        if !rhs.is_constant() {
            Err(ArithmeticError::DivisionByVariable)
        } else if rhs.b == 0.0 {
            Err(ArithmeticError::DivisionByZero)
        } else {
            Ok(LinearTerm::new(self.a / rhs.b, self.b / rhs.b))
        }
    }

    /// Get a [`Display`]able version of this term which uses a different name
    /// for the unknown.
    pub fn display_with<'a>(&'a self, variable: &'a str) -> impl Display + 'a {
        Named {
            term: self,
            variable,
        }
    }
}

/// Ways multiplying or dividing [`LinearTerm`]s can fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("the product has a squared term")]
    Nonlinear,
    #[error("the divisor contains the unknown")]
    DivisionByVariable,
    #[error("division by zero")]
    DivisionByZero,
}

impl Add for LinearTerm {
    type Output = LinearTerm;

    fn add(self, rhs: LinearTerm) -> LinearTerm {
        LinearTerm::new(self.a + rhs.a, self.b + rhs.b)
    }
}

impl Sub for LinearTerm {
    type Output = LinearTerm;

    fn sub(self, rhs: LinearTerm) -> LinearTerm {
        LinearTerm::new(self.a - rhs.a, self.b - rhs.b)
    }
}

impl Neg for LinearTerm {
    type Output = LinearTerm;

    fn neg(self) -> Self::Output { LinearTerm::new(-self.a, -self.b) }
}

impl AbsDiffEq for LinearTerm {
    type Epsilon = f64;

    fn default_epsilon() -> f64 { f64::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.a.abs_diff_eq(&other.a, epsilon)
            && self.b.abs_diff_eq(&other.b, epsilon)
    }
}

impl RelativeEq for LinearTerm {
    fn default_max_relative() -> f64 { f64::default_max_relative() }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: f64,
        max_relative: f64,
    ) -> bool {
        self.a.relative_eq(&other.a, epsilon, max_relative)
            && self.b.relative_eq(&other.b, epsilon, max_relative)
    }
}

impl UlpsEq for LinearTerm {
    fn default_max_ulps() -> u32 { f64::default_max_ulps() }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.a.ulps_eq(&other.a, epsilon, max_ulps)
            && self.b.ulps_eq(&other.b, epsilon, max_ulps)
    }
}

impl Display for LinearTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with("x"))
    }
}

struct Named<'a> {
    term: &'a LinearTerm,
    variable: &'a str,
}

impl<'a> Display for Named<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let LinearTerm { a, b } = *self.term;

        if a == 0.0 {
            return write!(f, "{}", tidy(b));
        }

        write_coefficient(f, a, self.variable)?;

        if b > 0.0 {
            write!(f, " + {}", b)
        } else if b < 0.0 {
            write!(f, " - {}", -b)
        } else {
            Ok(())
        }
    }
}

/// Writes `x`, `-x` or `3x`.
fn write_coefficient(
    f: &mut Formatter<'_>,
    coefficient: f64,
    variable: &str,
) -> fmt::Result {
    if coefficient == 1.0 {
        write!(f, "{}", variable)
    } else if coefficient == -1.0 {
        write!(f, "-{}", variable)
    } else {
        write!(f, "{}{}", coefficient, variable)
    }
}

/// Get rid of negative zero so it doesn't show up as `-0`.
pub(crate) fn tidy(value: f64) -> f64 { value + 0.0 }
