//! Pure arithmetic over [`Polynomial`] values.
//!
//! Every function here borrows its operands, never mutates them and returns a
//! freshly allocated result sized to the mathematical answer. There is no
//! shared state, so all of them are safe to call from any number of threads.

use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use tracing::{debug, trace};

use crate::error::{PolyError, Result};
use crate::polynomial::Polynomial;

/// Largest exponent a result may need. Mirrors the 0-999 magnitude range the
/// presentation layer accepts.
pub const MAX_MAGNITUDE: usize = 999;

/// Quotient and remainder of a polynomial division.
#[derive(Clone, Debug, PartialEq)]
pub struct Division {
    /// The quotient.
    pub quotient: Polynomial,
    /// The remainder. `None` when the divisor is a non-zero constant, since
    /// scalar division leaves no remainder term.
    pub remainder: Option<Polynomial>,
}

impl Division {
    /// The remainder, or the zero polynomial when there is none.
    #[must_use]
    pub fn remainder_or_zero(&self) -> Polynomial {
        self.remainder.clone().unwrap_or_else(Polynomial::zero)
    }
}

/// Adds two polynomials.
///
/// The result has capacity `max(deg p, deg q) + 1`.
#[must_use]
pub fn add(p: &Polynomial, q: &Polynomial) -> Polynomial {
    combine(p, q, |a, b| a + b)
}

/// Subtracts `q` from `p`, with the same sizing as [`add`].
#[must_use]
pub fn subtract(p: &Polynomial, q: &Polynomial) -> Polynomial {
    combine(p, q, |a, b| a - b)
}

fn combine(p: &Polynomial, q: &Polynomial, op: impl Fn(f64, f64) -> f64) -> Polynomial {
    let a = p.significant_coeffs();
    let b = q.significant_coeffs();
    let len = a.len().max(b.len());

    let coeffs = (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0.0);
            let y = b.get(i).copied().unwrap_or(0.0);
            op(x, y)
        })
        .collect();

    Polynomial::from_nonempty(coeffs)
}

/// Multiplies two polynomials by direct convolution: O(deg p * deg q).
///
/// The result has capacity `deg p + deg q + 1`.
#[must_use]
pub fn multiply(p: &Polynomial, q: &Polynomial) -> Polynomial {
    let a = p.significant_coeffs();
    let b = q.significant_coeffs();
    let mut result = vec![0.0; a.len() + b.len() - 1];

    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            result[i + j] += ai * bj;
        }
    }

    Polynomial::from_nonempty(result)
}

/// Computes the formal derivative.
///
/// The result has capacity `max(deg p, 1)`; the derivative of a constant is
/// the zero polynomial of capacity 1.
#[must_use]
pub fn derivate(p: &Polynomial) -> Polynomial {
    let degree = p.leading_exponent();
    let coeffs = p.coeffs();

    let mut result = vec![0.0; degree.max(1)];
    for (i, slot) in result.iter_mut().enumerate().take(degree) {
        *slot = (i + 1) as f64 * coeffs[i + 1];
    }

    Polynomial::from_nonempty(result)
}

/// Returns true if `p` may be raised to `power`.
///
/// The power must be non-negative and `(deg p + 1) * power` must not exceed
/// [`MAX_MAGNITUDE`]. Check this before calling [`to_power`].
#[must_use]
pub fn is_power_allowed(p: &Polynomial, power: i64) -> bool {
    if power < 0 {
        return false;
    }

    i64::try_from(p.leading_exponent() + 1)
        .ok()
        .and_then(|width| width.checked_mul(power))
        .is_some_and(|magnitude| magnitude <= MAX_MAGNITUDE as i64)
}

/// Raises `p` to a non-negative integer power by repeated multiplication.
///
/// `power == 0` yields the constant 1 and `power == 1` a copy of `p` trimmed to
/// its degree. Larger powers multiply an accumulator seeded with 1 by `p`,
/// `power` times; there is no squaring shortcut, so the cost grows with the
/// power itself.
///
/// # Errors
///
/// Returns [`PolyError::PowerNotAllowed`] unless [`is_power_allowed`] holds.
pub fn to_power(p: &Polynomial, power: i64) -> Result<Polynomial> {
    if !is_power_allowed(p, power) {
        return Err(PolyError::PowerNotAllowed {
            power,
            leading_exponent: p.leading_exponent(),
        });
    }

    match power {
        0 => Ok(Polynomial::one()),
        1 => Ok(trimmed(p)),
        _ => {
            // Bounded by MAX_MAGNITUDE, so the cast cannot truncate.
            let power = power as usize;
            let capacity = (p.leading_exponent() + 1) * power;
            debug!(
                degree = p.leading_exponent(),
                power,
                capacity,
                "raising polynomial to power"
            );

            let mut result = Polynomial::monomial(0.0, capacity - 1);
            result.set_coefficient(0, 1.0)?;
            for _ in 0..power {
                result = multiply(&result, p);
            }
            Ok(result)
        }
    }
}

/// Copy of `p` with capacity `deg p + 1`.
fn trimmed(p: &Polynomial) -> Polynomial {
    Polynomial::from_nonempty(p.significant_coeffs().to_vec())
}

/// Divides `dividend` by `divisor`.
///
/// Three cases are handled separately:
/// - a constant divisor scales every coefficient and has no remainder,
/// - a dividend of lower degree gives a zero quotient and itself as remainder,
/// - otherwise classic long division, with quotient capacity
///   `deg dividend - deg divisor + 1`.
///
/// # Errors
///
/// Returns [`PolyError::DivisionByZero`] if `divisor` is the zero polynomial.
pub fn divide(dividend: &Polynomial, divisor: &Polynomial) -> Result<Division> {
    if divisor.is_zero() {
        return Err(PolyError::DivisionByZero);
    }

    let n = dividend.leading_exponent();
    let m = divisor.leading_exponent();

    if m == 0 {
        debug!(degree = n, "dividing by a constant");
        let scale = divisor.leading_coefficient();
        let coeffs = dividend
            .significant_coeffs()
            .iter()
            .map(|&c| c / scale)
            .collect();
        return Ok(Division {
            quotient: Polynomial::from_nonempty(coeffs),
            remainder: None,
        });
    }

    if n < m {
        debug!(dividend = n, divisor = m, "dividend degree below divisor");
        return Ok(Division {
            quotient: Polynomial::zero(),
            remainder: Some(trimmed(dividend)),
        });
    }

    debug!(dividend = n, divisor = m, "long division");
    let lead = divisor.leading_coefficient();
    let mut quotient = vec![0.0; n - m + 1];
    let mut remainder = dividend.clone();

    loop {
        let top = remainder.leading_exponent();
        let shift = top - m;
        let factor = remainder.leading_coefficient() / lead;
        quotient[shift] = factor;
        trace!(shift, factor, "long division step");

        let term = Polynomial::monomial(factor, shift);
        remainder = subtract(&remainder, &multiply(&term, divisor));

        // Rounding may leave a residue where the leading term should have
        // cancelled; drop it so the degree strictly decreases.
        if remainder.leading_exponent() == top && !remainder.is_zero() {
            remainder.set_coefficient(top, 0.0)?;
        }

        if remainder.leading_exponent() < m {
            break;
        }
    }

    Ok(Division {
        quotient: Polynomial::from_nonempty(quotient),
        remainder: Some(remainder),
    })
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        add(self, rhs)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        add(&self, &rhs)
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        subtract(self, rhs)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        subtract(&self, &rhs)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        multiply(self, rhs)
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        multiply(&self, &rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::from_nonempty(self.significant_coeffs().iter().map(|c| -c).collect())
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

impl Zero for Polynomial {
    fn zero() -> Self {
        Polynomial::zero()
    }

    fn is_zero(&self) -> bool {
        Polynomial::is_zero(self)
    }

    // Keeps the capacity, unlike replacing with `zero()`.
    fn set_zero(&mut self) {
        self.reset();
    }
}

impl One for Polynomial {
    fn one() -> Self {
        Polynomial::one()
    }
}
