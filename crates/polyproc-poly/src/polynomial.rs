//! Fixed-capacity dense polynomials with real coefficients.
//!
//! A [`Polynomial`] owns exactly `capacity` coefficients, indexed by exponent,
//! and caches its leading term. The cache is refreshed by every mutator, so
//! reads never observe stale state.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{PolyError, Result};

/// Number of fractional digits kept when rendering coefficients.
const DISPLAY_FRACTION_DIGITS: usize = 3;

/// Modulus of [`Polynomial::bounded_hash`].
const HASH_BUCKETS: f64 = 1000.0;

/// A dense univariate polynomial over `f64` with a fixed capacity.
///
/// Coefficients are stored in ascending exponent order; the valid exponent
/// range is `[0, capacity - 1]` and never changes after construction.
///
/// # Equality versus ordering
///
/// `==` is capacity-sensitive: two polynomials are equal only if they have the
/// same capacity and identical coefficients at every index. [`compare`] and
/// [`numerically_eq`] ignore capacity and look only at the terms up to the
/// leading exponent. So `x + 1` stored with capacity 2 and with capacity 10
/// compare as equal but are not `==`. This is why the type implements neither
/// `PartialOrd` nor `Ord`.
///
/// [`compare`]: Polynomial::compare
/// [`numerically_eq`]: Polynomial::numerically_eq
#[derive(Clone, Debug)]
pub struct Polynomial {
    coeffs: Vec<f64>,
    leading_exponent: usize,
    leading_coefficient: f64,
}

impl Polynomial {
    /// Creates the zero polynomial with room for exponents `0..capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PolyError::InvalidCapacity(capacity));
        }

        Ok(Self {
            coeffs: vec![0.0; capacity],
            leading_exponent: 0,
            leading_coefficient: 0.0,
        })
    }

    /// Creates a polynomial from coefficients in ascending exponent order.
    ///
    /// The capacity is the length of `coeffs`; trailing zeros are kept.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidCapacity`] if `coeffs` is empty.
    pub fn from_coefficients(coeffs: Vec<f64>) -> Result<Self> {
        if coeffs.is_empty() {
            return Err(PolyError::InvalidCapacity(0));
        }
        Ok(Self::from_nonempty(coeffs))
    }

    /// Builds a polynomial from a vector the caller guarantees is non-empty.
    pub(crate) fn from_nonempty(coeffs: Vec<f64>) -> Self {
        debug_assert!(!coeffs.is_empty());
        let mut poly = Self {
            coeffs,
            leading_exponent: 0,
            leading_coefficient: 0.0,
        };
        poly.refresh_leading();
        poly
    }

    /// The zero polynomial of capacity 1.
    #[must_use]
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    /// The constant polynomial 1 of capacity 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    /// A constant polynomial of capacity 1.
    #[must_use]
    pub fn constant(c: f64) -> Self {
        Self::from_nonempty(vec![c])
    }

    /// The single term `c * x^n`, of capacity `n + 1`.
    #[must_use]
    pub fn monomial(c: f64, n: usize) -> Self {
        let mut coeffs = vec![0.0; n + 1];
        coeffs[n] = c;
        Self::from_nonempty(coeffs)
    }

    /// Number of representable exponents.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.coeffs.len()
    }

    /// Highest exponent with a non-zero coefficient, 0 for the zero polynomial.
    #[must_use]
    pub fn leading_exponent(&self) -> usize {
        self.leading_exponent
    }

    /// Coefficient at [`leading_exponent`](Self::leading_exponent).
    #[must_use]
    pub fn leading_coefficient(&self) -> f64 {
        self.leading_coefficient
    }

    /// Alias for [`leading_exponent`](Self::leading_exponent).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.leading_exponent
    }

    /// Returns true if every coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.leading_exponent == 0 && self.leading_coefficient == 0.0
    }

    /// Returns the coefficient of `x^exponent`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::ExponentOutOfRange`] if `exponent >= capacity`.
    pub fn coefficient(&self, exponent: usize) -> Result<f64> {
        self.coeffs
            .get(exponent)
            .copied()
            .ok_or(PolyError::ExponentOutOfRange {
                exponent,
                capacity: self.capacity(),
            })
    }

    /// Stores the coefficient of `x^exponent` and refreshes the leading term.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::ExponentOutOfRange`] if `exponent >= capacity`;
    /// the polynomial is left untouched in that case.
    pub fn set_coefficient(&mut self, exponent: usize, value: f64) -> Result<()> {
        let capacity = self.capacity();
        let slot = self
            .coeffs
            .get_mut(exponent)
            .ok_or(PolyError::ExponentOutOfRange { exponent, capacity })?;
        *slot = value;
        self.refresh_leading();
        Ok(())
    }

    /// All coefficients, indexed by exponent.
    #[must_use]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficients from 0 up to and including the leading exponent.
    #[must_use]
    pub fn significant_coeffs(&self) -> &[f64] {
        &self.coeffs[..=self.leading_exponent]
    }

    /// Iterates over the non-zero terms as `(exponent, coefficient)`,
    /// from the leading exponent down to 0.
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.significant_coeffs()
            .iter()
            .copied()
            .enumerate()
            .rev()
            .filter(|&(_, c)| c != 0.0)
    }

    /// Sets every coefficient to zero. The capacity is unchanged.
    pub fn reset(&mut self) {
        self.coeffs.fill(0.0);
        self.leading_exponent = 0;
        self.leading_coefficient = 0.0;
    }

    /// Evaluates the polynomial at `x`.
    ///
    /// Each non-zero term is computed as `c * x^e` with its own power call and
    /// the terms are summed from exponent 0 upward. Unlike Horner's method this
    /// overflows to infinity as soon as a single `x^e` does, which happens for
    /// large exponents when `|x| > 1`. Plots sampled from this function rely on
    /// that behavior.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut result = 0.0;
        for (e, &c) in self.coeffs.iter().enumerate() {
            if c != 0.0 {
                result += c * x.powf(e as f64);
            }
        }
        result
    }

    /// Total order ignoring capacity.
    ///
    /// A larger leading exponent is greater. On a tie the coefficients are
    /// compared from the leading exponent down to 0 with the IEEE total order
    /// and the first difference decides.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }

        self.leading_exponent
            .cmp(&other.leading_exponent)
            .then_with(|| {
                let lhs = self.significant_coeffs().iter().rev();
                let rhs = other.significant_coeffs().iter().rev();
                lhs.zip(rhs)
                    .map(|(a, b)| a.total_cmp(b))
                    .find(|ord| ord.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Returns true if [`compare`](Self::compare) finds the two equal.
    #[must_use]
    pub fn numerically_eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Small, lossy hash in `0..=999`.
    ///
    /// Folds `17 * h + c` over the non-zero coefficients starting from 7, adds
    /// the capacity and reduces modulo 1000. Collisions are frequent; only use
    /// it for small bucket counts, never for identity.
    #[must_use]
    pub fn bounded_hash(&self) -> u32 {
        let mut hash = 7.0_f64;
        for &c in &self.coeffs {
            if c.total_cmp(&0.0).is_ne() {
                hash = 17.0 * hash + c;
            }
        }
        hash += self.capacity() as f64;

        if !hash.is_finite() {
            return 0;
        }
        (hash.rem_euclid(HASH_BUCKETS) as u32) % 1000
    }

    fn refresh_leading(&mut self) {
        let exponent = self
            .coeffs
            .iter()
            .rposition(|&c| c != 0.0)
            .unwrap_or(0);
        self.leading_exponent = exponent;
        self.leading_coefficient = self.coeffs[exponent];
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .all(|(a, b)| a.total_cmp(b).is_eq())
    }
}

impl Eq for Polynomial {}

impl Hash for Polynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.bounded_hash());
    }
}

/// Formats a non-negative magnitude with at most three fractional digits.
fn format_magnitude(value: f64) -> String {
    let mut s = format!("{value:.prec$}", prec = DISPLAY_FRACTION_DIGITS);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P(x) = ")?;

        if self.is_zero() {
            return write!(f, "0");
        }

        for (e, c) in self.terms() {
            let negative = c < 0.0;
            let separator = match (e == self.leading_exponent, negative) {
                (true, false) => "",
                (true, true) => "- ",
                (false, false) => " + ",
                (false, true) => " - ",
            };
            f.write_str(separator)?;

            let magnitude = c.abs();
            if e == 0 {
                f.write_str(&format_magnitude(magnitude))?;
            } else {
                if magnitude != 1.0 {
                    f.write_str(&format_magnitude(magnitude))?;
                }
                write!(f, "x^{e}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(capacity: usize, terms: &[(usize, f64)]) -> Polynomial {
        let mut p = Polynomial::new(capacity).unwrap();
        for &(e, c) in terms {
            p.set_coefficient(e, c).unwrap();
        }
        p
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        assert_eq!(Polynomial::new(0), Err(PolyError::InvalidCapacity(0)));
        assert_eq!(
            Polynomial::from_coefficients(Vec::new()),
            Err(PolyError::InvalidCapacity(0))
        );

        let p = Polynomial::new(1).unwrap();
        assert!(p.is_zero());
        assert_eq!(p.capacity(), 1);
    }

    #[test]
    fn test_coefficient_bounds() {
        let mut p = Polynomial::new(4).unwrap();
        assert_eq!(p.coefficient(3), Ok(0.0));
        assert_eq!(
            p.coefficient(4),
            Err(PolyError::ExponentOutOfRange {
                exponent: 4,
                capacity: 4
            })
        );
        assert!(p.set_coefficient(4, 1.0).is_err());
        assert!(p.is_zero());

        p.set_coefficient(3, 2.5).unwrap();
        assert_eq!(p.coefficient(3), Ok(2.5));
    }

    #[test]
    fn test_leading_cache_tracks_mutations() {
        let mut p = poly(10, &[(2, 3.0), (7, -4.0)]);
        assert_eq!(p.leading_exponent(), 7);
        assert_eq!(p.leading_coefficient(), -4.0);

        // Clearing the leading term falls back to the next one down.
        p.set_coefficient(7, 0.0).unwrap();
        assert_eq!(p.leading_exponent(), 2);
        assert_eq!(p.leading_coefficient(), 3.0);

        p.set_coefficient(2, 0.0).unwrap();
        assert!(p.is_zero());
        assert_eq!(p.leading_exponent(), 0);

        // Constant-only polynomial is not zero.
        p.set_coefficient(0, 5.0).unwrap();
        assert!(!p.is_zero());
        assert_eq!(p.leading_exponent(), 0);
        assert_eq!(p.leading_coefficient(), 5.0);
    }

    #[test]
    fn test_reset() {
        let mut p = poly(6, &[(0, 1.0), (5, 2.0)]);
        p.reset();
        assert!(p.is_zero());
        assert_eq!(p.capacity(), 6);
        assert!(p.coeffs().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_clone_is_independent() {
        let p = poly(3, &[(1, 1.0)]);
        let mut q = p.clone();
        q.set_coefficient(2, 9.0).unwrap();
        assert_eq!(p.leading_exponent(), 1);
        assert_eq!(q.leading_exponent(), 2);
    }

    #[test]
    fn test_evaluate() {
        // 3x^2 + 2x + 1
        let p = poly(5, &[(0, 1.0), (1, 2.0), (2, 3.0)]);
        assert_eq!(p.evaluate(0.0), 1.0);
        assert_eq!(p.evaluate(2.0), 17.0);
        assert_eq!(p.evaluate(-1.0), 2.0);
    }

    #[test]
    fn test_evaluate_overflows_per_term() {
        // 1e-300 * x^400 is 1e100 at x = 10, but 10^400 alone is infinite.
        let p = poly(401, &[(400, 1e-300)]);
        assert_eq!(p.evaluate(10.0), f64::INFINITY);
        assert_eq!(p.evaluate(1.0), 1e-300);
    }

    #[test]
    fn test_equality_is_capacity_sensitive() {
        let a = poly(2, &[(0, 1.0), (1, 1.0)]);
        let b = poly(10, &[(0, 1.0), (1, 1.0)]);
        assert_ne!(a, b);
        assert!(a.numerically_eq(&b));
        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_compare() {
        let linear = poly(5, &[(1, 100.0)]);
        let quadratic = poly(3, &[(2, 0.5)]);
        assert_eq!(quadratic.compare(&linear), Ordering::Greater);
        assert_eq!(linear.compare(&quadratic), Ordering::Less);

        // Same leading exponent: the highest differing coefficient decides.
        let a = poly(4, &[(0, 9.0), (1, 1.0), (2, 1.0)]);
        let b = poly(4, &[(0, 1.0), (1, 2.0), (2, 1.0)]);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_bounded_hash() {
        let p = poly(1000, &[(0, 1.0), (3, 2.0)]);
        let h = p.bounded_hash();
        assert!(h < 1000);
        // (7 * 17 + 1) * 17 + 2 = 2042, plus the capacity, mod 1000
        assert_eq!(h, 42);
        assert_eq!(p.bounded_hash(), p.clone().bounded_hash());

        let negative = poly(1, &[(0, -5000.0)]);
        assert!(negative.bounded_hash() < 1000);
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(Polynomial::new(1000).unwrap().to_string(), "P(x) = 0");
    }

    #[test]
    fn test_display_unit_coefficients() {
        let p = poly(2, &[(0, -1.0), (1, 1.0)]);
        assert_eq!(p.to_string(), "P(x) = x^1 - 1");

        let q = poly(4, &[(3, -1.0), (2, 1.0), (0, 1.0)]);
        assert_eq!(q.to_string(), "P(x) = - x^3 + x^2 + 1");

        assert_eq!(Polynomial::one().to_string(), "P(x) = 1");
        assert_eq!(poly(3, &[(0, -1.0)]).to_string(), "P(x) = - 1");
    }

    #[test]
    fn test_display_fraction_digits() {
        let p = poly(3, &[(2, 2.5), (1, -0.333_333), (0, 4.0)]);
        assert_eq!(p.to_string(), "P(x) = 2.5x^2 - 0.333x^1 + 4");

        let c = poly(1, &[(0, -7.25)]);
        assert_eq!(c.to_string(), "P(x) = - 7.25");
    }

    #[test]
    fn test_terms_iterates_downward() {
        let p = poly(6, &[(0, 1.0), (4, 2.0), (2, 3.0)]);
        let terms: Vec<_> = p.terms().collect();
        assert_eq!(terms, vec![(4, 2.0), (2, 3.0), (0, 1.0)]);
    }
}
