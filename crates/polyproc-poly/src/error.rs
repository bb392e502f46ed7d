//! Error kinds reported by polynomial construction and arithmetic.

use thiserror::Error;

/// Errors raised by [`Polynomial`](crate::Polynomial) and the [`ops`](crate::ops) engine.
///
/// Every kind is detected synchronously at the boundary of the operation that
/// triggers it. None of them leave a partially modified operand behind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolyError {
    /// A polynomial was requested with a capacity of zero.
    #[error("invalid polynomial capacity {0}, must be at least 1")]
    InvalidCapacity(usize),

    /// A coefficient was read or written outside `[0, capacity - 1]`.
    #[error("exponent {exponent} is out of range for a polynomial of capacity {capacity}")]
    ExponentOutOfRange {
        /// The rejected exponent.
        exponent: usize,
        /// Capacity of the polynomial that rejected it.
        capacity: usize,
    },

    /// A required operand is absent.
    #[error("missing operand: {0} polynomial is not set")]
    NullOperand(&'static str),

    /// The power is negative or the result would exceed the magnitude ceiling.
    #[error("power {power} is not allowed for a polynomial of degree {leading_exponent}")]
    PowerNotAllowed {
        /// The rejected power.
        power: i64,
        /// Leading exponent of the base polynomial.
        leading_exponent: usize,
    },

    /// The divisor is the zero polynomial.
    #[error("division by the zero polynomial")]
    DivisionByZero,
}

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, PolyError>;
