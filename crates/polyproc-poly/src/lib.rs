//! # polyproc-poly
//!
//! Single-variable polynomials with real coefficients and bounded degree.
//!
//! This crate provides:
//! - [`Polynomial`], a fixed-capacity dense coefficient container with a
//!   cached leading term
//! - [`ops`], a stateless arithmetic engine: addition, subtraction,
//!   convolution multiplication, derivative, integer powers and long division
//! - [`PolyError`], the failure kinds shared by both
//!
//! ## Sizing
//!
//! Results are sized by the operands' degrees, never by their capacities:
//! adding two polynomials of capacity 1000 whose degrees are 2 and 5 yields a
//! polynomial of capacity 6.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ops;
pub mod polynomial;

#[cfg(test)]
mod proptests;

pub use error::{PolyError, Result};
pub use ops::{Division, MAX_MAGNITUDE};
pub use polynomial::Polynomial;
