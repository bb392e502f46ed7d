//! # polyproc
//!
//! A polynomial processor: bounded-degree real polynomials, their arithmetic,
//! and the plumbing a presentation shell needs around them.
//!
//! ## Features
//!
//! - **Polynomials**: fixed-capacity dense storage with a cached leading term
//! - **Arithmetic**: add, subtract, multiply, derivative, powers, long division
//! - **Sessions**: a mutex-guarded "current pair" with convenience wrappers
//! - **Workers**: a single background queue returning results through tickets
//!
//! ## Quick Start
//!
//! ```rust
//! use polyproc::prelude::*;
//!
//! let session = Session::new(SessionConfig::default()).unwrap();
//! session.set_coefficient(Slot::First, 3, 1.0).unwrap();
//! session.set_coefficient(Slot::First, 0, -1.0).unwrap();
//! session.set_coefficient(Slot::Second, 1, 1.0).unwrap();
//! session.set_coefficient(Slot::Second, 0, -1.0).unwrap();
//!
//! let division = session.divide().unwrap();
//! assert_eq!(division.quotient.to_string(), "P(x) = x^2 + x^1 + 1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod session;
pub mod worker;


pub use polyproc_poly as poly;

pub use config::SessionConfig;
pub use session::{Pair, Session, Slot};
pub use worker::{Ticket, Worker, WorkerError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::SessionConfig;
    pub use crate::session::{Pair, Session, Slot};
    pub use crate::worker::{Ticket, Worker, WorkerError};
    pub use polyproc_poly::ops;
    pub use polyproc_poly::{Division, PolyError, Polynomial};
}
