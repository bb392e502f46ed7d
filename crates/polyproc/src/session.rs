//! The "current pair" a presentation shell works on.
//!
//! A [`Session`] owns two optional polynomials behind one mutex. Every public
//! method takes the lock for its whole duration, so replacing or swapping the
//! pair and running an operation on it never interleave with another caller.
//! Several steps can be grouped into one unit with [`Session::transaction`].

use std::fmt;

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, warn};

use polyproc_poly::ops::{self, Division};
use polyproc_poly::{PolyError, Polynomial, Result};

use crate::config::SessionConfig;

/// Selects one member of the current pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first polynomial (the dividend in a division).
    First,
    /// The second polynomial (the divisor in a division).
    Second,
}

impl Slot {
    /// Lower-case name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Slot::First => "first",
            Slot::Second => "second",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two polynomials held by a session. Either may be unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pair {
    /// First member.
    pub first: Option<Polynomial>,
    /// Second member.
    pub second: Option<Polynomial>,
}

impl Pair {
    /// Borrows one member.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn get(&self, slot: Slot) -> Result<&Polynomial> {
        match slot {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
        .ok_or(PolyError::NullOperand(slot.name()))
    }

    /// Mutably borrows one member.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn get_mut(&mut self, slot: Slot) -> Result<&mut Polynomial> {
        match slot {
            Slot::First => self.first.as_mut(),
            Slot::Second => self.second.as_mut(),
        }
        .ok_or(PolyError::NullOperand(slot.name()))
    }

    /// Borrows both members, first then second.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] naming the first unset slot.
    pub fn operands(&self) -> Result<(&Polynomial, &Polynomial)> {
        Ok((self.get(Slot::First)?, self.get(Slot::Second)?))
    }

    /// Replaces one member, returning the previous value.
    pub fn set(&mut self, slot: Slot, poly: Option<Polynomial>) -> Option<Polynomial> {
        match slot {
            Slot::First => std::mem::replace(&mut self.first, poly),
            Slot::Second => std::mem::replace(&mut self.second, poly),
        }
    }

    /// Exchanges the two members.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.first, &mut self.second);
    }
}

/// A caller-owned arithmetic session bound to a current pair.
///
/// `Session` is `Send + Sync`; share it with `Arc` to use it from a
/// background worker. Only one method runs at a time per session.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    pair: Mutex<Pair>,
}

impl Session {
    /// Creates a session whose pair is two zero polynomials of the configured
    /// capacity.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidCapacity`] if the configured capacity is zero.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let first = Polynomial::new(config.capacity)?;
        let second = Polynomial::new(config.capacity)?;
        Ok(Self {
            config,
            pair: Mutex::new(Pair {
                first: Some(first),
                second: Some(second),
            }),
        })
    }

    /// Creates a session with both slots unset.
    #[must_use]
    pub fn empty(config: SessionConfig) -> Self {
        Self {
            config,
            pair: Mutex::new(Pair::default()),
        }
    }

    /// Creates a session over an existing pair.
    #[must_use]
    pub fn with_pair(config: SessionConfig, first: Polynomial, second: Polynomial) -> Self {
        Self {
            config,
            pair: Mutex::new(Pair {
                first: Some(first),
                second: Some(second),
            }),
        }
    }

    /// The session's configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Runs `f` with exclusive access to the pair.
    ///
    /// Use this to make a replace-then-operate sequence a single unit.
    pub fn transaction<R>(&self, f: impl FnOnce(&mut Pair) -> R) -> R {
        let mut pair = self.pair.lock();
        f(&mut pair)
    }

    /// Returns a copy of the whole pair.
    #[must_use]
    pub fn snapshot(&self) -> Pair {
        self.pair.lock().clone()
    }

    /// Returns a copy of one member.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn get(&self, slot: Slot) -> Result<Polynomial> {
        self.transaction(|pair| pair.get(slot).cloned())
    }

    /// Replaces one member. Passing `None` unsets it.
    pub fn set(&self, slot: Slot, poly: Option<Polynomial>) {
        debug!(%slot, set = poly.is_some(), "replacing polynomial");
        self.transaction(|pair| {
            pair.set(slot, poly);
        });
    }

    /// Replaces the first member.
    pub fn set_first(&self, poly: Polynomial) {
        self.set(Slot::First, Some(poly));
    }

    /// Replaces the second member.
    pub fn set_second(&self, poly: Polynomial) {
        self.set(Slot::Second, Some(poly));
    }

    /// Replaces both members at once.
    pub fn replace(&self, first: Polynomial, second: Polynomial) {
        debug!("replacing pair");
        self.transaction(|pair| {
            pair.first = Some(first);
            pair.second = Some(second);
        });
    }

    /// Exchanges the two members.
    pub fn swap(&self) {
        debug!("swapping pair");
        self.transaction(Pair::swap);
    }

    /// Sets one coefficient of one member.
    ///
    /// The exponent is checked against the configured magnitude ceiling before
    /// the polynomial's own capacity.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] for an unset slot and
    /// [`PolyError::ExponentOutOfRange`] for an exponent above the ceiling or
    /// the capacity. The polynomial is unchanged on error.
    pub fn set_coefficient(&self, slot: Slot, exponent: usize, value: f64) -> Result<()> {
        if exponent > self.config.max_magnitude {
            return Err(PolyError::ExponentOutOfRange {
                exponent,
                capacity: self.config.max_magnitude + 1,
            });
        }
        self.transaction(|pair| pair.get_mut(slot)?.set_coefficient(exponent, value))
    }

    /// Sets one coefficient of one member back to zero.
    ///
    /// # Errors
    ///
    /// Same as [`set_coefficient`](Self::set_coefficient).
    pub fn remove_coefficient(&self, slot: Slot, exponent: usize) -> Result<()> {
        self.set_coefficient(slot, exponent, 0.0)
    }

    /// Zeroes every coefficient of one member.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn reset(&self, slot: Slot) -> Result<()> {
        self.transaction(|pair| {
            pair.get_mut(slot)?.reset();
            Ok(())
        })
    }

    /// Canonical text form of one member.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn render(&self, slot: Slot) -> Result<String> {
        self.transaction(|pair| Ok(pair.get(slot)?.to_string()))
    }

    /// First plus second.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if either slot is unset.
    pub fn add(&self) -> Result<Polynomial> {
        self.transaction(|pair| {
            let (p, q) = pair.operands()?;
            Ok(ops::add(p, q))
        })
    }

    /// First minus second.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if either slot is unset.
    pub fn subtract(&self) -> Result<Polynomial> {
        self.transaction(|pair| {
            let (p, q) = pair.operands()?;
            Ok(ops::subtract(p, q))
        })
    }

    /// First times second.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if either slot is unset.
    pub fn multiply(&self) -> Result<Polynomial> {
        self.transaction(|pair| {
            let (p, q) = pair.operands()?;
            Ok(ops::multiply(p, q))
        })
    }

    /// First divided by second.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if either slot is unset and
    /// [`PolyError::DivisionByZero`] if the second is zero.
    pub fn divide(&self) -> Result<Division> {
        self.transaction(|pair| {
            let (p, q) = pair.operands()?;
            ops::divide(p, q)
        })
    }

    /// Derivative of one member.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn derivate(&self, slot: Slot) -> Result<Polynomial> {
        self.transaction(|pair| Ok(ops::derivate(pair.get(slot)?)))
    }

    /// Whether one member may be raised to `power`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn is_power_allowed(&self, slot: Slot, power: i64) -> Result<bool> {
        self.transaction(|pair| Ok(ops::is_power_allowed(pair.get(slot)?, power)))
    }

    /// Raises one member to `power`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset and
    /// [`PolyError::PowerNotAllowed`] if the power is rejected.
    pub fn to_power(&self, slot: Slot, power: i64) -> Result<Polynomial> {
        self.transaction(|pair| {
            ops::to_power(pair.get(slot)?, power).map_err(|err| {
                warn!(%slot, power, %err, "power rejected");
                err
            })
        })
    }

    /// Evaluates one member at every integer of the configured plot domain.
    ///
    /// Returns `(x, P(x))` pairs in ascending `x`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::NullOperand`] if the slot is unset.
    pub fn sample(&self, slot: Slot) -> Result<Vec<(i64, f64)>> {
        let domain = self.config.plot_domain.clone();
        let points = usize::try_from(domain.end() - domain.start() + 1).unwrap_or(0);
        let parallel = points >= self.config.parallel_threshold;

        self.transaction(|pair| {
            let poly = pair.get(slot)?;
            let eval = |x: i64| (x, poly.evaluate(x as f64));
            Ok(if parallel {
                domain.into_par_iter().map(eval).collect()
            } else {
                domain.map(eval).collect()
            })
        })
    }
}
