// crates/sv_algo/src/lib.rs
#![forbid(unsafe_code)]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use sv_core::errors::CoreError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ----------------------------- Allocation outputs ------------------------------------

/// One awarded seat in award order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SeatAward {
    /// 1-based.
    pub seat_number: u32,
    pub entity_name: String,
    /// Winning quotient/ratio, rounded for display only.
    pub value: f64,
}

/// Unresolved tie at the seat-award boundary; needs an external lot drawing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StaleSeats {
    /// Every entity holding the tied value, in ranking order.
    pub entity_names: Vec<String>,
    /// Seats contested among them (left unawarded).
    pub amount_seats: u32,
    pub value: f64,
}

impl StaleSeats {
    pub fn involves(&self, name: &str) -> bool {
        self.entity_names.iter().any(|n| n == name)
    }
}

/// Sparse distribution (entities without seats are absent) plus award order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeatAssignment {
    pub distribution: BTreeMap<String, u32>,
    pub order: Vec<SeatAward>,
}

impl SeatAssignment {
    pub fn seats_of(&self, name: &str) -> u32 {
        self.distribution.get(name).copied().unwrap_or(0)
    }

    pub fn awarded_seats(&self) -> u32 {
        self.distribution.values().sum()
    }

    /// Record one seat for `name` with the next seat number.
    pub(crate) fn award(&mut self, name: &str, value: f64) {
        *self.distribution.entry(name.into()).or_insert(0) += 1;
        let seat_number = self.order.len() as u32 + 1;
        self.order.push(SeatAward { seat_number, entity_name: name.into(), value });
    }
}

/// Outcome of one method run: either every seat was awarded, or the run
/// stopped at a tied boundary and carries the tie descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Allocation {
    Complete(SeatAssignment),
    Stale { assignment: SeatAssignment, stale: StaleSeats },
}

impl Allocation {
    pub fn assignment(&self) -> &SeatAssignment {
        match self {
            Allocation::Complete(a) => a,
            Allocation::Stale { assignment, .. } => assignment,
        }
    }

    pub fn stale(&self) -> Option<&StaleSeats> {
        match self {
            Allocation::Complete(_) => None,
            Allocation::Stale { stale, .. } => Some(stale),
        }
    }

    pub fn into_parts(self) -> (SeatAssignment, Option<StaleSeats>) {
        match self {
            Allocation::Complete(a) => (a, None),
            Allocation::Stale { assignment, stale } => (assignment, Some(stale)),
        }
    }
}

// ----------------------------- Errors ------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// Seats requested but nothing competes for them.
    NoEntities,
    Arithmetic(CoreError),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::NoEntities => write!(f, "no entities to allocate seats to"),
            AllocError::Arithmetic(e) => write!(f, "arithmetic error: {e}"),
        }
    }
}

impl std::error::Error for AllocError {}

impl From<CoreError> for AllocError {
    fn from(e: CoreError) -> Self {
        AllocError::Arithmetic(e)
    }
}

// ----------------------------- Modules ----------------------------------------------

pub mod unions;
pub mod stale;

pub mod allocation {
    pub mod divisor;
    pub mod largest_remainder;

    pub use divisor::{allocate_dhondt, allocate_divisor, allocate_sainte_lague_schepers, DivisorRule};
    pub use largest_remainder::{allocate_hare_niemeyer, quota_split};
}

pub use allocation::{allocate_dhondt, allocate_hare_niemeyer, allocate_sainte_lague_schepers, DivisorRule};
pub use unions::{pool_union, resolve_unions, PooledUnion};
