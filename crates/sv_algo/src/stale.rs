//! Boundary tie detection shared by every allocator.
//!
//! Contract:
//! - Input is a ranking sorted by value descending and the number of seats
//!   `cut` decided by that ranking.
//! - A tie exists when the value at position `cut` (1-based) is exactly equal
//!   to at least one value ranked after it.
//! - Only this single boundary tie is reported; equal values fully inside the
//!   cut all win a seat anyway and are never reported.
//! - Exact equality on `Ratio`, no tolerance.

use alloc::string::String;
use alloc::vec::Vec;

use sv_core::rounding::Ratio;

use crate::StaleSeats;

/// Location of a tie at the cut, as positions in the ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryTie {
    pub value: Ratio,
    /// First ranked position holding the tied value.
    pub first: usize,
    /// Tied positions inside the cut: the contested seats.
    pub contested: usize,
    /// Tied positions after the cut.
    pub beyond: usize,
}

impl BoundaryTie {
    /// Ranked positions that win unambiguously.
    pub fn awarded(&self) -> usize {
        self.first
    }

    pub fn tied_range(&self) -> core::ops::Range<usize> {
        self.first..self.first + self.contested + self.beyond
    }
}

/// Find the tie straddling `cut`, if any.
pub fn find_boundary_tie<T>(ranked: &[T], cut: usize, value_of: impl Fn(&T) -> Ratio) -> Option<BoundaryTie> {
    if cut == 0 || cut >= ranked.len() {
        return None;
    }
    let value = value_of(&ranked[cut - 1]);
    let beyond = ranked[cut..].iter().take_while(|r| value_of(r) == value).count();
    if beyond == 0 {
        return None;
    }
    let contested = ranked[..cut].iter().rev().take_while(|r| value_of(r) == value).count();
    Some(BoundaryTie { value, first: cut - contested, contested, beyond })
}

/// Build the stale record: distinct entity names over the whole tied range.
pub fn stale_record<T>(ranked: &[T], tie: &BoundaryTie, name_of: impl Fn(&T) -> &str) -> StaleSeats {
    let mut entity_names: Vec<String> = Vec::new();
    for r in &ranked[tie.tied_range()] {
        let name = name_of(r);
        if !entity_names.iter().any(|n| n == name) {
            entity_names.push(name.into());
        }
    }
    StaleSeats {
        entity_names,
        amount_seats: tie.contested as u32,
        value: tie.value.to_f64(),
    }
}
