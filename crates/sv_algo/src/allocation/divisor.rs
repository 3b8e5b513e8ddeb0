//! Divisor (highest averages) allocation: D'Hondt and Sainte-Laguë/Schepers.
//!
//! Contract:
//! - Allocate `committee_size` seats sequentially, each going to the maximum
//!   current quotient `weight / d(seats_so_far)` with `d` from the rule.
//! - Equal maxima are awarded together in entity order while enough seats
//!   remain. When they outnumber the remaining seats the run stops there and
//!   returns `Allocation::Stale` for the remaining seats.
//! - Pure integers; quotients are exact ratios, never compared as floats.
//!
//! Zero-weight entities never hold the maximum and can never win a seat. When
//! every weight is zero all entities are tied at 0 for every seat.

use alloc::vec::Vec;

use sv_core::{entities::EffectiveEntity, rounding::Ratio};

use crate::{AllocError, Allocation, SeatAssignment, StaleSeats};

/// Divisor sequence selecting the method.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DivisorRule {
    /// 1, 2, 3, …
    DHondt,
    /// 1, 3, 5, …
    SainteLagueSchepers,
}

impl DivisorRule {
    /// Divisor for an entity already holding `seats` seats.
    #[inline]
    pub fn divisor(self, seats: u32) -> u128 {
        let s = seats as u128;
        match self {
            DivisorRule::DHondt => s + 1,
            DivisorRule::SainteLagueSchepers => 2 * s + 1,
        }
    }
}

pub fn allocate_dhondt(
    entities: &[EffectiveEntity],
    committee_size: u32,
    order_decimals: u8,
) -> Result<Allocation, AllocError> {
    allocate_divisor(entities, committee_size, DivisorRule::DHondt, order_decimals)
}

pub fn allocate_sainte_lague_schepers(
    entities: &[EffectiveEntity],
    committee_size: u32,
    order_decimals: u8,
) -> Result<Allocation, AllocError> {
    allocate_divisor(entities, committee_size, DivisorRule::SainteLagueSchepers, order_decimals)
}

/// Shared divisor-method allocation parameterized by `rule`.
pub fn allocate_divisor(
    entities: &[EffectiveEntity],
    committee_size: u32,
    rule: DivisorRule,
    order_decimals: u8,
) -> Result<Allocation, AllocError> {
    if committee_size == 0 {
        return Ok(Allocation::Complete(SeatAssignment::default()));
    }
    if entities.is_empty() {
        return Err(AllocError::NoEntities);
    }

    let mut seats: Vec<u32> = vec![0; entities.len()];
    let mut assignment = SeatAssignment::default();
    let mut remaining = committee_size;

    while remaining > 0 {
        let Some((value, best)) = next_award(entities, &seats, rule)? else {
            // Only reachable before the first award.
            return Ok(all_tied_at_zero(entities, committee_size));
        };
        if best.len() > remaining as usize {
            let stale = StaleSeats {
                entity_names: best.iter().map(|&ix| entities[ix].name.clone()).collect(),
                amount_seats: remaining,
                value: value.to_f64(),
            };
            return Ok(Allocation::Stale { assignment, stale });
        }
        let shown = value.round_to(order_decimals);
        for ix in best {
            seats[ix] += 1;
            assignment.award(&entities[ix].name, shown);
            remaining -= 1;
        }
    }

    Ok(Allocation::Complete(assignment))
}

/// Maximum current quotient and every entity holding it, in entity order.
/// `None` when no entity has positive weight.
fn next_award(
    entities: &[EffectiveEntity],
    seats: &[u32],
    rule: DivisorRule,
) -> Result<Option<(Ratio, Vec<usize>)>, AllocError> {
    let mut best: Option<Ratio> = None;
    let mut best_ix: Vec<usize> = Vec::new();

    for (ix, e) in entities.iter().enumerate().filter(|(_, e)| e.weight > 0) {
        let q = Ratio::new(e.weight as u128, rule.divisor(seats[ix]))?;
        match best.map(|b| q.cmp(&b)) {
            None | Some(core::cmp::Ordering::Greater) => {
                best = Some(q);
                best_ix.clear();
                best_ix.push(ix);
            }
            Some(core::cmp::Ordering::Equal) => best_ix.push(ix),
            Some(core::cmp::Ordering::Less) => {}
        }
    }

    Ok(best.map(|b| (b, best_ix)))
}

/// No positive weight anywhere: nothing can be awarded, every entity is tied.
pub(crate) fn all_tied_at_zero(entities: &[EffectiveEntity], committee_size: u32) -> Allocation {
    let mut entity_names = Vec::with_capacity(entities.len());
    for e in entities {
        if !entity_names.contains(&e.name) {
            entity_names.push(e.name.clone());
        }
    }
    Allocation::Stale {
        assignment: SeatAssignment::default(),
        stale: StaleSeats { entity_names, amount_seats: committee_size, value: 0.0 },
    }
}
