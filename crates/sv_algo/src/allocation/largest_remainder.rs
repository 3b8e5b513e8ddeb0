//! Largest Remainder allocation (Hare/Niemeyer).
//!
//! Contract:
//! - Quota Q = total / committee_size. An entity's exact quota is
//!   weight / Q = weight * committee_size / total, kept as an exact ratio.
//! - Base seats = floor(exact quota), awarded unconditionally. The order
//!   records them seat-by-seat, entities by descending weight (stable).
//! - Remaining seats go to the largest remainders (stable: entity order).
//! - A tie at the remainder cutoff stops the run and is reported as stale,
//!   using the remainder as the tied value.
//!
//! Sum of base seats never exceeds committee_size, and the remaining seats are
//! always fewer than the entities with a non-zero remainder.

use alloc::vec::Vec;

use sv_core::{entities::EffectiveEntity, errors::CoreError, rounding::Ratio};

use crate::allocation::divisor::all_tied_at_zero;
use crate::stale::{find_boundary_tie, stale_record};
use crate::{AllocError, Allocation, SeatAssignment};

fn exact_quota(weight: u64, total: u128, size: u32) -> Result<Ratio, CoreError> {
    Ratio::new(weight as u128 * size as u128, total)
}

/// Split an entity's exact quota into (base seats, remainder).
pub fn quota_split(weight: u64, total: u128, size: u32) -> Result<(u32, Ratio), CoreError> {
    let q = exact_quota(weight, total, size)?;
    let base = u32::try_from(q.floor()).map_err(|_| CoreError::DomainOutOfRange("base seats"))?;
    Ok((base, q.fract()))
}

struct Standing {
    entity: usize,
    quota: Ratio,
    base: u32,
    remainder: Ratio,
}

pub fn allocate_hare_niemeyer(
    entities: &[EffectiveEntity],
    committee_size: u32,
    order_decimals: u8,
) -> Result<Allocation, AllocError> {
    if committee_size == 0 {
        return Ok(Allocation::Complete(SeatAssignment::default()));
    }
    if entities.is_empty() {
        return Err(AllocError::NoEntities);
    }
    let total: u128 = entities.iter().map(|e| e.weight as u128).sum();
    if total == 0 {
        return Ok(all_tied_at_zero(entities, committee_size));
    }

    let mut standings = Vec::with_capacity(entities.len());
    for (entity, e) in entities.iter().enumerate() {
        let quota = exact_quota(e.weight, total, committee_size)?;
        let (base, remainder) = quota_split(e.weight, total, committee_size)?;
        standings.push(Standing { entity, quota, base, remainder });
    }

    let mut assignment = SeatAssignment::default();

    // 1) Base seats, round by round over entities by descending weight.
    let mut by_weight: Vec<&Standing> = standings.iter().collect();
    by_weight.sort_by(|a, b| entities[b.entity].weight.cmp(&entities[a.entity].weight));
    let max_base = by_weight.iter().map(|s| s.base).max().unwrap_or(0);
    for round in 0..max_base {
        for s in by_weight.iter().filter(|s| s.base > round) {
            assignment.award(&entities[s.entity].name, s.quota.round_to(order_decimals));
        }
    }

    // 2) Remainder seats.
    let base_total: u32 = standings.iter().map(|s| s.base).sum();
    let remaining = committee_size.saturating_sub(base_total) as usize;
    if remaining == 0 {
        return Ok(Allocation::Complete(assignment));
    }

    let mut ranked: Vec<&Standing> = standings.iter().collect();
    ranked.sort_by(|a, b| b.remainder.cmp(&a.remainder));
    let tie = find_boundary_tie(&ranked, remaining, |s| s.remainder);
    let awarded = tie.map_or(remaining, |t| t.awarded());

    for s in &ranked[..awarded] {
        assignment.award(&entities[s.entity].name, s.remainder.round_to(order_decimals));
    }

    Ok(match tie {
        None => Allocation::Complete(assignment),
        Some(t) => {
            let stale = stale_record(&ranked, &t, |s| entities[s.entity].name.as_str());
            Allocation::Stale { assignment, stale }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use sv_core::entities::Group;

    fn entities(ws: &[(&str, u64)]) -> Vec<EffectiveEntity> {
        ws.iter()
            .enumerate()
            .map(|(i, (n, w))| EffectiveEntity::standalone(i, &Group::new(*n, *w)))
            .collect()
    }

    fn dist(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn quota_split_floors_and_keeps_exact_remainder() {
        // 10000 * 8 / 17500 = 4 + 4/7
        let (base, rem) = quota_split(10_000, 17_500, 8).unwrap();
        assert_eq!(base, 4);
        assert_eq!(rem, Ratio::new(4, 7).unwrap());
        assert_eq!(quota_split(1, 0, 3), Err(CoreError::InvalidRatio));
    }

    #[test]
    fn base_then_remainder_seats() {
        let es = entities(&[("Partei A", 10_000), ("Partei B", 6_000), ("Partei C", 1_500)]);
        let a = allocate_hare_niemeyer(&es, 8, 2).unwrap();
        assert!(a.stale().is_none());
        assert_eq!(
            a.assignment().distribution,
            dist(&[("Partei A", 4), ("Partei B", 3), ("Partei C", 1)])
        );
        let order: Vec<(&str, f64)> =
            a.assignment().order.iter().map(|s| (s.entity_name.as_str(), s.value)).collect();
        assert_eq!(
            order,
            [
                ("Partei A", 4.57), ("Partei B", 2.74),
                ("Partei A", 4.57), ("Partei B", 2.74),
                ("Partei A", 4.57), ("Partei A", 4.57),
                ("Partei B", 0.74), ("Partei C", 0.69),
            ]
        );
        assert_eq!(a.assignment().order.last().map(|s| s.seat_number), Some(8));
    }

    #[test]
    fn exact_quotas_need_no_remainder_phase() {
        let es = entities(&[("A", 10), ("B", 20), ("C", 30)]);
        let a = allocate_hare_niemeyer(&es, 60, 2).unwrap();
        assert_eq!(a.assignment().distribution, dist(&[("A", 10), ("B", 20), ("C", 30)]));
        assert_eq!(a.assignment().awarded_seats(), 60);
        // C leads every round while it still holds base seats.
        assert_eq!(a.assignment().order[0].entity_name, "C");
        assert_eq!(a.assignment().order[0].value, 30.0);
    }

    #[test]
    fn tied_remainders_at_cutoff_are_stale() {
        let es = entities(&[("A", 5), ("B", 2), ("C", 2)]);
        let a = allocate_hare_niemeyer(&es, 2, 2).unwrap();
        assert_eq!(a.assignment().distribution, dist(&[("A", 1)]));
        assert_eq!(a.assignment().order.len(), 1);
        let stale = a.stale().unwrap();
        assert_eq!(stale.entity_names, ["B", "C"]);
        assert_eq!(stale.amount_seats, 1);
        assert_eq!(stale.value, 4.0 / 9.0);
    }

    #[test]
    fn all_equal_remainders_contest_every_open_seat() {
        let es = entities(&[("A", 1), ("B", 1), ("C", 1)]);
        let a = allocate_hare_niemeyer(&es, 2, 2).unwrap();
        assert!(a.assignment().distribution.is_empty());
        let stale = a.stale().unwrap();
        assert_eq!(stale.entity_names, ["A", "B", "C"]);
        assert_eq!(stale.amount_seats, 2);
        assert_eq!(stale.value, 2.0 / 3.0);
    }

    #[test]
    fn trivial_inputs() {
        assert_eq!(
            allocate_hare_niemeyer(&[], 0, 2).unwrap(),
            Allocation::Complete(SeatAssignment::default())
        );
        assert_eq!(allocate_hare_niemeyer(&[], 1, 2), Err(AllocError::NoEntities));
        let zero = entities(&[("A", 0), ("B", 0)]);
        let a = allocate_hare_niemeyer(&zero, 3, 2).unwrap();
        assert_eq!(a.stale().map(|s| s.amount_seats), Some(3));
    }
}
