//! Validator: per-entity warning flags for one method's outcome.
//!
//! Contract:
//! - `overRounding`: held seats (counting one pending seat when the entity is
//!   named in the stale record) deviate from the exact share by more than one
//!   whole seat. Cross-multiplied: |w·size − seats·total| > total.
//! - `lostSafeSeat`: w > total / (size + 1), i.e. w·(size + 1) > total, yet the
//!   entity holds no seat and no pending one; or its seat was lost to a
//!   committee union re-split.
//! - `committeeInvalid`: committee unions whose split fails for this entity.
//!
//! Never fails. Every flag is false when the total weight is zero.

use std::collections::BTreeMap;

use sv_algo::Allocation;
use sv_core::entities::EffectiveEntity;

use crate::committee::CommitteeFindings;
use crate::ValidationData;

pub fn validate_method(
    entities: &[EffectiveEntity],
    committee_size: u32,
    allocation: &Allocation,
    committee: &CommitteeFindings,
) -> BTreeMap<String, ValidationData> {
    let total: u128 = entities.iter().map(|e| e.weight as u128).sum();
    let stale = allocation.stale();

    entities
        .iter()
        .map(|e| {
            let seats = allocation.assignment().seats_of(&e.name);
            let pending = u32::from(stale.is_some_and(|s| s.involves(&e.name)));
            let held = seats + pending;

            let data = ValidationData {
                over_rounding: over_rounding(e.weight, committee_size, total, held),
                lost_safe_seat: (held == 0 && has_safe_seat(e.weight, committee_size, total))
                    || committee.lost_seat.contains(&e.name),
                committee_invalid: committee.invalid.get(&e.name).cloned().unwrap_or_default(),
            };
            (e.name.clone(), data)
        })
        .collect()
}

pub fn over_rounding(weight: u64, committee_size: u32, total: u128, held: u32) -> bool {
    if total == 0 {
        return false;
    }
    let exact = weight as u128 * committee_size as u128;
    let granted = (held as u128).saturating_mul(total);
    exact.abs_diff(granted) > total
}

pub fn has_safe_seat(weight: u64, committee_size: u32, total: u128) -> bool {
    total > 0 && weight as u128 * (committee_size as u128 + 1) > total
}
