//! Exact proportional seat shares per effective entity.

use std::collections::BTreeMap;

use sv_core::{entities::EffectiveEntity, errors::CoreError, rounding::Ratio};

/// Entity name → `weight * committee_size / total_weight`, exact.
pub type Shares = BTreeMap<String, Ratio>;

/// All shares are zero when nothing carries weight.
pub fn exact_shares(entities: &[EffectiveEntity], committee_size: u32) -> Result<Shares, CoreError> {
    let total: u128 = entities.iter().map(|e| e.weight as u128).sum();
    entities
        .iter()
        .map(|e| {
            let share = if total == 0 {
                Ratio::ZERO
            } else {
                Ratio::new(e.weight as u128 * committee_size as u128, total)?
            };
            Ok((e.name.clone(), share))
        })
        .collect()
}

pub fn to_display(shares: &Shares) -> BTreeMap<String, f64> {
    shares.iter().map(|(k, v)| (k.clone(), v.to_f64())).collect()
}
