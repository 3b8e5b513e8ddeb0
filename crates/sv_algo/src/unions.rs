//! Union resolution: turn groups + union declarations into the effective
//! entities every allocation method competes over.
//!
//! Contract:
//! - A FRACTION union becomes one entity named after the union, weighing the
//!   sum of its members. Its members leave the standalone list.
//! - COMMITTEE unions do not change the competing entities; `pool_union`
//!   builds the pooled view used afterwards for feasibility checks.
//! - Standalone groups keep input order and come first, followed by fraction
//!   unions in declaration order.
//! - Total weight is conserved.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use sv_core::{
    entities::{EffectiveEntity, Group, GroupIndex, Union, UnionType},
    errors::ConfigurationError,
};

pub fn resolve_unions(groups: &[Group], unions: &[Union]) -> Result<Vec<EffectiveEntity>, ConfigurationError> {
    let mut fraction_of: Vec<Option<usize>> = vec![None; groups.len()];

    for (ui, u) in unions.iter().enumerate() {
        check_members(groups, u)?;
        if u.union_type == UnionType::Fraction {
            for &ix in &u.groups {
                if fraction_of[ix].is_some() {
                    return Err(ConfigurationError::MultipleFractionUnions { group: groups[ix].name.clone() });
                }
                fraction_of[ix] = Some(ui);
            }
        }
    }

    let mut entities: Vec<EffectiveEntity> = groups
        .iter()
        .enumerate()
        .filter(|(ix, _)| fraction_of[*ix].is_none())
        .map(|(ix, g)| EffectiveEntity::standalone(ix, g))
        .collect();

    for u in unions.iter().filter(|u| u.union_type == UnionType::Fraction) {
        let weight = pooled_weight(u.groups.iter().map(|&ix| groups[ix].weight), &u.name)?;
        entities.push(EffectiveEntity { name: u.name.clone(), weight, members: u.groups.clone() });
    }

    // Entity names, then committee union names, must all be distinct: the
    // latter become entity names in the pooled view.
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let committee_names = unions.iter().filter(|u| u.union_type == UnionType::Committee).map(|u| u.name.as_str());
    for name in entities.iter().map(|e| e.name.as_str()).chain(committee_names) {
        if !seen.insert(name) {
            return Err(ConfigurationError::DuplicateName(name.into()));
        }
    }

    Ok(entities)
}

/// Member indices must exist, be distinct, and number at least two.
fn check_members(groups: &[Group], u: &Union) -> Result<(), ConfigurationError> {
    if u.groups.len() < 2 {
        return Err(ConfigurationError::UnionTooSmall { union: u.name.clone(), members: u.groups.len() });
    }
    for (pos, &ix) in u.groups.iter().enumerate() {
        if ix >= groups.len() {
            return Err(ConfigurationError::UnknownGroupIndex {
                union: u.name.clone(),
                index: i64::try_from(ix).unwrap_or(i64::MAX),
            });
        }
        if u.groups[..pos].contains(&ix) {
            return Err(ConfigurationError::DuplicateUnionMember { union: u.name.clone(), index: ix });
        }
    }
    Ok(())
}

fn pooled_weight(mut weights: impl Iterator<Item = u64>, union: &str) -> Result<u64, ConfigurationError> {
    weights
        .try_fold(0u64, |acc, w| acc.checked_add(w))
        .ok_or_else(|| ConfigurationError::WeightOverflow { union: String::from(union) })
}

/// Entity list with one union's members pooled into a single entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PooledUnion {
    /// Non-members in original order, then the pooled union entity last.
    pub entities: Vec<EffectiveEntity>,
    /// The member entities as they compete standalone, in original order.
    pub members: Vec<EffectiveEntity>,
}

/// Pool the entities holding any of `union`'s groups. A member group that sits
/// inside a fraction union brings the whole fraction entity along.
pub fn pool_union(entities: &[EffectiveEntity], union: &Union) -> Result<PooledUnion, ConfigurationError> {
    for &ix in &union.groups {
        if !entities.iter().any(|e| e.contains_group(ix)) {
            return Err(ConfigurationError::UnknownGroupIndex {
                union: union.name.clone(),
                index: i64::try_from(ix).unwrap_or(i64::MAX),
            });
        }
    }

    let (members, mut rest): (Vec<EffectiveEntity>, Vec<EffectiveEntity>) = entities
        .iter()
        .cloned()
        .partition(|e| union.groups.iter().any(|&ix| e.contains_group(ix)));

    let weight = pooled_weight(members.iter().map(|e| e.weight), &union.name)?;
    let member_groups: Vec<GroupIndex> = members.iter().flat_map(|e| e.members.iter().copied()).collect();
    rest.push(EffectiveEntity { name: union.name.clone(), weight, members: member_groups });

    Ok(PooledUnion { entities: rest, members })
}
