//! crates/sv_core/src/entities.rs
//! Base data (groups + union declarations + committee size) and the effective
//! entities that actually compete in an allocation. No I/O.

use crate::errors::ConfigurationError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a group in `BaseData::groups`.
pub type GroupIndex = usize;

/// A named competing group with its seats-or-votes weight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group {
    pub name: String,
    pub weight: u64,
}

impl Group {
    pub fn new(name: impl Into<String>, weight: u64) -> Self {
        Self { name: name.into(), weight }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnionType {
    /// Fraktionsgemeinschaft: weights are pooled, the union competes as one entity.
    #[cfg_attr(feature = "serde", serde(rename = "FRACTION"))]
    Fraction,
    /// Ausschussgemeinschaft: only checked after allocation.
    #[cfg_attr(feature = "serde", serde(rename = "COMMITTEE"))]
    Committee,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Union {
    pub name: String,
    pub union_type: UnionType,
    /// Ordered member indices into `BaseData::groups`.
    pub groups: Vec<GroupIndex>,
}

impl Union {
    pub fn fraction(name: impl Into<String>, groups: Vec<GroupIndex>) -> Self {
        Self { name: name.into(), union_type: UnionType::Fraction, groups }
    }

    pub fn committee(name: impl Into<String>, groups: Vec<GroupIndex>) -> Self {
        Self { name: name.into(), union_type: UnionType::Committee, groups }
    }
}

/// Complete input of one calculation request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseData {
    pub committee_size: u32,
    pub groups: Vec<Group>,
    pub unions: Vec<Union>,
}

impl BaseData {
    /// Build from a wire-level (signed) committee size.
    pub fn new(
        committee_size: i64,
        groups: Vec<Group>,
        unions: Vec<Union>,
    ) -> Result<Self, ConfigurationError> {
        if committee_size < 0 {
            return Err(ConfigurationError::NegativeCommitteeSize(committee_size));
        }
        let committee_size = u32::try_from(committee_size)
            .map_err(|_| ConfigurationError::CommitteeSizeTooLarge(committee_size))?;
        Ok(Self { committee_size, groups, unions })
    }

    pub fn committee_unions(&self) -> impl Iterator<Item = &Union> {
        self.unions.iter().filter(|u| u.union_type == UnionType::Committee)
    }
}

/// The unit fed to an allocation method: a standalone group or a pooled union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveEntity {
    pub name: String,
    pub weight: u64,
    /// Input groups folded into this entity (a single index for standalone groups).
    pub members: Vec<GroupIndex>,
}

impl EffectiveEntity {
    pub fn standalone(index: GroupIndex, group: &Group) -> Self {
        Self { name: group.name.clone(), weight: group.weight, members: vec![index] }
    }

    pub fn contains_group(&self, index: GroupIndex) -> bool {
        self.members.contains(&index)
    }
}
