//! COMMITTEE union checks.
//!
//! For each committee union the method runs a second time with the union's
//! members pooled into one entity. The seats the pooled union wins there are
//! then re-split among the members by the same method over their own weights.
//!
//! - The split is infeasible, and every member lists the union in
//!   `committeeInvalid`, when the pooled union sits in a tie of the shadow run
//!   or the re-split itself ends in a tie.
//! - A member holding seats on its own that gets none from the re-split has
//!   lost its safe seat to the union.

use std::collections::{BTreeMap, BTreeSet};

use sv_algo::{pool_union, AllocError, PooledUnion, SeatAssignment};
use sv_core::{
    entities::{BaseData, EffectiveEntity},
    errors::ConfigurationError,
    method::Method,
};
use tracing::debug;

use crate::allocate::allocate;

/// A committee union with its members pooled. Method-independent.
#[derive(Clone, Debug)]
pub struct CommitteePool {
    pub union: String,
    pub pooled: PooledUnion,
}

/// Findings for one method, keyed by effective entity name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitteeFindings {
    pub invalid: BTreeMap<String, Vec<String>>,
    pub lost_seat: BTreeSet<String>,
}

pub fn pool_committees(base: &BaseData, entities: &[EffectiveEntity]) -> Result<Vec<CommitteePool>, ConfigurationError> {
    base.committee_unions()
        .map(|u| Ok(CommitteePool { union: u.name.clone(), pooled: pool_union(entities, u)? }))
        .collect()
}

pub fn check_committees(
    method: Method,
    pools: &[CommitteePool],
    committee_size: u32,
    standalone: &SeatAssignment,
    order_decimals: u8,
) -> Result<CommitteeFindings, AllocError> {
    let mut findings = CommitteeFindings::default();

    for pool in pools {
        let shadow = allocate(method, &pool.pooled.entities, committee_size, order_decimals)?;
        let union_seats = shadow.assignment().seats_of(&pool.union);
        let split = allocate(method, &pool.pooled.members, union_seats, order_decimals)?;

        let infeasible = shadow.stale().is_some_and(|s| s.involves(&pool.union)) || split.stale().is_some();
        debug!(method = %method, union = %pool.union, seats = union_seats, infeasible, "committee split");

        for m in &pool.pooled.members {
            if infeasible {
                findings.invalid.entry(m.name.clone()).or_default().push(pool.union.clone());
            }
            let pending = split.stale().is_some_and(|s| s.involves(&m.name));
            if standalone.seats_of(&m.name) > 0 && split.assignment().seats_of(&m.name) == 0 && !pending {
                findings.lost_seat.insert(m.name.clone());
            }
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::entities::{Group, Union};

    fn setup(groups: &[(&str, u64)], unions: Vec<Union>, size: i64) -> (BaseData, Vec<EffectiveEntity>) {
        let groups = groups.iter().map(|(n, w)| Group::new(*n, *w)).collect();
        let base = BaseData::new(size, groups, unions).unwrap();
        let entities = sv_algo::resolve_unions(&base.groups, &base.unions).unwrap();
        (base, entities)
    }

    fn run(method: Method, base: &BaseData, entities: &[EffectiveEntity]) -> CommitteeFindings {
        let standalone = allocate(method, entities, base.committee_size, 2).unwrap();
        let pools = pool_committees(base, entities).unwrap();
        check_committees(method, &pools, base.committee_size, standalone.assignment(), 2).unwrap()
    }

    #[test]
    fn clean_split_raises_nothing() {
        // Pooled AG (B+C = 10) wins 2 of 4, re-split 5/5 gives one each.
        let (base, es) = setup(&[("A", 10), ("B", 5), ("C", 5)], vec![Union::committee("AG", vec![1, 2])], 4);
        let f = run(Method::DHondt, &base, &es);
        assert_eq!(f, CommitteeFindings::default());
    }

    #[test]
    fn tied_re_split_is_invalid_for_every_member() {
        // AG (3+3) wins 1 of 2 seats; splitting one seat between equal members ties.
        let (base, es) = setup(&[("A", 10), ("B", 3), ("C", 3)], vec![Union::committee("AG", vec![1, 2])], 2);
        let f = run(Method::DHondt, &base, &es);
        assert_eq!(f.invalid.get("B"), Some(&vec!["AG".to_string()]));
        assert_eq!(f.invalid.get("C"), Some(&vec!["AG".to_string()]));
        assert!(!f.invalid.contains_key("A"));
        assert!(f.lost_seat.is_empty());
    }

    #[test]
    fn pooled_union_in_a_tie_is_invalid() {
        // Shadow: A 4 vs AG (2+2) 4 for a single seat.
        let (base, es) = setup(&[("A", 4), ("B", 2), ("C", 2)], vec![Union::committee("AG", vec![1, 2])], 1);
        let f = run(Method::SainteLagueSchepers, &base, &es);
        assert_eq!(f.invalid.get("B"), Some(&vec!["AG".to_string()]));
    }

    #[test]
    fn member_losing_its_own_seat_is_flagged() {
        // Hare, 3 seats. Standalone: A 1.56, B 0.75, C 0.69 -> A 1, B 1, C 1.
        // Pooled AG 48 -> 1.44 gets one seat; the re-split gives it to B.
        let (base, es) = setup(&[("A", 52), ("B", 25), ("C", 23)], vec![Union::committee("AG", vec![1, 2])], 3);
        let f = run(Method::HareNiemeyer, &base, &es);
        assert_eq!(f.lost_seat.iter().collect::<Vec<_>>(), ["C"]);
        assert!(f.invalid.is_empty());
    }

    #[test]
    fn member_inside_a_fraction_is_checked_as_the_fraction() {
        let unions = vec![Union::fraction("FG", vec![0, 1]), Union::committee("AG", vec![1, 2])];
        let (base, es) = setup(&[("A", 3), ("B", 3), ("C", 6)], unions, 2);
        let pools = pool_committees(&base, &es).unwrap();
        let members: Vec<&str> = pools[0].pooled.members.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(members, ["C", "FG"]);
        // Pooled AG holds everything: 2 seats split 1/1 between C 6 and FG 6.
        let f = run(Method::DHondt, &base, &es);
        assert!(f.invalid.is_empty());
    }
}
