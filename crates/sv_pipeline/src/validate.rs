//! crates/sv_pipeline/src/validate.rs
//! Structural checks on base data before any computation.
//!
//! Union-level checks (index ranges, repeated members, fraction overlap,
//! entity-name clashes) run inside `sv_algo::resolve_unions`; this stage
//! covers what concerns the group list alone.

use std::collections::BTreeSet;

use sv_core::{entities::BaseData, errors::ConfigurationError};
use tracing::debug;

pub fn check_base_data(base: &BaseData) -> Result<(), ConfigurationError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for g in &base.groups {
        if !seen.insert(g.name.as_str()) {
            return Err(ConfigurationError::DuplicateName(g.name.clone()));
        }
    }

    let zero = base.groups.iter().filter(|g| g.weight == 0).count();
    if zero > 0 {
        debug!(groups = zero, "groups without weight cannot win seats");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::entities::Group;

    #[test]
    fn unique_names_pass() {
        let b = BaseData::new(2, vec![Group::new("A", 1), Group::new("B", 0)], vec![]).unwrap();
        assert!(check_base_data(&b).is_ok());
    }

    #[test]
    fn duplicate_names_fail() {
        let b = BaseData::new(2, vec![Group::new("A", 1), Group::new("A", 3)], vec![]).unwrap();
        assert_eq!(check_base_data(&b), Err(ConfigurationError::DuplicateName("A".into())));
    }
}
