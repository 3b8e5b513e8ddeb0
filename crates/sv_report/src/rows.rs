//! Result Mapper: flattens a `CalculationResult` into one row per effective
//! entity, carrying every method's seats, tie share and validity side by side.
//!
//! Pure transformation. Nothing here re-runs an allocation.

use std::collections::BTreeMap;

use serde::Serialize;
use sv_algo::StaleSeats;
use sv_core::method::Method;
use sv_pipeline::{CalculationResult, MethodResult, ValidationData};

/// One method's columns within a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRow {
    pub seats: u32,
    /// Seats contested in the method's lot drawing when this entity takes part, else 0.
    pub stale_seats: u32,
    /// This entity carries no validation flag.
    pub flags_clean: bool,
    /// No entity carries a flag for this method.
    pub is_valid: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub name: String,
    pub seats_or_votes: u64,
    /// Exact share, rounded for display.
    pub proportion: f64,
    pub methods: BTreeMap<Method, MethodRow>,
    /// Lot drawings this entity is part of, one note per method, joined with "; ".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Rows in entity-name order. An empty result maps to no rows.
pub fn map_rows(result: &CalculationResult, proportion_decimals: u8) -> Vec<ResultRow> {
    result
        .proportions
        .iter()
        .map(|(name, &proportion)| ResultRow {
            name: name.clone(),
            seats_or_votes: result.weights.get(name).copied().unwrap_or(0),
            proportion: round_display(proportion, proportion_decimals),
            methods: result.methods.iter().map(|(&m, r)| (m, method_row(r, name))).collect(),
            documentation: documentation(result, name),
        })
        .collect()
}

fn method_row(result: &MethodResult, name: &str) -> MethodRow {
    MethodRow {
        seats: result.seats_of(name),
        stale_seats: result.stale.as_ref().filter(|s| s.involves(name)).map_or(0, |s| s.amount_seats),
        flags_clean: result.validation.get(name).is_some_and(ValidationData::is_clean),
        is_valid: result.is_valid(),
    }
}

fn documentation(result: &CalculationResult, name: &str) -> Option<String> {
    let notes: Vec<String> = result
        .methods
        .iter()
        .filter_map(|(&m, r)| r.stale.as_ref().filter(|s| s.involves(name)).map(|s| tie_note(m, s)))
        .collect();
    (!notes.is_empty()).then(|| notes.join("; "))
}

/// `"D'Hondt: Losentscheid für 2 Sitze: A, D"`.
pub fn tie_note(method: Method, stale: &StaleSeats) -> String {
    format!("{}: {}", method.display_name(), lot_drawing(stale))
}

pub fn lot_drawing(stale: &StaleSeats) -> String {
    let noun = if stale.amount_seats == 1 { "Sitz" } else { "Sitze" };
    format!("Losentscheid für {} {}: {}", stale.amount_seats, noun, stale.entity_names.join(", "))
}

/// Half away from zero, for presentation only.
pub fn round_display(value: f64, decimals: u8) -> f64 {
    let scale = 10f64.powi(i32::from(decimals));
    (value * scale).round() / scale
}

/// Inverse view: method → sparse seat distribution, rebuilt from rows.
pub fn regroup_by_method(rows: &[ResultRow]) -> BTreeMap<Method, BTreeMap<String, u32>> {
    let mut out: BTreeMap<Method, BTreeMap<String, u32>> = BTreeMap::new();
    for row in rows {
        for (&m, cols) in &row.methods {
            let dist = out.entry(m).or_default();
            if cols.seats > 0 {
                dist.insert(row.name.clone(), cols.seats);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::entities::{BaseData, Group, Union};
    use sv_core::variables::Params;

    fn calc(size: i64, groups: &[(&str, u64)], unions: Vec<Union>) -> CalculationResult {
        let groups = groups.iter().map(|(n, w)| Group::new(*n, *w)).collect();
        let base = BaseData::new(size, groups, unions).unwrap();
        sv_pipeline::calculate(&base, &Params::default()).unwrap()
    }

    #[test]
    fn empty_result_has_no_rows() {
        let r = CalculationResult {
            committee_size: 0,
            weights: BTreeMap::new(),
            proportions: BTreeMap::new(),
            methods: BTreeMap::new(),
        };
        assert!(map_rows(&r, 3).is_empty());
    }

    #[test]
    fn tie_is_documented_for_every_method() {
        let rows = map_rows(&calc(1, &[("A", 3), ("B", 3)], vec![]), 3);
        assert_eq!(rows.len(), 2);
        let a = &rows[0];
        assert_eq!(a.methods[&Method::DHondt].seats, 0);
        assert_eq!(a.methods[&Method::DHondt].stale_seats, 1);
        assert_eq!(
            a.documentation.as_deref(),
            Some(
                "D'Hondt: Losentscheid für 1 Sitz: A, B; \
                 Hare/Niemeyer: Losentscheid für 1 Sitz: A, B; \
                 Sainte-Laguë/Schepers: Losentscheid für 1 Sitz: A, B"
            )
        );
    }

    #[test]
    fn rows_without_ties_carry_no_documentation() {
        let rows = map_rows(&calc(60, &[("A", 10), ("B", 20), ("C", 30)], vec![]), 3);
        assert!(rows.iter().all(|r| r.documentation.is_none()));
        assert!(rows.iter().all(|r| r.methods.values().all(|c| c.is_valid && c.stale_seats == 0)));
    }

    #[test]
    fn proportions_are_rounded_for_display() {
        let rows = map_rows(&calc(1, &[("A", 1), ("B", 2)], vec![]), 3);
        assert_eq!(rows[0].proportion, 0.333);
        assert_eq!(rows[1].proportion, 0.667);
        assert_eq!(rows[1].seats_or_votes, 2);
    }

    #[test]
    fn method_validity_spans_all_rows() {
        let rows = map_rows(&calc(3, &[("A", 52), ("B", 25), ("C", 23)], vec![Union::committee("AG", vec![1, 2])]), 3);
        let hare: Vec<&MethodRow> = rows.iter().map(|r| &r.methods[&Method::HareNiemeyer]).collect();
        assert!(hare.iter().all(|c| !c.is_valid));
        assert!(hare[0].flags_clean);
        assert!(!hare[2].flags_clean);
    }

    #[test]
    fn regrouping_restores_the_distributions() {
        let r = calc(8, &[("Partei A", 10_000), ("Partei B", 6_000), ("Partei C", 1_500)], vec![]);
        let back = regroup_by_method(&map_rows(&r, 3));
        for (m, res) in &r.methods {
            assert_eq!(back[m], res.distribution, "{m}");
        }
    }

    #[test]
    fn plural_follows_the_seat_count() {
        let s = StaleSeats { entity_names: vec!["A".into(), "D".into()], amount_seats: 2, value: 4.0 };
        assert_eq!(tie_note(Method::DHondt, &s), "D'Hondt: Losentscheid für 2 Sitze: A, D");
    }
}
