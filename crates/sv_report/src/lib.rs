//! sv_report: presentation model and renderers (JSON / text table / HTML).
//!
//! Determinism rules:
//! - No I/O here. Callers hand in a finished `CalculationResult`.
//! - Rows follow entity-name order, methods follow `Method` order.
//! - Renderers read the model only; nothing is recomputed.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sv_core::method::Method;
use sv_pipeline::CalculationResult;

pub mod render_json;
pub mod render_text;
#[cfg(feature = "render_html")]
pub mod render_html;
pub mod rows;
pub mod seat_order;

pub use render_json::render_json;
pub use render_text::render_text;
#[cfg(feature = "render_html")]
pub use render_html::render_html;
pub use rows::{map_rows, regroup_by_method, MethodRow, ResultRow};
pub use seat_order::{merge_seat_order, MergedSeat};

// ===== Errors =====

#[derive(Debug)]
pub enum ReportError {
    Json(String),
    Template(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Json(m) => write!(f, "report serialization failed: {m}"),
            ReportError::Template(m) => write!(f, "report template failed: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====

/// Per-method block: verdict, merged seat order and the lot drawing, if any.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSummary {
    pub display_name: String,
    pub is_valid: bool,
    /// "zulässig" / "unzulässig".
    pub verdict: String,
    pub seat_order: Vec<MergedSeat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_drawing: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub committee_size: u32,
    pub rows: Vec<ResultRow>,
    pub methods: BTreeMap<Method, MethodSummary>,
}

/// Build the report model from a finished calculation (pure).
pub fn build_report(result: &CalculationResult, title: Option<&str>, proportion_decimals: u8) -> ResultReport {
    let methods = result
        .methods
        .iter()
        .map(|(&m, r)| {
            let is_valid = r.is_valid();
            let summary = MethodSummary {
                display_name: m.display_name().to_string(),
                is_valid,
                verdict: if is_valid { "zulässig" } else { "unzulässig" }.to_string(),
                seat_order: merge_seat_order(r),
                lot_drawing: r.stale.as_ref().map(rows::lot_drawing),
            };
            (m, summary)
        })
        .collect();

    ResultReport {
        title: title.map(str::to_string),
        committee_size: result.committee_size,
        rows: map_rows(result, proportion_decimals),
        methods,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_per_method() {
        let r = fixtures::calc(7, &[("Partei A", 10_000), ("Partei B", 6_000), ("Partei C", 1_500)]);
        let report = build_report(&r, Some("Stadtrat"), 3);
        assert_eq!(report.title.as_deref(), Some("Stadtrat"));
        assert_eq!(report.rows.len(), 3);
        let dh = &report.methods[&Method::DHondt];
        assert_eq!(dh.display_name, "D'Hondt");
        assert_eq!(dh.lot_drawing.as_deref(), Some("Losentscheid für 1 Sitz: Partei A, Partei B"));
        assert_eq!(dh.seat_order.len(), 6);
    }

    #[test]
    fn clean_method_is_admissible() {
        let r = fixtures::calc(60, &[("A", 10), ("B", 20), ("C", 30)]);
        let report = build_report(&r, None, 3);
        assert!(report.methods.values().all(|s| s.is_valid && s.verdict == "zulässig"));
        assert!(report.methods.values().all(|s| s.lot_drawing.is_none()));
    }
}
