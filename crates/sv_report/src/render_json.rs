//! Report JSON renderer. Key order follows struct layout; map keys are sorted.

use crate::{ReportError, ResultReport};

pub fn render_json(report: &ResultReport) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_report, fixtures::calc};
    use serde_json::Value;

    #[test]
    fn rows_and_methods_use_wire_names() {
        let report = build_report(&calc(1, &[("A", 3), ("B", 3)]), None, 3);
        let v: Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert!(v.get("title").is_none());
        assert_eq!(v["rows"][0]["name"], "A");
        assert_eq!(v["rows"][0]["seatsOrVotes"], 3);
        assert_eq!(v["rows"][0]["methods"]["D_HONDT"]["staleSeats"], 1);
        assert_eq!(v["methods"]["HARE_NIEMEYER"]["verdict"], "zulässig");
        assert_eq!(v["methods"]["D_HONDT"]["lotDrawing"], "Losentscheid für 1 Sitz: A, B");
    }
}
