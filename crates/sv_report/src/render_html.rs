//! Compact standalone HTML page (embedded template, no external assets).

use minijinja::{context, Environment};

use crate::{ReportError, ResultReport};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="de"><meta charset="utf-8">
<title>{{ report.title or "Sitzverteilung" }}</title>
<h1>{{ report.title or "Sitzverteilung" }}</h1>
<p>Ausschussgröße: {{ report.committeeSize }}</p>
{% if report.rows %}
<table>
  <tr><th>Name</th><th>Stimmen</th><th>Anteil</th>{% for token, m in report.methods|items %}<th>{{ m.displayName }}</th>{% endfor %}</tr>
  {% for row in report.rows %}
  <tr><td>{{ row.name }}</td><td>{{ row.seatsOrVotes }}</td><td>{{ row.proportion }}</td>
    {%- for token, m in report.methods|items %}
    {%- set c = row.methods[token] %}<td>{{ c.seats }}{% if c.staleSeats %} (+{{ c.staleSeats }}){% endif %}</td>
    {%- endfor %}</tr>
  {% endfor %}
</table>
{% for token, m in report.methods|items %}
<h2>{{ m.displayName }}: {{ m.verdict }}</h2>
<ol>
  {% for line in m.seatOrder %}<li>{{ line.seats }}: {{ line.names|join(", ") }} ({{ line.value }})</li>
  {% endfor %}
</ol>
{% if m.lotDrawing %}<p>{{ m.lotDrawing }}</p>{% endif %}
{% endfor %}
{% else %}
<p>Keine Gruppen.</p>
{% endif %}
</html>
"#;

pub fn render_html(report: &ResultReport) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE).map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env.get_template("report.html").map_err(|e| ReportError::Template(e.to_string()))?;
    tmpl.render(context! { report => report }).map_err(|e| ReportError::Template(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_report, fixtures::calc};

    #[test]
    fn page_carries_rows_and_verdicts() {
        let report = build_report(&calc(60, &[("A", 10), ("B", 20), ("C", 30)]), Some("Stadtrat"), 3);
        let html = render_html(&report).unwrap();
        assert!(html.contains("<h1>Stadtrat</h1>"));
        assert!(html.contains("<td>C</td><td>30</td>"));
        assert_eq!(html.matches(": zulässig</h2>").count(), 3);
    }

    #[test]
    fn names_are_escaped() {
        let html = render_html(&build_report(&calc(1, &[("A & B", 3), ("C", 1)]), None, 3)).unwrap();
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains("<td>A & B</td>"));
    }

    #[test]
    fn empty_report_renders() {
        let html = render_html(&build_report(&calc(0, &[]), None, 3)).unwrap();
        assert!(html.contains("Keine Gruppen."));
    }
}
