//! Plain-text table for terminals.
//!
//! Layout: header, one line per entity with a seat column per method
//! (`5 (+2)` marks seats pending in a lot drawing), then per method its
//! verdict, merged seat order and lot drawing.

use std::fmt::Write as _;

use crate::ResultReport;

pub fn render_text(report: &ResultReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &ResultReport) -> std::fmt::Result {
    if let Some(title) = &report.title {
        writeln!(out, "{title}")?;
    }
    writeln!(out, "Ausschussgröße: {}", report.committee_size)?;

    if report.rows.is_empty() {
        writeln!(out, "(keine Gruppen)")?;
        return Ok(());
    }
    writeln!(out)?;

    let mut header = vec!["Name".to_string(), "Stimmen".to_string(), "Anteil".to_string()];
    header.extend(report.methods.values().map(|m| m.display_name.clone()));

    let body: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.name.clone(), row.seats_or_votes.to_string(), row.proportion.to_string()];
            cells.extend(report.methods.keys().map(|m| match row.methods.get(m) {
                Some(c) if c.stale_seats > 0 => format!("{} (+{})", c.seats, c.stale_seats),
                Some(c) => c.seats.to_string(),
                None => "-".to_string(),
            }));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|cells| cells[i].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_line(out, &header, &widths)?;
    for cells in &body {
        write_line(out, cells, &widths)?;
    }

    for summary in report.methods.values() {
        writeln!(out)?;
        writeln!(out, "{}: {}", summary.display_name, summary.verdict)?;
        let seat_width = summary.seat_order.iter().map(|l| l.seats.chars().count()).max().unwrap_or(0);
        for line in &summary.seat_order {
            writeln!(out, "  {:<seat_width$}  {:<10}  {}", line.seats, line.value, line.names.join(", "))?;
        }
        if let Some(lot) = &summary.lot_drawing {
            writeln!(out, "  {lot}")?;
        }
    }
    Ok(())
}

/// Name left-aligned, numbers right-aligned.
fn write_line(out: &mut String, cells: &[String], widths: &[usize]) -> std::fmt::Result {
    for (i, (cell, &w)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            write!(out, "{cell:<w$}")?;
        } else {
            write!(out, "  {cell:>w$}")?;
        }
    }
    writeln!(out)
}
