//! Merged seat order: consecutive seats awarded at the same displayed value
//! collapse into one line "first - last".

use serde::Serialize;
use sv_pipeline::MethodResult;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedSeat {
    pub first_seat: u32,
    pub last_seat: u32,
    /// `"3"` or `"3 - 5"`.
    pub seats: String,
    pub value: f64,
    /// Distinct names, most seats first, then by name.
    pub names: Vec<String>,
}

pub fn merge_seat_order(result: &MethodResult) -> Vec<MergedSeat> {
    let mut merged: Vec<MergedSeat> = Vec::new();
    for award in &result.order {
        match merged.last_mut() {
            Some(line) if line.value == award.value => {
                line.last_seat = award.seat_number;
                if !line.names.contains(&award.entity_name) {
                    line.names.push(award.entity_name.clone());
                }
            }
            _ => merged.push(MergedSeat {
                first_seat: award.seat_number,
                last_seat: award.seat_number,
                seats: String::new(),
                value: award.value,
                names: vec![award.entity_name.clone()],
            }),
        }
    }

    for line in &mut merged {
        line.names.sort_by(|a, b| result.seats_of(b).cmp(&result.seats_of(a)).then_with(|| a.cmp(b)));
        line.seats = if line.first_seat == line.last_seat {
            line.first_seat.to_string()
        } else {
            format!("{} - {}", line.first_seat, line.last_seat)
        };
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use sv_algo::SeatAward;

    fn result(order: &[(&str, f64)]) -> MethodResult {
        let mut distribution = BTreeMap::new();
        let order = order
            .iter()
            .enumerate()
            .map(|(i, (n, v))| {
                *distribution.entry(n.to_string()).or_insert(0) += 1;
                SeatAward { seat_number: i as u32 + 1, entity_name: n.to_string(), value: *v }
            })
            .collect();
        MethodResult { distribution, order, stale: None, validation: BTreeMap::new() }
    }

    #[test]
    fn distinct_values_stay_separate() {
        let m = merge_seat_order(&result(&[("A", 24.0), ("B", 22.0), ("A", 12.0)]));
        let seats: Vec<&str> = m.iter().map(|l| l.seats.as_str()).collect();
        assert_eq!(seats, ["1", "2", "3"]);
    }

    #[test]
    fn equal_values_merge_and_sort_by_seats() {
        let m = merge_seat_order(&result(&[("B", 9.0), ("C", 9.0), ("B", 6.0), ("A", 4.0), ("B", 4.0), ("C", 4.0)]));
        assert_eq!(m.len(), 3);
        assert_eq!(m[0].seats, "1 - 2");
        assert_eq!(m[0].names, ["B", "C"]);
        assert_eq!(m[2].seats, "4 - 6");
        // B 3 seats, C 2, A 1
        assert_eq!(m[2].names, ["B", "C", "A"]);
        assert_eq!((m[2].first_seat, m[2].last_seat), (4, 6));
    }

    #[test]
    fn repeated_quota_of_one_entity_lists_it_once() {
        let m = merge_seat_order(&result(&[("B", 2.74), ("A", 4.57), ("A", 4.57)]));
        assert_eq!(m[1].seats, "2 - 3");
        assert_eq!(m[1].names, ["A"]);
    }

    #[test]
    fn empty_order_merges_to_nothing() {
        assert!(merge_seat_order(&result(&[])).is_empty());
    }
}
