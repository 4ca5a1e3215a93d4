// Record Merger: join the enrollment export with the contact-hours
// reference and derive the per-section Total FTE.
use crate::types::{RawContactHoursRow, RawSectionRow, SectionRecord};
use crate::util::{parse_f64_safe, round_to};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{3}-\d{3}").expect("course code pattern"));

/// Extract the first `AAA-123` style course code from a section name.
pub fn extract_course_code(sec_name: &str) -> Option<String> {
    COURSE_CODE_RE
        .find(sec_name)
        .map(|m| m.as_str().to_string())
}

fn clean(field: Option<String>) -> String {
    field.unwrap_or_default().trim().to_string()
}

/// Contact hours keyed by course code. The code comes from the reference
/// row's own `Course Code` column when present, otherwise it is derived
/// from the reference `Sec Name`. First occurrence wins on duplicates.
fn contact_hours_by_course(reference: &[RawContactHoursRow]) -> HashMap<String, f64> {
    let mut map: HashMap<String, f64> = HashMap::new();
    for row in reference {
        let code = match row.course_code.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => Some(c.to_string()),
            _ => row
                .sec_name
                .as_deref()
                .and_then(extract_course_code),
        };
        let Some(code) = code else { continue };
        let Some(hours) = parse_f64_safe(row.contact_hours.as_deref()) else {
            continue;
        };
        if map.contains_key(&code) {
            log::debug!("duplicate contact-hours entry for {}", code);
            continue;
        }
        map.insert(code, hours);
    }
    map
}

/// Merge raw enrollment rows with the contact-hours reference.
///
/// - Derives `Course Code` from `Sec Name` when the column is absent.
/// - Left join: unmatched rows keep missing contact hours, never an error.
/// - `Total FTE = round(contact_hours * 16 * fte_count / 512, 3)`, missing
///   when either operand is missing.
/// - Output is stable-sorted by (division, section name, faculty).
pub fn merge(raw: &[RawSectionRow], reference: &[RawContactHoursRow]) -> Vec<SectionRecord> {
    let hours = contact_hours_by_course(reference);
    let mut unmatched = 0usize;

    let mut records: Vec<SectionRecord> = raw
        .iter()
        .map(|row| {
            let sec_name = clean(row.sec_name.clone());
            let course_code = match row.course_code.as_deref().map(str::trim) {
                Some(c) if !c.is_empty() => Some(c.to_string()),
                _ => extract_course_code(&sec_name),
            };
            let contact_hours = course_code.as_deref().and_then(|c| hours.get(c).copied());
            if contact_hours.is_none() {
                unmatched += 1;
            }
            let capacity = parse_f64_safe(row.capacity.as_deref());
            let fte_count = parse_f64_safe(row.fte_count.as_deref());
            let total_fte = match (contact_hours, fte_count) {
                (Some(ch), Some(fte)) => Some(round_to(ch * 16.0 * fte / 512.0, 3)),
                _ => None,
            };
            SectionRecord {
                sec_name,
                division: clean(row.division.clone()),
                faculty_info: clean(row.faculty_info.clone()),
                delivery_method: clean(row.delivery_method.clone()),
                meeting_times: clean(row.meeting_times.clone()),
                course_code,
                capacity,
                fte_count,
                contact_hours,
                total_fte,
            }
        })
        .collect();

    if unmatched > 0 {
        log::debug!("{} sections without a contact-hours match", unmatched);
    }

    records.sort_by(|a, b| {
        (&a.division, &a.sec_name, &a.faculty_info)
            .cmp(&(&b.division, &b.sec_name, &b.faculty_info))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_section(sec_name: &str, division: &str, capacity: &str, fte: &str) -> RawSectionRow {
        RawSectionRow {
            sec_name: Some(sec_name.to_string()),
            division: Some(division.to_string()),
            faculty_info: Some("Doe, J".to_string()),
            delivery_method: Some("TR".to_string()),
            meeting_times: Some("MWF 9:00".to_string()),
            capacity: Some(capacity.to_string()),
            fte_count: Some(fte.to_string()),
            course_code: None,
        }
    }

    fn reference(code: &str, hours: &str) -> RawContactHoursRow {
        RawContactHoursRow {
            sec_name: None,
            course_code: Some(code.to_string()),
            contact_hours: Some(hours.to_string()),
        }
    }

    #[test]
    fn derives_course_code_and_total_fte() {
        let raw = vec![raw_section("ABC-101-01", "SCI", "30", "15")];
        let merged = merge(&raw, &[reference("ABC-101", "3")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].course_code.as_deref(), Some("ABC-101"));
        assert_eq!(merged[0].contact_hours, Some(3.0));
        // 3 * 16 * 15 / 512 = 1.40625, rounded to 1.406
        assert_eq!(merged[0].total_fte, Some(1.406));
    }

    #[test]
    fn unmatched_reference_leaves_fields_missing() {
        let raw = vec![raw_section("XYZ-200-01", "HUM", "25", "10")];
        let merged = merge(&raw, &[reference("ABC-101", "3")]);
        assert_eq!(merged[0].contact_hours, None);
        assert_eq!(merged[0].total_fte, None);
    }

    #[test]
    fn malformed_numbers_become_missing_not_errors() {
        let raw = vec![raw_section("ABC-101-01", "SCI", "TBA", "n/a")];
        let merged = merge(&raw, &[reference("ABC-101", "3")]);
        assert_eq!(merged[0].capacity, None);
        assert_eq!(merged[0].fte_count, None);
        assert_eq!(merged[0].total_fte, None);
    }

    #[test]
    fn unmatchable_section_name_gets_no_course_code() {
        let raw = vec![raw_section("Yoga 101", "PED", "20", "8")];
        let merged = merge(&raw, &[reference("ABC-101", "3")]);
        assert_eq!(merged[0].course_code, None);
        assert_eq!(merged[0].total_fte, None);
    }

    #[test]
    fn reference_side_derives_code_from_section_name() {
        let raw = vec![raw_section("ABC-101-01", "SCI", "30", "16")];
        let reference = vec![RawContactHoursRow {
            sec_name: Some("ABC-101-01".to_string()),
            course_code: None,
            contact_hours: Some("4".to_string()),
        }];
        let merged = merge(&raw, &reference);
        assert_eq!(merged[0].contact_hours, Some(4.0));
        assert_eq!(merged[0].total_fte, Some(2.0));
    }

    #[test]
    fn first_reference_entry_wins_on_duplicates() {
        let raw = vec![raw_section("ABC-101-01", "SCI", "30", "16")];
        let merged = merge(&raw, &[reference("ABC-101", "4"), reference("ABC-101", "9")]);
        assert_eq!(merged[0].contact_hours, Some(4.0));
    }

    #[test]
    fn sorts_by_division_then_section_then_faculty() {
        let raw = vec![
            raw_section("ZZZ-900-01", "HUM", "10", "5"),
            raw_section("ABC-101-01", "SCI", "10", "5"),
            raw_section("ABC-101-01", "HUM", "10", "5"),
        ];
        let merged = merge(&raw, &[]);
        let order: Vec<(&str, &str)> = merged
            .iter()
            .map(|r| (r.division.as_str(), r.sec_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("HUM", "ABC-101-01"),
                ("HUM", "ZZZ-900-01"),
                ("SCI", "ABC-101-01"),
            ]
        );
    }
}
