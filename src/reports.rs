// FTE Aggregator: the three report entry points (division, course,
// instructor) plus the two plain listings. All are pure functions over the
// merged records; `None` means the key matched nothing.
use crate::merge::extract_course_code;
use crate::types::{
    EnrollmentListingRow, FteReport, ReportRow, SectionFte, SectionListingRow, SectionRecord,
};
use crate::util::{
    display_opt_count, display_opt_fte, enrollment_percent, enrollment_percent_display,
};
use std::collections::{HashMap, HashSet};

/// Fixed base dollar value applied per FTE on top of the sector multiplier.
pub const BASE_FTE: f64 = 1926.0;

pub type TierLookup = HashMap<String, f64>;

/// Sector multiplier for a section, looked up by the literal first three
/// characters of the section name. Anything that cannot yield a 3-char
/// prefix is a miss, and a miss is 0.
fn sector_multiplier(tiers: &TierLookup, sec_name: &str) -> f64 {
    sec_name
        .get(..3)
        .and_then(|prefix| tiers.get(prefix))
        .copied()
        .unwrap_or(0.0)
}

fn generated_fte(tiers: &TierLookup, record: &SectionRecord) -> f64 {
    let multiplier = sector_multiplier(tiers, &record.sec_name);
    record.total_fte.unwrap_or(0.0) * (multiplier + BASE_FTE)
}

/// Drop repeated sections (co-taught sections appear once per instructor in
/// the raw export); the first occurrence wins.
fn dedup_by_section<'a>(records: Vec<&'a SectionRecord>) -> Vec<&'a SectionRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.sec_name.as_str()))
        .collect()
}

/// FTE report for one division, grouped by course with a `"Total"` subtotal
/// row at every course boundary. Returns `None` when the division matches
/// no rows.
pub fn fte_by_division(
    records: &[SectionRecord],
    tiers: &TierLookup,
    division_code: &str,
) -> Option<FteReport> {
    let division_code = division_code.trim().to_uppercase();
    let mut filtered: Vec<(Option<String>, &SectionRecord)> = records
        .iter()
        .filter(|r| r.division.eq_ignore_ascii_case(&division_code))
        .map(|r| (extract_course_code(&r.sec_name), r))
        .collect();
    if filtered.is_empty() {
        return None;
    }

    // Group by re-derived course code; codeless sections sort last.
    filtered.sort_by(|a, b| {
        let ka = (a.0.is_none(), a.0.as_deref().unwrap_or(""), &a.1.sec_name);
        let kb = (b.0.is_none(), b.0.as_deref().unwrap_or(""), &b.1.sec_name);
        ka.cmp(&kb)
    });

    let mut rows = Vec::new();
    let mut course_total = 0.0;
    let mut original_total = 0.0;
    let mut generated_total = 0.0;
    let mut prev_course: Option<Option<String>> = None;

    for (course, record) in &filtered {
        let boundary = prev_course.as_ref().map_or(true, |prev| prev != course);
        if boundary && prev_course.is_some() {
            rows.push(ReportRow::Subtotal {
                label: "Total".to_string(),
                generated_fte: course_total,
            });
            generated_total += course_total;
            course_total = 0.0;
        }

        let generated = generated_fte(tiers, record);
        original_total += record.total_fte.unwrap_or(0.0);

        rows.push(ReportRow::Section(SectionFte {
            division_label: if prev_course.is_none() {
                division_code.clone()
            } else {
                String::new()
            },
            course_label: if boundary {
                course.clone().unwrap_or_default()
            } else {
                String::new()
            },
            sec_name: record.sec_name.clone(),
            delivery_method: record.delivery_method.clone(),
            meeting_times: record.meeting_times.clone(),
            capacity: record.capacity,
            fte_count: record.fte_count,
            faculty_info: record.faculty_info.clone(),
            total_fte: record.total_fte,
            enrollment_per: enrollment_percent(record.capacity, record.fte_count),
            generated_fte: generated,
        }));

        course_total += generated;
        prev_course = Some(course.clone());
    }

    // Flush the final open course group.
    rows.push(ReportRow::Subtotal {
        label: "Total".to_string(),
        generated_fte: course_total,
    });
    generated_total += course_total;

    Some(FteReport {
        rows,
        original_total,
        generated_total,
    })
}

/// Flat FTE report for every section of one course, with a `"COURSE TOTAL"`
/// summary row. Co-taught duplicates collapse to one row.
pub fn fte_by_course(
    records: &[SectionRecord],
    tiers: &TierLookup,
    course_code: &str,
) -> Option<FteReport> {
    let course_code = course_code.trim().to_uppercase();
    let filtered: Vec<&SectionRecord> = records
        .iter()
        .filter(|r| {
            r.course_code
                .as_deref()
                .map_or(false, |c| c.eq_ignore_ascii_case(&course_code))
        })
        .collect();
    let filtered = dedup_by_section(filtered);
    if filtered.is_empty() {
        return None;
    }

    let mut rows = Vec::new();
    let mut original_total = 0.0;
    let mut generated_total = 0.0;

    for record in &filtered {
        let generated = generated_fte(tiers, record);
        original_total += record.total_fte.unwrap_or(0.0);
        generated_total += generated;
        rows.push(ReportRow::Section(section_fte(record, generated)));
    }

    rows.push(ReportRow::GrandTotal {
        label: "COURSE TOTAL".to_string(),
        total_fte: original_total,
        generated_fte: generated_total,
    });

    Some(FteReport {
        rows,
        original_total,
        generated_total,
    })
}

/// FTE report for one instructor (exact `Sec Faculty Info` match) with a
/// `"TOTAL"` summary row.
pub fn fte_by_faculty(
    records: &[SectionRecord],
    tiers: &TierLookup,
    faculty_name: &str,
) -> Option<FteReport> {
    let filtered: Vec<&SectionRecord> = records
        .iter()
        .filter(|r| r.faculty_info == faculty_name)
        .collect();
    let filtered = dedup_by_section(filtered);
    if filtered.is_empty() {
        return None;
    }

    let mut rows = Vec::new();
    let mut original_total = 0.0;
    let mut generated_total = 0.0;

    for record in &filtered {
        let generated = generated_fte(tiers, record);
        original_total += record.total_fte.unwrap_or(0.0);
        generated_total += generated;
        rows.push(ReportRow::Section(section_fte(record, generated)));
    }

    rows.push(ReportRow::GrandTotal {
        label: "TOTAL".to_string(),
        total_fte: original_total,
        generated_fte: generated_total,
    });

    Some(FteReport {
        rows,
        original_total,
        generated_total,
    })
}

/// Section row for the flat (course/instructor) views. These views use the
/// 0%-on-zero-capacity enrollment convention and carry no merged-cell
/// blanking; the division cell shows the record's own division.
fn section_fte(record: &SectionRecord, generated: f64) -> SectionFte {
    SectionFte {
        division_label: record.division.clone(),
        course_label: record.course_code.clone().unwrap_or_default(),
        sec_name: record.sec_name.clone(),
        delivery_method: record.delivery_method.clone(),
        meeting_times: record.meeting_times.clone(),
        capacity: record.capacity,
        fte_count: record.fte_count,
        faculty_info: record.faculty_info.clone(),
        total_fte: record.total_fte,
        enrollment_per: enrollment_percent_display(record.capacity, record.fte_count),
        generated_fte: generated,
    }
}

/// Plain listing of every merged record in a division. No FTE math.
pub fn division_section_listing(
    records: &[SectionRecord],
    division_code: &str,
) -> Option<Vec<SectionListingRow>> {
    let division_code = division_code.trim().to_uppercase();
    let rows: Vec<SectionListingRow> = records
        .iter()
        .filter(|r| r.division.eq_ignore_ascii_case(&division_code))
        .map(|r| SectionListingRow {
            division: r.division.clone(),
            course_code: r.course_code.clone().unwrap_or_default(),
            sec_name: r.sec_name.clone(),
            delivery_method: r.delivery_method.clone(),
            meeting_times: r.meeting_times.clone(),
            capacity: display_opt_count(r.capacity),
            fte_count: display_opt_count(r.fte_count),
            faculty_info: r.faculty_info.clone(),
            contact_hours: display_opt_count(r.contact_hours),
            total_fte: display_opt_fte(r.total_fte),
        })
        .collect();
    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

/// Per-section enrollment percentages for one course, using the
/// 0%-on-zero-capacity convention.
pub fn course_enrollment_listing(
    records: &[SectionRecord],
    course_code: &str,
) -> Option<Vec<EnrollmentListingRow>> {
    let course_code = course_code.trim().to_uppercase();
    let filtered: Vec<&SectionRecord> = records
        .iter()
        .filter(|r| {
            r.course_code
                .as_deref()
                .map_or(false, |c| c.eq_ignore_ascii_case(&course_code))
        })
        .collect();
    let filtered = dedup_by_section(filtered);
    if filtered.is_empty() {
        return None;
    }
    Some(
        filtered
            .iter()
            .map(|r| EnrollmentListingRow {
                course_code: r.course_code.clone().unwrap_or_default(),
                sec_name: r.sec_name.clone(),
                faculty_info: r.faculty_info.clone(),
                capacity: display_opt_count(r.capacity),
                fte_count: display_opt_count(r.fte_count),
                enrollment_percentage: enrollment_percent_display(r.capacity, r.fte_count),
            })
            .collect(),
    )
}
