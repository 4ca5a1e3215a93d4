// Report Formatter: flattens the report-row variants into display tables.
//
// Currency precision is deliberately uneven and must stay that way: the
// division view renders section rows at 3 decimals but its DIVISION TOTAL
// at 2, and the course/instructor views use 2 decimals throughout. Every
// display row also carries the unformatted number so collaborators can sort
// or plot without re-parsing the currency string.
use crate::types::{
    CourseReportRow, DivisionReportRow, FacultyReportRow, FteReport, ReportRow,
};
use crate::util::{display_opt_count, display_opt_fte, format_currency};

/// Division-view display table, ending with a `"DIVISION TOTAL"` grand row.
pub fn format_division_report(report: &FteReport) -> Vec<DivisionReportRow> {
    let mut out: Vec<DivisionReportRow> = report
        .rows
        .iter()
        .map(|row| match row {
            ReportRow::Section(s) => DivisionReportRow {
                division: s.division_label.clone(),
                course_code: s.course_label.clone(),
                sec_name: s.sec_name.clone(),
                delivery_method: s.delivery_method.clone(),
                meeting_times: s.meeting_times.clone(),
                capacity: display_opt_count(s.capacity),
                fte_count: display_opt_count(s.fte_count),
                faculty_info: s.faculty_info.clone(),
                total_fte: display_opt_fte(s.total_fte),
                enrollment_per: s.enrollment_per.clone(),
                generated_fte: format_currency(s.generated_fte, 3),
                generated_fte_value: s.generated_fte,
            },
            ReportRow::Subtotal {
                label,
                generated_fte,
            } => blank_division_row(label, format!("{:.3}", generated_fte), *generated_fte),
            ReportRow::GrandTotal {
                label,
                generated_fte,
                ..
            } => blank_division_row(label, format_currency(*generated_fte, 2), *generated_fte),
        })
        .collect();

    out.push(blank_division_row(
        "DIVISION TOTAL",
        format_currency(report.generated_total, 2),
        report.generated_total,
    ));
    out
}

fn blank_division_row(label: &str, generated: String, value: f64) -> DivisionReportRow {
    DivisionReportRow {
        division: String::new(),
        course_code: label.to_string(),
        sec_name: String::new(),
        delivery_method: String::new(),
        meeting_times: String::new(),
        capacity: String::new(),
        fte_count: String::new(),
        faculty_info: String::new(),
        total_fte: String::new(),
        enrollment_per: String::new(),
        generated_fte: generated,
        generated_fte_value: value,
    }
}

/// Course-view display table. The aggregator already appended the
/// `"COURSE TOTAL"` row; it renders on the `Sec Name` column.
pub fn format_course_report(report: &FteReport) -> Vec<CourseReportRow> {
    report
        .rows
        .iter()
        .map(|row| match row {
            ReportRow::Section(s) => CourseReportRow {
                sec_name: s.sec_name.clone(),
                delivery_method: s.delivery_method.clone(),
                faculty_info: s.faculty_info.clone(),
                meeting_times: s.meeting_times.clone(),
                capacity: display_opt_count(s.capacity),
                fte_count: display_opt_count(s.fte_count),
                total_fte: display_opt_fte(s.total_fte),
                enrollment_per: s.enrollment_per.clone(),
                generated_fte: format_currency(s.generated_fte, 2),
                generated_fte_value: s.generated_fte,
            },
            ReportRow::Subtotal {
                label,
                generated_fte,
            }
            | ReportRow::GrandTotal {
                label,
                generated_fte,
                ..
            } => {
                let total_fte = match row {
                    ReportRow::GrandTotal { total_fte, .. } => format!("{:.3}", total_fte),
                    _ => String::new(),
                };
                CourseReportRow {
                    sec_name: label.clone(),
                    delivery_method: String::new(),
                    faculty_info: String::new(),
                    meeting_times: String::new(),
                    capacity: String::new(),
                    fte_count: String::new(),
                    total_fte,
                    enrollment_per: String::new(),
                    generated_fte: format_currency(*generated_fte, 2),
                    generated_fte_value: *generated_fte,
                }
            }
        })
        .collect()
}

/// Instructor-view display table; same 2-decimal convention as the course
/// view, `"TOTAL"` row already appended by the aggregator.
pub fn format_faculty_report(report: &FteReport) -> Vec<FacultyReportRow> {
    report
        .rows
        .iter()
        .map(|row| match row {
            ReportRow::Section(s) => FacultyReportRow {
                sec_name: s.sec_name.clone(),
                division: s.division_label.clone(),
                delivery_method: s.delivery_method.clone(),
                meeting_times: s.meeting_times.clone(),
                capacity: display_opt_count(s.capacity),
                fte_count: display_opt_count(s.fte_count),
                total_fte: display_opt_fte(s.total_fte),
                enrollment_per: s.enrollment_per.clone(),
                generated_fte: format_currency(s.generated_fte, 2),
                generated_fte_value: s.generated_fte,
            },
            ReportRow::Subtotal {
                label,
                generated_fte,
            }
            | ReportRow::GrandTotal {
                label,
                generated_fte,
                ..
            } => {
                let total_fte = match row {
                    ReportRow::GrandTotal { total_fte, .. } => format!("{:.3}", total_fte),
                    _ => String::new(),
                };
                FacultyReportRow {
                    sec_name: label.clone(),
                    division: String::new(),
                    delivery_method: String::new(),
                    meeting_times: String::new(),
                    capacity: String::new(),
                    fte_count: String::new(),
                    total_fte,
                    enrollment_per: String::new(),
                    generated_fte: format_currency(*generated_fte, 2),
                    generated_fte_value: *generated_fte,
                }
            }
        })
        .collect()
}
