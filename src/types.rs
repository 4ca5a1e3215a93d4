use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One row of the enrollment export (`deanDailyCsar.csv`), exactly as it
/// appears on disk. Every field is optional because the export routinely
/// ships blank cells; the `Course Code` column only exists in some exports.
#[derive(Debug, Deserialize)]
pub struct RawSectionRow {
    #[serde(rename = "Sec Name")]
    pub sec_name: Option<String>,
    #[serde(rename = "Sec Divisions")]
    pub division: Option<String>,
    #[serde(rename = "Sec Faculty Info")]
    pub faculty_info: Option<String>,
    #[serde(rename = "X Sec Delivery Method")]
    pub delivery_method: Option<String>,
    #[serde(rename = "Meeting Times")]
    pub meeting_times: Option<String>,
    #[serde(rename = "Capacity")]
    pub capacity: Option<String>,
    #[serde(rename = "FTE Count")]
    pub fte_count: Option<String>,
    #[serde(rename = "Course Code", default)]
    pub course_code: Option<String>,
}

/// One row of the contact-hours reference (`deanDailyCsar_FTE.csv`).
#[derive(Debug, Deserialize)]
pub struct RawContactHoursRow {
    #[serde(rename = "Sec Name", default)]
    pub sec_name: Option<String>,
    #[serde(rename = "Course Code", default)]
    pub course_code: Option<String>,
    #[serde(rename = "Contact Hours")]
    pub contact_hours: Option<String>,
}

/// One row of the tier-multiplier reference (`FTE_Tier.csv`).
#[derive(Debug, Deserialize)]
pub struct RawTierRow {
    #[serde(rename = "Prefix/Course ID")]
    pub prefix: Option<String>,
    #[serde(rename = "New Sector")]
    pub new_sector: Option<String>,
}

/// A cleaned enrollment section after the reference merge. Missing numeric
/// fields stay `None` so their absence remains visible downstream; they are
/// only treated as zero inside aggregation sums.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRecord {
    pub sec_name: String,
    pub division: String,
    pub faculty_info: String,
    pub delivery_method: String,
    pub meeting_times: String,
    pub course_code: Option<String>,
    pub capacity: Option<f64>,
    pub fte_count: Option<f64>,
    pub contact_hours: Option<f64>,
    /// `round(contact_hours * 16 * fte_count / 512, 3)`; `None` when either
    /// operand is missing.
    pub total_fte: Option<f64>,
}

/// One section row of an FTE report, with the merged-cell label blanking
/// already applied (only the first row of a division/course group carries
/// the label).
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFte {
    pub division_label: String,
    pub course_label: String,
    pub sec_name: String,
    pub delivery_method: String,
    pub meeting_times: String,
    pub capacity: Option<f64>,
    pub fte_count: Option<f64>,
    pub faculty_info: String,
    pub total_fte: Option<f64>,
    pub enrollment_per: String,
    pub generated_fte: f64,
}

/// A report row. Numeric amounts stay numeric here; only the formatter
/// produces display strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    Section(SectionFte),
    /// Mid-sequence course subtotal in the division view, labeled `"Total"`.
    Subtotal { label: String, generated_fte: f64 },
    /// Trailing summary row (`"COURSE TOTAL"`, `"TOTAL"`, `"DIVISION TOTAL"`).
    GrandTotal {
        label: String,
        total_fte: f64,
        generated_fte: f64,
    },
}

/// Aggregator output: the row sequence plus the two running totals. Totals
/// are accumulated during the pass, never recomputed from formatted rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FteReport {
    pub rows: Vec<ReportRow>,
    pub original_total: f64,
    pub generated_total: f64,
}

/// Division-view display row. `generated_fte_value` is the machine-readable
/// copy of the formatted `Generated FTE` cell, kept for sorting/plotting.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DivisionReportRow {
    #[serde(rename = "Division")]
    #[tabled(rename = "Division")]
    pub division: String,
    #[serde(rename = "Course Code")]
    #[tabled(rename = "Course Code")]
    pub course_code: String,
    #[serde(rename = "Sec Name")]
    #[tabled(rename = "Sec Name")]
    pub sec_name: String,
    #[serde(rename = "X Sec Delivery Method")]
    #[tabled(rename = "X Sec Delivery Method")]
    pub delivery_method: String,
    #[serde(rename = "Meeting Times")]
    #[tabled(rename = "Meeting Times")]
    pub meeting_times: String,
    #[serde(rename = "Capacity")]
    #[tabled(rename = "Capacity")]
    pub capacity: String,
    #[serde(rename = "FTE Count")]
    #[tabled(rename = "FTE Count")]
    pub fte_count: String,
    #[serde(rename = "Sec Faculty Info")]
    #[tabled(rename = "Sec Faculty Info")]
    pub faculty_info: String,
    #[serde(rename = "Total FTE")]
    #[tabled(rename = "Total FTE")]
    pub total_fte: String,
    #[serde(rename = "Enrollment Per")]
    #[tabled(rename = "Enrollment Per")]
    pub enrollment_per: String,
    #[serde(rename = "Generated FTE")]
    #[tabled(rename = "Generated FTE")]
    pub generated_fte: String,
    #[serde(rename = "Generated FTE Value")]
    #[tabled(rename = "Generated FTE Value")]
    pub generated_fte_value: f64,
}

/// Course-view display row (flat, no division/course columns).
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CourseReportRow {
    #[serde(rename = "Sec Name")]
    #[tabled(rename = "Sec Name")]
    pub sec_name: String,
    #[serde(rename = "X Sec Delivery Method")]
    #[tabled(rename = "X Sec Delivery Method")]
    pub delivery_method: String,
    #[serde(rename = "Sec Faculty Info")]
    #[tabled(rename = "Sec Faculty Info")]
    pub faculty_info: String,
    #[serde(rename = "Meeting Times")]
    #[tabled(rename = "Meeting Times")]
    pub meeting_times: String,
    #[serde(rename = "Capacity")]
    #[tabled(rename = "Capacity")]
    pub capacity: String,
    #[serde(rename = "FTE Count")]
    #[tabled(rename = "FTE Count")]
    pub fte_count: String,
    #[serde(rename = "Total FTE")]
    #[tabled(rename = "Total FTE")]
    pub total_fte: String,
    #[serde(rename = "Enrollment Per")]
    #[tabled(rename = "Enrollment Per")]
    pub enrollment_per: String,
    #[serde(rename = "Generated FTE")]
    #[tabled(rename = "Generated FTE")]
    pub generated_fte: String,
    #[serde(rename = "Generated FTE Value")]
    #[tabled(rename = "Generated FTE Value")]
    pub generated_fte_value: f64,
}

/// Instructor-view display row; keeps the division column since one
/// instructor can teach across divisions.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct FacultyReportRow {
    #[serde(rename = "Sec Name")]
    #[tabled(rename = "Sec Name")]
    pub sec_name: String,
    #[serde(rename = "Sec Divisions")]
    #[tabled(rename = "Sec Divisions")]
    pub division: String,
    #[serde(rename = "X Sec Delivery Method")]
    #[tabled(rename = "X Sec Delivery Method")]
    pub delivery_method: String,
    #[serde(rename = "Meeting Times")]
    #[tabled(rename = "Meeting Times")]
    pub meeting_times: String,
    #[serde(rename = "Capacity")]
    #[tabled(rename = "Capacity")]
    pub capacity: String,
    #[serde(rename = "FTE Count")]
    #[tabled(rename = "FTE Count")]
    pub fte_count: String,
    #[serde(rename = "Total FTE")]
    #[tabled(rename = "Total FTE")]
    pub total_fte: String,
    #[serde(rename = "Enrollment Per")]
    #[tabled(rename = "Enrollment Per")]
    pub enrollment_per: String,
    #[serde(rename = "Generated FTE")]
    #[tabled(rename = "Generated FTE")]
    pub generated_fte: String,
    #[serde(rename = "Generated FTE Value")]
    #[tabled(rename = "Generated FTE Value")]
    pub generated_fte_value: f64,
}

/// Plain listing row for the division section report (no FTE math).
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SectionListingRow {
    #[serde(rename = "Sec Divisions")]
    #[tabled(rename = "Sec Divisions")]
    pub division: String,
    #[serde(rename = "Course Code")]
    #[tabled(rename = "Course Code")]
    pub course_code: String,
    #[serde(rename = "Sec Name")]
    #[tabled(rename = "Sec Name")]
    pub sec_name: String,
    #[serde(rename = "X Sec Delivery Method")]
    #[tabled(rename = "X Sec Delivery Method")]
    pub delivery_method: String,
    #[serde(rename = "Meeting Times")]
    #[tabled(rename = "Meeting Times")]
    pub meeting_times: String,
    #[serde(rename = "Capacity")]
    #[tabled(rename = "Capacity")]
    pub capacity: String,
    #[serde(rename = "FTE Count")]
    #[tabled(rename = "FTE Count")]
    pub fte_count: String,
    #[serde(rename = "Sec Faculty Info")]
    #[tabled(rename = "Sec Faculty Info")]
    pub faculty_info: String,
    #[serde(rename = "Contact Hours")]
    #[tabled(rename = "Contact Hours")]
    pub contact_hours: String,
    #[serde(rename = "Total FTE")]
    #[tabled(rename = "Total FTE")]
    pub total_fte: String,
}

/// Course enrollment percentage listing row.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct EnrollmentListingRow {
    #[serde(rename = "Course Code")]
    #[tabled(rename = "Course Code")]
    pub course_code: String,
    #[serde(rename = "Sec Name")]
    #[tabled(rename = "Sec Name")]
    pub sec_name: String,
    #[serde(rename = "Sec Faculty Info")]
    #[tabled(rename = "Sec Faculty Info")]
    pub faculty_info: String,
    #[serde(rename = "Capacity")]
    #[tabled(rename = "Capacity")]
    pub capacity: String,
    #[serde(rename = "FTE Count")]
    #[tabled(rename = "FTE Count")]
    pub fte_count: String,
    #[serde(rename = "Enrollment Percentage")]
    #[tabled(rename = "Enrollment Percentage")]
    pub enrollment_percentage: String,
}

/// Totals exported next to each report as JSON.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub report: String,
    pub key: String,
    pub total_fte: f64,
    pub generated_fte: f64,
}
