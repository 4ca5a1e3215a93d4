// Entry point and high-level CLI flow.
//
// The binary replaces the original web front end with a numbered menu:
// - Option [1] loads the three input files and runs the reference merge.
// - Options [2]..[6] generate one report each for a user-entered key,
//   preview it as a markdown table and export it as CSV (+ a JSON totals
//   summary for the FTE reports).
mod format;
mod loader;
mod merge;
mod output;
mod reports;
mod types;
mod util;

use once_cell::sync::Lazy;
use reports::TierLookup;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{ReportSummary, SectionRecord};

const SECTIONS_FILE: &str = "deanDailyCsar.csv";
const CONTACT_HOURS_FILE: &str = "deanDailyCsar_FTE.csv";
const TIER_FILE: &str = "FTE_Tier.csv";
const PREVIEW_ROWS: usize = 10;

// In-memory session state: the merged dataset and tier lookup are loaded
// once and treated as immutable for the rest of the run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        records: None,
        tiers: None,
    })
});

struct AppState {
    records: Option<Vec<SectionRecord>>,
    tiers: Option<TierLookup>,
}

/// Read a single line of input after printing a prompt.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    read_line("Enter choice: ")
}

/// Handle option [1]: load the three input files and merge.
///
/// A missing or unreadable file is the one fatal condition; data-quality
/// problems inside the files are absorbed row by row.
fn handle_load() {
    let (raw, load_report) = match loader::load_sections(SECTIONS_FILE) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Cannot proceed: {}\n", e);
            return;
        }
    };
    let reference = match loader::load_contact_hours(CONTACT_HOURS_FILE) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Cannot proceed: {}\n", e);
            return;
        }
    };
    let tiers = match loader::load_tier_lookup(TIER_FILE) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Cannot proceed: {}\n", e);
            return;
        }
    };

    let records = merge::merge(&raw, &reference);
    println!(
        "Processing dataset... ({} rows loaded, {} merged sections)",
        util::format_int(load_report.total_rows as i64),
        util::format_int(records.len() as i64)
    );
    if load_report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse errors.",
            util::format_int(load_report.parse_errors as i64)
        );
    }
    println!();

    let mut state = APP_STATE.lock().unwrap();
    state.records = Some(records);
    state.tiers = Some(tiers);
}

/// Clone the loaded session data, or complain if option [1] hasn't run.
fn session_data() -> Option<(Vec<SectionRecord>, TierLookup)> {
    let state = APP_STATE.lock().unwrap();
    match (&state.records, &state.tiers) {
        (Some(r), Some(t)) => Some((r.clone(), t.clone())),
        _ => {
            println!("Error: No data loaded. Please load the files first (option 1).\n");
            None
        }
    }
}

fn export_fte_report<T: serde::Serialize>(
    rows: &[T],
    file: &str,
    report: &str,
    key: &str,
    original_total: f64,
    generated_total: f64,
) {
    if let Err(e) = output::write_csv(file, rows) {
        eprintln!("Write error: {}", e);
    }
    let summary = ReportSummary {
        report: report.to_string(),
        key: key.to_string(),
        total_fte: original_total,
        generated_fte: generated_total,
    };
    let summary_file = format!("{}_summary.json", file.trim_end_matches(".csv"));
    if let Err(e) = output::write_json(&summary_file, &summary) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})", file);
    println!("Total FTE: {:.3}", original_total);
    println!(
        "Generated FTE: {}\n",
        util::format_currency(generated_total, 2)
    );
}

fn handle_fte_by_division() {
    let Some((records, tiers)) = session_data() else {
        return;
    };
    let division = read_line("Enter division code (e.g. ENG): ");
    let Some(report) = reports::fte_by_division(&records, &tiers, &division) else {
        println!("No data found for division '{}'.\n", division);
        return;
    };
    let rows = format::format_division_report(&report);
    println!("\nFTE by Division: {}\n", division.to_uppercase());
    output::preview_table_rows(&rows, PREVIEW_ROWS);
    export_fte_report(
        &rows,
        &format!("{}_FTE_Report.csv", division.to_uppercase()),
        "FTE by Division",
        &division.to_uppercase(),
        report.original_total,
        report.generated_total,
    );
}

fn handle_fte_by_course() {
    let Some((records, tiers)) = session_data() else {
        return;
    };
    let course = read_line("Enter course code (e.g. ENG-111): ");
    let Some(report) = reports::fte_by_course(&records, &tiers, &course) else {
        println!("Course not found: '{}'.\n", course);
        return;
    };
    let rows = format::format_course_report(&report);
    println!("\nFTE per Course: {}\n", course.to_uppercase());
    output::preview_table_rows(&rows, PREVIEW_ROWS);
    export_fte_report(
        &rows,
        &format!("{}_FTE_Report.csv", course.to_uppercase()),
        "FTE per Course",
        &course.to_uppercase(),
        report.original_total,
        report.generated_total,
    );
}

fn handle_fte_by_faculty() {
    let Some((records, tiers)) = session_data() else {
        return;
    };
    let faculty = read_line("Enter instructor name (exact Sec Faculty Info): ");
    let Some(report) = reports::fte_by_faculty(&records, &tiers, &faculty) else {
        println!("No sections found for instructor '{}'.\n", faculty);
        return;
    };
    let rows = format::format_faculty_report(&report);
    println!("\nFTE per Instructor: {}\n", faculty);
    output::preview_table_rows(&rows, PREVIEW_ROWS);
    let file = format!(
        "{}_FTE_Report.csv",
        faculty.replace([',', ' '], "_").replace("__", "_")
    );
    export_fte_report(
        &rows,
        &file,
        "FTE per Instructor",
        &faculty,
        report.original_total,
        report.generated_total,
    );
}

fn handle_division_listing() {
    let Some((records, _)) = session_data() else {
        return;
    };
    let division = read_line("Enter division code (e.g. ENG): ");
    let Some(rows) = reports::division_section_listing(&records, &division) else {
        println!("No data found for division '{}'.\n", division);
        return;
    };
    println!("\nSec Division Report: {}\n", division.to_uppercase());
    output::preview_table_rows(&rows, PREVIEW_ROWS);
    let file = format!("{}_Division_Report.csv", division.to_uppercase());
    if let Err(e) = output::write_csv(&file, &rows) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", file);
}

fn handle_enrollment_listing() {
    let Some((records, _)) = session_data() else {
        return;
    };
    let course = read_line("Enter course code (e.g. ENG-111): ");
    let Some(rows) = reports::course_enrollment_listing(&records, &course) else {
        println!("Course not found: '{}'.\n", course);
        return;
    };
    println!("\nCourse Enrollment Percentage: {}\n", course.to_uppercase());
    output::preview_table_rows(&rows, PREVIEW_ROWS);
    let file = format!("{}_Course_Report.csv", course.to_uppercase());
    if let Err(e) = output::write_csv(&file, &rows) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", file);
}

fn main() {
    env_logger::init();
    loop {
        println!("FTE Report Generator");
        println!("[1] Load data files");
        println!("[2] FTE by Division");
        println!("[3] FTE per Course");
        println!("[4] FTE per Instructor");
        println!("[5] Sec Division Report");
        println!("[6] Course Enrollment Percentage");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => handle_load(),
            "2" => handle_fte_by_division(),
            "3" => handle_fte_by_course(),
            "4" => handle_fte_by_faculty(),
            "5" => handle_division_listing(),
            "6" => handle_enrollment_listing(),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-6.\n"),
        }
    }
}
