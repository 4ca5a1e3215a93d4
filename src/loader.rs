use crate::types::{RawContactHoursRow, RawSectionRow, RawTierRow};
use crate::util::parse_f64_safe;
use csv::ReaderBuilder;
use std::collections::HashMap;
use thiserror::Error;

/// The only fatal condition the core surfaces: an input file that cannot be
/// read at all. Row-level data problems never become errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file missing: {0}")]
    Missing(String),
    #[error("cannot read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parse_errors: usize,
}

fn open_reader(path: &str) -> Result<csv::Reader<std::fs::File>, LoadError> {
    if !std::path::Path::new(path).exists() {
        return Err(LoadError::Missing(path.to_string()));
    }
    ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::Csv {
            path: path.to_string(),
            source: e,
        })
}

/// Load the raw enrollment export. Rows that fail to deserialize are
/// skipped and counted, never fatal.
pub fn load_sections(path: &str) -> Result<(Vec<RawSectionRow>, LoadReport), LoadError> {
    let mut rdr = open_reader(path)?;
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawSectionRow>() {
        total_rows += 1;
        match result {
            Ok(r) => rows.push(r),
            Err(e) => {
                parse_errors += 1;
                log::warn!("skipping enrollment row {}: {}", total_rows, e);
            }
        }
    }
    log::info!(
        "{} loaded: {} rows, {} skipped",
        path,
        rows.len(),
        parse_errors
    );
    Ok((
        rows,
        LoadReport {
            total_rows,
            parse_errors,
        },
    ))
}

/// Load the contact-hours reference table.
pub fn load_contact_hours(path: &str) -> Result<Vec<RawContactHoursRow>, LoadError> {
    let mut rdr = open_reader(path)?;
    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawContactHoursRow>() {
        match result {
            Ok(r) => rows.push(r),
            Err(e) => log::warn!("skipping contact-hours row: {}", e),
        }
    }
    log::info!("{} loaded: {} reference rows", path, rows.len());
    Ok(rows)
}

/// Build the tier lookup from the multiplier reference. Rows with a null
/// prefix key are excluded; an unparsable multiplier falls back to 0.
pub fn load_tier_lookup(path: &str) -> Result<HashMap<String, f64>, LoadError> {
    let mut rdr = open_reader(path)?;
    let mut lookup = HashMap::new();
    for result in rdr.deserialize::<RawTierRow>() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping tier row: {}", e);
                continue;
            }
        };
        let Some(prefix) = row.prefix else { continue };
        let prefix = prefix.trim().to_string();
        if prefix.is_empty() {
            continue;
        }
        let multiplier = parse_f64_safe(row.new_sector.as_deref()).unwrap_or(0.0);
        lookup.insert(prefix, multiplier);
    }
    log::info!("{} loaded: {} tier entries", path, lookup.len());
    Ok(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("fte_report_{}_{}", std::process::id(), name));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_the_fatal_condition() {
        let err = load_sections("no_such_file.csv").unwrap_err();
        assert!(matches!(err, LoadError::Missing(_)));
    }

    #[test]
    fn tier_lookup_excludes_null_keys() {
        let path = temp_csv(
            "tiers.csv",
            "Prefix/Course ID,New Sector\nABC,74\n,99\nDEF,not a number\n",
        );
        let lookup = load_tier_lookup(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("ABC"), Some(&74.0));
        // Unparsable multipliers fall back to 0, the same as a lookup miss.
        assert_eq!(lookup.get("DEF"), Some(&0.0));
    }

    #[test]
    fn enrollment_rows_survive_a_missing_course_code_column() {
        let path = temp_csv(
            "sections.csv",
            "Sec Name,Sec Divisions,Sec Faculty Info,X Sec Delivery Method,Meeting Times,Capacity,FTE Count\n\
             ABC-101-01,SCI,\"Doe, J\",TR,MWF 9:00,30,15\n",
        );
        let (rows, report) = load_sections(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(report.total_rows, 1);
        assert_eq!(report.parse_errors, 0);
        assert_eq!(rows[0].sec_name.as_deref(), Some("ABC-101-01"));
        assert_eq!(rows[0].course_code, None);
    }
}
