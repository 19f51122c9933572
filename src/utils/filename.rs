use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

fn date_stamp() -> String {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    format!("{:02}{:02}{:02}", year, now.month(), now.day())
}

/// Generate default map layer filename with format: station-map-{YYMMDD}.json
pub fn generate_default_map_filename() -> PathBuf {
    PathBuf::from("output").join(format!("station-map-{}.json", date_stamp()))
}

/// Generate default normalized-records filename from the uploaded file stem:
/// {stem}-normalized-{YYMMDD}.json
pub fn generate_default_records_filename(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("stations");

    PathBuf::from("output").join(format!("{}-normalized-{}.json", stem, date_stamp()))
}
