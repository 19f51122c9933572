use crate::error::Result;
use crate::models::Dataset;
use csv::ReaderBuilder;

/// Parse delimited text with a header row, keeping every cell as a string
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut dataset = Dataset::new(columns);

    for record in reader.records() {
        let record = record?;
        dataset.push_row(record.iter().map(str::to_string).collect());
    }

    Ok(dataset)
}

/// Pick the delimiter of an exported sheet from its header line
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    [b'\t', b';', b',']
        .into_iter()
        .max_by_key(|d| header.matches(*d as char).count())
        .filter(|d| header.contains(*d as char))
        .unwrap_or(b'\t')
}
