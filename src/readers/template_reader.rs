use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use crate::readers::delimited::{parse_delimited, sniff_delimiter};
use crate::utils::constants::{TEMPLATE_ENCODING, TEMPLATE_SHEET};
use calamine::{open_workbook_auto, Data, Reader};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "tsv", "csv"];

/// Reads an uploaded station template from its named sheet, or from a
/// delimited text export of that sheet
pub struct TemplateReader {
    sheet: String,
    /// Used for text exports that are not valid UTF-8
    fallback_encoding: &'static Encoding,
}

impl TemplateReader {
    pub fn new() -> Self {
        Self::with_sheet(TEMPLATE_SHEET)
    }

    pub fn with_sheet(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            fallback_encoding: Encoding::for_label(TEMPLATE_ENCODING.as_bytes())
                .unwrap_or(encoding_rs::WINDOWS_1252),
        }
    }

    /// Encoding for non-UTF-8 text exports, by WHATWG label
    pub fn with_fallback_encoding(mut self, label: &str) -> Result<Self> {
        self.fallback_encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ProcessingError::UnknownEncoding(label.to_string()))?;
        Ok(self)
    }

    pub fn is_supported(path: &Path) -> bool {
        extension(path).is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) || TEXT_EXTENSIONS.contains(&ext.as_str())
        })
    }

    pub fn read(&self, path: &Path) -> Result<Dataset> {
        if !Self::is_supported(path) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Unsupported template file '{}': expected one of {}",
                path.display(),
                [SPREADSHEET_EXTENSIONS, TEXT_EXTENSIONS].concat().join(", ")
            )));
        }

        let ext = extension(path).unwrap_or_default();
        let dataset = if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            self.read_workbook(path)?
        } else {
            self.read_text(path)?
        };

        info!(path = %path.display(), rows = dataset.len(), "Read station template");
        Ok(dataset)
    }

    fn read_workbook(&self, path: &Path) -> Result<Dataset> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range(&self.sheet)?;

        let mut rows = range.rows();
        let columns = match rows.next() {
            Some(header) => header.iter().map(cell_to_string).collect(),
            None => {
                warn!(sheet = %self.sheet, "Template sheet is empty");
                Vec::new()
            }
        };

        let mut dataset = Dataset::new(columns);
        for row in rows {
            dataset.push_row(row.iter().map(cell_to_string).collect());
        }
        Ok(dataset)
    }

    fn read_text(&self, path: &Path) -> Result<Dataset> {
        let bytes = fs::read(path)?;
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);

        let text = match encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => text,
            None => {
                let (text, had_errors) = self.fallback_encoding.decode_without_bom_handling(bytes);
                if had_errors {
                    warn!(
                        path = %path.display(),
                        encoding = self.fallback_encoding.name(),
                        "Template export is neither UTF-8 nor valid in its fallback encoding"
                    );
                } else {
                    debug!(
                        path = %path.display(),
                        encoding = self.fallback_encoding.name(),
                        "Template export is not UTF-8, decoded with fallback"
                    );
                }
                text
            }
        };
        parse_delimited(&text, sniff_delimiter(&text))
    }
}

impl Default for TemplateReader {
    fn default() -> Self {
        Self::new()
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Render a cell as text; empty cells stay empty strings
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_read_tab_export() -> Result<()> {
        let mut file = Builder::new().suffix(".txt").tempfile()?;
        writeln!(file, "Namn\tPosition WGS84 DM N (DDMM.mm)\tPosition WGS84 DM E (DDMM.mm)\tRadie (m)")?;
        writeln!(file, "Station A\t6012.34\t01823.56\t")?;
        writeln!(file, "\t\t\t")?;

        let ds = TemplateReader::new().read(file.path())?;

        assert_eq!(ds.columns().len(), 4);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "Position WGS84 DM E (DDMM.mm)"), Some("01823.56"));
        assert_eq!(ds.value(0, "Radie (m)"), Some(""));
        Ok(())
    }

    #[test]
    fn test_read_semicolon_csv_export() -> Result<()> {
        let mut file = Builder::new().suffix(".CSV").tempfile()?;
        writeln!(file, "Namn;Position WGS84 Dec N (DD.dddd);Position WGS84 Dec E (DD.dddd)")?;
        writeln!(file, "Älvkarleby;60,57;17,45")?;

        let ds = TemplateReader::new().read(file.path())?;
        assert_eq!(ds.value(0, "Namn"), Some("Älvkarleby"));
        assert_eq!(ds.value(0, "Position WGS84 Dec N (DD.dddd)"), Some("60,57"));
        Ok(())
    }

    #[test]
    fn test_windows_1252_export_falls_back() -> Result<()> {
        let mut file = Builder::new().suffix(".txt").tempfile()?;
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode("Namn\tRadie (m)\r\nÅlängen\t500\r\n");
        file.write_all(&bytes)?;

        let ds = TemplateReader::new().read(file.path())?;
        assert_eq!(ds.value(0, "Namn"), Some("Ålängen"));
        assert_eq!(ds.value(0, "Radie (m)"), Some("500"));
        Ok(())
    }

    #[test]
    fn test_utf8_bom_is_stripped() -> Result<()> {
        let mut file = Builder::new().suffix(".csv").tempfile()?;
        file.write_all("\u{feff}Namn;Radie (m)\nÅlängen;500\n".as_bytes())?;

        let ds = TemplateReader::new().read(file.path())?;
        assert_eq!(ds.columns()[0], "Namn");
        assert_eq!(ds.value(0, "Namn"), Some("Ålängen"));
        Ok(())
    }

    #[test]
    fn test_unknown_fallback_encoding() {
        assert!(matches!(
            TemplateReader::new().with_fallback_encoding("no-such-charset"),
            Err(ProcessingError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = TemplateReader::new().read(Path::new("upload.pdf")).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidFormat(_)));
        assert!(!TemplateReader::is_supported(Path::new("upload.pdf")));
        assert!(TemplateReader::is_supported(Path::new("upload.XLSX")));
    }

    fn workbook_fixture() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/station_template.xlsx")
    }

    #[test]
    fn test_read_workbook_named_sheet() -> Result<()> {
        let ds = TemplateReader::new().read(&workbook_fixture())?;

        assert_eq!(
            ds.columns(),
            &[
                "Namn",
                "Position WGS84 DM N (DDMM.mm)",
                "Position WGS84 DM E (DDMM.mm)",
                "Radie (m)",
                "Kommentar"
            ]
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "Namn"), Some("Station A"));
        assert_eq!(ds.value(0, "Radie (m)"), Some(""));
        assert_eq!(ds.value(1, "Namn"), Some("Ålängen"));
        assert_eq!(ds.value(1, "Radie (m)"), Some("500"));
        assert_eq!(ds.value(1, "Kommentar"), Some(""));
        Ok(())
    }

    #[test]
    fn test_read_workbook_missing_sheet() {
        let err = TemplateReader::with_sheet("Stationer")
            .read(&workbook_fixture())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Spreadsheet(_)));
    }

    #[test]
    fn test_cell_rendering() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("6012,34".to_string())), "6012,34");
        assert_eq!(cell_to_string(&Data::Float(1200.0)), "1200");
        assert_eq!(cell_to_string(&Data::Float(60.5)), "60.5");
        assert_eq!(cell_to_string(&Data::Int(500)), "500");
    }
}
