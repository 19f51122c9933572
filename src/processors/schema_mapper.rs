use crate::models::Dataset;
use crate::utils::constants::{
    COMMENT, LAT_DD, LAT_DM, LOCAL_ID, LON_DD, LON_DM, PREFERRED_NAME, RADIUS, STATION_GROUP_ID,
    SWEREF99_E, SWEREF99_N, SYNONYMS,
};
use std::collections::HashMap;
use tracing::debug;

/// Master register headers
const REGISTER_COLUMNS: &[(&str, &str)] = &[
    ("STATION_NAME", PREFERRED_NAME),
    ("LATITUDE_WGS84_SWEREF99_DD", LAT_DD),
    ("LONGITUDE_WGS84_SWEREF99_DD", LON_DD),
    ("LAT_DM", LAT_DM),
    ("LONG_DM", LON_DM),
    ("LATITUDE_SWEREF99TM", SWEREF99_N),
    ("LONGITUDE_SWEREF99TM", SWEREF99_E),
    ("OUT_OF_BOUNDS_RADIUS", RADIUS),
    ("REG_ID", LOCAL_ID),
    ("REG_ID_GROUP", STATION_GROUP_ID),
    ("SYNONYM_NAMES", SYNONYMS),
];

/// Upload template ("Provplatser" sheet) headers
const TEMPLATE_COLUMNS: &[(&str, &str)] = &[
    ("Namn", PREFERRED_NAME),
    ("Position WGS84 Dec N (DD.dddd)", LAT_DD),
    ("Position WGS84 Dec E (DD.dddd)", LON_DD),
    ("Position WGS84 DM N (DDMM.mm)", LAT_DM),
    ("Position WGS84 DM E (DDMM.mm)", LON_DM),
    ("Position SWEREF99 TM N (xxxxxx)", SWEREF99_N),
    ("Position SWEREF99 TM E (xxxxxx)", SWEREF99_E),
    ("Radie (m)", RADIUS),
    ("Lokalt ID", LOCAL_ID),
    ("Synonymer", SYNONYMS),
    ("Kommentar", COMMENT),
];

/// Translates source-specific headers into canonical field names.
///
/// Headers without an entry pass through untouched.
#[derive(Debug, Clone)]
pub struct SchemaMapper {
    table: HashMap<String, String>,
}

impl SchemaMapper {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn register() -> Self {
        Self::new(REGISTER_COLUMNS.iter().copied())
    }

    pub fn template() -> Self {
        Self::new(TEMPLATE_COLUMNS.iter().copied())
    }

    /// Canonical name for a header; unknown headers come back unchanged
    pub fn canonical_name<'a>(&'a self, header: &'a str) -> &'a str {
        self.table
            .get(header.trim())
            .map(String::as_str)
            .unwrap_or(header)
    }

    pub fn map_columns(&self, dataset: &mut Dataset) {
        let mut renamed = 0usize;
        dataset.rename_columns(|header| {
            let canonical = self.canonical_name(header);
            if canonical == header {
                return None;
            }
            renamed += 1;
            Some(canonical.to_string())
        });
        debug!(renamed, columns = dataset.columns().len(), "Mapped column headers");
    }
}
