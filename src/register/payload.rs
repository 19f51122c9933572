use crate::models::StationRecord;
use serde_json::{Map, Number, Value};

/// Attributes the national station register accepts on create
pub const VALID_ATTRIBUTES: &[&str] = &[
    "local_id",
    "station_localid",
    "preferred_name",
    "responsible_datahost_name",
    "position_n",
    "position_sweref99_n",
    "position_e",
    "position_sweref99_e",
    "position_wgs84_dec_n",
    "position_wgs84_dec_e",
    "position_wgs84_dm_n",
    "position_wgs84_dm_e",
    "validated",
    "comment",
    "synonyms",
    "county_id",
    "older_site_id",
    "eu_cd",
    "associated_datahosts",
    "media",
    "facilityType",
    "classified",
    "sjoid_ri",
    "vdrid_ri",
    "sjoid_smhi_sjoregister",
];

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Drop keys the register does not know and keys without a value
pub fn validate_data(data: &mut Map<String, Value>) {
    data.retain(|key, value| VALID_ATTRIBUTES.contains(&key.as_str()) && !is_falsy(value));
}

/// Register create payload for one record, already filtered
pub fn record_payload(record: &StationRecord) -> Map<String, Value> {
    let mut data = Map::new();
    let mut text = |key: &str, value: &Option<String>| {
        if let Some(v) = value {
            data.insert(key.to_string(), Value::String(v.clone()));
        }
    };

    text("local_id", &record.local_id);
    text("position_wgs84_dm_n", &record.lat_dm);
    text("position_wgs84_dm_e", &record.lon_dm);
    text("position_sweref99_n", &record.sweref99_n);
    text("position_sweref99_e", &record.sweref99_e);
    text("synonyms", &record.synonyms);

    // Free-form attributes never override the dedicated fields above
    for (key, value) in &record.attributes {
        data.entry(key.clone())
            .or_insert_with(|| Value::String(value.clone()));
    }

    data.insert(
        "preferred_name".to_string(),
        Value::String(record.preferred_name.clone()),
    );
    for (key, value) in [
        ("position_wgs84_dec_n", record.lat_dd),
        ("position_wgs84_dec_e", record.lon_dd),
    ] {
        if let Some(number) = value.and_then(Number::from_f64) {
            data.insert(key.to_string(), Value::Number(number));
        }
    }

    validate_data(&mut data);
    data
}
