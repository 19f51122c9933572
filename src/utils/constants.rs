/// Canonical field names
pub const PREFERRED_NAME: &str = "preferred_name";
pub const LAT_DD: &str = "lat_dd";
pub const LON_DD: &str = "lon_dd";
pub const LAT_DM: &str = "lat_dm";
pub const LON_DM: &str = "lon_dm";
pub const SWEREF99_N: &str = "sweref99_n";
pub const SWEREF99_E: &str = "sweref99_e";
pub const RADIUS: &str = "radius";
pub const LOCAL_ID: &str = "local_id";
pub const STATION_GROUP_ID: &str = "station_group_id";
pub const SYNONYMS: &str = "synonyms";
pub const COMMENT: &str = "comment";

/// Source file defaults
pub const REGISTER_FILE: &str = "data/station.txt";
pub const REGISTER_ENCODING: &str = "windows-1252";
pub const TEMPLATE_SHEET: &str = "Provplatser";
pub const TEMPLATE_ENCODING: &str = "windows-1252";
pub const CONFIG_FILE: &str = "station-register.toml";
pub const ENV_PREFIX: &str = "STNREG";

/// Synonym delimiters
pub const SYNONYM_SOURCE_DELIMITER: &str = "<or>";
pub const SYNONYM_DISPLAY_DELIMITER: &str = "; ";

/// Radius defaults (metres)
pub const DEFAULT_RADIUS: u32 = 1200;

/// Decimal places kept for derived coordinates
pub const COORDINATE_DECIMALS: i32 = 6;

/// WGS84 bounds
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// SWEREF99 TM (EPSG:3006) on the GRS80 ellipsoid
pub const SWEREF99_EPSG: u16 = 3006;
pub const WGS84_EPSG: u16 = 4326;
pub const SWEREF99_PROJ_STRING: &str =
    "+proj=utm +zone=33 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs";
pub const WGS84_PROJ_STRING: &str = "+proj=longlat +datum=WGS84 +no_defs";
pub const GRS80_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
pub const GRS80_FLATTENING: f64 = 1.0 / 298.257_222_101;
pub const SWEREF99_CENTRAL_MERIDIAN: f64 = 15.0;
pub const SWEREF99_SCALE: f64 = 0.9996;
pub const SWEREF99_FALSE_NORTHING: f64 = 0.0;
pub const SWEREF99_FALSE_EASTING: f64 = 500_000.0;

/// Register API
pub const API_KEY_HEADER: &str = "X-STNREG-APIKEY";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Map layer names
pub const LAYER_REGISTER: &str = "Register stations";
pub const LAYER_REGISTER_RADIUS: &str = "Register stations Radius";
pub const LAYER_NEW_STATIONS: &str = "New stations";
