use crate::error::Result;
use crate::utils::constants::{
    CONFIG_FILE, DEFAULT_RADIUS, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_PREFIX, REGISTER_ENCODING,
    REGISTER_FILE, TEMPLATE_ENCODING, TEMPLATE_SHEET,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime settings: defaults, then an optional TOML file, then `STNREG_*`
/// environment variables
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub register_path: PathBuf,
    pub register_encoding: String,
    pub template_sheet: String,
    /// Fallback for template text exports that are not UTF-8
    pub template_encoding: String,
    pub default_radius: u32,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            register_path: PathBuf::from(REGISTER_FILE),
            register_encoding: REGISTER_ENCODING.to_string(),
            template_sheet: TEMPLATE_SHEET.to_string(),
            template_encoding: TEMPLATE_ENCODING.to_string(),
            default_radius: DEFAULT_RADIUS,
            api_url: None,
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings; an explicit `path` must exist, the default file may not
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };
        Self::from_sources(file, Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(file: File<config::FileSourceFile, config::FileFormat>, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(file)
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
