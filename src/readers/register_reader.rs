use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use crate::readers::delimited::parse_delimited;
use crate::utils::constants::REGISTER_ENCODING;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Reads the tab-delimited master register in its legacy single-byte encoding
pub struct RegisterReader {
    encoding: &'static Encoding,
}

impl RegisterReader {
    pub fn new() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Use the encoding named by a WHATWG label such as `windows-1252` or `latin1`
    pub fn with_encoding_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ProcessingError::UnknownEncoding(label.to_string()))?;
        Ok(Self { encoding })
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Read the register from disk; read fresh on every call
    pub fn read(&self, path: &Path) -> Result<Dataset> {
        let bytes = fs::read(path)?;
        let dataset = self.read_bytes(&bytes)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            encoding = self.encoding.name(),
            "Read station register"
        );
        Ok(dataset)
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(
                encoding = used.name(),
                "Register contains bytes that are not valid in its encoding"
            );
        }
        parse_delimited(&text, b'\t')
    }
}

impl Default for RegisterReader {
    fn default() -> Self {
        Self::with_encoding_label(REGISTER_ENCODING).unwrap_or_else(|_| Self::new())
    }
}
