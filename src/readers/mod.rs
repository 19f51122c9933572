pub mod delimited;
pub mod register_reader;
pub mod template_reader;

pub use delimited::{parse_delimited, sniff_delimiter};
pub use register_reader::RegisterReader;
pub use template_reader::TemplateReader;
