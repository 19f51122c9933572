pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{decmin_to_decdeg, parse_decimal, round_coordinate};
pub use filename::{generate_default_map_filename, generate_default_records_filename};
pub use progress::ProgressReporter;
