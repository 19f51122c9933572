pub mod map_layer_writer;
pub mod record_writer;

pub use map_layer_writer::{LayerRows, LayerStyle, MapDocument, MapLayer, MapLayerWriter};
pub use record_writer::write_records;
