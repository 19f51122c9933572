use crate::error::Result;
use crate::models::StationRecord;
use crate::processors::record_projection::{map_markers, overlay_markers, MapMarker, OverlayMarker};
use crate::utils::constants::{LAYER_NEW_STATIONS, LAYER_REGISTER, LAYER_REGISTER_RADIUS};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// How the rendering layer draws a layer's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerStyle {
    /// Blue clustered markers with the full register popup
    RegisterMarker,
    /// Circle of `row[6]` metres around each register station
    RadiusCircle,
    /// Red clustered markers for uploaded stations
    NewStationMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LayerRows {
    Register(Vec<MapMarker>),
    Overlay(Vec<OverlayMarker>),
}

impl LayerRows {
    pub fn len(&self) -> usize {
        match self {
            LayerRows::Register(rows) => rows.len(),
            LayerRows::Overlay(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub name: String,
    pub style: LayerStyle,
    pub rows: LayerRows,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapDocument {
    pub generated_at: DateTime<Utc>,
    /// Initial view centre as (lat, lon)
    pub center: (f64, f64),
    pub zoom: u8,
    pub layers: Vec<MapLayer>,
}

pub struct MapLayerWriter {
    center: (f64, f64),
    zoom: u8,
}

impl MapLayerWriter {
    pub fn new() -> Self {
        Self {
            center: (60.0, 20.0),
            zoom: 5,
        }
    }

    /// Register marker and radius layers, plus a layer for uploaded stations
    /// when an overlay is given. Records without a position are left out.
    pub fn build_document(
        &self,
        register: &[StationRecord],
        overlay: Option<&[StationRecord]>,
    ) -> MapDocument {
        let markers = map_markers(register);
        let mut layers = vec![
            MapLayer {
                name: LAYER_REGISTER.to_string(),
                style: LayerStyle::RegisterMarker,
                rows: LayerRows::Register(markers.clone()),
            },
            MapLayer {
                name: LAYER_REGISTER_RADIUS.to_string(),
                style: LayerStyle::RadiusCircle,
                rows: LayerRows::Register(markers),
            },
        ];

        if let Some(uploaded) = overlay {
            layers.push(MapLayer {
                name: LAYER_NEW_STATIONS.to_string(),
                style: LayerStyle::NewStationMarker,
                rows: LayerRows::Overlay(overlay_markers(uploaded)),
            });
        }

        MapDocument {
            generated_at: Utc::now(),
            center: self.center,
            zoom: self.zoom,
            layers,
        }
    }

    pub fn write(&self, document: &MapDocument, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, document)?;

        info!(
            path = %path.display(),
            layers = document.layers.len(),
            "Wrote map layers"
        );
        Ok(())
    }
}

impl Default for MapLayerWriter {
    fn default() -> Self {
        Self::new()
    }
}
