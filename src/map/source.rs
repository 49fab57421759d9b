use super::projection::{TileCoord, MAX_TILE_ZOOM};
use crate::config::TileSourceConfig;

/// Tile source addressed by an XYZ url template.
#[derive(Clone, Debug, PartialEq)]
pub struct XyzSource {
    url: String,
    max_zoom: u8,
}

impl XyzSource {
    pub fn new(url: impl Into<String>, max_zoom: u8) -> Self {
        Self {
            url: url.into(),
            max_zoom,
        }
    }

    pub fn from_config(config: &TileSourceConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_zoom: config.max_zoom,
        }
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Tile zoom used to render a view at `view_zoom`. Past `max_zoom` the
    /// deepest tiles are stretched.
    pub fn zoom_for(&self, view_zoom: f64) -> u8 {
        let max = self.max_zoom.min(MAX_TILE_ZOOM) as f64;
        view_zoom.round().clamp(0.0, max) as u8
    }

    /// Url for `coord`, or `None` for rows outside the grid.
    pub fn tile_url(&self, coord: &TileCoord) -> Option<String> {
        if coord.y < 0 || coord.y >= TileCoord::tiles_per_side(coord.z) {
            return None;
        }
        Some(
            self.url
                .replace("{z}", &coord.z.to_string())
                .replace("{x}", &coord.wrapped_x().to_string())
                .replace("{y}", &coord.y.to_string()),
        )
    }
}
