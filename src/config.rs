//! Map, layer and lens settings. Defaults reproduce the Flemish historical
//! map lens; a JSON override can be stored in `localStorage`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::map::projection::MAX_TILE_ZOOM;
use crate::util::{clog, cwarn};

pub const CONFIG_STORAGE_KEY: &str = "lens_map_config";

const ATTRIBUTIONS: &str = "<a href=\"https://www.maptiler.com/copyright/\" target=\"_blank\">&copy; MapTiler</a> \
<a href=\"https://www.openstreetmap.org/copyright\" target=\"_blank\">&copy; OpenStreetMap contributors</a>";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSourceConfig {
    pub name: String,
    /// XYZ template with `{x}`, `{y}` and `{z}` placeholders.
    pub url: String,
    pub max_zoom: u8,
    /// Attribution HTML shown in the attribution panel.
    #[serde(default)]
    pub attributions: Vec<String>,
    /// Whether the lens clips this layer.
    #[serde(default)]
    pub clipped_by_lens: bool,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

fn full_opacity() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub center_lon_lat: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_lon_lat: [3.6066, 50.8266],
            zoom: 15.0,
            min_zoom: 0.0,
            max_zoom: 22.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    pub step: f64,
    pub default_radius: f64,
    /// Ring stroke width in CSS pixels.
    pub ring_width: f64,
    pub ring_color: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            min_radius: 25.0,
            max_radius: 150.0,
            step: 5.0,
            default_radius: 75.0,
            ring_width: 5.0,
            ring_color: "rgba(0,0,0,0.5)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Bottom to top.
    pub layers: Vec<TileSourceConfig>,
    pub view: ViewConfig,
    pub lens: LensConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                TileSourceConfig {
                    name: "current".to_string(),
                    url: "https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}".to_string(),
                    max_zoom: 22,
                    attributions: vec![ATTRIBUTIONS.to_string()],
                    clipped_by_lens: false,
                    opacity: 1.0,
                },
                TileSourceConfig {
                    name: "historical".to_string(),
                    url: "https://geo.api.vlaanderen.be/HISTCART/wmts?SERVICE=WMTS&VERSION=1.0.0\
&REQUEST=GetTile&LAYER=abw&STYLE=&FORMAT=image/png&TILEMATRIXSET=GoogleMapsVL\
&TILEMATRIX={z}&TILEROW={y}&TILECOL={x}"
                        .to_string(),
                    max_zoom: 20,
                    attributions: vec![ATTRIBUTIONS.to_string()],
                    clipped_by_lens: true,
                    opacity: 1.0,
                },
            ],
            view: ViewConfig::default(),
            lens: LensConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.is_empty() {
            return Err(ConfigError::EmptyLayers);
        }
        for layer in &self.layers {
            if layer.max_zoom > MAX_TILE_ZOOM {
                return Err(ConfigError::BadZoom {
                    zoom: layer.max_zoom as f64,
                    min: 0.0,
                    max: MAX_TILE_ZOOM as f64,
                });
            }
            if !(0.0..=1.0).contains(&layer.opacity) {
                return Err(ConfigError::BadOpacity {
                    layer: layer.name.clone(),
                    opacity: layer.opacity,
                });
            }
            if !["{x}", "{y}", "{z}"].iter().all(|p| layer.url.contains(p)) {
                return Err(ConfigError::BadTemplate {
                    url: layer.url.clone(),
                });
            }
        }
        let lens = &self.lens;
        if !(lens.step > 0.0 && lens.min_radius > 0.0 && lens.min_radius <= lens.max_radius) {
            return Err(ConfigError::BadLensBounds {
                min: lens.min_radius,
                max: lens.max_radius,
                step: lens.step,
            });
        }
        let view = &self.view;
        if !(0.0 <= view.min_zoom && view.max_zoom <= MAX_TILE_ZOOM as f64) {
            return Err(ConfigError::BadZoom {
                zoom: view.max_zoom,
                min: 0.0,
                max: MAX_TILE_ZOOM as f64,
            });
        }
        if !(view.min_zoom <= view.zoom && view.zoom <= view.max_zoom) {
            return Err(ConfigError::BadZoom {
                zoom: view.zoom,
                min: view.min_zoom,
                max: view.max_zoom,
            });
        }
        Ok(())
    }

    /// Defaults, replaced by a valid override from `localStorage` if present.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match MapConfig::from_json(&raw) {
                Ok(config) => {
                    clog(&format!("loaded {} override", CONFIG_STORAGE_KEY));
                    config
                }
                Err(e) => {
                    cwarn(&format!("ignoring {}: {}", CONFIG_STORAGE_KEY, e));
                    MapConfig::default()
                }
            },
            None => MapConfig::default(),
        }
    }

    /// De-duplicated attribution HTML across all layers, in layer order.
    pub fn attributions(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for a in self.layers.iter().flat_map(|l| l.attributions.iter()) {
            if !seen.contains(a) {
                seen.push(a.clone());
            }
        }
        seen
    }
}
