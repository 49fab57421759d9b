use std::rc::Rc;

use super::canvas::CanvasSurface;
use super::projection::{resolution_for_zoom, visible_tiles, TILE_SIZE};
use super::source::XyzSource;
use super::view::{Size, View};
use crate::config::TileSourceConfig;
use crate::render::LayerHooks;

/// Where one tile lands on the canvas, in device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePlacement {
    pub url: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Tiles of `source` covering the view, snapped to whole device pixels so
/// neighbouring tiles meet without seams.
pub fn tile_placements(
    source: &XyzSource,
    view: &View,
    size: Size,
    pixel_ratio: f64,
) -> Vec<TilePlacement> {
    let z = source.zoom_for(view.zoom());
    let scale = resolution_for_zoom(z as f64) / view.resolution();
    let css_size = TILE_SIZE * scale;
    visible_tiles(&view.extent(size), z)
        .into_iter()
        .filter_map(|coord| {
            let url = source.tile_url(&coord)?;
            let top_left = view.pixel_from_coordinate(coord.origin(), size);
            let x = (top_left.x * pixel_ratio).round();
            let y = (top_left.y * pixel_ratio).round();
            let right = ((top_left.x + css_size) * pixel_ratio).round();
            let bottom = ((top_left.y + css_size) * pixel_ratio).round();
            Some(TilePlacement {
                url,
                x,
                y,
                width: right - x,
                height: bottom - y,
            })
        })
        .collect()
}

pub struct TileLayer {
    name: String,
    source: XyzSource,
    opacity: f64,
    hooks: Vec<Rc<dyn LayerHooks<CanvasSurface>>>,
}

impl TileLayer {
    pub fn new(config: &TileSourceConfig) -> Self {
        Self {
            name: config.name.clone(),
            source: XyzSource::from_config(config),
            opacity: config.opacity,
            hooks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &XyzSource {
        &self.source
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn hooks(&self) -> &[Rc<dyn LayerHooks<CanvasSurface>>] {
        &self.hooks
    }

    pub fn add_hooks(&mut self, hooks: Rc<dyn LayerHooks<CanvasSurface>>) {
        self.hooks.push(hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;

    fn view_at(zoom: f64) -> View {
        View::new(&ViewConfig {
            zoom,
            ..ViewConfig::default()
        })
    }

    #[test]
    fn integer_zoom_draws_native_size_tiles() {
        let source = XyzSource::new("{z}/{x}/{y}", 20);
        let tiles = tile_placements(&source, &view_at(15.0), Size::new(512.0, 512.0), 1.0);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| (t.width - 256.0).abs() <= 1.0));
        assert!(tiles.iter().all(|t| (t.height - 256.0).abs() <= 1.0));
        assert!(tiles.iter().all(|t| t.url.starts_with("15/")));
    }

    #[test]
    fn tiles_cover_the_viewport() {
        let source = XyzSource::new("{z}/{x}/{y}", 20);
        let size = Size::new(700.0, 450.0);
        let tiles = tile_placements(&source, &view_at(15.0), size, 1.0);
        let min_x = tiles.iter().map(|t| t.x).fold(f64::INFINITY, f64::min);
        let min_y = tiles.iter().map(|t| t.y).fold(f64::INFINITY, f64::min);
        let max_x = tiles.iter().map(|t| t.x + t.width).fold(f64::NEG_INFINITY, f64::max);
        let max_y = tiles.iter().map(|t| t.y + t.height).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_x <= 0.0 && min_y <= 0.0);
        assert!(max_x >= size.width && max_y >= size.height);
    }

    #[test]
    fn past_max_zoom_tiles_are_stretched() {
        let source = XyzSource::new("{z}/{x}/{y}", 20);
        let tiles = tile_placements(&source, &view_at(22.0), Size::new(300.0, 300.0), 1.0);
        assert!(tiles.iter().all(|t| t.url.starts_with("20/")));
        assert!(tiles.iter().all(|t| (t.width - 1024.0).abs() <= 1.0));
    }

    #[test]
    fn pixel_ratio_scales_placements() {
        let source = XyzSource::new("{z}/{x}/{y}", 20);
        let view = view_at(15.0);
        let size = Size::new(400.0, 400.0);
        let one = tile_placements(&source, &view, size, 1.0);
        let two = tile_placements(&source, &view, size, 2.0);
        assert_eq!(one.len(), two.len());
        assert!((two[0].width - 2.0 * one[0].width).abs() <= 2.0);
        assert!((two[0].height - 2.0 * one[0].height).abs() <= 2.0);
    }

    #[test]
    fn neighbouring_tiles_share_edges() {
        let source = XyzSource::new("{z}/{x}/{y}", 20);
        let size = Size::new(901.0, 677.0);
        let tiles = tile_placements(&source, &view_at(15.37), size, 1.5);
        for t in &tiles {
            let right = tiles.iter().find(|o| o.y == t.y && o.x > t.x && o.x - t.x < t.width + 2.0);
            if let Some(r) = right {
                assert_eq!(r.x, t.x + t.width);
            }
            let below = tiles.iter().find(|o| o.x == t.x && o.y > t.y && o.y - t.y < t.height + 2.0);
            if let Some(b) = below {
                assert_eq!(b.y, t.y + t.height);
            }
        }
    }
}
