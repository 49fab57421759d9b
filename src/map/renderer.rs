use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::canvas::CanvasSurface;
use super::layer::{tile_placements, TileLayer};
use super::tiles::TileCache;
use super::view::{Size, View};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::lens::RedrawHandle;
use crate::render::{paint_layer, DrawingSurface, LayerHooks, Pixel, PixelTransform, SaveGuard};

/// Draws the tile layers bottom to top onto one canvas.
pub struct MapRenderer {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    view: View,
    layers: Vec<TileLayer>,
    tiles: TileCache,
}

impl MapRenderer {
    pub fn new(
        canvas: HtmlCanvasElement,
        config: &MapConfig,
        redraw: Rc<dyn RedrawHandle>,
    ) -> Result<Self, MapError> {
        config.validate()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or(MapError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MapError::NoContext)?;
        Ok(Self {
            canvas,
            surface: CanvasSurface::new(ctx),
            view: View::new(&config.view),
            layers: config.layers.iter().map(TileLayer::new).collect(),
            tiles: TileCache::new(redraw),
        })
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Registers prerender/postrender hooks on the layer at `index`.
    pub fn add_layer_hooks(
        &mut self,
        index: usize,
        hooks: Rc<dyn LayerHooks<CanvasSurface>>,
    ) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.add_hooks(hooks);
                true
            }
            None => false,
        }
    }

    pub fn pixel_ratio(&self) -> f64 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0)
    }

    /// Canvas size in CSS pixels.
    pub fn css_size(&self) -> Size {
        Size::new(
            self.canvas.client_width().max(0) as f64,
            self.canvas.client_height().max(0) as f64,
        )
    }

    /// Position of a mouse event relative to the canvas, in CSS pixels.
    pub fn event_pixel(&self, event: &MouseEvent) -> Pixel {
        let rect = self.canvas.get_bounding_client_rect();
        let offset_width = self.canvas.offset_width() as f64;
        let offset_height = self.canvas.offset_height() as f64;
        let sx = if offset_width > 0.0 { rect.width() / offset_width } else { 1.0 };
        let sy = if offset_height > 0.0 { rect.height() / offset_height } else { 1.0 };
        Pixel::new(
            (event.client_x() as f64 - rect.left()) / sx,
            (event.client_y() as f64 - rect.top()) / sy,
        )
    }

    pub fn render_frame(&mut self) {
        if !self.canvas.is_connected() {
            return;
        }
        let size = self.css_size();
        let ratio = self.pixel_ratio();
        let width = (size.width * ratio).round() as u32;
        let height = (size.height * ratio).round() as u32;
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        let Self {
            surface,
            view,
            layers,
            tiles,
            ..
        } = self;
        surface.clear(width as f64, height as f64);
        tiles.begin_frame();
        let transform = PixelTransform::scale(ratio);
        for layer in layers.iter() {
            let placements = tile_placements(layer.source(), view, size, ratio);
            paint_layer(&mut *surface, transform, layer.hooks(), |surface| {
                let mut surface = SaveGuard::new(surface);
                surface.set_global_alpha(layer.opacity());
                for p in &placements {
                    if let Some(image) = tiles.image(&p.url) {
                        surface.draw_tile(image, p.x, p.y, p.width, p.height);
                    }
                }
            });
        }
        tiles.prune();
    }
}
