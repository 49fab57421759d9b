use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::HtmlImageElement;

use crate::lens::RedrawHandle;
use crate::util::cwarn;

const MAX_CACHED_TILES: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileStatus {
    Loading,
    Loaded,
    Failed,
}

struct TileEntry {
    image: HtmlImageElement,
    status: Rc<Cell<TileStatus>>,
    last_used: u64,
    _listeners: [EventListener; 2],
}

/// Tile images keyed by url. A finished load asks for another frame.
pub struct TileCache {
    tiles: HashMap<String, TileEntry>,
    frame: u64,
    redraw: Rc<dyn RedrawHandle>,
}

impl TileCache {
    pub fn new(redraw: Rc<dyn RedrawHandle>) -> Self {
        Self {
            tiles: HashMap::new(),
            frame: 0,
            redraw,
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Returns the image when it is ready to draw, starting a load otherwise.
    pub fn image(&mut self, url: &str) -> Option<&HtmlImageElement> {
        if !self.tiles.contains_key(url) {
            let entry = self.load(url)?;
            self.tiles.insert(url.to_string(), entry);
        }
        let entry = self.tiles.get_mut(url)?;
        entry.last_used = self.frame;
        match entry.status.get() {
            TileStatus::Loaded => Some(&entry.image),
            TileStatus::Loading | TileStatus::Failed => None,
        }
    }

    /// Drops tiles not drawn this frame once the cache is over capacity.
    pub fn prune(&mut self) {
        if self.tiles.len() <= MAX_CACHED_TILES {
            return;
        }
        let frame = self.frame;
        self.tiles.retain(|_, entry| entry.last_used == frame);
    }

    fn load(&self, url: &str) -> Option<TileEntry> {
        let image = HtmlImageElement::new().ok()?;
        let status = Rc::new(Cell::new(TileStatus::Loading));
        let on_load = {
            let status = status.clone();
            let redraw = self.redraw.clone();
            EventListener::once(&image, "load", move |_| {
                status.set(TileStatus::Loaded);
                redraw.request_redraw();
            })
        };
        let on_error = {
            let status = status.clone();
            let url = url.to_string();
            EventListener::once(&image, "error", move |_| {
                status.set(TileStatus::Failed);
                cwarn(&format!("tile failed to load: {url}"));
            })
        };
        image.set_src(url);
        Some(TileEntry {
            image,
            status,
            last_used: self.frame,
            _listeners: [on_load, on_error],
        })
    }
}
