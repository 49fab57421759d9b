use super::projection::{from_lon_lat, resolution_for_zoom, Coordinate, Extent, HALF_SIZE};
use crate::config::ViewConfig;
use crate::render::Pixel;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Center and zoom of the map. Rotation is always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    center: Coordinate,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl View {
    pub fn new(config: &ViewConfig) -> Self {
        let [lon, lat] = config.center_lon_lat;
        Self {
            center: from_lon_lat(lon, lat),
            zoom: config.zoom.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn resolution(&self) -> f64 {
        resolution_for_zoom(self.zoom)
    }

    pub fn extent(&self, size: Size) -> Extent {
        let res = self.resolution();
        let hw = size.width * res / 2.0;
        let hh = size.height * res / 2.0;
        Extent {
            min_x: self.center.x - hw,
            min_y: self.center.y - hh,
            max_x: self.center.x + hw,
            max_y: self.center.y + hh,
        }
    }

    pub fn pixel_from_coordinate(&self, c: Coordinate, size: Size) -> Pixel {
        let res = self.resolution();
        Pixel::new(
            (c.x - self.center.x) / res + size.width / 2.0,
            (self.center.y - c.y) / res + size.height / 2.0,
        )
    }

    pub fn coordinate_from_pixel(&self, p: Pixel, size: Size) -> Coordinate {
        let res = self.resolution();
        Coordinate::new(
            self.center.x + (p.x - size.width / 2.0) * res,
            self.center.y - (p.y - size.height / 2.0) * res,
        )
    }

    /// Moves the map content by (`dx`, `dy`) CSS pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let res = self.resolution();
        self.center.x -= dx * res;
        self.center.y = (self.center.y + dy * res).clamp(-HALF_SIZE, HALF_SIZE);
    }

    /// Changes zoom by `delta` while keeping the coordinate under `anchor`
    /// in place. Returns `false` when already at the zoom limit.
    pub fn zoom_by(&mut self, delta: f64, anchor: Pixel, size: Size) -> bool {
        let zoom = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return false;
        }
        let fixed = self.coordinate_from_pixel(anchor, size);
        self.zoom = zoom;
        let res = self.resolution();
        self.center = Coordinate::new(
            fixed.x - (anchor.x - size.width / 2.0) * res,
            (fixed.y + (anchor.y - size.height / 2.0) * res).clamp(-HALF_SIZE, HALF_SIZE),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size::new(800.0, 600.0);

    fn view() -> View {
        View::new(&ViewConfig::default())
    }

    fn close(a: Pixel, b: Pixel) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn center_maps_to_middle_of_viewport() {
        let v = view();
        assert!(close(
            v.pixel_from_coordinate(v.center(), SIZE),
            Pixel::new(400.0, 300.0)
        ));
    }

    #[test]
    fn pixel_coordinate_round_trip() {
        let v = view();
        let p = Pixel::new(123.0, 456.0);
        let back = v.pixel_from_coordinate(v.coordinate_from_pixel(p, SIZE), SIZE);
        assert!(close(back, p));
    }

    #[test]
    fn pan_moves_content_with_pointer() {
        let mut v = view();
        let c = v.coordinate_from_pixel(Pixel::new(100.0, 100.0), SIZE);
        v.pan_by(30.0, -20.0);
        assert!(close(v.pixel_from_coordinate(c, SIZE), Pixel::new(130.0, 80.0)));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut v = view();
        let anchor = Pixel::new(650.0, 120.0);
        let c = v.coordinate_from_pixel(anchor, SIZE);
        assert!(v.zoom_by(1.0, anchor, SIZE));
        assert_eq!(v.zoom(), 16.0);
        assert!(close(v.pixel_from_coordinate(c, SIZE), anchor));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut v = view();
        assert!(v.zoom_by(100.0, Pixel::new(0.0, 0.0), SIZE));
        assert_eq!(v.zoom(), 22.0);
        assert!(!v.zoom_by(1.0, Pixel::new(0.0, 0.0), SIZE));
    }

    #[test]
    fn extent_spans_viewport() {
        let v = view();
        let e = v.extent(SIZE);
        assert!(((e.max_x - e.min_x) / v.resolution() - 800.0).abs() < 1e-6);
        assert!(((e.max_y - e.min_y) / v.resolution() - 600.0).abs() < 1e-6);
    }
}
