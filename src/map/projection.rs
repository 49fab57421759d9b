//! Spherical Web Mercator (EPSG:3857) and the standard 256px XYZ tile grid.

use std::f64::consts::PI;

pub const EARTH_RADIUS: f64 = 6_378_137.0;
/// Half the width of the projected world, in metres.
pub const HALF_SIZE: f64 = PI * EARTH_RADIUS;
pub const TILE_SIZE: f64 = 256.0;
/// Deepest tile zoom the grid addresses; deeper zooms reuse these tiles.
pub const MAX_TILE_ZOOM: u8 = 30;

/// Projected map coordinate in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

pub fn from_lon_lat(lon: f64, lat: f64) -> Coordinate {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    Coordinate::new(x, y.clamp(-HALF_SIZE, HALF_SIZE))
}

pub fn to_lon_lat(c: Coordinate) -> (f64, f64) {
    let lon = (c.x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (c.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Metres per pixel at `zoom` (fractional zooms allowed).
pub fn resolution_for_zoom(zoom: f64) -> f64 {
    2.0 * HALF_SIZE / TILE_SIZE / 2f64.powf(zoom)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    /// Unwrapped column; may lie outside `0..2^z` when the world repeats.
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn tiles_per_side(z: u8) -> i64 {
        1i64 << z.min(MAX_TILE_ZOOM)
    }

    /// Column folded back into `0..2^z`.
    pub fn wrapped_x(&self) -> i64 {
        self.x.rem_euclid(Self::tiles_per_side(self.z))
    }

    /// Width of this tile in metres.
    pub fn span(&self) -> f64 {
        TILE_SIZE * resolution_for_zoom(self.z as f64)
    }

    /// Top-left corner in projected coordinates.
    pub fn origin(&self) -> Coordinate {
        let span = self.span();
        Coordinate::new(
            -HALF_SIZE + self.x as f64 * span,
            HALF_SIZE - self.y as f64 * span,
        )
    }
}

/// Tiles at zoom `z` intersecting `extent`, row by row.
pub fn visible_tiles(extent: &Extent, z: u8) -> Vec<TileCoord> {
    let z = z.min(MAX_TILE_ZOOM);
    let span = TILE_SIZE * resolution_for_zoom(z as f64);
    let n = TileCoord::tiles_per_side(z);
    let x0 = ((extent.min_x + HALF_SIZE) / span).floor() as i64;
    let x1 = ((extent.max_x + HALF_SIZE) / span).ceil() as i64;
    let y0 = (((HALF_SIZE - extent.max_y) / span).floor() as i64).max(0);
    let y1 = (((HALF_SIZE - extent.min_y) / span).ceil() as i64).min(n);
    let mut tiles = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            tiles.push(TileCoord { z, x, y });
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_zero() {
        let c = from_lon_lat(0.0, 0.0);
        assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6);
    }

    #[test]
    fn antimeridian_is_world_edge() {
        assert!((from_lon_lat(180.0, 0.0).x - HALF_SIZE).abs() < 1e-6);
    }

    #[test]
    fn lon_lat_round_trip_near_ghent() {
        let c = from_lon_lat(3.6066, 50.8266);
        assert!((c.x - 401_486.0).abs() < 5.0);
        let (lon, lat) = to_lon_lat(c);
        assert!((lon - 3.6066).abs() < 1e-9);
        assert!((lat - 50.8266).abs() < 1e-9);
    }

    #[test]
    fn zoom_zero_resolution() {
        assert!((resolution_for_zoom(0.0) - 156_543.033_928_041).abs() < 1e-6);
        assert!((resolution_for_zoom(1.0) * 2.0 - resolution_for_zoom(0.0)).abs() < 1e-9);
    }

    #[test]
    fn whole_world_at_zoom_zero_is_one_tile() {
        let world = Extent {
            min_x: -HALF_SIZE + 1.0,
            min_y: -HALF_SIZE + 1.0,
            max_x: HALF_SIZE - 1.0,
            max_y: HALF_SIZE - 1.0,
        };
        assert_eq!(visible_tiles(&world, 0), vec![TileCoord { z: 0, x: 0, y: 0 }]);
    }

    #[test]
    fn rows_are_bounded_and_columns_wrap() {
        let extent = Extent {
            min_x: HALF_SIZE - 10.0,
            min_y: -2.0 * HALF_SIZE,
            max_x: HALF_SIZE + 10.0,
            max_y: 2.0 * HALF_SIZE,
        };
        let tiles = visible_tiles(&extent, 1);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| (0..2).contains(&t.y)));
        let east = tiles.iter().find(|t| t.x == 2).unwrap();
        assert_eq!(east.wrapped_x(), 0);
    }

    #[test]
    fn zoom_past_grid_limit_is_capped() {
        assert_eq!(TileCoord::tiles_per_side(70), 1i64 << MAX_TILE_ZOOM);
        let c = from_lon_lat(3.6066, 50.8266);
        let extent = Extent {
            min_x: c.x - 1.0,
            min_y: c.y - 1.0,
            max_x: c.x + 1.0,
            max_y: c.y + 1.0,
        };
        let tiles = visible_tiles(&extent, 70);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == MAX_TILE_ZOOM));
    }

    #[test]
    fn tile_origin_is_top_left() {
        let t = TileCoord { z: 1, x: 1, y: 1 };
        assert_eq!(t.origin(), Coordinate::new(0.0, 0.0));
    }
}
