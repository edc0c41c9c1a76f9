//! Project the lat/lon coordinates into meters using the Web Mercator.
//! <https://en.wikipedia.org/wiki/Web_Mercator_projection>
//! <https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames>
//!
//! Pixels are counted from the south-west corner of the world, so tile rows follow the TMS
//! convention and grow northwards.

use std::f64::consts::PI;

use crate::grid::{ReferenceSystem, TILE_SIZE};
use crate::position::{Planar, Position, lon_lat};

/// Equatorial radius of the WGS84 ellipsoid, used as the sphere radius.
const EARTH_RADIUS: f64 = 6_378_137.;

/// Half of the world's width (and height), in meters.
const HALF_WORLD: f64 = PI * EARTH_RADIUS;

/// Latitude at which the projected world becomes a square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Spherical Mercator, EPSG:3857.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WebMercator;

impl ReferenceSystem for WebMercator {
    const INITIAL_RESOLUTION: f64 = 2. * HALF_WORLD / TILE_SIZE as f64;
    const MIN_X: f64 = -HALF_WORLD;
    const MIN_Y: f64 = -HALF_WORLD;
    const FLIP_Y: bool = true;

    fn to_planar(position: Position) -> Planar<Self> {
        let lon = (position.x() + 180.).rem_euclid(360.) - 180.;
        let lat = position.y().clamp(-MAX_LATITUDE, MAX_LATITUDE);

        // Project into Mercator (cylindrical map projection).
        let x = lon.to_radians();
        let y = lat.to_radians().tan().asinh();

        Planar::new(x * EARTH_RADIUS, y * EARTH_RADIUS)
    }

    fn to_geographic(planar: Planar<Self>) -> Position {
        let lon = (planar.x / EARTH_RADIUS).to_degrees();
        let lat = (planar.y / EARTH_RADIUS).sinh().atan().to_degrees();
        lon_lat(lon, lat)
    }
}
