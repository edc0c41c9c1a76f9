//! Conversions between planar meters, pixels of a zoom level and tile indices.
//!
//! Pixel space sits between meters and tiles: a single [`pixel_size`] formula parameterizes every
//! zoom level, and [`tile_bounds`] is the exact inverse of [`pixels_to_tile`] because both go
//! through the same pixel transform.

use crate::position::{Pixels, Planar, PlanarRect, Position};
use crate::tiles::UnwrappedTileId;
use crate::zoom::Zoom;

/// Size of a single tile in pixels, as used by most of the tile servers.
pub const TILE_SIZE: u32 = 256;

/// Projected coordinate reference system with its tile pyramid definition.
pub trait ReferenceSystem: std::fmt::Debug + Clone + Copy + PartialEq {
    /// Ground size, in meters, of a single pixel at zoom 0.
    const INITIAL_RESOLUTION: f64;

    /// Planar x of the pixel origin.
    const MIN_X: f64;

    /// Planar y of the pixel origin.
    const MIN_Y: f64;

    /// Whether rows of the tile grid grow northwards.
    const FLIP_Y: bool;

    /// Project geographical position into planar meters.
    fn to_planar(position: Position) -> Planar<Self>;

    /// Inverse of [`ReferenceSystem::to_planar`].
    fn to_geographic(planar: Planar<Self>) -> Position;
}

/// Size of a pixel at the given zoom, in meters.
pub fn pixel_size<S: ReferenceSystem>(zoom: Zoom) -> f64 {
    S::INITIAL_RESOLUTION / zoom.scale()
}

pub fn planar_to_pixels<S: ReferenceSystem>(planar: Planar<S>, zoom: Zoom) -> Pixels {
    let size = pixel_size::<S>(zoom);
    Pixels::new((planar.x - S::MIN_X) / size, (planar.y - S::MIN_Y) / size)
}

pub fn pixels_to_planar<S: ReferenceSystem>(pixels: Pixels, zoom: Zoom) -> Planar<S> {
    let size = pixel_size::<S>(zoom);
    Planar::new(pixels.x() * size + S::MIN_X, pixels.y() * size + S::MIN_Y)
}

/// Column and row of the tile containing `pixels`.
///
/// A pixel lying exactly on a tile edge belongs to the tile with the lower index, which is what
/// [`tile_bounds`] produces for the same tile. Indices beyond the range of `i64` saturate.
pub fn pixels_to_tile(pixels: Pixels, tile_size: u32) -> (i64, i64) {
    let tile_size = f64::from(tile_size);
    (
        ((pixels.x() / tile_size).ceil() - 1.) as i64,
        ((pixels.y() / tile_size).ceil() - 1.) as i64,
    )
}

/// Planar rectangle covered by `tile`.
pub fn tile_bounds<S: ReferenceSystem>(tile: UnwrappedTileId, tile_size: u32) -> PlanarRect<S> {
    let tile_size = f64::from(tile_size);
    let x = tile.x as f64;
    let y = tile.y as f64;

    let min = Pixels::new(x * tile_size, y * tile_size);
    let max = Pixels::new((x + 1.) * tile_size, (y + 1.) * tile_size);

    PlanarRect {
        min: pixels_to_planar(min, tile.zoom),
        max: pixels_to_planar(max, tile.zoom),
    }
}

/// Tile covering `planar` at the given zoom. The `flip_y` flag is stored in the result and
/// carried by every tile navigated to from it.
pub fn tile_id<S: ReferenceSystem>(planar: Planar<S>, zoom: Zoom, flip_y: bool) -> UnwrappedTileId {
    let (x, y) = pixels_to_tile(planar_to_pixels(planar, zoom), TILE_SIZE);
    UnwrappedTileId::new(zoom, x, y, flip_y)
}

/// Tile covering `planar` using the axis convention of `S`.
pub fn tile_id_of<S: ReferenceSystem>(planar: Planar<S>, zoom: Zoom) -> UnwrappedTileId {
    tile_id(planar, zoom, S::FLIP_Y)
}
