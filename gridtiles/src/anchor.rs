//! Ties a tile grid to a local world coordinate system, e.g. a 3D scene, whose origin sits at the
//! center of a reference tile and whose unit is a fixed fraction of that tile.

use crate::grid::{ReferenceSystem, TILE_SIZE, tile_bounds, tile_id_of};
use crate::position::{Planar, PlanarRect, Position};
use crate::tiles::UnwrappedTileId;
use crate::zoom::Zoom;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("world tile size must be positive and finite, got {0}")]
pub struct InvalidWorldTileSize(pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapAnchor<S> {
    /// Where the map was centered, in planar meters.
    pub center: Planar<S>,

    /// Tile containing `center`.
    pub reference_tile: UnwrappedTileId,

    /// Bounds of `reference_tile`. Its center is the world origin.
    pub reference_bounds: PlanarRect<S>,

    /// World units per planar meter.
    pub world_relative_scale: f64,
}

impl<S: ReferenceSystem> MapAnchor<S> {
    /// Anchor the map at `position`, so that one tile at `zoom` measures `world_tile_size` world
    /// units across.
    pub fn new(
        position: Position,
        zoom: Zoom,
        world_tile_size: f64,
    ) -> Result<Self, InvalidWorldTileSize> {
        if !(world_tile_size.is_finite() && world_tile_size > 0.) {
            return Err(InvalidWorldTileSize(world_tile_size));
        }

        let center = S::to_planar(position);
        let reference_tile = tile_id_of(center, zoom);
        let reference_bounds = tile_bounds::<S>(reference_tile, TILE_SIZE);
        let world_relative_scale = world_tile_size / reference_bounds.size().0;

        log::debug!(
            "Map anchored at {center:?}, reference tile {reference_tile}, scale {world_relative_scale}."
        );

        Ok(Self {
            center,
            reference_tile,
            reference_bounds,
            world_relative_scale,
        })
    }

    /// World coordinates of `planar`.
    pub fn to_world(&self, planar: Planar<S>) -> (f64, f64) {
        let world = (planar - self.reference_bounds.center()).scale(self.world_relative_scale);
        (world.x, world.y)
    }

    /// Inverse of [`MapAnchor::to_world`].
    pub fn from_world(&self, (x, y): (f64, f64)) -> Planar<S> {
        Planar::new(x, y).scale(self.world_relative_scale.recip()) + self.reference_bounds.center()
    }

    pub fn position_to_world(&self, position: Position) -> (f64, f64) {
        self.to_world(S::to_planar(position))
    }

    pub fn world_to_position(&self, world: (f64, f64)) -> Position {
        S::to_geographic(self.from_world(world))
    }

    /// Tiles around the reference tile, see [`UnwrappedTileId::surrounding`].
    pub fn tiles(
        &self,
        west: u32,
        north: u32,
        east: u32,
        south: u32,
    ) -> impl Iterator<Item = UnwrappedTileId> + use<S> {
        self.reference_tile.surrounding(west, north, east, south)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::lat_lon;
    use crate::swiss::Lv03;
    use approx::assert_abs_diff_eq;

    fn bern_anchor() -> MapAnchor<Lv03> {
        MapAnchor::new(lat_lon(46.9511, 7.4386), Zoom::try_from(9).unwrap(), 100.).unwrap()
    }

    #[test]
    fn world_tile_size_must_be_positive() {
        let zoom = Zoom::try_from(9).unwrap();
        for size in [0., -1., f64::NAN, f64::INFINITY] {
            let result = MapAnchor::<Lv03>::new(lat_lon(46.9511, 7.4386), zoom, size);
            assert!(
                matches!(result, Err(InvalidWorldTileSize(s)) if s.to_bits() == size.to_bits()),
                "{size}"
            );
        }
    }

    #[test]
    fn reference_tile_contains_the_center() {
        let anchor = bern_anchor();
        assert_eq!((260, 285), (anchor.reference_tile.x, anchor.reference_tile.y));
        assert!(anchor.reference_tile.flip_y);
        assert!(anchor.reference_bounds.contains(anchor.center));
    }

    #[test]
    fn one_tile_spans_the_requested_world_size() {
        let anchor = bern_anchor();
        let bounds = anchor.reference_bounds;

        let (min_x, min_y) = anchor.to_world(bounds.min);
        let (max_x, max_y) = anchor.to_world(bounds.max);

        assert_abs_diff_eq!(max_x - min_x, 100., epsilon = 1e-9);
        assert_abs_diff_eq!(max_y - min_y, 100., epsilon = 1e-9);
        assert_abs_diff_eq!(min_x, -50., epsilon = 1e-9);
    }

    #[test]
    fn world_there_and_back() {
        let anchor = bern_anchor();
        let planar = Planar::new(1234.5, -678.9);
        let back = anchor.from_world(anchor.to_world(planar));

        assert_abs_diff_eq!(back.x, planar.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, planar.y, epsilon = 1e-6);

        let position = lat_lon(46.95, 7.44);
        let back = anchor.world_to_position(anchor.position_to_world(position));
        assert_abs_diff_eq!(back.y(), position.y(), epsilon = 1e-4);
        assert_abs_diff_eq!(back.x(), position.x(), epsilon = 1e-4);
    }

    #[test]
    fn tiles_around_the_reference() {
        let anchor = bern_anchor();
        let tiles: Vec<_> = anchor.tiles(1, 1, 1, 1).collect();

        assert_eq!(9, tiles.len());
        assert!(tiles.contains(&anchor.reference_tile.north()));
        assert!(tiles.contains(&anchor.reference_tile.south_west()));
    }
}
