use std::fmt;

use crate::zoom::Zoom;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TileError {
    #[error("tile {x}/{y} is outside of the grid at zoom {zoom}")]
    OutOfGrid { zoom: Zoom, x: u32, y: u32 },
}

/// Tile in a grid which might go around the globe, i.e. its column and row are not limited to
/// the `[0, 2^zoom)` range.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct UnwrappedTileId {
    pub zoom: Zoom,

    /// Column, growing eastwards.
    pub x: i64,

    /// Row, growing northwards when `flip_y` is set, southwards otherwise.
    pub y: i64,

    /// Orientation of the row axis. It comes from the reference system this tile was derived
    /// from and is kept intact by navigation.
    pub flip_y: bool,
}

impl UnwrappedTileId {
    pub fn new(zoom: Zoom, x: i64, y: i64, flip_y: bool) -> Self {
        Self { zoom, x, y, flip_y }
    }

    /// Row increment of one step to the north.
    fn north_step(&self) -> i64 {
        if self.flip_y { 1 } else { -1 }
    }

    // Wrapping keeps the result congruent modulo 2^zoom, so the canonical tile stays right even
    // at the ends of i64.
    fn moved(&self, dx: i64, dy: i64) -> Self {
        Self::new(
            self.zoom,
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.flip_y,
        )
    }

    pub fn north(&self) -> Self {
        self.moved(0, self.north_step())
    }

    pub fn south(&self) -> Self {
        self.moved(0, -self.north_step())
    }

    pub fn east(&self) -> Self {
        self.moved(1, 0)
    }

    pub fn west(&self) -> Self {
        self.moved(-1, 0)
    }

    pub fn north_east(&self) -> Self {
        self.moved(1, self.north_step())
    }

    pub fn south_east(&self) -> Self {
        self.moved(1, -self.north_step())
    }

    pub fn north_west(&self) -> Self {
        self.moved(-1, self.north_step())
    }

    pub fn south_west(&self) -> Self {
        self.moved(-1, -self.north_step())
    }

    /// All eight neighbours, clockwise starting from the north.
    pub fn neighbours(&self) -> [Self; 8] {
        [
            self.north(),
            self.north_east(),
            self.east(),
            self.south_east(),
            self.south(),
            self.south_west(),
            self.west(),
            self.north_west(),
        ]
    }

    /// Block of tiles reaching `west`, `north`, `east` and `south` tiles away from this one,
    /// including itself. Goes column by column from the west, and from the south to the north
    /// within each column.
    pub fn surrounding(
        self,
        west: u32,
        north: u32,
        east: u32,
        south: u32,
    ) -> impl Iterator<Item = Self> {
        let step = self.north_step();
        (-i64::from(west)..=i64::from(east)).flat_map(move |dx| {
            (-i64::from(south)..=i64::from(north)).map(move |dy| self.moved(dx, dy * step))
        })
    }

    /// Wrap around the grid.
    pub fn canonical(&self) -> TileId {
        let total = i64::from(self.zoom.total_tiles());
        TileId {
            zoom: self.zoom,
            // Both are within [0, 2^zoom), which fits u32 for any valid zoom.
            x: self.x.rem_euclid(total) as u32,
            y: self.y.rem_euclid(total) as u32,
        }
    }
}

impl fmt::Display for UnwrappedTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Identifies the tile in the tile grid. Always within the grid of its zoom level.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct TileId {
    zoom: Zoom,
    x: u32,
    y: u32,
}

impl TileId {
    pub fn new(zoom: Zoom, x: u32, y: u32) -> Result<Self, TileError> {
        let total = zoom.total_tiles();
        if x < total && y < total {
            Ok(Self { zoom, x, y })
        } else {
            Err(TileError::OutOfGrid { zoom, x, y })
        }
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Column of the tile.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Row of the tile.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// The same row counted from the opposite edge of the grid.
    pub fn flipped_y(&self) -> u32 {
        self.zoom.total_tiles() - self.y - 1
    }

    pub fn unwrapped(&self, flip_y: bool) -> UnwrappedTileId {
        UnwrappedTileId::new(self.zoom, self.x.into(), self.y.into(), flip_y)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}
