//! Types and functions for working with positions.

use std::marker::PhantomData;
use std::ops::{Add, Sub};

/// Geographical position with latitude and longitude.
pub type Position = geo_types::Point;

/// Construct `Position` from latitude and longitude.
pub fn lat_lon(lat: f64, lon: f64) -> Position {
    Position::new(lon, lat)
}

/// Construct `Position` from longitude and latitude. Note that it is common standard to write
/// coordinates starting with the latitude instead (e.g. `46.9480, 7.4474` is Bern's Zytglogge).
pub fn lon_lat(lon: f64, lat: f64) -> Position {
    Position::new(lon, lat)
}

/// Location on the pixel bitmap of a single zoom level.
pub type Pixels = geo_types::Point;

/// Projected coordinates in meters within the reference system `S`.
///
/// The system is only a type tag, so planar values produced by different projections cannot be
/// combined by accident.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planar<S> {
    /// Easting in meters.
    pub x: f64,
    /// Northing in meters.
    pub y: f64,
    system: PhantomData<S>,
}

impl<S> Planar<S> {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            system: PhantomData,
        }
    }

    /// Scale both coordinates by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl<S> Add for Planar<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S> Sub for Planar<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle in planar meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarRect<S> {
    pub min: Planar<S>,
    pub max: Planar<S>,
}

impl<S> PlanarRect<S> {
    /// Width and height in meters.
    pub fn size(&self) -> (f64, f64) {
        (self.max.x - self.min.x, self.max.y - self.min.y)
    }

    pub fn center(&self) -> Planar<S> {
        Planar::new(
            self.min.x.midpoint(self.max.x),
            self.min.y.midpoint(self.max.y),
        )
    }

    /// Whether `point` lies inside, edges included.
    pub fn contains(&self, point: Planar<S>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}
