//! Swiss grid, CH1903 / LV03 (EPSG:21781), shifted so that its false origin `(600000, 200000)`
//! becomes `(0, 0)`.
//!
//! Uses the approximate formulas published by swisstopo, which are accurate to about a meter
//! within Switzerland.
//! <https://www.swisstopo.admin.ch/en/transformation-calculation-services>

use crate::grid::ReferenceSystem;
use crate::position::{Planar, Position, lat_lon};

/// LV03 false origin, in meters.
const ORIGIN_EAST: f64 = 600_000.;
const ORIGIN_NORTH: f64 = 200_000.;

/// Planar input is clamped to this many meters, so that the polynomials below stay finite.
const PLANAR_LIMIT: f64 = 1e9;

/// Shifted LV03 meters, tiled like the GeoServer EPSG:2056 gridset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Lv03;

impl ReferenceSystem for Lv03 {
    // Pixel size for zoom 0 according to the GeoServer EPSG:2056 gridset definition.
    const INITIAL_RESOLUTION: f64 = 881.2268324860615;

    // EPSG:2056 gridset bounds, moved from LV95 to the shifted LV03 origin.
    const MIN_X: f64 = 2_485_014.052451379 - 2_600_000.;
    const MIN_Y: f64 = 1_074_188.6943776922 - 1_200_000.;

    // Swiss grid rows are counted from the south.
    const FLIP_Y: bool = true;

    fn to_planar(position: Position) -> Planar<Self> {
        let lat = position.y().clamp(-90., 90.);
        let lon = (position.x() + 180.).rem_euclid(360.) - 180.;

        // Auxiliary values: differences to Bern in 10000" units.
        let phi = (lat * 3600. - 169_028.66) / 10_000.;
        let lambda = (lon * 3600. - 26_782.5) / 10_000.;

        let east = 600_072.37 + 211_455.93 * lambda
            - 10_938.51 * lambda * phi
            - 0.36 * lambda * phi.powi(2)
            - 44.54 * lambda.powi(3);

        let north = 200_147.07 + 308_807.95 * phi + 3_745.25 * lambda.powi(2) + 76.63 * phi.powi(2)
            - 194.56 * lambda.powi(2) * phi
            + 119.79 * phi.powi(3);

        Planar::new(east - ORIGIN_EAST, north - ORIGIN_NORTH)
    }

    fn to_geographic(planar: Planar<Self>) -> Position {
        // Auxiliary values in 1000 km units, relative to the false origin.
        let y = planar.x.clamp(-PLANAR_LIMIT, PLANAR_LIMIT) / 1_000_000.;
        let x = planar.y.clamp(-PLANAR_LIMIT, PLANAR_LIMIT) / 1_000_000.;

        let lat = 16.902_389_2 + 3.238_272 * x
            - 0.270_978 * y.powi(2)
            - 0.002_528 * x.powi(2)
            - 0.044_7 * y.powi(2) * x
            - 0.014 * x.powi(3);

        let lon = 2.677_909_4 + 4.728_982 * y + 0.791_484 * y * x + 0.130_6 * y * x.powi(2)
            - 0.043_6 * y.powi(3);

        // Results are in 10000" units.
        lat_lon(lat * 100. / 36., lon * 100. / 36.)
    }
}
