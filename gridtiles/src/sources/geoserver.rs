//! Vector tiles from GeoServer's tile cache, served over TMS.
//! <https://docs.geoserver.org/stable/en/user/geowebcache/webadmin/defaults.html>

use crate::tiles::TileId;

/// Name of GeoServer's built-in Web Mercator gridset.
pub const WEB_MERCATOR_GRIDSET: &str = "EPSG:900913";

/// TMS endpoint of GeoServer's tile cache, relative to the GeoServer root.
const TMS_PATH: &str = "gwc/service/tms/1.0.0/";

/// Named tile matrix set of a GeoServer layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gridset {
    name: String,
    flip_rows: bool,
}

impl Gridset {
    /// Gridset identified by its name. Rows get flipped for the Web Mercator gridset only,
    /// because TMS counts its rows from the south while Web Mercator tile ids count them from
    /// the north.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let flip_rows = name == WEB_MERCATOR_GRIDSET;
        Self { name, flip_rows }
    }

    /// Gridset with an explicitly declared row convention.
    pub fn with_flipped_rows(name: impl Into<String>, flip_rows: bool) -> Self {
        Self {
            name: name.into(),
            flip_rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flips_rows(&self) -> bool {
        self.flip_rows
    }

    /// Row under which the server knows `tile_id`.
    fn row(&self, tile_id: TileId) -> u32 {
        if self.flip_rows {
            tile_id.flipped_y()
        } else {
            tile_id.y()
        }
    }
}

/// Base of the tiles of `layer`.
pub(super) fn layer_url(geoserver_url: &str, layer: &str) -> String {
    format!("{geoserver_url}{TMS_PATH}{layer}")
}

pub(super) fn vector_tile_url(
    geoserver_url: &str,
    layer: &str,
    gridset: &Gridset,
    tile_id: TileId,
) -> String {
    format!(
        "{}@{}@pbf/{}/{}/{}.pbf",
        layer_url(geoserver_url, layer),
        escape(gridset.name()),
        tile_id.zoom(),
        tile_id.x(),
        gridset.row(tile_id)
    )
}

/// Percent-encode everything but the unreserved characters of RFC 3986.
fn escape(component: &str) -> String {
    let mut escaped = String::with_capacity(component.len());
    for byte in component.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}
