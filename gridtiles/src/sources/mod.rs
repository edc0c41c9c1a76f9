//! Tile servers and their URL grammars. Make sure you follow terms of usage of the particular
//! server.

mod geoserver;
mod mapbox;

use serde::{Deserialize, Serialize};

use crate::config::Endpoints;
use crate::tiles::TileId;
pub use geoserver::{Gridset, WEB_MERCATOR_GRIDSET};
pub use mapbox::{
    DEFAULT_ELEVATION_MAP_ID, DEFAULT_RASTER_MAP_ID, DEFAULT_STYLE_URL, DEFAULT_VECTOR_MAP_ID,
    MapboxStyle,
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unknown tile source '{0}'")]
    UnknownSource(String),

    #[error("tile source '{kind}' requires '{field}'")]
    MissingField { kind: String, field: &'static str },

    #[error("GeoServer URL is not configured")]
    MissingGeoServerUrl,

    #[error("Mapbox API URL is not configured")]
    MissingApiUrl,

    #[error("malformed style URL '{0}'")]
    MalformedStyleUrl(String),
}

/// Remote tile server definition. Fields left as `None` fall back to the defaults of the
/// respective server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileSource {
    /// Raster tiles rendered from a Mapbox style.
    Raster {
        style_url: Option<String>,
        retina: bool,
    },

    /// Raster tiles of a classic Mapbox tileset.
    ClassicRaster { map_id: Option<String>, retina: bool },

    /// Elevation encoded into raw PNG tiles.
    RawPngRaster { map_id: Option<String> },

    /// Mapbox vector tiles.
    Vector { map_id: Option<String> },

    /// Vector tiles in Mapbox format, served by GeoServer.
    AlternativeVector { map_id: String },

    /// Vector tiles with only the data needed by the given style revision.
    StyleOptimizedVector {
        map_id: Option<String>,
        style_id: String,
        modified_date: String,
    },

    /// Vector tiles of a GeoServer layer, cut along the given gridset.
    GeoServerVector { layer: String, gridset: Gridset },
}

impl TileSource {
    /// Name of the kind of this source, as used by [`SourceDescriptor`].
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raster { retina: false, .. } => "raster",
            Self::Raster { retina: true, .. } => "retina-raster",
            Self::ClassicRaster { retina: false, .. } => "classic-raster",
            Self::ClassicRaster { retina: true, .. } => "classic-retina-raster",
            Self::RawPngRaster { .. } => "raw-png-raster",
            Self::Vector { .. } => "vector",
            Self::AlternativeVector { .. } => "alternative-vector",
            Self::StyleOptimizedVector { .. } => "style-optimized-vector",
            Self::GeoServerVector { .. } => "geoserver-vector",
        }
    }

    /// Resource locator of the tile, without any query added by [`TileSource::tile_url`].
    pub fn locator(&self, tile_id: TileId, endpoints: &Endpoints) -> Result<String, Error> {
        let locator = match self {
            Self::Raster { style_url, retina } => format!(
                "{}/{}{}",
                mapbox::style_tiles_url(
                    api_url(endpoints)?,
                    style_url.as_deref().unwrap_or(DEFAULT_STYLE_URL)
                )?,
                tile_id,
                mapbox::retina_suffix(*retina)
            ),
            Self::ClassicRaster { map_id, retina } => format!(
                "{}/{}{}.png",
                mapbox::map_url(
                    api_url(endpoints)?,
                    map_id.as_deref().unwrap_or(DEFAULT_RASTER_MAP_ID)
                ),
                tile_id,
                mapbox::retina_suffix(*retina)
            ),
            Self::RawPngRaster { map_id } => format!(
                "{}/{}.pngraw",
                mapbox::map_url(
                    api_url(endpoints)?,
                    map_id.as_deref().unwrap_or(DEFAULT_ELEVATION_MAP_ID)
                ),
                tile_id
            ),
            Self::Vector { map_id } => format!(
                "{}/{}.vector.pbf",
                mapbox::map_url(
                    api_url(endpoints)?,
                    map_id.as_deref().unwrap_or(DEFAULT_VECTOR_MAP_ID)
                ),
                tile_id
            ),
            Self::AlternativeVector { map_id } => format!(
                "{}/{}.vector.pbf",
                geoserver::layer_url(geoserver_url(endpoints)?, map_id),
                tile_id
            ),
            Self::StyleOptimizedVector {
                map_id,
                style_id,
                modified_date,
            } => format!(
                "{}/{}.vector.pbf?style={}@{}",
                mapbox::map_url(
                    api_url(endpoints)?,
                    map_id.as_deref().unwrap_or(DEFAULT_VECTOR_MAP_ID)
                ),
                tile_id,
                style_id,
                modified_date
            ),
            Self::GeoServerVector { layer, gridset } => {
                geoserver::vector_tile_url(geoserver_url(endpoints)?, layer, gridset, tile_id)
            }
        };

        log::debug!("Tile {tile_id} of {} is at {locator}.", self.kind());
        Ok(locator)
    }

    /// URL to fetch the tile from, i.e. its locator with the event query of `endpoints`.
    pub fn tile_url(&self, tile_id: TileId, endpoints: &Endpoints) -> Result<String, Error> {
        let locator = self.locator(tile_id, endpoints)?;
        if endpoints.event_query.is_empty() {
            Ok(locator)
        } else {
            Ok(append_query(&locator, &endpoints.event_query))
        }
    }
}

fn api_url(endpoints: &Endpoints) -> Result<&str, Error> {
    if endpoints.api_url.is_empty() {
        Err(Error::MissingApiUrl)
    } else {
        Ok(&endpoints.api_url)
    }
}

fn geoserver_url(endpoints: &Endpoints) -> Result<&str, Error> {
    endpoints
        .geoserver_url
        .as_deref()
        .ok_or(Error::MissingGeoServerUrl)
}

/// Add `param` to the query of `locator`, joining it with `&` when there already is one.
/// Calling it twice adds `param` twice.
pub fn append_query(locator: &str, param: &str) -> String {
    let (rest, fragment) = match locator.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (locator, None),
    };

    let mut url = match rest.split_once('?') {
        Some((base, query)) if !query.is_empty() => format!("{base}?{query}&{param}"),
        Some((base, _)) => format!("{base}?{param}"),
        None => format!("{rest}?{param}"),
    };

    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }

    url
}

/// Tile source as written in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceDescriptor {
    pub kind: String,
    /// Tileset, or the layer name for GeoServer.
    pub map_id: Option<String>,
    pub style_url: Option<String>,
    pub style_id: Option<String>,
    pub modified_date: Option<String>,
    pub gridset: Option<String>,
    /// Overrides the row convention derived from the gridset name.
    pub flip_rows: Option<bool>,
}

impl SourceDescriptor {
    fn required(&self, value: Option<&String>, field: &'static str) -> Result<String, Error> {
        value.cloned().ok_or_else(|| Error::MissingField {
            kind: self.kind.clone(),
            field,
        })
    }
}

impl TryFrom<SourceDescriptor> for TileSource {
    type Error = Error;

    fn try_from(descriptor: SourceDescriptor) -> Result<Self, Self::Error> {
        let source = match descriptor.kind.as_str() {
            "raster" | "retina-raster" => Self::Raster {
                retina: descriptor.kind == "retina-raster",
                style_url: descriptor.style_url,
            },
            "classic-raster" | "classic-retina-raster" => Self::ClassicRaster {
                retina: descriptor.kind == "classic-retina-raster",
                map_id: descriptor.map_id,
            },
            "raw-png-raster" => Self::RawPngRaster {
                map_id: descriptor.map_id,
            },
            "vector" => Self::Vector {
                map_id: descriptor.map_id,
            },
            "alternative-vector" => Self::AlternativeVector {
                map_id: descriptor.required(descriptor.map_id.as_ref(), "map_id")?,
            },
            "style-optimized-vector" => Self::StyleOptimizedVector {
                style_id: descriptor.required(descriptor.style_id.as_ref(), "style_id")?,
                modified_date: descriptor
                    .required(descriptor.modified_date.as_ref(), "modified_date")?,
                map_id: descriptor.map_id,
            },
            "geoserver-vector" => {
                let layer = descriptor.required(descriptor.map_id.as_ref(), "map_id")?;
                let name = descriptor.required(descriptor.gridset.as_ref(), "gridset")?;
                let gridset = match descriptor.flip_rows {
                    Some(flip_rows) => Gridset::with_flipped_rows(name, flip_rows),
                    None => Gridset::new(name),
                };
                Self::GeoServerVector { layer, gridset }
            }
            _ => return Err(Error::UnknownSource(descriptor.kind)),
        };

        Ok(source)
    }
}
