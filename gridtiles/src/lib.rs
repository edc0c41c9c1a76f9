#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod anchor;
mod config;
mod grid;
mod mercator;
mod position;
pub mod sources;
mod swiss;
mod tiles;
mod zoom;

pub use anchor::{InvalidWorldTileSize, MapAnchor};
pub use config::{ConfigError, DEFAULT_API_URL, DEFAULT_EVENT_QUERY, Endpoints};
pub use grid::{
    ReferenceSystem, TILE_SIZE, pixel_size, pixels_to_planar, pixels_to_tile, planar_to_pixels,
    tile_bounds, tile_id, tile_id_of,
};
pub use mercator::{MAX_LATITUDE, WebMercator};
pub use position::{Pixels, Planar, PlanarRect, Position, lat_lon, lon_lat};
pub use swiss::Lv03;
pub use tiles::{TileError, TileId, UnwrappedTileId};
pub use zoom::{InvalidZoom, MAX_ZOOM, Zoom};
