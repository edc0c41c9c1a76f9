//! Resolves the tiles around a geographical position and prints where to fetch them from.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gridtiles::sources::{SourceDescriptor, TileSource};
use gridtiles::{
    Endpoints, Lv03, ReferenceSystem, TILE_SIZE, TileId, WebMercator, Zoom, lat_lon, tile_bounds,
    tile_id_of,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum System {
    /// Swiss grid, tiled like GeoServer's EPSG:2056 gridset
    Swiss,
    /// Web Mercator, EPSG:3857
    Mercator,
}

#[derive(Debug, Parser)]
#[command(name = "demo")]
#[command(about = "Find the tiles around a position and print their URLs", long_about = None)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Zoom level
    #[arg(long)]
    zoom: i32,

    /// Reference system the tiles are cut in
    #[arg(long, value_enum, default_value = "swiss")]
    system: System,

    /// Kind of the tile source, e.g. vector, raster or geoserver-vector
    #[arg(long, default_value = "vector")]
    source: String,

    /// Tileset, or the layer name for GeoServer sources
    #[arg(long)]
    map_id: Option<String>,

    #[arg(long)]
    style_url: Option<String>,

    #[arg(long)]
    style_id: Option<String>,

    #[arg(long)]
    modified_date: Option<String>,

    /// GeoServer gridset, e.g. EPSG:2056
    #[arg(long)]
    gridset: Option<String>,

    /// Override the row order derived from the gridset name
    #[arg(long)]
    flip_rows: Option<bool>,

    /// JSON file with the endpoints
    #[arg(long)]
    config: Option<PathBuf>,

    /// GeoServer root, takes precedence over the configuration file
    #[arg(long, env = "GEOSERVER_URL")]
    geoserver_url: Option<String>,

    /// How many rings of tiles around the central one to print
    #[arg(long, default_value_t = 0)]
    rings: u32,
}

impl Args {
    fn endpoints(&self) -> Result<Endpoints, Box<dyn std::error::Error>> {
        let mut endpoints = match &self.config {
            Some(path) => Endpoints::from_json(&std::fs::read_to_string(path)?)?,
            None => Endpoints::default(),
        };

        if let Some(url) = &self.geoserver_url {
            endpoints = endpoints.with_geoserver_url(url.as_str());
        }

        Ok(endpoints)
    }

    fn tile_source(&self) -> Result<TileSource, gridtiles::sources::Error> {
        TileSource::try_from(SourceDescriptor {
            kind: self.source.clone(),
            map_id: self.map_id.clone(),
            style_url: self.style_url.clone(),
            style_id: self.style_id.clone(),
            modified_date: self.modified_date.clone(),
            gridset: self.gridset.clone(),
            flip_rows: self.flip_rows,
        })
    }
}

/// Swiss tiles are addressed as they are derived. Web Mercator servers count rows from the north.
fn served_as(system: System, tile_id: TileId) -> Result<TileId, gridtiles::TileError> {
    match system {
        System::Swiss => Ok(tile_id),
        System::Mercator => TileId::new(tile_id.zoom(), tile_id.x(), tile_id.flipped_y()),
    }
}

fn print_tiles<S: ReferenceSystem>(
    args: &Args,
    source: &TileSource,
    endpoints: &Endpoints,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let zoom = Zoom::try_from(args.zoom)?;
    let planar = S::to_planar(lat_lon(args.lat, args.lon));
    let tile = tile_id_of(planar, zoom);
    let bounds = tile_bounds::<S>(tile, TILE_SIZE);

    writeln!(out, "position: {}, {}", args.lat, args.lon)?;
    writeln!(out, "planar:   {:.2}, {:.2}", planar.x, planar.y)?;
    writeln!(out, "tile:     {tile}")?;
    writeln!(
        out,
        "bounds:   {:.2}, {:.2} .. {:.2}, {:.2}",
        bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
    )?;
    writeln!(out, "source:   {}", source.kind())?;

    let rings = args.rings;
    for neighbour in tile.surrounding(rings, rings, rings, rings) {
        let tile_id = served_as(args.system, neighbour.canonical())?;
        writeln!(out, "{tile_id}\t{}", source.tile_url(tile_id, endpoints)?)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let endpoints = args.endpoints()?;
    let source = args.tile_source()?;
    log::info!("Resolving {} tiles with {endpoints:?}.", source.kind());

    let mut out = std::io::stdout().lock();
    match args.system {
        System::Swiss => print_tiles::<Lv03>(&args, &source, &endpoints, &mut out),
        System::Mercator => print_tiles::<WebMercator>(&args, &source, &endpoints, &mut out),
    }
}
