use approx::assert_abs_diff_eq;
use gridtiles::sources::{Gridset, SourceDescriptor, TileSource, WEB_MERCATOR_GRIDSET};
use gridtiles::{
    Endpoints, Lv03, ReferenceSystem, TILE_SIZE, TileId, WebMercator, Zoom, lat_lon, lon_lat,
    tile_bounds, tile_id_of,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn endpoints() -> Endpoints {
    Endpoints::default().with_geoserver_url("http://localhost:8080/geoserver")
}

/// Tile id as counted by XYZ servers.
fn xyz(tile_id: TileId) -> TileId {
    TileId::new(tile_id.zoom(), tile_id.x(), tile_id.flipped_y()).unwrap()
}

#[test]
fn swiss_tile_from_geoserver() {
    init();

    let zoom = Zoom::try_from(9).unwrap();
    let bern = Lv03::to_planar(lat_lon(46.9511, 7.4386));
    let tile = tile_id_of(bern, zoom);

    assert!(tile.flip_y);
    assert!(tile_bounds::<Lv03>(tile, TILE_SIZE).contains(bern));

    let source = TileSource::GeoServerVector {
        layer: "ch:buildings".to_owned(),
        gridset: Gridset::new("EPSG:2056"),
    };
    assert_eq!(
        "http://localhost:8080/geoserver/gwc/service/tms/1.0.0/ch:buildings@EPSG%3A2056@pbf/9/260/285.pbf?events=true",
        source.tile_url(tile.canonical(), &endpoints()).unwrap()
    );

    // Going north moves to the next row, which is also the next row on the server.
    assert_eq!(
        "http://localhost:8080/geoserver/gwc/service/tms/1.0.0/ch:buildings@EPSG%3A2056@pbf/9/260/286.pbf",
        source
            .locator(tile.north().canonical(), &endpoints())
            .unwrap()
    );
}

#[test]
fn web_mercator_tile_from_every_server() {
    init();

    let zoom = Zoom::try_from(20).unwrap();
    let citadel = lon_lat(21.00027, 52.26470);
    let tile = tile_id_of(WebMercator::to_planar(citadel), zoom).canonical();
    let endpoints = endpoints();

    assert_eq!(
        "https://api.mapbox.com/v4/mapbox.mapbox-streets-v7/20/585455/345104.vector.pbf",
        TileSource::Vector { map_id: None }
            .locator(xyz(tile), &endpoints)
            .unwrap()
    );

    // GeoServer counts Web Mercator rows from the south, which is where the tile came from.
    assert_eq!(
        "http://localhost:8080/geoserver/gwc/service/tms/1.0.0/osm@EPSG%3A900913@pbf/20/585455/703471.pbf",
        TileSource::GeoServerVector {
            layer: "osm".to_owned(),
            gridset: Gridset::new(WEB_MERCATOR_GRIDSET),
        }
        .locator(xyz(tile), &endpoints)
        .unwrap()
    );
}

#[test]
fn crossing_the_antimeridian() {
    init();

    let zoom = Zoom::try_from(3).unwrap();
    let tile = tile_id_of(WebMercator::to_planar(lat_lon(0.5, 179.9)), zoom);
    assert_eq!(7, tile.x);

    let east = tile.east();
    assert_eq!(8, east.x);
    assert_eq!(0, east.canonical().x());

    let tile = tile_id_of(WebMercator::to_planar(lat_lon(0.5, -179.9)), zoom);
    assert_eq!(tile.canonical(), east.canonical());
}

#[test]
fn swiss_reference_point_survives_the_round_trip() {
    init();

    let reference = lat_lon(46.0 + 2.0 / 60. + 38.87 / 3600., 8.0 + 43.0 / 60. + 49.79 / 3600.);
    let planar = Lv03::to_planar(reference);
    assert_abs_diff_eq!(planar.x, 99_999.76, epsilon = 1.);
    assert_abs_diff_eq!(planar.y, -100_000.03, epsilon = 1.);

    let back = Lv03::to_geographic(planar);
    assert_abs_diff_eq!(back.x(), reference.x(), epsilon = 1e-4);
    assert_abs_diff_eq!(back.y(), reference.y(), epsilon = 1e-4);
}

#[test]
fn sources_configured_from_json() {
    init();

    let endpoints =
        Endpoints::from_json(r#"{"Url": "https://geo.example.com/geoserver", "event_query": "events=1"}"#)
            .unwrap();
    let descriptor: SourceDescriptor =
        serde_json::from_str(r#"{"kind": "alternative-vector", "map_id": "osm"}"#).unwrap();
    let source = TileSource::try_from(descriptor).unwrap();

    let tile = TileId::new(Zoom::try_from(9).unwrap(), 266, 180).unwrap();
    assert_eq!(
        "https://geo.example.com/geoserver/gwc/service/tms/1.0.0/osm/9/266/180.vector.pbf?events=1",
        source.tile_url(tile, &endpoints).unwrap()
    );
}
