use super::Error;

/// Style used by raster sources which do not name one.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/satellite-v9";

/// Tileset used by classic raster sources which do not name one.
pub const DEFAULT_RASTER_MAP_ID: &str = "mapbox.satellite";

/// Terrain-RGB elevation tileset.
pub const DEFAULT_ELEVATION_MAP_ID: &str = "mapbox.terrain-rgb";

/// Tileset used by vector sources which do not name one.
pub const DEFAULT_VECTOR_MAP_ID: &str = "mapbox.mapbox-streets-v7";

const STYLE_SCHEME: &str = "mapbox://";

/// Predefined Mapbox styles.
/// <https://docs.mapbox.com/api/maps/styles/#classic-mapbox-styles>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapboxStyle {
    #[default]
    Streets,
    Outdoors,
    Light,
    Dark,
    Satellite,
    SatelliteStreets,
    NavigationDay,
    NavigationNight,
}

impl MapboxStyle {
    fn api_slug(&self) -> &'static str {
        match self {
            Self::Streets => "streets-v12",
            Self::Outdoors => "outdoors-v12",
            Self::Light => "light-v11",
            Self::Dark => "dark-v11",
            Self::Satellite => "satellite-v9",
            Self::SatelliteStreets => "satellite-streets-v12",
            Self::NavigationDay => "navigation-day-v1",
            Self::NavigationNight => "navigation-night-v1",
        }
    }

    /// `mapbox://` URL of this style, suitable for [`super::TileSource::Raster`].
    pub fn style_url(&self) -> String {
        format!("{STYLE_SCHEME}styles/mapbox/{}", self.api_slug())
    }
}

/// Turn a `mapbox://styles/{user}/{style}[/draft]` URL into the base of the style's raster
/// tiles. Other URLs are already usable and returned as they are.
pub(super) fn style_tiles_url(api_url: &str, style_url: &str) -> Result<String, Error> {
    let Some(path) = style_url.strip_prefix(STYLE_SCHEME) else {
        return Ok(style_url.to_owned());
    };

    let mut segments = path.split('/');
    let (Some("styles"), Some(user), Some(style)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(Error::MalformedStyleUrl(style_url.to_owned()));
    };

    if user.is_empty() || style.is_empty() {
        return Err(Error::MalformedStyleUrl(style_url.to_owned()));
    }

    let draft = if segments.next().is_some() {
        "/draft"
    } else {
        ""
    };

    Ok(format!("{api_url}styles/v1/{user}/{style}{draft}/tiles"))
}

/// Base of the tiles of a classic tileset.
pub(super) fn map_url(api_url: &str, map_id: &str) -> String {
    format!("{api_url}v4/{map_id}")
}

pub(super) fn retina_suffix(retina: bool) -> &'static str {
    if retina { "@2x" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: &str = "https://api.mapbox.com/";

    #[test]
    fn predefined_styles() {
        assert_eq!(DEFAULT_STYLE_URL, MapboxStyle::Satellite.style_url());
        assert_eq!(
            "mapbox://styles/mapbox/streets-v12",
            MapboxStyle::default().style_url()
        );
    }

    #[test]
    fn normalizing_style_urls() {
        assert_eq!(
            Ok("https://api.mapbox.com/styles/v1/mapbox/satellite-v9/tiles".to_owned()),
            style_tiles_url(API, DEFAULT_STYLE_URL)
        );

        assert_eq!(
            Ok("https://api.mapbox.com/styles/v1/someone/abc123/draft/tiles".to_owned()),
            style_tiles_url(API, "mapbox://styles/someone/abc123/draft")
        );

        // Plain URLs are taken as they are.
        assert_eq!(
            Ok("https://example.com/styles/x/tiles".to_owned()),
            style_tiles_url(API, "https://example.com/styles/x/tiles")
        );
    }

    #[test]
    fn malformed_style_urls() {
        for url in [
            "mapbox://styles/someone",
            "mapbox://styles//abc",
            "mapbox://tilesets/someone/abc",
            "mapbox://",
        ] {
            assert_eq!(
                Err(Error::MalformedStyleUrl(url.to_owned())),
                style_tiles_url(API, url)
            );
        }
    }

    #[test]
    fn classic_map_url() {
        assert_eq!(
            "https://api.mapbox.com/v4/mapbox.satellite",
            map_url(API, DEFAULT_RASTER_MAP_ID)
        );
    }
}
