//! Endpoints of the tile servers, passed explicitly to every resolution call.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.mapbox.com/";

/// Query parameter appended to every tile URL, so that the server can count map loads.
pub const DEFAULT_EVENT_QUERY: &str = "events=true";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid endpoint configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Base URLs and query parameters shared by all [`crate::sources::TileSource`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Base of the Mapbox API, with a trailing slash.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Root of the GeoServer installation, with a trailing slash. Required by the GeoServer
    /// backed sources only.
    #[serde(default, alias = "Url", skip_serializing_if = "Option::is_none")]
    pub geoserver_url: Option<String>,

    /// Appended to the query of every tile URL. Empty disables it.
    #[serde(default = "default_event_query")]
    pub event_query: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_event_query() -> String {
    DEFAULT_EVENT_QUERY.to_owned()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            geoserver_url: None,
            event_query: default_event_query(),
        }
    }
}

impl Endpoints {
    /// Set the base of the Mapbox API. An empty URL makes the Mapbox sources fail to resolve.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = normalize_api_url(url.into());
        self
    }

    /// Set the GeoServer root. An empty URL leaves GeoServer unconfigured.
    pub fn with_geoserver_url(mut self, url: impl Into<String>) -> Self {
        self.geoserver_url = normalize_geoserver_url(url.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut endpoints: Self = serde_json::from_str(json)?;
        endpoints.api_url = normalize_api_url(std::mem::take(&mut endpoints.api_url));
        endpoints.geoserver_url = endpoints
            .geoserver_url
            .take()
            .and_then(normalize_geoserver_url);
        Ok(endpoints)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn normalize_api_url(url: String) -> String {
    if url.is_empty() {
        log::warn!("Mapbox API URL is empty.");
        return url;
    }

    with_trailing_slash(url)
}

fn normalize_geoserver_url(url: String) -> Option<String> {
    if url.is_empty() {
        log::warn!("GeoServer URL is empty.");
        return None;
    }

    Some(with_trailing_slash(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let endpoints = Endpoints::default();
        assert_eq!("https://api.mapbox.com/", endpoints.api_url);
        assert_eq!(None, endpoints.geoserver_url);
        assert_eq!("events=true", endpoints.event_query);
    }

    #[test]
    fn geoserver_url_gets_trailing_slash() {
        let endpoints = Endpoints::default().with_geoserver_url("http://my-geoserver.com");
        assert_eq!(
            Some("http://my-geoserver.com/"),
            endpoints.geoserver_url.as_deref()
        );

        let endpoints = Endpoints::default().with_geoserver_url("http://my-geoserver.com/");
        assert_eq!(
            Some("http://my-geoserver.com/"),
            endpoints.geoserver_url.as_deref()
        );
    }

    #[test]
    fn api_url_gets_trailing_slash() {
        let endpoints = Endpoints::default().with_api_url("http://localhost:9000/mapbox");
        assert_eq!("http://localhost:9000/mapbox/", endpoints.api_url);

        let endpoints = Endpoints::from_json(r#"{"api_url": "https://api.mapbox.com"}"#).unwrap();
        assert_eq!(DEFAULT_API_URL, endpoints.api_url);
    }

    #[test]
    fn empty_api_url_stays_empty() {
        assert_eq!("", Endpoints::default().with_api_url("").api_url);
        assert_eq!("", Endpoints::from_json(r#"{"api_url": ""}"#).unwrap().api_url);
    }

    #[test]
    fn empty_geoserver_url_is_ignored() {
        let endpoints = Endpoints::default().with_geoserver_url("");
        assert_eq!(None, endpoints.geoserver_url);
    }

    #[test]
    fn reading_legacy_configuration() {
        let endpoints = Endpoints::from_json(r#"{"Url": "http://localhost:8080/geoserver"}"#).unwrap();
        assert_eq!(
            Some("http://localhost:8080/geoserver/"),
            endpoints.geoserver_url.as_deref()
        );
        assert_eq!(DEFAULT_API_URL, endpoints.api_url);
        assert_eq!(DEFAULT_EVENT_QUERY, endpoints.event_query);
    }

    #[test]
    fn json_there_and_back() {
        let endpoints = Endpoints {
            api_url: "http://localhost/".to_owned(),
            geoserver_url: Some("http://localhost:8080/geoserver/".to_owned()),
            event_query: String::new(),
        };

        let json = endpoints.to_json().unwrap();
        assert_eq!(endpoints, Endpoints::from_json(&json).unwrap());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Endpoints::from_json("{\"api_url\": 5}"),
            Err(ConfigError::Json(_))
        ));
    }
}
