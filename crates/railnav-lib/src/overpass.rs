//! Fetch railway ways and stations for a bounding box from the Overpass API.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::osm::OverpassResponse;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const OVERPASS_URL_ENV: &str = "RAILNAV_OVERPASS_URL";
const OVERPASS_SOURCE_ENV: &str = "RAILNAV_OVERPASS_SOURCE";
/// Slightly above the server-side `[timeout:25]` so the server reports first.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("railnav/", env!("CARGO_PKG_VERSION"));

/// Geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        let bbox = Self {
            south,
            west,
            north,
            east,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidBoundingBox {
            value: self.to_string(),
            reason: reason.to_string(),
        };

        let lat_ok = |lat: f64| (-90.0..=90.0).contains(&lat);
        let lon_ok = |lon: f64| (-180.0..=180.0).contains(&lon);
        if !lat_ok(self.south) || !lat_ok(self.north) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !lon_ok(self.west) || !lon_ok(self.east) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }
        if self.south > self.north {
            return Err(invalid("south must not exceed north"));
        }
        Ok(())
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parse `south,west,north,east`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidBoundingBox {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid("expected four numbers"))?;
        let &[south, west, north, east] = parts.as_slice() else {
            return Err(invalid("expected four numbers: south,west,north,east"));
        };
        if parts.iter().any(|value| !value.is_finite()) {
            return Err(invalid("coordinates must be finite"));
        }
        Self::new(south, west, north, east)
    }
}

/// Overpass QL query selecting rail ways and station-like nodes in `bbox`,
/// recursing down so every way vertex is included.
pub fn build_query(bbox: &BoundingBox) -> String {
    let bb = bbox.to_string();
    format!(
        r#"
[out:json][timeout:25];
(
  way["railway"="rail"]({bb});
  node["railway"="station"]({bb});
  node["station"="rail"]({bb});
  node["railway"="halt"]({bb});
  node["public_transport"="station"]({bb});
);
(._;>;);
out body;
"#
    )
}

/// Resolve the Overpass endpoint, honouring `RAILNAV_OVERPASS_URL`.
pub fn overpass_url() -> String {
    env::var(OVERPASS_URL_ENV).unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string())
}

/// Fetch the raw elements for `bbox`.
///
/// When `RAILNAV_OVERPASS_SOURCE` points to a JSON file it is read instead of
/// contacting the network.
pub fn fetch_elements(bbox: &BoundingBox) -> Result<OverpassResponse> {
    if let Some(source) = env::var_os(OVERPASS_SOURCE_ENV) {
        let source = PathBuf::from(source);
        info!(source = %source.display(), "using local Overpass source override");
        return OverpassResponse::from_path(&source);
    }
    fetch_from(&overpass_url(), bbox)
}

/// POST the query for `bbox` to `url` and parse the response.
pub fn fetch_from(url: &str, bbox: &BoundingBox) -> Result<OverpassResponse> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    info!(url, bbox = %bbox, "querying Overpass API");
    let response = client
        .post(url)
        .header(ACCEPT, "application/json")
        .body(build_query(bbox))
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::OverpassStatus {
            status: status.as_u16(),
        });
    }

    let body = response.text()?;
    let parsed = OverpassResponse::from_json_str(&body)?;
    debug!(
        elements = parsed.elements.len(),
        nodes = parsed.node_count(),
        ways = parsed.way_count(),
        "received Overpass response"
    );
    Ok(parsed)
}

/// Write a fetched response to disk so later runs can work offline.
pub fn save_response(path: &Path, response: &OverpassResponse) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string(response)?)?;
    debug!(path = %path.display(), "cached Overpass response");
    Ok(())
}
