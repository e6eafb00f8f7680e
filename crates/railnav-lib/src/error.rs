use std::path::PathBuf;

use thiserror::Error;

use crate::routing::Endpoint;

/// Convenient result alias for the railnav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for railnav data")]
    ProjectDirsUnavailable,

    /// Raised when a bounding box argument cannot be parsed or is out of range.
    #[error("invalid bounding box '{value}': {reason}")]
    InvalidBoundingBox { value: String, reason: String },

    /// Raised when the Overpass API answered with a non-success status.
    #[error("Overpass API returned HTTP status {status}")]
    OverpassStatus { status: u16 },

    /// Raised when a cached network file could not be found.
    #[error("network data not found at {path}")]
    NetworkDataNotFound { path: PathBuf },

    /// Raised when an endpoint reference could not be parsed.
    #[error("invalid endpoint reference '{value}'; expected a node id, stop:<index> or a station name")]
    InvalidEndpoint { value: String },

    /// Raised when a station name could not be found in the loaded network.
    #[error("unknown station name: {name}{}", format_suggestions(.suggestions))]
    UnknownStation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a station exists but could not be snapped to any graph node.
    #[error("station '{name}' is not linked to the track graph")]
    StationNotLinked { name: String },

    /// Raised when an endpoint does not resolve to a node of the current graph.
    #[error("endpoint {endpoint} does not resolve to a node of the loaded graph")]
    UnresolvedEndpoint { endpoint: Endpoint },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: Endpoint, goal: Endpoint },

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when an imported stop document is not a JSON array.
    #[error("stop import must be a JSON array of stops")]
    StopImportNotList,

    /// Raised when a stop has a non-finite or out-of-range coordinate.
    #[error("invalid coordinates for stop '{name}': ({lat}, {lon}); latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidStopCoordinates { name: String, lat: f64, lon: f64 },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON encoding and decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
