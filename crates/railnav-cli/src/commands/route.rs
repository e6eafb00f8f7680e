//! Route command handler for computing paths between stations and stops.

use std::path::Path;

use anyhow::{Context, Result};

use railnav_lib::{
    plan_route, resolve_endpoint_query, stops_path, RouteRequest, RouteSummary, StopRegistry,
};

use crate::commands::load_network;
use railnav_cli::output::{write_json, write_route_text, OutputFormat};
use railnav_cli::terminal::ColorPalette;

/// Handle the route subcommand.
///
/// Endpoints are resolved against the freshly built graph, so saved stops
/// always snap to the currently cached network.
pub fn handle_route(
    data_dir: &Path,
    input: Option<&Path>,
    from: &str,
    to: &str,
    format: OutputFormat,
) -> Result<()> {
    let network = load_network(data_dir, input)?;
    let stops = StopRegistry::load(&stops_path(data_dir));

    let request = RouteRequest::new(
        resolve_endpoint_query(&network, from)?,
        resolve_endpoint_query(&network, to)?,
    );
    let plan = plan_route(&network.graph, &stops, &request)?;
    let summary = RouteSummary::from_plan(&network, &stops, &plan)?;

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, &summary),
        OutputFormat::Text => write_route_text(&mut stdout, &summary, &ColorPalette::detect()),
    }
    .context("failed to write route")
}
