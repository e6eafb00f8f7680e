//! Fetch command handler for downloading network data.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use railnav_lib::{
    build_network, fetch_elements, network_path, network_status, save_response, BoundingBox,
};

use railnav_cli::output::{write_json, OutputFormat};

#[derive(Debug, Serialize)]
struct FetchReport {
    path: String,
    elements: usize,
    nodes: usize,
    stations: usize,
}

/// Handle the fetch subcommand.
///
/// Queries Overpass for the bounding box and caches the raw response so the
/// other commands can run offline.
pub fn handle_fetch(
    data_dir: &Path,
    bbox: &str,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let bbox: BoundingBox = bbox.parse()?;
    let response = fetch_elements(&bbox).context("failed to fetch railway data")?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| network_path(data_dir));
    save_response(&path, &response)
        .with_context(|| format!("failed to write network data to {}", path.display()))?;

    let network = build_network(&response.elements);
    let report = FetchReport {
        path: path.display().to_string(),
        elements: response.elements.len(),
        nodes: network.graph.len(),
        stations: network.stations.len(),
    };

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, &report)?,
        OutputFormat::Text => {
            writeln!(stdout, "{}", network_status(&network))?;
            writeln!(stdout, "Network data saved to {}", report.path)?;
        }
    }
    Ok(())
}
