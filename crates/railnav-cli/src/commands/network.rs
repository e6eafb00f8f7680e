//! Station and endpoint listings for the loaded network.

use std::path::Path;

use anyhow::{Context, Result};

use railnav_lib::{endpoint_choices, stops_path, StopRegistry};

use crate::commands::load_network;
use railnav_cli::output::{write_choices_text, write_json, write_stations_text, OutputFormat};

/// Handle the stations subcommand.
pub fn handle_stations(data_dir: &Path, input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let network = load_network(data_dir, input)?;

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, &network.stations),
        OutputFormat::Text => write_stations_text(&mut stdout, &network.stations),
    }
    .context("failed to write station list")
}

/// Handle the endpoints subcommand.
///
/// Lists snapped stations followed by saved stops, each with the reference
/// accepted by `route --from/--to`.
pub fn handle_endpoints(
    data_dir: &Path,
    input: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let network = load_network(data_dir, input)?;
    let stops = StopRegistry::load(&stops_path(data_dir));
    let choices = endpoint_choices(&network, &stops);

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, &choices),
        OutputFormat::Text => write_choices_text(&mut stdout, &choices),
    }
    .context("failed to write endpoint list")
}
