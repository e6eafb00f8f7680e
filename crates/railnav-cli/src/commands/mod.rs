// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod fetch;
pub mod network;
pub mod route;
pub mod stops;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use railnav_lib::{build_network, network_path, network_status, OverpassResponse, RailNetwork};

/// Load the cached (or explicitly given) Overpass response and build the network.
pub fn load_network(data_dir: &Path, input: Option<&Path>) -> Result<RailNetwork> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| network_path(data_dir));
    let response = OverpassResponse::from_path(&path).with_context(|| {
        format!(
            "failed to load network data from {} (run `railnav-cli fetch` first)",
            path.display()
        )
    })?;
    let network = build_network(&response.elements);
    info!("{}", network_status(&network));
    Ok(network)
}
