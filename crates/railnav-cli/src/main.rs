use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use railnav_cli::output::OutputFormat;
use railnav_lib::resolve_data_dir;

mod commands;

use commands::stops::StopsCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Railway network routing over OpenStreetMap data")]
struct Cli {
    /// Directory holding saved stops and the cached network (overrides RAILNAV_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download railway ways and stations for a bounding box and cache them.
    Fetch {
        /// Bounding box as south,west,north,east in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,
        /// Where to store the response (defaults to network.json in the data directory).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List stations found in the cached network and the nodes they snap to.
    Stations {
        /// Network file to read instead of the cached one.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// List every endpoint reference accepted by `route`.
    Endpoints {
        /// Network file to read instead of the cached one.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Compute the shortest route between two endpoints.
    Route {
        /// Start: station name, node id (node:<id> or a bare integer), or stop:<index>.
        /// A bare integer that is not a graph node falls back to a station of that name.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: String,
        /// Destination: station name, node id (node:<id> or a bare integer), or stop:<index>.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: String,
        /// Network file to read instead of the cached one.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Manage user-defined stops.
    Stops {
        #[command(subcommand)]
        command: StopsCommand,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir =
        resolve_data_dir(cli.data_dir.as_deref()).context("failed to resolve data directory")?;

    match cli.command {
        Command::Fetch { bbox, output } => {
            commands::fetch::handle_fetch(&data_dir, &bbox, output.as_deref(), cli.format)
        }
        Command::Stations { input } => {
            commands::network::handle_stations(&data_dir, input.as_deref(), cli.format)
        }
        Command::Endpoints { input } => {
            commands::network::handle_endpoints(&data_dir, input.as_deref(), cli.format)
        }
        Command::Route { from, to, input } => {
            commands::route::handle_route(&data_dir, input.as_deref(), &from, &to, cli.format)
        }
        Command::Stops { command } => commands::stops::handle_stops(&data_dir, command, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
