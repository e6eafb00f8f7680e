//! Stop management subcommands.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use railnav_lib::{stops_path, Stop, StopRegistry};

use railnav_cli::output::{write_json, write_stops_text, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum StopsCommand {
    /// List saved stops with their stop:<index> references.
    List,
    /// Save a new stop.
    Add {
        /// Display name of the stop.
        #[arg(long)]
        name: String,
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Write all stops as a JSON array (to stdout unless --output is given).
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Append stops from a JSON array file.
    Import {
        /// File containing a JSON array of {name, lat, lon} records.
        file: PathBuf,
    },
}

/// Handle the stops subcommands.
pub fn handle_stops(data_dir: &Path, command: StopsCommand, format: OutputFormat) -> Result<()> {
    let path = stops_path(data_dir);
    let mut registry = StopRegistry::load(&path);
    let mut stdout = std::io::stdout().lock();

    match command {
        StopsCommand::List => match format {
            OutputFormat::Json => write_json(&mut stdout, &registry.iter().collect::<Vec<_>>())?,
            OutputFormat::Text => write_stops_text(&mut stdout, registry.iter())?,
        },
        StopsCommand::Add { name, lat, lon } => {
            if name.trim().is_empty() {
                anyhow::bail!("stop name must not be empty");
            }
            let stop = Stop::try_new(name.clone(), lat, lon)?;
            let index = registry.push(stop);
            save(&registry, &path)?;
            info!(index, name = %name, "added stop");
            writeln!(stdout, "Added stop:{} {}", index, name)?;
        }
        StopsCommand::Export { output } => {
            let json = registry.export_json()?;
            match output {
                Some(target) => {
                    fs::write(&target, &json)
                        .with_context(|| format!("failed to write {}", target.display()))?;
                    writeln!(
                        stdout,
                        "Exported {} stops to {}",
                        registry.len(),
                        target.display()
                    )?;
                }
                None => writeln!(stdout, "{}", json)?,
            }
        }
        StopsCommand::Import { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let count = registry
                .import_json(&raw)
                .with_context(|| format!("failed to import stops from {}", file.display()))?;
            save(&registry, &path)?;
            writeln!(stdout, "Imported {} stops", count)?;
        }
    }
    Ok(())
}

fn save(registry: &StopRegistry, path: &Path) -> Result<()> {
    registry
        .save(path)
        .with_context(|| format!("failed to save stops to {}", path.display()))
}
