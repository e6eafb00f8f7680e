use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::stops::STOPS_FILENAME;

/// Default filename for the cached Overpass response.
pub const NETWORK_FILENAME: &str = "network.json";
const DATA_DIR_ENV: &str = "RAILNAV_DATA_DIR";

/// Resolve the directory holding persisted stops and cached network data.
///
/// Precedence: explicit `target`, then `RAILNAV_DATA_DIR`, then the platform
/// data directory.
pub fn resolve_data_dir(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = target {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        let path = PathBuf::from(env_path);
        debug!(path = %path.display(), "using data directory from {}", DATA_DIR_ENV);
        return Ok(path);
    }
    default_data_dir()
}

/// Platform-specific data directory for railnav.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "railnav", "railnav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Location of the persisted stop list inside `data_dir`.
pub fn stops_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STOPS_FILENAME)
}

/// Location of the cached network response inside `data_dir`.
pub fn network_path(data_dir: &Path) -> PathBuf {
    data_dir.join(NETWORK_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_wins() {
        let dir = Path::new("/tmp/railnav-explicit");
        assert_eq!(resolve_data_dir(Some(dir)).unwrap(), dir);
    }

    #[test]
    fn files_live_inside_data_dir() {
        let dir = Path::new("/data");
        assert_eq!(stops_path(dir), Path::new("/data/stops.json"));
        assert_eq!(network_path(dir), Path::new("/data/network.json"));
    }
}
