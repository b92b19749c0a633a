pub mod config;
pub mod extract;
pub mod models;
pub mod serve;

use std::path::{Path, PathBuf};

use inparse_core::InparseConfig;
use tracing::debug;

/// `<config dir>/inparse/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inparse")
        .join("config.json")
}

/// `<data dir>/inparse/models`
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inparse")
        .join("models")
}

/// The config file a command works on: `-c` if given, else the default.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(default_config_path)
}

/// Load the configuration, falling back to defaults when no file exists.
///
/// A path passed with `-c` must exist.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<InparseConfig> {
    let path = config_path(explicit);

    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(InparseConfig::from_file(&path)?)
    } else if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    } else {
        Ok(InparseConfig::default())
    }
}

/// Where model files live: `--model-dir`, then the configured directory if
/// it exists, then the per-user data directory.
pub fn resolve_model_dir(config: &InparseConfig, explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if config.models.model_dir.is_dir() {
        return config.models.model_dir.clone();
    }
    default_model_dir()
}
