//! Configuration resolution at startup.
//!
//! Precedence, lowest first: built-in defaults, the config file, then
//! process parameters.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glnomad_platform::parm_value;
use glnomad_types::{Compression, EditorConfig};

/// Environment variable naming the config file when `-config` is absent.
pub const CONFIG_ENV: &str = "GLNOMAD_CONFIG";

/// Config file used when neither `-config` nor the environment names one.
const DEFAULT_CONFIG: &str = "glnomad.toml";

/// Build the editor configuration from `args` (program name first) and the
/// value of [`CONFIG_ENV`].
pub fn resolve_config(args: &[String], env_path: Option<String>) -> Result<EditorConfig> {
    let path: PathBuf = parm_value(args, "-config")
        .map(PathBuf::from)
        .or_else(|| env_path.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let mut config = EditorConfig::load_or_default(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    if let Some(name) = parm_value(args, "-compression") {
        config.compression = name
            .parse::<Compression>()
            .with_context(|| format!("bad -compression value '{name}'"))?;
        log::info!("Compression overridden to {}", config.compression);
    }
    Ok(config)
}
