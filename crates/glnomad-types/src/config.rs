//! Editor configuration loaded from `glnomad.toml`.
//!
//! ```toml
//! data_dir = "Data"
//! compression = "zlib"        # or 0 / 1 / 2
//! max_decompressed_size = 268435456
//! history_size = 32
//!
//! [preferences]
//! textureFiltering = "Trilinear"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compression::Compression;
use crate::error::{GlnError, Result};

/// Default ceiling for decompression output (256 MiB).
pub const DEFAULT_MAX_DECOMPRESSED: usize = 256 * 1024 * 1024;

/// Default number of console history entries.
pub const DEFAULT_HISTORY_SIZE: usize = 32;

/// Top-level editor configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory that data files are loaded from and saved to.
    pub data_dir: PathBuf,
    /// Algorithm used when a command does not name one.
    pub compression: Compression,
    /// Upper bound on the size of a decompressed buffer.
    pub max_decompressed_size: usize,
    /// Console history depth.
    pub history_size: usize,
    /// Preference overrides, keyed by preference name.
    pub preferences: BTreeMap<String, String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            compression: Compression::None,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED,
            history_size: DEFAULT_HISTORY_SIZE,
            preferences: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading editor config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Read a configuration file, falling back to defaults when it does not
    /// exist. Read and parse errors in an existing file are still reported.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!(
                "Config file {} not found, using default values",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<()> {
        if self.max_decompressed_size == 0 {
            return Err(GlnError::Config(
                "max_decompressed_size must be greater than zero".to_string(),
            ));
        }
        if self.history_size == 0 {
            return Err(GlnError::Config(
                "history_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
