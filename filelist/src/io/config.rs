//! Listing configuration: defaults, optional TOML file, CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::encoding::OutputEncoding;
use crate::io::walk::WalkOptions;

/// Manifest path used when none is given.
pub const DEFAULT_OUTPUT_FILE: &str = "temp/file_list.txt";
/// Encoding label used when none is given.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Settings for one listing run (TOML).
///
/// Missing fields take their defaults; `directory` has none and must be
/// supplied by the file or the command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListConfig {
    /// Root directory to scan.
    pub directory: Option<PathBuf>,

    /// Manifest destination. Its parent directory must already exist.
    pub output_file: PathBuf,

    /// Text encoding label for the manifest (e.g. `utf-8`, `latin1`).
    pub encoding: String,

    /// Visit entries in file-name order instead of directory order.
    pub sort: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            directory: None,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            encoding: DEFAULT_ENCODING.to_string(),
            sort: false,
        }
    }
}

/// Values given explicitly on the command line; `None` keeps the config value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub directory: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub encoding: Option<String>,
    pub sort: bool,
}

impl ListConfig {
    /// Apply command-line overrides on top of this config.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(directory) = overrides.directory {
            self.directory = Some(directory);
        }
        if let Some(output_file) = overrides.output_file {
            self.output_file = output_file;
        }
        if let Some(encoding) = overrides.encoding {
            self.encoding = encoding;
        }
        self.sort |= overrides.sort;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.root()?;
        if self.output_file.as_os_str().is_empty() {
            return Err(anyhow!("output_file must not be empty"));
        }
        self.output_encoding()?;
        Ok(())
    }

    /// Root directory, or an error if none was configured.
    pub fn root(&self) -> Result<&Path> {
        match self.directory.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir),
            _ => Err(anyhow!("directory is required (pass --directory)")),
        }
    }

    pub fn output_encoding(&self) -> Result<OutputEncoding> {
        OutputEncoding::for_label(&self.encoding)
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions { sort: self.sort }
    }
}

/// Load config from a TOML file named on the command line.
pub fn load_config(path: &Path) -> Result<ListConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ListConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Build the effective config: optional file, then overrides, then validation.
pub fn resolve_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<ListConfig> {
    let base = match path {
        Some(path) => load_config(path)?,
        None => ListConfig::default(),
    };
    let cfg = base.apply(overrides);
    cfg.validate()?;
    Ok(cfg)
}
