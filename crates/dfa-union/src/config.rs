//! Configuration for the command-line tool.
//!
//! ```toml
//! [output]
//! separator = "_"
//! ```

use crate::error::{DfaError, Result};
use crate::text::RenderOptions;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Text placed between the halves of a composite state name.
    pub separator: String,
}

impl Config {
    /// Load the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| DfaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|message| DfaError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(contents: &str) -> std::result::Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            separator: self.output.separator.clone(),
        }
    }
}
