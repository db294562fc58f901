//! Configuration for the highlight tool
//!
//! Hosts pass a [`MarkerConfig`] once when constructing the controller. It can
//! be built in code or read from TOML:
//!
//! ```toml
//! colors = ["yellow", "green", "#ffcc00"]
//! default-color = "green"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::palette::{DEFAULT_COLOR, DEFAULT_COLORS, Palette};

/// Palette configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MarkerConfig {
    /// Color names offered on the palette, in display order
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
    /// Color used for new marks
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            default_color: default_color(),
        }
    }
}

impl MarkerConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(?path, "Loading marker config");

        let source = fs::read_to_string(path)?;
        toml::from_str(&source).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Validate into a [`Palette`]
    pub fn palette(&self) -> Result<Palette> {
        Palette::from_config(self)
    }
}
