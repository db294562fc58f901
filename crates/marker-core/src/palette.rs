//! Highlight color palette

use std::collections::HashSet;

use crate::config::MarkerConfig;
use crate::error::{Error, Result};

/// Colors offered when no configuration is given, in display order.
pub const DEFAULT_COLORS: [&str; 6] = ["yellow", "green", "blue", "pink", "orange", "purple"];

/// Color used for new marks unless the user picks another.
pub const DEFAULT_COLOR: &str = "yellow";

/// Map a color name to the solid value shown on its palette swatch.
///
/// Unknown names are returned verbatim so configurations can use raw CSS
/// color strings (`#ffcc00`, `rgb(...)`) as palette entries.
pub fn preview_color(name: &str) -> &str {
    match name {
        "yellow" => "#F5EB6F",
        "green" => "#4CAF50",
        "blue" => "#2196F3",
        "pink" => "#E91E63",
        "orange" => "#FF9800",
        "purple" => "#9C27B0",
        other => other,
    }
}

/// Validated, ordered set of color names plus the default color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
    default_color: String,
}

impl Palette {
    /// Build a palette, rejecting empty, blank or duplicate names and a
    /// default that is not one of the colors.
    pub fn new(colors: Vec<String>, default_color: impl Into<String>) -> Result<Self> {
        let default_color = default_color.into();
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for color in &colors {
            if color.trim().is_empty() {
                return Err(Error::BlankColor);
            }
            if !seen.insert(color.as_str()) {
                return Err(Error::DuplicateColor {
                    color: color.clone(),
                });
            }
        }

        if !seen.contains(default_color.as_str()) {
            return Err(Error::UnknownDefaultColor {
                color: default_color,
            });
        }

        Ok(Self {
            colors,
            default_color,
        })
    }

    pub fn from_config(config: &MarkerConfig) -> Result<Self> {
        Self::new(config.colors.clone(), config.default_color.clone())
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.iter().any(|color| color == name)
    }

    /// Iterate `(name, preview)` pairs in palette order
    pub fn previews(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors
            .iter()
            .map(|color| (color.as_str(), preview_color(color)))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            default_color: DEFAULT_COLOR.to_string(),
        }
    }
}
