//! Render models for the trigger button and the color palette.
//!
//! The controller only keeps these as caches of what it last rendered; hosts
//! turn them into real widgets.

use serde::Serialize;

use crate::palette::{Palette, preview_color};

/// Icon shown on the trigger button
pub const TOOLBOX_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" fill="none" viewBox="0 0 24 24"><path stroke="currentColor" stroke-linecap="round" stroke-width="2" d="M11.35 16.5L6 19l.92-4.08a2 2 0 01.52-.97l7.88-7.88a2 2 0 012.83 0l.79.79a2 2 0 010 2.83l-7.88 7.88a2 2 0 01-.7.43z"/></svg>"#;

/// The inline toolbar button that triggers highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerButton {
    pub icon: &'static str,
    /// Set while the selection sits inside a mark
    pub active: bool,
}

impl Default for TriggerButton {
    fn default() -> Self {
        Self {
            icon: TOOLBOX_ICON,
            active: false,
        }
    }
}

/// One color button on the palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub name: String,
    pub preview: String,
    pub active: bool,
}

/// The palette panel shown next to the trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PalettePanel {
    pub swatches: Vec<Swatch>,
}

impl PalettePanel {
    /// Build one swatch per palette color, marking `current` active
    pub fn build(palette: &Palette, current: &str) -> Self {
        let swatches = palette
            .colors()
            .iter()
            .map(|name| Swatch {
                name: name.clone(),
                preview: preview_color(name).to_string(),
                active: name == current,
            })
            .collect();
        Self { swatches }
    }

    pub fn swatch(&self, name: &str) -> Option<&Swatch> {
        self.swatches.iter().find(|swatch| swatch.name == name)
    }

    /// Names of the swatches flagged active
    pub fn active(&self) -> Vec<&str> {
        self.swatches
            .iter()
            .filter(|swatch| swatch.active)
            .map(|swatch| swatch.name.as_str())
            .collect()
    }

    /// Flag exactly the swatch named `current` as active
    pub(crate) fn set_active(&mut self, current: &str) {
        for swatch in &mut self.swatches {
            swatch.active = swatch.name == current;
        }
    }
}
