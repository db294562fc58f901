//! Palette listing

use colored::Colorize;
use marker_core::{Palette, PalettePanel, sanitize_rules};
use serde_json::json;

use crate::error::Result;

/// Run the palette command
pub fn run_palette(palette: &Palette, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&palette_json(palette))?);
        return Ok(());
    }

    println!("{}", "Palette".bold());
    for (name, preview) in palette.previews() {
        let marker = if name == palette.default_color() {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        println!("  {:<10} {}{}", name.cyan(), preview.dimmed(), marker);
    }
    Ok(())
}

/// Palette as JSON: default color, the swatches a freshly rendered panel shows
/// and the sanitizer rules a host needs to keep marks intact
pub fn palette_json(palette: &Palette) -> serde_json::Value {
    let panel = PalettePanel::build(palette, palette.default_color());
    json!({
        "default": palette.default_color(),
        "colors": panel.swatches,
        "sanitize": sanitize_rules(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lists_colors_in_order() {
        let value = palette_json(&Palette::default());
        assert_eq!(value["default"], "yellow");
        assert_eq!(value["colors"][0]["name"], "yellow");
        assert_eq!(value["colors"][0]["preview"], "#F5EB6F");
        assert_eq!(value["colors"][0]["active"], true);
        assert_eq!(value["colors"][1]["active"], false);
        assert_eq!(value["colors"][5]["name"], "purple");
        assert_eq!(value["colors"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["sanitize"]["mark"]["data-color"], true);
    }

    #[test]
    fn test_custom_names_preview_verbatim() {
        let palette = Palette::new(vec!["#ffcc00".into()], "#ffcc00").unwrap();
        let value = palette_json(&palette);
        assert_eq!(value["colors"][0]["preview"], "#ffcc00");
    }
}
