//! One-shot edits: highlight, clear and recolor

use marker_core::{Palette, Transition};

use crate::cli::Target;
use crate::error::{CliError, Result};
use crate::session::{Session, describe};

/// Run the highlight command
pub fn run_highlight(palette: &Palette, target: &Target, color: Option<&str>) -> Result<()> {
    println!("{}", highlight(palette, target, color)?);
    Ok(())
}

/// Run the clear command
pub fn run_clear(palette: &Palette, target: &Target) -> Result<()> {
    println!("{}", clear(palette, target)?);
    Ok(())
}

/// Run the recolor command
pub fn run_recolor(palette: &Palette, target: &Target, color: &str) -> Result<()> {
    println!("{}", recolor(palette, target, color)?);
    Ok(())
}

/// Select the target, press the button, then pick `color` if the tool is
/// waiting for one.
pub fn highlight(palette: &Palette, target: &Target, color: Option<&str>) -> Result<String> {
    let color = color.unwrap_or(palette.default_color());
    ensure_on_palette(palette, color)?;

    let mut session = Session::new(&target.markup, palette.clone())?;
    session.select(&target.select, target.nth)?;

    match session.apply() {
        Transition::Deferred => match session.pick(color) {
            Transition::Wrapped => {}
            other => return Err(CliError::user(format!("Nothing highlighted ({})", describe(other)))),
        },
        Transition::Unwrapped => tracing::info!("selection was already highlighted"),
        other => return Err(CliError::user(format!("Nothing highlighted ({})", describe(other)))),
    }
    Ok(session.markup())
}

/// Put the caret in the target and press the button to unwrap its mark
pub fn clear(palette: &Palette, target: &Target) -> Result<String> {
    let mut session = Session::new(&target.markup, palette.clone())?;
    if !session.cursor(&target.select, target.nth)? {
        return Err(not_highlighted(target));
    }
    match session.apply() {
        Transition::Unwrapped => Ok(session.markup()),
        other => Err(CliError::user(format!("Nothing cleared ({})", describe(other)))),
    }
}

/// Put the caret in the target and pick `color` to recolor its mark
pub fn recolor(palette: &Palette, target: &Target, color: &str) -> Result<String> {
    ensure_on_palette(palette, color)?;

    let mut session = Session::new(&target.markup, palette.clone())?;
    if !session.cursor(&target.select, target.nth)? {
        return Err(not_highlighted(target));
    }
    match session.pick(color) {
        Transition::Recolored => Ok(session.markup()),
        other => Err(CliError::user(format!("Nothing recolored ({})", describe(other)))),
    }
}

fn ensure_on_palette(palette: &Palette, color: &str) -> Result<()> {
    if palette.contains(color) {
        return Ok(());
    }
    Err(CliError::user(format!(
        "Color {color:?} is not on the palette ({})",
        palette.colors().join(", ")
    )))
}

fn not_highlighted(target: &Target) -> CliError {
    CliError::user(format!("Text {:?} is not highlighted", target.select))
}
