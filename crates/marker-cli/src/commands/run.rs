//! Scripted session replay

use std::path::Path;

use colored::Colorize;
use marker_core::Palette;

use crate::error::Result;
use crate::session::{Script, Session};

/// Run the run command
pub fn run_script(palette: &Palette, path: &Path, trace: bool) -> Result<()> {
    let script = Script::load(path)?;
    let mut session = Session::new(&script.document, palette.clone())?;

    for (index, step) in script.steps.iter().enumerate() {
        let outcome = session.step(step)?;
        if trace {
            println!(
                "{} {} -> {}",
                format!("[{}]", index + 1).dimmed(),
                step.to_string().cyan(),
                outcome
            );
            println!("    {}", session.markup());
        }
    }

    if session.controller().is_awaiting_color() {
        tracing::warn!("session ended while awaiting a color; pending highlight dropped");
    }
    println!("{}", session.markup());
    Ok(())
}
