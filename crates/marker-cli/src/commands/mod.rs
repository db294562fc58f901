//! Command implementations for marker-cli

pub mod edit;
pub mod palette;
pub mod run;

pub use edit::{run_clear, run_highlight, run_recolor};
pub use palette::run_palette;
pub use run::run_script;
