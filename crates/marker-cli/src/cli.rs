//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Highlight Marker - wrap, clear and recolor highlights in markup
#[derive(Parser, Debug)]
#[command(name = "marker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Palette configuration file (TOML)
    #[arg(short, long, global = true, env = "MARKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Markup plus the text to act on
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Markup to edit
    pub markup: String,

    /// Text to select; must lie within a single text run
    #[arg(short, long)]
    pub select: String,

    /// Which occurrence of the text to use, counting from 0
    #[arg(short, long, default_value_t = 0)]
    pub nth: usize,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Highlight text and print the resulting markup
    ///
    /// Selecting text that is already highlighted removes the highlight
    /// instead, like pressing the toolbar button.
    ///
    /// Examples:
    ///   marker highlight "hello world" --select world --color blue
    ///   marker highlight "a b a" --select a --nth 1
    Highlight {
        #[command(flatten)]
        target: Target,

        /// Palette color; defaults to the palette's default color
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove the highlight around the selected text
    Clear {
        #[command(flatten)]
        target: Target,
    },

    /// Change the color of the highlight around the selected text
    Recolor {
        #[command(flatten)]
        target: Target,

        /// New palette color
        #[arg(long)]
        color: String,
    },

    /// List palette colors and their previews
    Palette {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Replay a scripted editing session
    ///
    /// The script is TOML with the starting `document` and a list of
    /// `[[step]]` tables, each naming an `op`: select, cursor, apply, pick,
    /// sync or cancel.
    Run {
        /// Path to the session script
        script: PathBuf,

        /// Print the markup after every step
        #[arg(long)]
        trace: bool,
    },
}
