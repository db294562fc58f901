//! A document plus the highlight controller editing it, and scripted replays
//! of user interaction.

use std::fmt;
use std::path::Path;

use marker_core::{HighlightController, IgnoreReason, Palette, Transition};
use marker_dom::{Document, DomRange};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// One editing session over a parsed document
#[derive(Debug)]
pub struct Session {
    document: Document,
    controller: HighlightController<Document>,
}

impl Session {
    pub fn new(markup: &str, palette: Palette) -> Result<Self> {
        let document = Document::parse(markup)?;
        let mut controller = HighlightController::new(palette);
        controller.render();
        controller.render_actions();
        Ok(Self {
            document,
            controller,
        })
    }

    pub fn controller(&self) -> &HighlightController<Document> {
        &self.controller
    }

    pub fn markup(&self) -> String {
        self.document.to_html()
    }

    /// Select the `nth` occurrence of `text`. Returns whether the selection
    /// is inside a mark.
    pub fn select(&mut self, text: &str, nth: usize) -> Result<bool> {
        let range = self.find(text, nth)?;
        Ok(self.move_selection(range))
    }

    /// Place a caret at the start of the `nth` occurrence of `text`
    pub fn cursor(&mut self, text: &str, nth: usize) -> Result<bool> {
        let range = self.find(text, nth)?.to_caret();
        Ok(self.move_selection(range))
    }

    fn find(&self, text: &str, nth: usize) -> Result<DomRange> {
        self.document.find_text(text, nth).ok_or_else(|| {
            CliError::user(format!(
                "Text {text:?} (occurrence {nth}) not found in a single text run"
            ))
        })
    }

    fn move_selection(&mut self, range: DomRange) -> bool {
        self.document.select(range);
        self.controller.check_state(&self.document)
    }

    /// Press the toolbar button on the current selection
    pub fn apply(&mut self) -> Transition {
        let range = self.document.selection().copied();
        let transition = self.controller.surround(&mut self.document, range.as_ref());
        self.after(transition)
    }

    /// Click a palette swatch
    pub fn pick(&mut self, color: &str) -> Transition {
        let transition = self.controller.pick_color(&mut self.document, color);
        self.after(transition)
    }

    /// Report a selection moved by the controller back to it
    fn after(&mut self, transition: Transition) -> Transition {
        if matches!(
            transition,
            Transition::Wrapped
                | Transition::Unwrapped
                | Transition::Ignored(IgnoreReason::EmptyRange)
        ) {
            self.controller.check_state(&self.document);
        }
        transition
    }

    pub fn cancel(&mut self) -> bool {
        self.controller.cancel()
    }

    pub fn sync(&mut self) -> bool {
        self.controller.check_state(&self.document)
    }

    /// Run one scripted step
    pub fn step(&mut self, step: &Step) -> Result<Outcome> {
        let outcome = match step {
            Step::Select { text, nth } => Outcome::Moved {
                in_mark: self.select(text, *nth)?,
            },
            Step::Cursor { text, nth } => Outcome::Moved {
                in_mark: self.cursor(text, *nth)?,
            },
            Step::Apply => Outcome::Transition(self.apply()),
            Step::Pick { color } => Outcome::Transition(self.pick(color)),
            Step::Sync => Outcome::Synced {
                in_mark: self.sync(),
            },
            Step::Cancel => Outcome::Cancelled {
                pending: self.cancel(),
            },
        };
        tracing::debug!(%step, %outcome, "step done");
        Ok(outcome)
    }
}

/// A recorded editing session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Starting markup
    pub document: String,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "Loading session script");
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }
}

/// A single user action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    /// Select an occurrence of some text
    Select {
        text: String,
        #[serde(default)]
        nth: usize,
    },
    /// Put the caret at the start of an occurrence of some text
    Cursor {
        text: String,
        #[serde(default)]
        nth: usize,
    },
    /// Press the toolbar button
    Apply,
    /// Click a palette swatch
    Pick { color: String },
    /// Re-sync the toolbar with the selection
    Sync,
    /// Dismiss the palette
    Cancel,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Select { text, nth } => write!(f, "select {text:?} #{nth}"),
            Step::Cursor { text, nth } => write!(f, "cursor {text:?} #{nth}"),
            Step::Apply => f.write_str("apply"),
            Step::Pick { color } => write!(f, "pick {color}"),
            Step::Sync => f.write_str("sync"),
            Step::Cancel => f.write_str("cancel"),
        }
    }
}

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved { in_mark: bool },
    Transition(Transition),
    Synced { in_mark: bool },
    Cancelled { pending: bool },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Moved { in_mark } | Outcome::Synced { in_mark } => {
                f.write_str(if *in_mark { "inside mark" } else { "outside mark" })
            }
            Outcome::Transition(transition) => f.write_str(describe(*transition)),
            Outcome::Cancelled { pending: true } => f.write_str("pending highlight dropped"),
            Outcome::Cancelled { pending: false } => f.write_str("nothing pending"),
        }
    }
}

/// Short human-readable label for a transition
pub fn describe(transition: Transition) -> &'static str {
    match transition {
        Transition::Deferred => "awaiting color",
        Transition::Wrapped => "highlighted",
        Transition::Unwrapped => "highlight removed",
        Transition::Recolored => "recolored",
        Transition::Ignored(IgnoreReason::NoRange) => "ignored: no selection",
        Transition::Ignored(IgnoreReason::AlreadyAwaiting) => "ignored: already awaiting color",
        Transition::Ignored(IgnoreReason::NoTarget) => "ignored: nothing to color",
        Transition::Ignored(IgnoreReason::UnknownColor) => "ignored: color not on palette",
        Transition::Ignored(IgnoreReason::EmptyRange) => "ignored: empty selection",
        Transition::Ignored(IgnoreReason::SelectionLost) => "ignored: selection lost",
    }
}
