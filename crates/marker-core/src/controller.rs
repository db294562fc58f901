//! Highlight controller: the deferred wrap / unwrap / recolor state machine.
//!
//! ```text
//!            surround (outside mark)              pick_color
//!   Idle  ---------------------------->  Awaiting  ----------->  Idle (wrapped)
//!    |  ^            surround (again): no-op  |
//!    |  +-------------------------------------+ surround inside mark: unwrap
//!    +-- pick_color inside mark: recolor
//! ```

use tracing::{debug, info};

use crate::config::MarkerConfig;
use crate::error::Result;
use crate::host::SelectionHost;
use crate::markup::{COLOR_ATTRIBUTE, Element, Fragment, MARK_CLASS, MARK_TAG, Node, strip_marks};
use crate::palette::Palette;
use crate::view::{PalettePanel, TriggerButton};

/// Snapshot of the selection taken when highlighting was invoked, kept until a
/// color is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingApply<R> {
    pub range: R,
}

/// Why an entry point did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Invoked without a range
    NoRange,
    /// Already waiting for a color pick
    AlreadyAwaiting,
    /// Color picked with nothing pending and no mark under the selection
    NoTarget,
    /// Color name is not on the palette
    UnknownColor,
    /// The pending range covered no content
    EmptyRange,
    /// The host dropped its selection while a mark was being removed
    SelectionLost,
}

/// The state-machine edge taken by an entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Selection stored, waiting for a color
    Deferred,
    /// Pending selection wrapped in a new mark
    Wrapped,
    /// Enclosing mark removed
    Unwrapped,
    /// Enclosing mark's color replaced
    Recolored,
    Ignored(IgnoreReason),
}

/// Owns the interaction state for one editing session.
#[derive(Debug)]
pub struct HighlightController<H: SelectionHost> {
    palette: Palette,
    current_color: String,
    pending: Option<PendingApply<H::Range>>,
    trigger: Option<TriggerButton>,
    actions: Option<PalettePanel>,
}

impl<H: SelectionHost> HighlightController<H> {
    pub fn new(palette: Palette) -> Self {
        let current_color = palette.default_color().to_string();
        Self {
            palette,
            current_color,
            pending: None,
            trigger: None,
            actions: None,
        }
    }

    /// Build a controller from configuration, validating the palette
    pub fn from_config(config: &MarkerConfig) -> Result<Self> {
        Ok(Self::new(config.palette()?))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color used by the next wrap, or of the mark under the selection
    pub fn current_color(&self) -> &str {
        &self.current_color
    }

    pub fn is_awaiting_color(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_range(&self) -> Option<&H::Range> {
        self.pending.as_ref().map(|pending| &pending.range)
    }

    /// Last rendered trigger button
    pub fn trigger(&self) -> Option<&TriggerButton> {
        self.trigger.as_ref()
    }

    /// Last rendered palette panel
    pub fn actions(&self) -> Option<&PalettePanel> {
        self.actions.as_ref()
    }

    /// Render the trigger button
    pub fn render(&mut self) -> TriggerButton {
        let button = TriggerButton::default();
        self.trigger = Some(button.clone());
        button
    }

    /// Render the palette, replacing the previously rendered one
    pub fn render_actions(&mut self) -> PalettePanel {
        let panel = PalettePanel::build(&self.palette, &self.current_color);
        self.actions = Some(panel.clone());
        panel
    }

    /// Invoke the tool on `range`.
    ///
    /// Inside a mark this removes the mark immediately and drops any pending
    /// state. Otherwise the range is stored and the document is left alone
    /// until [`pick_color`](Self::pick_color).
    pub fn surround(&mut self, host: &mut H, range: Option<&H::Range>) -> Transition {
        let Some(range) = range else {
            debug!("surround invoked without a range");
            return Transition::Ignored(IgnoreReason::NoRange);
        };

        if let Some(mark) = find_mark(host) {
            if !unwrap(host, &mark) {
                debug!(?mark, "no selection around the mark, leaving it in place");
                return Transition::Ignored(IgnoreReason::SelectionLost);
            }
            if self.pending.take().is_some() {
                debug!("dropped pending highlight in favour of unwrap");
            }
            host.close_toolbar();
            info!("removed highlight");
            return Transition::Unwrapped;
        }

        if self.pending.is_some() {
            debug!("already awaiting a color");
            return Transition::Ignored(IgnoreReason::AlreadyAwaiting);
        }

        self.pending = Some(PendingApply {
            range: host.clone_range(range),
        });
        self.current_color = self.palette.default_color().to_string();
        self.refresh_swatches();
        debug!(color = %self.current_color, "awaiting color selection");
        Transition::Deferred
    }

    /// A palette swatch was clicked.
    ///
    /// Applies the pending highlight if there is one, otherwise recolors the
    /// mark under the selection. With neither, only the current color changes.
    pub fn pick_color(&mut self, host: &mut H, name: &str) -> Transition {
        if !self.palette.contains(name) {
            debug!(color = name, "ignoring color outside the palette");
            return Transition::Ignored(IgnoreReason::UnknownColor);
        }

        self.current_color = name.to_string();
        self.refresh_swatches();

        if let Some(PendingApply { range }) = self.pending.take() {
            host.restore_selection(&range);
            let wrapped = wrap(host, range, &self.current_color);
            host.close_toolbar();
            return if wrapped {
                info!(color = name, "applied highlight");
                Transition::Wrapped
            } else {
                Transition::Ignored(IgnoreReason::EmptyRange)
            };
        }

        if let Some(mark) = find_mark(host) {
            host.set_attribute(&mark, COLOR_ATTRIBUTE, &self.current_color);
            host.close_toolbar();
            info!(color = name, "recolored highlight");
            return Transition::Recolored;
        }

        debug!(color = name, "no pending selection and no mark to recolor");
        Transition::Ignored(IgnoreReason::NoTarget)
    }

    /// Drop a pending highlight without touching the document.
    ///
    /// Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            debug!("pending highlight cancelled");
        }
        cancelled
    }

    /// Re-sync with the host after its selection changed.
    ///
    /// Returns whether the selection is inside a mark.
    pub fn check_state(&mut self, host: &H) -> bool {
        let mark = find_mark(host);
        let active = mark.is_some();

        if let Some(trigger) = self.trigger.as_mut() {
            trigger.active = active;
        }

        if let Some(color) = mark.and_then(|mark| host.attribute(&mark, COLOR_ATTRIBUTE)) {
            if self.palette.contains(&color) {
                self.current_color = color;
            } else {
                debug!(%color, "mark color is not on the palette");
            }
        }

        self.refresh_swatches();
        active
    }

    fn refresh_swatches(&mut self) {
        if let Some(actions) = self.actions.as_mut() {
            actions.set_active(&self.current_color);
        }
    }
}

/// The mark enclosing the host's current selection, if any
pub fn find_mark<H: SelectionHost>(host: &H) -> Option<H::Handle> {
    host.find_parent_tag(MARK_TAG, MARK_CLASS)
}

/// Wrap the content of `range` in a new mark painted with `color`.
///
/// Marks inside the wrapped content are unwrapped first so marks never nest.
/// On success the selection covers the new mark. Returns `false` without
/// inserting anything when the range holds no content.
pub fn wrap<H: SelectionHost>(host: &mut H, mut range: H::Range, color: &str) -> bool {
    let extracted = host.extract_contents(&mut range);
    if extracted.is_empty() {
        debug!("nothing to wrap");
        return false;
    }

    if extracted.contains_mark() {
        debug!("unwrapping marks inside the new highlight");
    }
    let content = strip_marks(extracted);
    let mark = Element::mark(color).with_children(content.nodes);
    let inserted = host.insert_fragment(&mut range, Fragment::from(Node::Element(mark)));

    match inserted.first() {
        Some(mark) => host.expand_to_element(mark),
        None => host.restore_selection(&range),
    }
    true
}

/// Remove `mark`, putting its children back where it stood, and select them.
///
/// Returns `false` without touching the document when the host has no
/// selection after expanding it to the mark.
pub fn unwrap<H: SelectionHost>(host: &mut H, mark: &H::Handle) -> bool {
    host.expand_to_element(mark);
    let Some(mut range) = host.selection() else {
        return false;
    };
    let content = host.extract_contents(&mut range);

    let Some(mut range) = host.remove_element(mark) else {
        debug!(?mark, "mark has no parent, restoring its content");
        host.insert_fragment(&mut range, content);
        return true;
    };
    host.insert_fragment(&mut range, content);
    host.restore_selection(&range);
    true
}
