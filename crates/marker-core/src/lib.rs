//! Deferred text highlighting for editable documents.
//!
//! The [`HighlightController`] decides whether an invocation on the current
//! selection wraps it in a highlight mark, removes an existing mark, or
//! recolors one in place. New highlights are deferred until a color is picked:
//!
//! ```text
//! select text -> surround() -> (awaiting color) -> pick_color() -> <mark data-color="...">
//! cursor in mark -> surround() -> mark removed
//! cursor in mark -> pick_color() -> data-color replaced
//! ```
//!
//! The controller never touches a concrete document. Hosts implement
//! [`SelectionHost`] to expose their selection and tree mutation primitives,
//! and exchange detached content with the controller as [`markup::Fragment`]
//! values.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod markup;
pub mod palette;
pub mod sanitize;
pub mod view;

pub use config::MarkerConfig;
pub use controller::{
    HighlightController, IgnoreReason, PendingApply, Transition, find_mark, unwrap, wrap,
};
pub use error::{Error, Result};
pub use host::SelectionHost;
pub use markup::{COLOR_ATTRIBUTE, Element, Fragment, MARK_CLASS, MARK_TAG, Node, strip_marks};
pub use palette::{DEFAULT_COLOR, DEFAULT_COLORS, Palette, preview_color};
pub use sanitize::{MARK_SANITIZE_RULE, SanitizeRule, sanitize_rules};
pub use view::{PalettePanel, Swatch, TOOLBOX_ICON, TriggerButton};
