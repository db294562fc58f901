//! In-memory document for the highlight controller.
//!
//! [`Document`] is an arena-backed element/text tree with a selection and
//! DOM-style ranges: boundary points are `(node, offset)` pairs where the
//! offset counts characters inside text nodes and children everywhere else.
//! It implements [`marker_core::SelectionHost`], which makes it both the
//! reference host for the command-line tool and the fake used in tests.
//!
//! ```
//! use marker_core::{HighlightController, Palette, Transition};
//! use marker_dom::Document;
//!
//! let mut doc = Document::parse("hello world").unwrap();
//! let range = doc.find_text("world", 0).unwrap();
//! doc.select(range);
//!
//! let mut controller = HighlightController::new(Palette::default());
//! assert_eq!(controller.surround(&mut doc, Some(&range)), Transition::Deferred);
//! assert_eq!(controller.pick_color(&mut doc, "blue"), Transition::Wrapped);
//! assert_eq!(
//!     doc.to_html(),
//!     r#"hello <mark class="cdx-marker" data-color="blue">world</mark>"#
//! );
//! ```

pub mod document;
pub mod error;
mod host;
mod parse;
pub mod range;

pub use document::{Document, NodeId};
pub use error::{Error, Result};
pub use range::{BoundaryPoint, DomRange};
