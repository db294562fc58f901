//! Capabilities the highlight controller consumes from its host editor.

use std::fmt::Debug;

use crate::markup::Fragment;

/// Selection, range and tree primitives provided by a host document.
///
/// Ranges and element handles are opaque to the controller. Content moves
/// across the boundary as detached [`Fragment`] data.
///
/// Implementations follow DOM range semantics: extraction collapses the range
/// to the extraction point, and insertion into a collapsed range grows it to
/// span the inserted nodes.
pub trait SelectionHost {
    /// A boundary pair over the host document
    type Range: Clone + Debug;
    /// Handle to a live node in the host document
    type Handle: Clone + PartialEq + Debug;

    /// The current selection, if any
    fn selection(&self) -> Option<Self::Range>;

    /// Snapshot a range so it survives later selection changes
    fn clone_range(&self, range: &Self::Range) -> Self::Range {
        range.clone()
    }

    /// Make `range` the active selection
    fn restore_selection(&mut self, range: &Self::Range);

    /// Detach the content covered by `range`, splitting partially selected
    /// nodes, and collapse `range` to where the content was.
    fn extract_contents(&mut self, range: &mut Self::Range) -> Fragment;

    /// Insert `fragment` at the start of `range`, returning handles to the
    /// inserted top-level nodes in order.
    fn insert_fragment(&mut self, range: &mut Self::Range, fragment: Fragment)
    -> Vec<Self::Handle>;

    /// Select the full contents of an element
    fn expand_to_element(&mut self, element: &Self::Handle);

    /// Nearest element enclosing the current selection whose tag is `tag`
    /// and whose class list contains `class`
    fn find_parent_tag(&self, tag: &str, class: &str) -> Option<Self::Handle>;

    fn attribute(&self, element: &Self::Handle, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &Self::Handle, name: &str, value: &str);

    /// Detach an element, returning a collapsed range at its former position.
    ///
    /// Returns `None` when the element has no parent.
    fn remove_element(&mut self, element: &Self::Handle) -> Option<Self::Range>;

    /// Ask the host to close any transient toolbar or color picker
    fn close_toolbar(&mut self) {}
}
