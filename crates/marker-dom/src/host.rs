//! [`SelectionHost`] implementation for [`Document`]

use marker_core::SelectionHost;
use marker_core::markup::Fragment;

use crate::document::{Document, NodeId};
use crate::range::DomRange;

impl SelectionHost for Document {
    type Range = DomRange;
    type Handle = NodeId;

    fn selection(&self) -> Option<DomRange> {
        Document::selection(self).copied()
    }

    fn restore_selection(&mut self, range: &DomRange) {
        self.select(*range);
    }

    fn extract_contents(&mut self, range: &mut DomRange) -> Fragment {
        Document::extract_contents(self, range)
    }

    fn insert_fragment(&mut self, range: &mut DomRange, fragment: Fragment) -> Vec<NodeId> {
        Document::insert_fragment(self, range, fragment)
    }

    fn expand_to_element(&mut self, element: &NodeId) {
        self.select_node_contents(*element);
    }

    /// Checks the start container's ancestors, then the end container's,
    /// up to the document root.
    fn find_parent_tag(&self, tag: &str, class: &str) -> Option<NodeId> {
        let range = Document::selection(self)?;
        [range.start.node, range.end.node]
            .into_iter()
            .find_map(|node| self.closest(node, tag, class))
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        Document::attribute(self, *element, name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        Document::set_attribute(self, *element, name, value);
    }

    fn remove_element(&mut self, element: &NodeId) -> Option<DomRange> {
        self.remove_node(*element)
    }

    fn close_toolbar(&mut self) {
        self.record_toolbar_close();
    }
}
