//! DOM-style ranges over a [`Document`]

use std::cmp::Ordering;

use marker_core::markup::{Fragment, Node};

use crate::document::{Document, NodeId, NodeKind};

/// A position between characters of a text node, or between children of an
/// element or the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A start/end pair of boundary points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl DomRange {
    pub fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end }
    }

    /// An empty range at `point`
    pub fn collapsed(point: BoundaryPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Collapse to the start point, as a caret
    pub fn to_caret(self) -> Self {
        Self::collapsed(self.start)
    }
}

fn char_split(text: &str, at: usize) -> (String, String) {
    let byte = text
        .char_indices()
        .nth(at)
        .map_or(text.len(), |(index, _)| index);
    (text[..byte].to_string(), text[byte..].to_string())
}

impl Document {
    /// Range over the `nth` (0-based) occurrence of `needle` inside a single
    /// attached text node
    pub fn find_text(&self, needle: &str, nth: usize) -> Option<DomRange> {
        if needle.is_empty() {
            return None;
        }
        let needle_len = needle.chars().count();
        self.text_nodes()
            .into_iter()
            .flat_map(|id| {
                let text = self.text(id).unwrap_or_default();
                text.match_indices(needle)
                    .map(|(byte, _)| (id, text[..byte].chars().count()))
                    .collect::<Vec<_>>()
            })
            .nth(nth)
            .map(|(id, offset)| {
                DomRange::new(
                    BoundaryPoint::new(id, offset),
                    BoundaryPoint::new(id, offset + needle_len),
                )
            })
    }

    /// Range between two character offsets of the document's visible text.
    ///
    /// The start resolves into the text node holding the next character and
    /// the end into the node holding the previous one, so a range never
    /// starts at the tail of one node or ends at the head of another.
    pub fn range_from_text_offsets(&self, start: usize, end: usize) -> Option<DomRange> {
        if start > end {
            return None;
        }
        let start_point = self.resolve_text_offset(start, true)?;
        if start == end {
            return Some(DomRange::collapsed(start_point));
        }
        let end_point = self.resolve_text_offset(end, false)?;
        Some(DomRange::new(start_point, end_point))
    }

    fn resolve_text_offset(&self, offset: usize, forward: bool) -> Option<BoundaryPoint> {
        let nodes = self.text_nodes();
        let mut consumed = 0;
        let mut last = None;
        for id in nodes {
            let len = self.node_length(id);
            if len == 0 {
                continue;
            }
            let fits = if forward {
                offset < consumed + len
            } else {
                offset <= consumed + len
            };
            if fits && offset >= consumed {
                return Some(BoundaryPoint::new(id, offset - consumed));
            }
            consumed += len;
            last = Some((id, len));
        }
        match last {
            Some((id, len)) if offset == consumed => Some(BoundaryPoint::new(id, len)),
            None if offset == 0 => Some(BoundaryPoint::new(self.root(), 0)),
            _ => None,
        }
    }

    /// Order two boundary points by document position
    pub fn compare_points(&self, a: BoundaryPoint, b: BoundaryPoint) -> Ordering {
        self.point_path(a).cmp(&self.point_path(b))
    }

    fn point_path(&self, point: BoundaryPoint) -> Vec<usize> {
        let mut path: Vec<usize> = self
            .ancestors(point.node)
            .into_iter()
            .filter_map(|id| self.index_in_parent(id))
            .collect();
        path.reverse();
        path.push(point.offset);
        path
    }

    fn clamp(&self, point: BoundaryPoint) -> BoundaryPoint {
        BoundaryPoint::new(point.node, point.offset.min(self.node_length(point.node)))
    }

    /// Detach everything inside `range` and collapse it to the gap.
    ///
    /// Partially selected text nodes are split; partially selected elements
    /// stay in place holding their unselected children while a shallow copy
    /// carrying the selected children goes into the fragment.
    pub fn extract_contents(&mut self, range: &mut DomRange) -> Fragment {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if self.compare_points(start, end) != Ordering::Less {
            *range = DomRange::collapsed(start);
            return Fragment::default();
        }

        let (nodes, point) = self.extract_between(start, end);
        *range = DomRange::collapsed(point);
        Fragment::new(nodes)
    }

    fn extract_between(&mut self, start: BoundaryPoint, end: BoundaryPoint) -> (Vec<Node>, BoundaryPoint) {
        if start.node == end.node && self.is_text(start.node) {
            let text = self.text(start.node).unwrap_or_default().to_string();
            let (before, rest) = char_split(&text, start.offset);
            let (taken, after) = char_split(&rest, end.offset.saturating_sub(start.offset));
            self.set_text(start.node, before + &after);
            return (vec![Node::Text(taken)], start);
        }

        let common = self.common_ancestor(start.node, end.node);
        let start_contains_end = self.is_inclusive_ancestor(start.node, end.node);
        let end_contains_start = self.is_inclusive_ancestor(end.node, start.node);

        let first_partial = (!start_contains_end).then(|| self.child_toward(common, start.node));
        let last_partial = (!end_contains_start).then(|| self.child_toward(common, end.node));

        let contained_from = match first_partial {
            Some(first) => self.index_in_parent(first).map_or(0, |i| i + 1),
            None => start.offset,
        };
        let contained_to = match last_partial {
            Some(last) => self.index_in_parent(last).unwrap_or(0),
            None => end.offset,
        };
        let contained: Vec<NodeId> = if contained_from < contained_to {
            self.children(common)[contained_from..contained_to].to_vec()
        } else {
            Vec::new()
        };

        let new_point = if start_contains_end {
            start
        } else {
            let mut reference = start.node;
            while let Some(parent) = self.parent(reference) {
                if self.is_inclusive_ancestor(parent, end.node) {
                    break;
                }
                reference = parent;
            }
            match (self.parent(reference), self.index_in_parent(reference)) {
                (Some(parent), Some(index)) => BoundaryPoint::new(parent, index + 1),
                _ => start,
            }
        };

        let mut out = Vec::new();

        if let Some(first) = first_partial {
            if let Some(text) = self.text(first).map(str::to_string) {
                let (keep, taken) = char_split(&text, start.offset);
                self.set_text(first, keep);
                out.push(Node::Text(taken));
            } else {
                let mut copy = self.shallow_element(first);
                let first_end = BoundaryPoint::new(first, self.node_length(first));
                copy.children = self.extract_between(start, first_end).0;
                out.push(Node::Element(copy));
            }
        }

        for id in contained {
            out.push(self.take_node(id));
        }

        if let Some(last) = last_partial {
            if let Some(text) = self.text(last).map(str::to_string) {
                let (taken, keep) = char_split(&text, end.offset);
                self.set_text(last, keep);
                out.push(Node::Text(taken));
            } else {
                let mut copy = self.shallow_element(last);
                let last_start = BoundaryPoint::new(last, 0);
                copy.children = self.extract_between(last_start, end).0;
                out.push(Node::Element(copy));
            }
        }

        (out, new_point)
    }

    fn common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        let chain = self.ancestors(a);
        self.ancestors(b)
            .into_iter()
            .find(|id| chain.contains(id))
            .unwrap_or_else(|| self.root())
    }

    /// The child of `ancestor` on the path down to `node`
    fn child_toward(&self, ancestor: NodeId, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            if parent == ancestor {
                break;
            }
            current = parent;
        }
        current
    }

    /// Insert `fragment` at the start of `range`, splitting a text node if the
    /// start falls inside one.
    ///
    /// A collapsed range grows to end after the inserted nodes. Returns the
    /// inserted top-level nodes.
    pub fn insert_fragment(&mut self, range: &mut DomRange, fragment: Fragment) -> Vec<NodeId> {
        if fragment.nodes.is_empty() {
            return Vec::new();
        }

        let start = self.clamp(range.start);
        let (parent, index) = match self.text(start.node).map(str::to_string) {
            Some(text) => {
                let (Some(parent), Some(position)) =
                    (self.parent(start.node), self.index_in_parent(start.node))
                else {
                    tracing::debug!(node = ?start.node, "insertion point is detached");
                    return Vec::new();
                };
                let (keep, tail) = char_split(&text, start.offset);
                self.set_text(start.node, keep);
                if !tail.is_empty() {
                    let tail = self.create(NodeKind::Text(tail));
                    self.insert_children(parent, position + 1, &[tail]);
                }
                (parent, position + 1)
            }
            None => (start.node, start.offset),
        };

        let ids: Vec<NodeId> = fragment.into_iter().map(|node| self.build(node)).collect();
        self.insert_children(parent, index, &ids);

        if range.is_collapsed() {
            range.start = start;
            range.end = BoundaryPoint::new(parent, index + ids.len());
        } else if range.end.node == parent && range.end.offset > index {
            range.end.offset += ids.len();
        }
        ids
    }

    /// Select the full contents of `id`
    pub fn select_node_contents(&mut self, id: NodeId) {
        let range = DomRange::new(
            BoundaryPoint::new(id, 0),
            BoundaryPoint::new(id, self.node_length(id)),
        );
        self.select(range);
    }

    /// Detach `id`, returning a caret where it used to be
    pub fn remove_node(&mut self, id: NodeId) -> Option<DomRange> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.detach(id);
        Some(DomRange::collapsed(BoundaryPoint::new(parent, index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_text_counts_occurrences_across_nodes() {
        let doc = Document::parse("ab <b>ab</b> ab").unwrap();
        let second = doc.find_text("ab", 1).unwrap();
        assert_eq!(doc.parent(second.start.node).and_then(|p| doc.tag(p)), Some("b"));
        assert_eq!(second.start.offset, 0);
        assert_eq!(second.end.offset, 2);
        assert!(doc.find_text("ab", 3).is_none());
        assert!(doc.find_text("", 0).is_none());
    }

    #[test]
    fn test_find_text_uses_char_offsets() {
        let doc = Document::parse("héllo wörld").unwrap();
        let range = doc.find_text("wörld", 0).unwrap();
        assert_eq!(range.start.offset, 6);
        assert_eq!(range.end.offset, 11);
    }

    #[test]
    fn test_text_offsets_resolve_inward() {
        let doc = Document::parse("ab<i>cd</i>ef").unwrap();
        let texts = doc.text_nodes();

        let range = doc.range_from_text_offsets(2, 4).unwrap();
        assert_eq!(range.start, BoundaryPoint::new(texts[1], 0));
        assert_eq!(range.end, BoundaryPoint::new(texts[1], 2));

        let caret = doc.range_from_text_offsets(6, 6).unwrap();
        assert_eq!(caret.start, BoundaryPoint::new(texts[2], 2));
        assert!(doc.range_from_text_offsets(3, 7).is_none());
        assert!(doc.range_from_text_offsets(4, 3).is_none());
    }

    #[test]
    fn test_compare_points_follows_document_order() {
        let doc = Document::parse("ab<i>cd</i>ef").unwrap();
        let root = doc.root();
        let inner = doc.text_nodes()[1];
        assert_eq!(
            doc.compare_points(BoundaryPoint::new(root, 1), BoundaryPoint::new(inner, 0)),
            Ordering::Less
        );
        assert_eq!(
            doc.compare_points(BoundaryPoint::new(root, 2), BoundaryPoint::new(inner, 2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_extract_within_single_text_node() {
        let mut doc = Document::parse("hello world").unwrap();
        let mut range = doc.find_text("lo w", 0).unwrap();

        let fragment = doc.extract_contents(&mut range);

        assert_eq!(fragment.nodes, vec![Node::text("lo w")]);
        assert_eq!(doc.to_html(), "helorld");
        assert!(range.is_collapsed());
        assert_eq!(range.start.offset, 3);
    }

    #[test]
    fn test_extract_splits_partially_selected_elements() {
        let mut doc = Document::parse("ab<b>cd</b>ef").unwrap();
        let mut range = doc.range_from_text_offsets(1, 3).unwrap();

        let fragment = doc.extract_contents(&mut range);

        assert_eq!(doc.to_html(), "a<b>d</b>ef");
        let extracted = Document::from_fragment(fragment);
        assert_eq!(extracted.to_html(), "b<b>c</b>");
        assert_eq!(range.start, BoundaryPoint::new(doc.root(), 1));
    }

    #[test]
    fn test_extract_moves_fully_contained_children() {
        let mut doc = Document::parse("a<i>b</i><u>c</u>d").unwrap();
        let mut range = doc.range_from_text_offsets(0, 4).unwrap();

        let fragment = doc.extract_contents(&mut range);

        assert_eq!(Document::from_fragment(fragment).to_html(), "a<i>b</i><u>c</u>d");
        assert_eq!(doc.text_content(), "");
    }

    #[test]
    fn test_extract_collapsed_range_is_empty() {
        let mut doc = Document::parse("abc").unwrap();
        let mut range = doc.range_from_text_offsets(1, 1).unwrap();
        assert!(doc.extract_contents(&mut range).is_empty());
        assert_eq!(doc.to_html(), "abc");
    }

    #[test]
    fn test_insert_splits_text_and_covers_inserted_nodes() {
        let mut doc = Document::parse("abcd").unwrap();
        let mut range = doc.range_from_text_offsets(2, 2).unwrap();

        let ids = doc.insert_fragment(&mut range, Fragment::from(Node::text("XY")));

        assert_eq!(ids.len(), 1);
        assert_eq!(doc.to_html(), "abXYcd");
        assert_eq!(range.end, BoundaryPoint::new(doc.root(), 2));
        assert_eq!(doc.children(doc.root()).len(), 3);
    }

    #[test]
    fn test_extract_then_insert_restores_markup() {
        let mut doc = Document::parse("x<b>y<i>z</i></b>w").unwrap();
        let mut range = doc.range_from_text_offsets(1, 3).unwrap();

        let fragment = doc.extract_contents(&mut range);
        doc.insert_fragment(&mut range, fragment);

        assert_eq!(doc.text_content(), "xyzw");
    }

    #[test]
    fn test_remove_node_returns_caret_at_old_position() {
        let mut doc = Document::parse("a<b>x</b>c").unwrap();
        let bold = doc.children(doc.root())[1];

        let caret = doc.remove_node(bold).unwrap();

        assert_eq!(caret, DomRange::collapsed(BoundaryPoint::new(doc.root(), 1)));
        assert_eq!(doc.to_html(), "ac");
        assert!(!doc.is_attached(bold));
        assert!(doc.remove_node(bold).is_none());
    }
}
