//! Invariants of the highlight tool over generated documents and ranges.

use marker_core::{DEFAULT_COLORS, HighlightController, IgnoreReason, Palette, Transition};
use marker_dom::{BoundaryPoint, Document, DomRange};
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Bold(String),
    Mark(String, &'static str),
    MarkedBold(String, &'static str),
}

fn word() -> impl Strategy<Value = String> {
    "[a-z ]{1,8}"
}

fn color() -> impl Strategy<Value = &'static str> {
    prop::sample::select(DEFAULT_COLORS.to_vec())
}

fn plain_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        word().prop_map(Segment::Text),
        word().prop_map(Segment::Bold),
    ]
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        3 => plain_segment(),
        1 => (word(), color()).prop_map(|(text, color)| Segment::Mark(text, color)),
        1 => (word(), color()).prop_map(|(text, color)| Segment::MarkedBold(text, color)),
    ]
}

fn render(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::Bold(text) => format!("<b>{text}</b>"),
            Segment::Mark(text, color) => {
                format!(r#"<mark class="cdx-marker" data-color="{color}">{text}</mark>"#)
            }
            Segment::MarkedBold(text, color) => {
                format!(r#"<mark class="cdx-marker" data-color="{color}"><b>{text}</b></mark>"#)
            }
        })
        .collect()
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn controller() -> HighlightController<Document> {
    HighlightController::new(Palette::default())
}

proptest! {
    #[test]
    fn test_wrap_never_nests_and_keeps_text(
        segments in prop::collection::vec(segment(), 1..6),
        a in any::<Index>(),
        b in any::<Index>(),
        picked in color(),
    ) {
        let mut doc = Document::parse(&render(&segments)).unwrap();
        let text: Vec<char> = doc.text_content().chars().collect();
        let (start, end) = ordered(a.index(text.len() + 1), b.index(text.len() + 1));
        let range = doc.range_from_text_offsets(start, end).unwrap();
        doc.select(range);

        let mut ctl = controller();
        ctl.check_state(&doc);
        match ctl.surround(&mut doc, Some(&range)) {
            Transition::Deferred => {
                let outcome = ctl.pick_color(&mut doc, picked);
                if start == end {
                    prop_assert_eq!(outcome, Transition::Ignored(IgnoreReason::EmptyRange));
                } else {
                    prop_assert_eq!(outcome, Transition::Wrapped);
                    let mark = doc.selection().unwrap().start.node;
                    prop_assert!(doc.is_mark(mark));
                    prop_assert_eq!(doc.attribute(mark, "data-color"), Some(picked));
                    let selected: String = text[start..end].iter().collect();
                    prop_assert_eq!(doc.node_text_content(mark), selected);
                }
            }
            Transition::Unwrapped => {}
            other => prop_assert!(false, "unexpected transition {:?}", other),
        }

        prop_assert!(!doc.has_nested_marks());
        prop_assert_eq!(doc.text_content(), text.into_iter().collect::<String>());
        for mark in doc.marks() {
            prop_assert!(!doc.node_text_content(mark).is_empty());
        }
    }

    #[test]
    fn test_wrap_then_unwrap_restores_markup(
        segments in prop::collection::vec(plain_segment(), 1..6),
        node in any::<Index>(),
        a in any::<Index>(),
        b in any::<Index>(),
        picked in color(),
    ) {
        let markup = render(&segments);
        let mut doc = Document::parse(&markup).unwrap();
        prop_assert_eq!(doc.to_html(), markup.clone());

        let nodes = doc.text_nodes();
        let node = nodes[node.index(nodes.len())];
        let len = doc.node_length(node);
        let (start, end) = ordered(a.index(len + 1), b.index(len + 1));
        prop_assume!(start < end);

        let range = DomRange::new(BoundaryPoint::new(node, start), BoundaryPoint::new(node, end));
        doc.select(range);
        let mut ctl = controller();
        prop_assert_eq!(ctl.surround(&mut doc, Some(&range)), Transition::Deferred);
        prop_assert_eq!(ctl.pick_color(&mut doc, picked), Transition::Wrapped);
        prop_assert_eq!(doc.marks().len(), 1);

        // The selection now covers the new mark
        let selection = *doc.selection().unwrap();
        prop_assert!(ctl.check_state(&doc));
        prop_assert_eq!(ctl.current_color(), picked);
        prop_assert_eq!(ctl.surround(&mut doc, Some(&selection)), Transition::Unwrapped);

        prop_assert_eq!(doc.to_html(), markup);
        prop_assert!(doc.marks().is_empty());
    }

    #[test]
    fn test_repeated_surround_is_idempotent(
        segments in prop::collection::vec(plain_segment(), 1..4),
        repeats in 1usize..5,
    ) {
        let markup = render(&segments);
        let mut doc = Document::parse(&markup).unwrap();
        let len = doc.text_content().chars().count();
        let range = doc.range_from_text_offsets(0, len).unwrap();
        doc.select(range);

        let mut ctl = controller();
        prop_assert_eq!(ctl.surround(&mut doc, Some(&range)), Transition::Deferred);
        for _ in 0..repeats {
            prop_assert_eq!(
                ctl.surround(&mut doc, Some(&range)),
                Transition::Ignored(IgnoreReason::AlreadyAwaiting)
            );
        }
        prop_assert_eq!(ctl.pending_range(), Some(&range));
        prop_assert_eq!(doc.to_html(), markup);
    }
}
