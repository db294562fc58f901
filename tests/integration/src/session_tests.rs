//! End-to-end editing sessions: configuration file -> controller -> document.

use marker_core::{HighlightController, IgnoreReason, MarkerConfig, Transition, sanitize_rules};
use marker_dom::Document;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Write a palette config into a fresh temp dir
fn setup_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("marker.toml");
    fs::write(&path, contents).unwrap();
    (temp, path)
}

struct Editor {
    doc: Document,
    ctl: HighlightController<Document>,
}

impl Editor {
    fn new(markup: &str, config: &MarkerConfig) -> Self {
        let mut ctl = HighlightController::from_config(config).unwrap();
        ctl.render();
        ctl.render_actions();
        Self {
            doc: Document::parse(markup).unwrap(),
            ctl,
        }
    }

    fn select(&mut self, needle: &str, nth: usize) {
        let range = self.doc.find_text(needle, nth).unwrap();
        self.doc.select(range);
        self.ctl.check_state(&self.doc);
    }

    fn caret(&mut self, needle: &str) {
        let range = self.doc.find_text(needle, 0).unwrap().to_caret();
        self.doc.select(range);
        self.ctl.check_state(&self.doc);
    }

    fn press(&mut self) -> Transition {
        let range = self.doc.selection().copied();
        self.ctl.surround(&mut self.doc, range.as_ref())
    }

    fn pick(&mut self, color: &str) -> Transition {
        self.ctl.pick_color(&mut self.doc, color)
    }
}

#[test]
fn test_session_with_config_file() {
    let (_temp, path) = setup_config(
        r#"
colors = ["green", "blue", "pink"]
default-color = "green"
"#,
    );
    let config = MarkerConfig::load(&path).unwrap();
    let mut editor = Editor::new("the quick brown fox jumps", &config);

    editor.select("quick", 0);
    assert_eq!(editor.press(), Transition::Deferred);
    assert_eq!(editor.ctl.current_color(), "green");
    assert_eq!(editor.pick("pink"), Transition::Wrapped);

    editor.select("fox", 0);
    assert_eq!(editor.press(), Transition::Deferred);
    assert_eq!(editor.ctl.current_color(), "green");
    assert_eq!(editor.pick("green"), Transition::Wrapped);

    assert_eq!(
        editor.doc.to_html(),
        concat!(
            r#"the <mark class="cdx-marker" data-color="pink">quick</mark> brown "#,
            r#"<mark class="cdx-marker" data-color="green">fox</mark> jumps"#
        )
    );

    // Moving into the first mark syncs the palette to its color
    editor.caret("quick");
    assert!(editor.ctl.trigger().unwrap().active);
    assert_eq!(editor.ctl.actions().unwrap().active(), vec!["pink"]);

    assert_eq!(editor.pick("blue"), Transition::Recolored);
    editor.caret("fox");
    assert_eq!(editor.press(), Transition::Unwrapped);

    assert_eq!(
        editor.doc.to_html(),
        r#"the <mark class="cdx-marker" data-color="blue">quick</mark> brown fox jumps"#
    );
    assert_eq!(editor.doc.toolbar_close_count(), 4);
}

#[test]
fn test_button_across_marks_unwraps_before_rewrapping() {
    let config = MarkerConfig::default();
    let mut editor = Editor::new(
        concat!(
            r#"<mark class="cdx-marker" data-color="pink">one</mark> and "#,
            r#"<mark class="cdx-marker" data-color="blue">two</mark>"#
        ),
        &config,
    );

    let len = editor.doc.text_content().chars().count();
    let range = editor.doc.range_from_text_offsets(0, len).unwrap();
    editor.doc.select(range);

    // Both ends sit inside marks, so the button removes the first one
    assert_eq!(editor.press(), Transition::Unwrapped);
    assert_eq!(editor.doc.marks().len(), 1);

    // "one" and " and " are now separate text runs
    let range = editor.doc.range_from_text_offsets(0, 8).unwrap();
    editor.doc.select(range);
    assert_eq!(editor.press(), Transition::Deferred);
    assert_eq!(editor.pick("orange"), Transition::Wrapped);
    assert_eq!(
        editor.doc.to_html(),
        concat!(
            r#"<mark class="cdx-marker" data-color="orange">one and </mark>"#,
            r#"<mark class="cdx-marker" data-color="blue">two</mark>"#
        )
    );
    assert!(!editor.doc.has_nested_marks());
}

#[test]
fn test_cancel_then_click_is_noop() {
    let mut editor = Editor::new("hello world", &MarkerConfig::default());
    editor.select("hello", 0);
    editor.press();
    assert!(editor.ctl.cancel());

    assert_eq!(
        editor.pick("blue"),
        Transition::Ignored(IgnoreReason::NoTarget)
    );
    assert_eq!(editor.doc.to_html(), "hello world");
    assert_eq!(editor.ctl.current_color(), "blue");
}

#[test]
fn test_press_without_selection_is_ignored() {
    // A freshly parsed document has no selection
    let mut editor = Editor::new("hello", &MarkerConfig::default());
    assert_eq!(
        editor.press(),
        Transition::Ignored(IgnoreReason::NoRange)
    );
    assert!(!editor.ctl.is_awaiting_color());
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let (_temp, path) = setup_config("colors = [\"green\"]\ndefault-color = \"blue\"\n");
    let config = MarkerConfig::load(&path).unwrap();
    let err = HighlightController::<Document>::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("blue"));
}

#[test]
fn test_sanitize_rules_keep_created_marks() {
    let rules = sanitize_rules();
    assert_eq!(rules["mark"]["class"], true);
    assert_eq!(rules["mark"]["data-color"], true);
}
