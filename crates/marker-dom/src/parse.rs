//! Markup parsing for [`Document`]

use regex::Regex;
use std::sync::LazyLock;

use crate::document::{Document, NodeId, NodeKind, VOID_TAGS};
use crate::error::{Error, Result};

/// Start or end tag with optional double-quoted attributes
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:\s+[A-Za-z_:][-A-Za-z0-9_:.]*(?:\s*=\s*"[^"]*")?)*)\s*(/?)>"#,
    )
    .expect("Invalid tag regex")
});

static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*"([^"]*)")?"#)
        .expect("Invalid attribute regex")
});

struct OpenElement {
    id: NodeId,
    tag: String,
    position: usize,
}

pub(crate) fn parse(markup: &str) -> Result<Document> {
    let mut doc = Document::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut cursor = 0;

    for caps in TAG_PATTERN.captures_iter(markup) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let parent = stack.last().map_or(doc.root(), |open| open.id);
        push_text(&mut doc, parent, &markup[cursor..whole.start()]);
        cursor = whole.end();

        let closing = !caps[1].is_empty();
        let tag = caps[2].to_ascii_lowercase();

        if closing {
            match stack.pop() {
                Some(open) if open.tag == tag => {}
                Some(open) => {
                    return Err(Error::parse(
                        whole.start(),
                        format!("expected </{}>, found </{tag}>", open.tag),
                    ));
                }
                None => {
                    return Err(Error::parse(
                        whole.start(),
                        format!("unexpected </{tag}>"),
                    ));
                }
            }
            continue;
        }

        let attributes = ATTRIBUTE_PATTERN
            .captures_iter(&caps[3])
            .map(|attr| {
                let value = attr.get(2).map(|v| decode(v.as_str())).unwrap_or_default();
                (attr[1].to_string(), value)
            })
            .collect();
        let self_closing = !caps[4].is_empty() || VOID_TAGS.contains(&tag.as_str());
        let id = doc.create(NodeKind::Element {
            tag: tag.clone(),
            attributes,
        });
        doc.append_child(parent, id);

        if !self_closing {
            stack.push(OpenElement {
                id,
                tag,
                position: whole.start(),
            });
        }
    }

    let parent = stack.last().map_or(doc.root(), |open| open.id);
    push_text(&mut doc, parent, &markup[cursor..]);

    if let Some(open) = stack.pop() {
        return Err(Error::parse(
            open.position,
            format!("<{}> is never closed", open.tag),
        ));
    }

    Ok(doc)
}

fn push_text(doc: &mut Document, parent: NodeId, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let id = doc.create(NodeKind::Text(decode(raw)));
    doc.append_child(parent, id);
}

fn decode(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
