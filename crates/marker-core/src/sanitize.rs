//! Sanitizer rule for highlight marks.
//!
//! Hosts that sanitize pasted or saved content must keep the mark's `class`
//! and `data-color` attributes and drop everything else on it.

use serde_json::{Map, Value, json};

use crate::markup::{COLOR_ATTRIBUTE, MARK_TAG};

/// Attributes allowed to survive on one tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeRule {
    pub tag: &'static str,
    pub allowed_attributes: &'static [&'static str],
}

/// The rule for highlight marks
pub const MARK_SANITIZE_RULE: SanitizeRule = SanitizeRule {
    tag: MARK_TAG,
    allowed_attributes: &["class", COLOR_ATTRIBUTE],
};

/// Declarative rule set in the `{ tag: { attribute: true } }` shape editors
/// consume.
pub fn sanitize_rules() -> Value {
    let mut rules = Map::new();
    rules.insert(
        MARK_SANITIZE_RULE.tag.to_string(),
        MARK_SANITIZE_RULE.to_json(),
    );
    Value::Object(rules)
}

impl SanitizeRule {
    /// Attribute map for this rule
    pub fn to_json(&self) -> Value {
        let mut attributes = Map::new();
        for name in self.allowed_attributes {
            attributes.insert(name.to_string(), json!(true));
        }
        Value::Object(attributes)
    }
}
