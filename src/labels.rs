//! Translation label tree.
//!
//! Labels arrive already loaded (typically deserialized from JSON or YAML by
//! the caller) and are held as a [`LabelTree`]: an insertion-ordered,
//! heterogeneous tree of mappings, sequences, strings and scalars.
//!
//! ```text
//! { "punct": { "comma": "，", "period": "。" },      Mapping
//!   "binary_and": "%1和%2",                          String
//!   "ordinal_keys": ["gender", "number"],            Sequence
//!   "edition": 1 }                                   Scalar
//! ```
//!
//! Lookups go through one typed accessor, [`LabelTree::dig`], plus the
//! enumerated [`WellKnownLabel`] set the engine itself depends on. Arbitrary
//! caller keys stay reachable through `dig`.

#[path = "labels/defaults.rs"]
pub(crate) mod defaults;
#[path = "labels/resolve.rs"]
mod resolve;

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub use resolve::resolve_self_references;

/// Non-collection, non-string leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Hierarchical translation labels.
///
/// Mapping keys are unique and keep their declaration order; resolution and
/// serialization both walk them in that order.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelTree {
    Mapping(Vec<(String, LabelTree)>),
    Sequence(Vec<LabelTree>),
    String(String),
    Scalar(Scalar),
}

impl Default for LabelTree {
    fn default() -> Self {
        LabelTree::Mapping(Vec::new())
    }
}

impl LabelTree {
    /// Parse labels from a JSON document. The top level must be an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| Error::InvalidLabels(e.to_string()))?;
        if !value.is_object() {
            return Err(Error::InvalidLabels("top-level labels must be a mapping".to_string()));
        }
        Ok(LabelTree::from(value))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            LabelTree::Mapping(entries) => {
                serde_json::Value::Object(entries.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
            LabelTree::Sequence(items) => serde_json::Value::Array(items.iter().map(LabelTree::to_json).collect()),
            LabelTree::String(s) => serde_json::Value::String(s.clone()),
            LabelTree::Scalar(Scalar::Null) => serde_json::Value::Null,
            LabelTree::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            LabelTree::Scalar(Scalar::Integer(i)) => serde_json::Value::from(*i),
            LabelTree::Scalar(Scalar::Float(x)) => serde_json::Value::from(*x),
        }
    }

    pub fn get(&self, key: &str) -> Option<&LabelTree> {
        match self {
            LabelTree::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Walk `path` from this node. Mapping segments are keys, sequence
    /// segments are decimal indices.
    pub fn dig(&self, path: &[&str]) -> Option<&LabelTree> {
        path.iter().try_fold(self, |node, segment| match node {
            LabelTree::Mapping(_) => node.get(segment),
            LabelTree::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Like [`dig`](Self::dig) but only yields string leaves.
    pub fn dig_str(&self, path: &[&str]) -> Option<&str> {
        self.dig(path).and_then(LabelTree::as_str)
    }

    /// Set `key` on a mapping node, replacing an existing entry in place.
    /// Returns `false` (and does nothing) when this node is not a mapping.
    pub fn insert(&mut self, key: impl Into<String>, value: LabelTree) -> bool {
        let LabelTree::Mapping(entries) = self else {
            return false;
        };
        let key = key.into();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
        true
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LabelTree::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[LabelTree]> {
        match self {
            LabelTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Text form of a leaf; `None` for collections.
    pub fn stringify(&self) -> Option<String> {
        match self {
            LabelTree::String(s) => Some(s.clone()),
            LabelTree::Scalar(s) => Some(s.to_string()),
            _ => None,
        }
    }

    /// NFC-normalise every string leaf and decode markup entities outside of
    /// tags.
    pub fn normalise(self) -> LabelTree {
        match self {
            LabelTree::Mapping(entries) => {
                LabelTree::Mapping(entries.into_iter().map(|(k, v)| (k, v.normalise())).collect())
            }
            LabelTree::Sequence(items) => LabelTree::Sequence(items.into_iter().map(LabelTree::normalise).collect()),
            LabelTree::String(s) => LabelTree::String(decode_outside_tags(&s.nfc().collect::<String>())),
            other => other,
        }
    }
}

/// Decode entities in text segments only; `<...>` tag bodies are kept as is.
fn decode_outside_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        out.push_str(&html_escape::decode_html_entities(&rest[..open]));
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[open..open + close + 1]);
                rest = &rest[open + close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(&html_escape::decode_html_entities(rest));
    out
}

impl From<serde_json::Value> for LabelTree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => LabelTree::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => LabelTree::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => LabelTree::Scalar(Scalar::Integer(i)),
                None => LabelTree::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => LabelTree::String(s),
            serde_json::Value::Array(items) => LabelTree::Sequence(items.into_iter().map(LabelTree::from).collect()),
            serde_json::Value::Object(map) => {
                LabelTree::Mapping(map.into_iter().map(|(k, v)| (k, LabelTree::from(v))).collect())
            }
        }
    }
}

impl From<&str> for LabelTree {
    fn from(s: &str) -> Self {
        LabelTree::String(s.to_string())
    }
}

impl From<String> for LabelTree {
    fn from(s: String) -> Self {
        LabelTree::String(s)
    }
}

impl<'de> Deserialize<'de> for LabelTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(LabelTree::from)
    }
}

impl Serialize for LabelTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// --- Well-known labels --------------------------------------------------------

/// Labels the engine itself reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownLabel {
    Language,
    Script,
    Punct,
    Inflection,
    OrdinalKeys,
    EnDash,
    NumberEnDash,
    CjkLatinSeparator,
}

impl WellKnownLabel {
    pub fn path(self) -> &'static [&'static str] {
        match self {
            WellKnownLabel::Language => &["language"],
            WellKnownLabel::Script => &["script"],
            WellKnownLabel::Punct => &["punct"],
            WellKnownLabel::Inflection => &["inflection"],
            WellKnownLabel::OrdinalKeys => &["ordinal_keys"],
            WellKnownLabel::EnDash => &["punct", "en-dash"],
            WellKnownLabel::NumberEnDash => &["punct", "number-en-dash"],
            WellKnownLabel::CjkLatinSeparator => &["punct", "cjk-latin-separator"],
        }
    }
}

/// Punctuation labels under `punct` that have a half-width Latin counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctName {
    Colon,
    Comma,
    Semicolon,
    Period,
    CloseParen,
    OpenParen,
    CloseBracket,
    OpenBracket,
    QuestionMark,
    ExclamationMark,
    EmDash,
    OpenQuote,
    CloseQuote,
    OpenNestedQuote,
    CloseNestedQuote,
    Ellipse,
}

impl PunctName {
    /// Conversion order: the CJK table applies rules in this order.
    pub const ALL: [PunctName; 16] = [
        PunctName::Colon,
        PunctName::Comma,
        PunctName::Semicolon,
        PunctName::Period,
        PunctName::CloseParen,
        PunctName::OpenParen,
        PunctName::CloseBracket,
        PunctName::OpenBracket,
        PunctName::QuestionMark,
        PunctName::ExclamationMark,
        PunctName::EmDash,
        PunctName::OpenQuote,
        PunctName::CloseQuote,
        PunctName::OpenNestedQuote,
        PunctName::CloseNestedQuote,
        PunctName::Ellipse,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PunctName::Colon => "colon",
            PunctName::Comma => "comma",
            PunctName::Semicolon => "semicolon",
            PunctName::Period => "period",
            PunctName::CloseParen => "close-paren",
            PunctName::OpenParen => "open-paren",
            PunctName::CloseBracket => "close-bracket",
            PunctName::OpenBracket => "open-bracket",
            PunctName::QuestionMark => "question-mark",
            PunctName::ExclamationMark => "exclamation-mark",
            PunctName::EmDash => "em-dash",
            PunctName::OpenQuote => "open-quote",
            PunctName::CloseQuote => "close-quote",
            PunctName::OpenNestedQuote => "open-nested-quote",
            PunctName::CloseNestedQuote => "close-nested-quote",
            PunctName::Ellipse => "ellipse",
        }
    }

    /// The Latin glyph found in source text.
    pub fn latin(self) -> &'static str {
        match self {
            PunctName::Colon => ":",
            PunctName::Comma => ",",
            PunctName::Semicolon => ";",
            PunctName::Period => ".",
            PunctName::CloseParen => ")",
            PunctName::OpenParen => "(",
            PunctName::CloseBracket => "]",
            PunctName::OpenBracket => "[",
            PunctName::QuestionMark => "?",
            PunctName::ExclamationMark => "!",
            PunctName::EmDash => "\u{2014}",
            PunctName::OpenQuote => "\u{201c}",
            PunctName::CloseQuote => "\u{201d}",
            PunctName::OpenNestedQuote => "\u{2018}",
            PunctName::CloseNestedQuote => "\u{2019}",
            PunctName::Ellipse => "\u{2026}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LabelTree {
        LabelTree::from_json_str(r#"{"punct":{"comma":"，"},"list":["a","b"],"n":3,"flag":true}"#).unwrap()
    }

    #[test]
    fn dig_walks_mappings_and_sequences() {
        let labels = sample();
        assert_eq!(labels.dig_str(&["punct", "comma"]), Some("，"));
        assert_eq!(labels.dig_str(&["list", "1"]), Some("b"));
        assert_eq!(labels.dig(&["list", "2"]), None);
        assert_eq!(labels.dig(&["n", "x"]), None);
        assert_eq!(labels.dig(&["n"]).and_then(LabelTree::stringify).as_deref(), Some("3"));
    }

    #[test]
    fn insert_keeps_declaration_order() {
        let mut labels = sample();
        assert!(labels.insert("fred", "frederic".into()));
        assert!(labels.insert("n", LabelTree::Scalar(Scalar::Integer(4))));
        let LabelTree::Mapping(entries) = &labels else { panic!("expected mapping") };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["punct", "list", "n", "flag", "fred"]);
        assert_eq!(labels.dig_str(&["fred"]), Some("frederic"));
    }

    #[test]
    fn normalise_decodes_text_but_not_tags() {
        let labels = LabelTree::from("a &amp; <span title=\"x&amp;y\">e\u{301}&#x4e2d;</span>").normalise();
        assert_eq!(labels.as_str(), Some("a & <span title=\"x&amp;y\">\u{e9}中</span>"));
    }

    #[test]
    fn rejects_non_mapping_json() {
        assert!(matches!(LabelTree::from_json_str("[1,2]"), Err(Error::InvalidLabels(_))));
        assert!(matches!(LabelTree::from_json_str("{"), Err(Error::InvalidLabels(_))));
    }

    #[test]
    fn json_round_trip_preserves_key_order() {
        let labels = sample();
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"punct":{"comma":"，"},"list":["a","b"],"n":3,"flag":true}"#);
    }
}
