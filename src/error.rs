//! Error taxonomy.
//!
//! Only label construction can fail: self-reference resolution is fail-fast
//! and aborts the whole tree. Localization itself never returns an error for
//! any input text, and backend failures in ordinal formatting are recovered
//! where they happen.

/// Errors raised while building or resolving a label tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("self-reference error: path '{expression}' not found - key '{segment}' does not exist")]
    PathNotFound { expression: String, segment: String },

    #[error("self-reference error: path '{expression}' not found - invalid array index '{segment}'")]
    InvalidIndex { expression: String, segment: String },

    #[error("self-reference error: path '{expression}' not found - cannot navigate through non-collection at '{segment}'")]
    NotNavigable { expression: String, segment: String },

    #[error("self-reference error: path '{expression}' resolves to a collection, not a value")]
    UnresolvableTarget { expression: String },

    #[error("invalid label data: {0}")]
    InvalidLabels(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`NumberFormatter`](crate::NumberFormatter) backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("no rules for locale '{0}'")]
    UnsupportedLocale(String),

    #[error("unknown rule set '{rule_set}' (label {label:?})")]
    UnknownRuleSet { rule_set: String, label: Option<String> },

    #[error("number {0} is out of range")]
    OutOfRange(i64),
}
