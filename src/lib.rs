//! Context-aware text localization for marked-up document fragments.
//!
//! Given a run of inline markup and a language/script/locale triple, the
//! engine rewrites punctuation, spacing and directionality:
//!
//! - full-width punctuation, dash and spacing rules for CJK (`zh`, `ja`, `ko`)
//! - no-break spacing around French punctuation (`fr`, locales `FR` / `CH`)
//! - directional marks around text whose direction differs from its context
//!
//! ```
//! use textloc::{Localizer, Options};
//!
//! let loc = Localizer::with_defaults("zh", Some("Hans")).unwrap();
//! let out = loc.localize("计算机代码 (你好, 世界.)", "zh", Some("Hans"), &Options::default());
//! assert_eq!(out, "计算机代码（你好，世界。）");
//! ```

use regex::Regex;
use std::borrow::Cow;

#[macro_use]
mod macros;
mod api;
mod bidi;
mod engine;
mod error;
mod grammar;
mod labels;
mod rules;
mod scripts;

pub use api::{LocalizeResult, Localizer, Options, RuleSummary};
pub use bidi::{ARABIC_LETTER_MARK, LEFT_TO_RIGHT_MARK, RIGHT_TO_LEFT_MARK, bidi_wrap};
pub use engine::{ESCAPE_TAG, RuleTable, ScriptFamily, TableKey, TriggerMask, substitute};
pub use error::{Error, FormatError, Result};
pub use grammar::{EnglishRbnf, Features, NumberFormatter, cjk_extend};
pub use labels::{LabelTree, PunctName, Scalar, WellKnownLabel, resolve_self_references};
pub use scripts::{default_script, is_rtl_script};

/// Placeholder in a [`RuleEntry`] replacement template that stands for the
/// original matched text.
pub const BACKREF: &str = "$0";

// --- Rule entries -------------------------------------------------------------

/// A `(before, after)` context condition.
///
/// `before` is tested against everything to the left of a match (left context
/// included), `after` against everything to the right (right context
/// included). Both must match for the pair to accept.
#[derive(Debug, Clone)]
pub struct ContextPair {
    pub before: Regex,
    pub after: Regex,
}

impl ContextPair {
    pub fn new(before: Regex, after: Regex) -> Self {
        ContextPair { before, after }
    }

    pub(crate) fn matches(&self, before: &str, after: &str) -> bool {
        self.before.is_match(before) && self.after.is_match(after)
    }
}

/// A single substitution rule: what to match, what to put in its place, and
/// under which surrounding context the replacement is allowed.
///
/// `contexts: None` means the rule is unconditional. An empty list never
/// accepts anything.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub name: Cow<'static, str>,
    pub pattern: Regex,
    pub replacement: String,
    pub contexts: Option<Vec<ContextPair>>,
    /// Characters the run must contain for the rule to be worth trying.
    pub trigger: TriggerMask,
}

impl RuleEntry {
    pub fn new(name: impl Into<Cow<'static, str>>, pattern: Regex, replacement: impl Into<String>) -> Self {
        RuleEntry {
            name: name.into(),
            pattern,
            replacement: replacement.into(),
            contexts: None,
            trigger: TriggerMask::empty(),
        }
    }

    /// Rule matching `from` literally.
    pub fn literal(name: impl Into<Cow<'static, str>>, from: &str, to: impl Into<String>) -> Self {
        // An escaped literal is always a valid pattern.
        let pattern = Regex::new(&regex::escape(from)).unwrap_or_else(|_| regex!("$^").clone());
        RuleEntry::new(name, pattern, to).requires(TriggerMask::for_literal(from))
    }

    pub fn with_contexts(mut self, contexts: Vec<ContextPair>) -> Self {
        self.contexts = Some(contexts);
        self
    }

    pub fn requires(mut self, trigger: TriggerMask) -> Self {
        self.trigger = trigger;
        self
    }

    /// True when the match surrounded by `before`/`after` may be replaced.
    pub(crate) fn accepts(&self, before: &str, after: &str) -> bool {
        match &self.contexts {
            None => true,
            Some(pairs) => pairs.iter().any(|p| p.matches(before, after)),
        }
    }

    pub(crate) fn expand(&self, matched: &str) -> String {
        self.replacement.replace(BACKREF, matched)
    }
}
