//! Context-aware substitution.
//!
//! One rule, one text run. The run is split into alternating literal and
//! matched tokens, and the caller's context strings are added as two
//! boundary tokens that can never themselves match:
//!
//! ```text
//! C[0]        C[1]   C[2]  C[3]   C[4]   ...  C[n]   C[n+1]
//! leftContext literal match literal match ... literal rightContext
//! ```
//!
//! A match at `C[i]` is replaced when the rule is unconditional, or when some
//! context pair accepts `C[0..i].concat()` as *before* and `C[i+1..].concat()`
//! as *after*. Testing the whole accumulated strings (rather than the adjacent
//! token) keeps chains of punctuation visible to the patterns, e.g. `.)` after
//! a CJK character.
//!
//! Only the run itself is returned; the boundary tokens are dropped. Contexts
//! are computed from the run as it was before this rule, so earlier
//! replacements by the same rule do not change later decisions.
//!
//! A match that already sits inside the rule's own replacement (`…` within
//! `……`) is left alone and counted neither way, so re-running a rule over its
//! output is a no-op.

use crate::RuleEntry;

/// Accept/reject counters for one rule over one or more runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub accepted: usize,
    pub rejected: usize,
}

/// Apply `rule` to `text` with `left`/`right` as surrounding context.
///
/// ```
/// use textloc::{ContextPair, RuleEntry, substitute};
/// use regex::Regex;
///
/// let rule = RuleEntry::literal("comma", ",", "，").with_contexts(vec![ContextPair::new(
///     Regex::new(r"\p{Han}$").unwrap(),
///     Regex::new(r"^").unwrap(),
/// )]);
/// assert_eq!(substitute("a, 好,", "", "", &rule), "a, 好，");
/// assert_eq!(substitute(", b", "你", "", &rule), "， b");
/// ```
pub fn substitute(text: &str, left: &str, right: &str, rule: &RuleEntry) -> String {
    let mut tally = Tally::default();
    substitute_tallied(text, left, right, rule, &mut tally)
}

pub(crate) fn substitute_tallied(text: &str, left: &str, right: &str, rule: &RuleEntry, tally: &mut Tally) -> String {
    if !rule.pattern.is_match(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    // Scratch buffers reused across matches; only conditional rules need them.
    let mut before = String::new();
    let mut after = String::new();

    for m in rule.pattern.find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        out.push_str(&text[last..m.start()]);

        let replacement = rule.expand(m.as_str());
        if within_replacement(text, m.start(), m.as_str(), &replacement) {
            out.push_str(m.as_str());
            last = m.end();
            continue;
        }

        let accepted = match rule.contexts {
            None => true,
            Some(_) => {
                before.clear();
                before.push_str(left);
                before.push_str(&text[..m.start()]);
                after.clear();
                after.push_str(&text[m.end()..]);
                after.push_str(right);
                rule.accepts(&before, &after)
            }
        };

        if accepted {
            out.push_str(&replacement);
            tally.accepted += 1;
        } else {
            out.push_str(m.as_str());
            tally.rejected += 1;
        }
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

/// Whether the match at `start` is one of the occurrences of `matched` inside
/// an instance of `replacement` already present in `text`.
fn within_replacement(text: &str, start: usize, matched: &str, replacement: &str) -> bool {
    if replacement == matched || !replacement.contains(matched) {
        return false;
    }
    replacement
        .match_indices(matched)
        .filter_map(|(offset, _)| start.checked_sub(offset))
        .any(|from| text.get(from..).is_some_and(|rest| rest.starts_with(replacement)))
}
