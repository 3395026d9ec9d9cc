//! Fragment text-node walker.
//!
//! Applies a [`RuleTable`] to every text node of a fragment while letting
//! each node see the text of its siblings as context:
//!
//! ```text
//! prev      node0      node1(esc)   node2      foll
//! ├─────────┼──────────┼────────────┼──────────┤   context cache (joined)
//!                                   ▲
//!            left = prev+node0+node1 │ right = foll
//! ```
//!
//! The context cache holds each node's decoded text with whitespace runs
//! collapsed, computed once before any node is rewritten. Escaped nodes keep
//! their bytes but still occupy a slot in the cache.

use super::compiled_rules::RuleTable;
use super::fragment::Fragment;
use super::metrics::{RuleMetrics, RunMetrics};
use super::substitute::{Tally, substitute_tallied};
use super::trigger::TriggerMask;
use std::borrow::Cow;

/// Localize `fragment` with `table`. `prev`/`foll` are extra context spliced
/// before the first and after the last text node.
pub(crate) fn walk(
    fragment: &str,
    table: &RuleTable,
    prev: Option<&str>,
    foll: Option<&str>,
    metrics: &mut RunMetrics,
) -> String {
    let mut frag = Fragment::parse(fragment);
    let nodes = frag.text_nodes();

    // Joined context cache plus each node's byte span inside it.
    let mut joined = String::new();
    joined.push_str(prev.unwrap_or(""));
    let mut spans = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let start = joined.len();
        joined.push_str(&collapse_whitespace(&html_escape::decode_html_entities(node.raw)));
        spans.push(start..joined.len());
    }
    joined.push_str(foll.unwrap_or(""));

    metrics.text_nodes = nodes.len();
    metrics.rules =
        table.entries.iter().map(|e| RuleMetrics { name: e.name.to_string(), ..Default::default() }).collect();

    for (node, span) in nodes.iter().zip(&spans) {
        if node.escaped {
            metrics.escaped_nodes += 1;
            continue;
        }
        let left = &joined[..span.start];
        let right = &joined[span.end..];

        let decoded = html_escape::decode_html_entities(node.raw);
        let mut text = decoded.to_string();
        let mut mask = TriggerMask::scan(&text);
        for (rule, rule_metrics) in table.entries.iter().zip(metrics.rules.iter_mut()) {
            if !mask.admits(rule.trigger) {
                rule_metrics.skipped += 1;
                continue;
            }
            let mut tally = Tally::default();
            let next = substitute_tallied(&text, left, right, rule, &mut tally);
            rule_metrics.record(tally);
            if next != text {
                text = next;
                mask = TriggerMask::scan(&text);
            }
        }

        if text != decoded {
            tracing::trace!(
                target: "textloc::walker",
                node = node.id,
                from = %node.raw,
                to = %text,
                "rewrote text node"
            );
            frag.replace(node.id, text);
        }
    }

    frag.serialize()
}

/// Serialize `fragment` without applying any rules; only escape-region
/// markers are removed.
pub(crate) fn strip_escape_markers(fragment: &str) -> String {
    if !fragment.contains(super::fragment::ESCAPE_TAG) {
        return fragment.to_string();
    }
    Fragment::parse(fragment).serialize()
}

fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    regex!(r"[\t\n\x0B\x0C\r ]+").replace_all(text, " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compiled_rules::{ScriptFamily, TableKey};
    use crate::{ContextPair, RuleEntry};
    use regex::Regex;

    fn table(entries: Vec<RuleEntry>) -> RuleTable {
        let key = TableKey { family: ScriptFamily::Cjk, script: "Hans".into(), proportional: true, locale: None };
        RuleTable::new(key, entries)
    }

    fn after_han_comma() -> RuleEntry {
        RuleEntry::literal("comma", ",", "，")
            .with_contexts(vec![ContextPair::new(Regex::new(r"\p{Han}$").unwrap(), Regex::new("").unwrap())])
    }

    #[test]
    fn sibling_nodes_provide_context() {
        let mut metrics = RunMetrics::default();
        let out = walk("<b>你好</b>, x", &table(vec![after_han_comma()]), None, None, &mut metrics);
        assert_eq!(out, "<b>你好</b>， x");
        assert_eq!(metrics.text_nodes, 2);
        assert_eq!(metrics.rules[0].accepted, 1);
    }

    #[test]
    fn caller_context_is_spliced_around_nodes() {
        let mut metrics = RunMetrics::default();
        let t = table(vec![after_han_comma()]);
        assert_eq!(walk(", x", &t, Some("好"), None, &mut metrics), "， x");
        assert_eq!(walk(", x", &t, Some("a"), None, &mut metrics), ", x");
    }

    #[test]
    fn following_context_decides_trailing_matches() {
        let before_han = RuleEntry::literal("comma", ",", "，")
            .with_contexts(vec![ContextPair::new(Regex::new("").unwrap(), Regex::new(r"^\p{Han}").unwrap())]);
        let t = table(vec![before_han]);
        let mut metrics = RunMetrics::default();
        assert_eq!(walk("a,", &t, None, Some("你"), &mut metrics), "a，");
        assert_eq!(walk("a,", &t, None, Some("b"), &mut metrics), "a,");
        assert_eq!(walk("a,", &t, None, None, &mut metrics), "a,");
        assert_eq!(walk("a,<esc>你</esc>", &t, None, None, &mut metrics), "a，你");
    }

    #[test]
    fn escaped_nodes_pass_through_but_count_as_context() {
        let mut metrics = RunMetrics::default();
        let t = table(vec![after_han_comma()]);
        let out = walk("<esc>你,好</esc>, y", &t, None, None, &mut metrics);
        assert_eq!(out, "你,好， y");
        assert_eq!(metrics.escaped_nodes, 1);
    }

    #[test]
    fn untouched_nodes_keep_their_entities() {
        let mut metrics = RunMetrics::default();
        let t = table(vec![after_han_comma()]);
        assert_eq!(walk("a&amp;b <i>&#x597d;</i>,", &t, None, None, &mut metrics), "a&amp;b <i>&#x597d;</i>，");
    }

    #[test]
    fn trigger_gating_skips_rules() {
        let mut metrics = RunMetrics::default();
        let t = table(vec![after_han_comma(), RuleEntry::literal("dash", "\u{2013}", "～")]);
        walk("你好,", &t, None, None, &mut metrics);
        assert_eq!(metrics.rules[1].skipped, 1);
        assert_eq!(metrics.rules[1].tried, 0);
    }
}
