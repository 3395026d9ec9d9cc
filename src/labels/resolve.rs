//! Self-reference resolution.
//!
//! A string label may embed a path into its own tree:
//!
//! ```text
//! msg: 'hello #{self["punct"]["comma"]}'   ─▶  "hello ，"
//! msg: 'see #{ self.list[0] }'             ─▶  "see <first item>"
//! ```
//!
//! Leaves are rewritten in declaration order and lookups read the tree as
//! rewritten so far, so a reference sees the resolved form of anything
//! declared before it and the raw form of anything declared after it. There
//! is no cycle detection; a reference to a leaf still holding its own
//! expression simply copies that text.
//!
//! Any lookup failure aborts the whole resolution.

use super::LabelTree;
use crate::error::{Error, Result};

/// Parsed accessor chain of one `#{self...}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelfReferencePath {
    segments: Vec<String>,
}

impl SelfReferencePath {
    /// Parse the accessor chain that follows `self`, e.g. `.a["b"][0]`.
    fn parse(accessors: &str) -> Self {
        let segments = regex!(r#"\.\s*([\w-]+)|\[\s*([^\]]*?)\s*\]"#)
            .captures_iter(accessors)
            .filter_map(|caps| match (caps.get(1), caps.get(2)) {
                (Some(dot), _) => Some(dot.as_str().to_string()),
                (None, Some(bracket)) => Some(unquote(bracket.as_str()).to_string()),
                _ => None,
            })
            .collect();
        SelfReferencePath { segments }
    }

    /// Walk `root` along the path and stringify the leaf reached.
    fn resolve(&self, root: &LabelTree, expression: &str) -> Result<String> {
        let mut current = root;
        for segment in &self.segments {
            current = match current {
                LabelTree::Mapping(_) => current.get(segment).ok_or_else(|| Error::PathNotFound {
                    expression: expression.to_string(),
                    segment: segment.clone(),
                })?,
                LabelTree::Sequence(items) => segment
                    .parse::<usize>()
                    .ok()
                    .filter(|_| segment.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| Error::InvalidIndex {
                        expression: expression.to_string(),
                        segment: segment.clone(),
                    })?,
                LabelTree::String(_) | LabelTree::Scalar(_) => {
                    return Err(Error::NotNavigable { expression: expression.to_string(), segment: segment.clone() });
                }
            };
        }
        current.stringify().ok_or_else(|| Error::UnresolvableTarget { expression: expression.to_string() })
    }
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Replace every `#{self...}` expression in every string leaf of `labels`.
///
/// `#{...}` text that does not start with `self` followed by at least one
/// accessor is left untouched byte-for-byte.
pub fn resolve_self_references(mut labels: LabelTree) -> Result<LabelTree> {
    let mut leaves = Vec::new();
    collect_string_leaves(&labels, &mut Vec::new(), &mut leaves);

    for path in leaves {
        let Some(LabelTree::String(current)) = node_at(&labels, &path) else {
            continue;
        };
        if !current.contains("#{") {
            continue;
        }
        let resolved = resolve_string(current, &labels)?;
        tracing::trace!(target: "textloc::labels", ?path, %resolved, "resolved self-reference");
        if let Some(slot) = node_at_mut(&mut labels, &path) {
            *slot = LabelTree::String(resolved);
        }
    }

    Ok(labels)
}

fn resolve_string(text: &str, labels: &LabelTree) -> Result<String> {
    let re = regex!(r#"#\{\s*self((?:\s*(?:\.\s*[\w-]+|\[[^\]]*\]))+)\s*\}"#);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let accessors = caps.get(1).map_or("", |m| m.as_str());
        out.push_str(&text[last..whole.start()]);
        out.push_str(&SelfReferencePath::parse(accessors).resolve(labels, whole.as_str())?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

/// Positional path (entry index per level) to every string leaf, in
/// declaration order.
fn collect_string_leaves(node: &LabelTree, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    match node {
        LabelTree::Mapping(entries) => {
            for (i, (_, child)) in entries.iter().enumerate() {
                prefix.push(i);
                collect_string_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        LabelTree::Sequence(items) => {
            for (i, child) in items.iter().enumerate() {
                prefix.push(i);
                collect_string_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        LabelTree::String(_) => out.push(prefix.clone()),
        LabelTree::Scalar(_) => {}
    }
}

fn node_at<'a>(root: &'a LabelTree, path: &[usize]) -> Option<&'a LabelTree> {
    path.iter().try_fold(root, |node, &i| match node {
        LabelTree::Mapping(entries) => entries.get(i).map(|(_, v)| v),
        LabelTree::Sequence(items) => items.get(i),
        _ => None,
    })
}

fn node_at_mut<'a>(root: &'a mut LabelTree, path: &[usize]) -> Option<&'a mut LabelTree> {
    path.iter().try_fold(root, |node, &i| match node {
        LabelTree::Mapping(entries) => entries.get_mut(i).map(|(_, v)| v),
        LabelTree::Sequence(items) => items.get_mut(i),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(json: &str) -> LabelTree {
        LabelTree::from_json_str(json).unwrap()
    }

    #[test]
    fn resolves_bracket_path() {
        let out = resolve_self_references(labels(r##"{"punct":{"comma":","},"msg":"hello #{self[\"punct\"][\"comma\"]}"}"##))
            .unwrap();
        assert_eq!(out.dig_str(&["msg"]), Some("hello ,"));
    }

    #[test]
    fn resolves_dotted_single_quoted_and_indexed_paths() {
        let out = resolve_self_references(labels(
            r##"{"a":{"b-c":"x"},"list":["p",{"q":"r"}],"n":7,
                "m1":"#{ self.a.b-c }","m2":"#{self['list'][1].q}","m3":"<#{self.list[0]}#{self.n}>"}"##,
        ))
        .unwrap();
        assert_eq!(out.dig_str(&["m1"]), Some("x"));
        assert_eq!(out.dig_str(&["m2"]), Some("r"));
        assert_eq!(out.dig_str(&["m3"]), Some("<p7>"));
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = resolve_self_references(labels(r##"{"msg":"#{self[\"missing\"]}"}"##)).unwrap_err();
        assert_eq!(
            err,
            Error::PathNotFound { expression: r#"#{self["missing"]}"#.to_string(), segment: "missing".to_string() }
        );
    }

    #[test]
    fn bad_index_and_non_collection_are_fatal() {
        let err = resolve_self_references(labels(r##"{"l":["a"],"m":"#{self.l[3]}"}"##)).unwrap_err();
        assert!(matches!(err, Error::InvalidIndex { ref segment, .. } if segment == "3"));

        let err = resolve_self_references(labels(r##"{"l":["a"],"m":"#{self.l.first}"}"##)).unwrap_err();
        assert!(matches!(err, Error::InvalidIndex { ref segment, .. } if segment == "first"));

        let err = resolve_self_references(labels(r##"{"s":"a","m":"#{self.s.x}"}"##)).unwrap_err();
        assert!(matches!(err, Error::NotNavigable { ref segment, .. } if segment == "x"));

        let err = resolve_self_references(labels(r##"{"s":{"t":"a"},"m":"#{self.s}"}"##)).unwrap_err();
        assert!(matches!(err, Error::UnresolvableTarget { .. }));
    }

    #[test]
    fn foreign_interpolations_are_untouched() {
        let src = r##"{"msg":"keep #{other_thing} and #{ selfish } and #{self}"}"##;
        let out = resolve_self_references(labels(src)).unwrap();
        assert_eq!(out.dig_str(&["msg"]), Some("keep #{other_thing} and #{ selfish } and #{self}"));
    }

    #[test]
    fn references_see_earlier_resolved_values_in_declaration_order() {
        let out = resolve_self_references(labels(
            r##"{"early":"#{self.base}!","base":"B#{self.tail}","late":"#{self.base}?","tail":"t"}"##,
        ))
        .unwrap();
        // `early` reads `base` before it is rewritten.
        assert_eq!(out.dig_str(&["early"]), Some("B#{self.tail}!"));
        assert_eq!(out.dig_str(&["base"]), Some("Bt"));
        assert_eq!(out.dig_str(&["late"]), Some("Bt?"));
    }
}
