//! Grammar helpers that sit next to localization proper: inflection lookup,
//! ordinal formatting through a [`NumberFormatter`], list conjunction and
//! CJK title spacing.
//!
//! All of them read the session's [`LabelTree`] and none of them fail: a
//! missing table or a backend error degrades to a plainer rendering.

#[path = "grammar/rbnf.rs"]
mod rbnf;

use crate::labels::LabelTree;
use crate::WellKnownLabel;
use std::collections::BTreeMap;

pub use rbnf::{EnglishRbnf, NumberFormatter};

/// Order in which grammatical features are consulted.
const INFLECTION_ORDER: [&str; 7] = ["voice", "mood", "tense", "number", "case", "gender", "person"];

/// Value assumed for a feature the caller did not give.
fn default_feature(feature: &str) -> Option<&'static str> {
    match feature {
        "voice" => Some("act"),
        "mood" => Some("ind"),
        "tense" => Some("pres"),
        "number" => Some("sg"),
        "case" => Some("nom"),
        "gender" => Some("masc"),
        "person" => Some("3rd"),
        _ => None,
    }
}

/// Grammatical features of a term, e.g. `{number: pl, gender: fem}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features(BTreeMap<String, String>);

impl Features {
    pub fn new() -> Self {
        Features::default()
    }

    pub fn with(mut self, feature: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(feature.into(), value.into());
        self
    }

    pub fn get(&self, feature: &str) -> Option<&str> {
        self.0.get(feature).map(String::as_str)
    }

    /// The given value, else the default for known features.
    fn value_or_default(&self, feature: &str) -> Option<&str> {
        self.get(feature).or_else(|| default_feature(feature))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Features {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Features(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Look `word` up in the `inflection` table.
///
/// A string entry is the answer. A mapping is walked feature by feature in
/// [`INFLECTION_ORDER`], descending only where the mapping has the feature's
/// value as a key; features absent from the table are skipped. The first
/// string reached wins; otherwise `word` comes back unchanged.
pub(crate) fn inflect(labels: &LabelTree, word: &str, features: &Features) -> String {
    let Some(mut node) = labels.dig(WellKnownLabel::Inflection.path()).and_then(|table| table.get(word)) else {
        return word.to_string();
    };
    if let Some(s) = node.as_str() {
        return s.to_string();
    }
    for feature in INFLECTION_ORDER {
        let Some(value) = features.value_or_default(feature) else { continue };
        if let Some(next) = node.get(value) {
            node = next;
        }
        if let Some(s) = node.as_str() {
            return s.to_string();
        }
    }
    word.to_string()
}

/// Rule label for `rule_set`: the label itself, or, when `ordinal_keys` is a
/// non-empty list, the entry keyed by the term's features joined with `.`.
pub(crate) fn ordinal_label(labels: &LabelTree, term: &Features, rule_set: &str) -> Option<String> {
    let entry = labels.get(rule_set)?;
    let keys = labels.dig(WellKnownLabel::OrdinalKeys.path()).and_then(LabelTree::as_sequence).unwrap_or_default();
    if keys.is_empty() {
        return entry.stringify();
    }
    let key = keys
        .iter()
        .filter_map(LabelTree::as_str)
        .map(|k| term.value_or_default(k).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(".");
    entry.get(&key).and_then(LabelTree::stringify)
}

/// Backend locale for a language/script pair.
pub(crate) fn rbnf_locale(lang: &str, script: &str) -> String {
    match (lang, script) {
        ("zh", "Hans") => "zh-cn".to_string(),
        ("zh", "Hant") => "zh-tw".to_string(),
        _ => lang.to_string(),
    }
}

/// Format `number` with the session locale, falling back to English rules and
/// finally to plain digits.
pub(crate) fn format_ordinal(
    formatter: &dyn NumberFormatter,
    locale: &str,
    number: i64,
    rule_set: &str,
    label: Option<&str>,
) -> String {
    match formatter.format(number, locale, rule_set, label) {
        Ok(s) => s,
        Err(err) => {
            tracing::debug!(target: "textloc::grammar", %locale, %err, "ordinal backend failed, retrying with en");
            formatter.format(number, "en", rule_set, label).unwrap_or_else(|err| {
                tracing::debug!(target: "textloc::grammar", %err, "ordinal backend failed for en");
                number.to_string()
            })
        }
    }
}

/// Separator between list items.
pub(crate) fn enum_comma(script: &str) -> &'static str {
    match script {
        "Hans" | "Hant" => "、",
        _ => ", ",
    }
}

/// Replace the first `%1` with `first`, then the first `%2` with `second`.
pub(crate) fn fill_template(template: &str, first: &str, second: &str) -> String {
    template.replacen("%1", first, 1).replacen("%2", second, 1)
}

/// Spread a CJK title out with ideographic spaces (U+3000) between
/// characters, as for headings set in full-width grids.
///
/// Entities are decoded first. No space goes between a pair that is
/// a doubled dash or ellipsis, two digits, two Latin letters, or that contains
/// whitespace, starts with an opening bracket, ends with a closing bracket or
/// contains sentence punctuation.
///
/// ```
/// assert_eq!(textloc::cjk_extend("目次"), "目\u{3000}次");
/// assert_eq!(textloc::cjk_extend("第1章 (2020)"), "第\u{3000}1\u{3000}章 (2020)");
/// ```
pub fn cjk_extend(title: &str) -> String {
    let decoded = html_escape::decode_html_entities(title);
    let mut out = String::with_capacity(decoded.len() * 2);
    let mut prev: Option<char> = None;
    for c in decoded.chars() {
        if let Some(p) = prev {
            if interleaves(p, c) {
                out.push('\u{3000}');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn interleaves(first: char, second: char) -> bool {
    const DOUBLED: [char; 4] = ['\u{2014}', '\u{2025}', '\u{2026}', '\u{22ef}'];
    const OPENING: &str = "\u{2018}\u{201c}(\u{3014}[{\u{3008}\u{300a}\u{300c}\u{300e}\u{3010}\u{2985}\u{3018}\u{3016}\u{ab}\u{301d}";
    const CLOSING: &str = "\u{2019}\u{201d})\u{3015}]}\u{3009}\u{300b}\u{300d}\u{300f}\u{3011}\u{2986}\u{3019}\u{3017}\u{bb}\u{301f}";
    const SENTENCE: &str = "\u{3002}.\u{3001},\u{30fb}:;\u{2010}\u{301c}\u{30a0}\u{2013}!?\u{203c}\u{2047}\u{2048}\u{2049}";

    let mut buf = [0u8; 8];
    let first_len = first.encode_utf8(&mut buf).len();
    let second_len = second.encode_utf8(&mut buf[first_len..]).len();
    let pair = std::str::from_utf8(&buf[..first_len + second_len]).unwrap_or_default();

    let exempt = (first == second && DOUBLED.contains(&first))
        || regex!(r"\d\d|\p{Latin}\p{Latin}|\s").is_match(pair)
        || OPENING.contains(first)
        || CLOSING.contains(second)
        || SENTENCE.contains(first)
        || SENTENCE.contains(second);
    !exempt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(json: &str) -> LabelTree {
        LabelTree::from_json_str(json).unwrap()
    }

    #[test]
    fn inflect_walks_features_in_order() {
        let labels = labels(
            r#"{"inflection": {
                "Clause": "Clause",
                "Annex": {"sg": {"nom": "Annex", "gen": "Annexes"}, "pl": "Annexes"},
                "Table": {"act": {"sg": "Tabelle"}}
            }}"#,
        );
        assert_eq!(inflect(&labels, "Clause", &Features::new()), "Clause");
        assert_eq!(inflect(&labels, "Annex", &Features::new()), "Annex");
        assert_eq!(inflect(&labels, "Annex", &Features::new().with("number", "pl")), "Annexes");
        assert_eq!(inflect(&labels, "Annex", &Features::new().with("case", "gen")), "Annexes");
        assert_eq!(inflect(&labels, "Table", &Features::new()), "Tabelle");
        assert_eq!(inflect(&labels, "Figure", &Features::new()), "Figure");
    }

    #[test]
    fn inflect_returns_word_when_no_leaf_is_reached() {
        let labels = labels(r#"{"inflection": {"Annex": {"pl": {"gen": "Annexes"}}}}"#);
        assert_eq!(inflect(&labels, "Annex", &Features::new().with("number", "pl")), "Annex");
        assert_eq!(inflect(&LabelTree::default(), "Annex", &Features::new()), "Annex");
    }

    #[test]
    fn ordinal_label_uses_ordinal_keys() {
        let plain = labels(r#"{"ordinal_keys": [], "SpelloutRules": "spellout-ordinal"}"#);
        assert_eq!(ordinal_label(&plain, &Features::new(), "SpelloutRules").as_deref(), Some("spellout-ordinal"));

        let keyed = labels(
            r#"{"ordinal_keys": ["gender", "number"],
                "SpelloutRules": {"masc.sg": "spellout-ordinal-masculine", "fem.sg": "spellout-ordinal-feminine"}}"#,
        );
        let fem: Features = [("gender", "fem")].into_iter().collect();
        assert_eq!(
            ordinal_label(&keyed, &Features::new(), "SpelloutRules").as_deref(),
            Some("spellout-ordinal-masculine")
        );
        assert_eq!(ordinal_label(&keyed, &fem, "SpelloutRules").as_deref(), Some("spellout-ordinal-feminine"));
        assert_eq!(ordinal_label(&keyed, &Features::new().with("number", "pl"), "SpelloutRules"), None);
    }

    #[test]
    fn format_ordinal_falls_back() {
        assert_eq!(format_ordinal(&EnglishRbnf, "fr", 5, "SpelloutRules", Some("spellout-ordinal")), "fifth");
        assert_eq!(format_ordinal(&EnglishRbnf, "fr", 5, "SpelloutRules", Some("spellout-ordinal-feminine")), "5");
        assert_eq!(rbnf_locale("zh", "Hant"), "zh-tw");
        assert_eq!(rbnf_locale("de", "Latn"), "de");
    }

    #[test]
    fn template_fills_first_occurrences() {
        assert_eq!(fill_template("%1 and %2", "a", "b"), "a and b");
        assert_eq!(fill_template("%2 %1", "a", "%2"), "%2 a");
    }

    #[test]
    fn cjk_extend_examples() {
        let cases: Vec<(&str, &str)> = vec![
            ("目次", "目\u{3000}次"),
            ("前言", "前\u{3000}言"),
            ("AB", "AB"),
            ("12", "12"),
            ("「序」", "「序」"),
            ("序、言", "序、言"),
            ("——", "——"),
            ("a b", "a b"),
            ("&#x76ee;&#x6b21;", "目\u{3000}次"),
        ];
        for (input, expected) in cases {
            assert_eq!(cjk_extend(input), expected, "input: {input}");
        }
    }
}
