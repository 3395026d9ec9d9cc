use crate::rules::cjk::predicates::{
    en_dash, numeric_dash, proportional_punct, space_between_cjk, space_cjk_then_latin, space_cjk_then_short_latin,
    space_latin_then_cjk, wave_dash, whitespace_run,
};
use crate::{LabelTree, PunctName, RuleEntry, TriggerMask, WellKnownLabel};

/// One rule per punctuation label present under `punct`, in [`PunctName::ALL`]
/// order. Strict mode converts unconditionally; proportional mode only where
/// the surrounding text is CJK.
fn rule_punct(labels: &LabelTree, proportional: bool) -> Vec<RuleEntry> {
    let Some(punct) = labels.dig(WellKnownLabel::Punct.path()) else {
        return Vec::new();
    };
    PunctName::ALL
        .iter()
        .filter_map(|&name| {
            let full_width = punct.get(name.key())?.as_str()?;
            let entry = RuleEntry::literal(format!("punct {}", name.key()), name.latin(), full_width);
            Some(if proportional { entry.with_contexts(proportional_punct()) } else { entry })
        })
        .collect()
}

fn rule_space_between_cjk() -> RuleEntry {
    rule! {
        name: "space between cjk",
        pattern: whitespace_run().clone(),
        replace: "",
        requires: TriggerMask::WHITESPACE,
        contexts: [space_between_cjk()],
    }
}

/// Spacing rules for CJK next to Latin text. With a configured separator the
/// gap in either direction becomes the separator; without one, only a gap
/// before a digit or a lone Latin letter is removed.
fn rule_space_cjk_latin(labels: &LabelTree) -> Vec<RuleEntry> {
    match labels.dig_str(WellKnownLabel::CjkLatinSeparator.path()) {
        Some(separator) => vec![
            rule! {
                name: "space cjk-latin",
                pattern: whitespace_run().clone(),
                replace: separator,
                requires: TriggerMask::WHITESPACE,
                contexts: [space_cjk_then_latin()],
            },
            rule! {
                name: "space latin-cjk",
                pattern: whitespace_run().clone(),
                replace: separator,
                requires: TriggerMask::WHITESPACE,
                contexts: [space_latin_then_cjk()],
            },
        ],
        None => vec![rule! {
            name: "space cjk-short latin",
            pattern: whitespace_run().clone(),
            replace: "",
            requires: TriggerMask::WHITESPACE,
            contexts: [space_cjk_then_short_latin()],
        }],
    }
}

/// En-dash between CJK text becomes the wave dash; between numerals, the
/// full-width hyphen-minus. Either is omitted when its label is absent.
fn rule_dashes(labels: &LabelTree) -> Vec<RuleEntry> {
    let mut rules = Vec::new();
    if let Some(wave) = labels.dig_str(WellKnownLabel::EnDash.path()) {
        rules.push(rule! {
            name: "en-dash",
            pattern: en_dash().clone(),
            replace: wave,
            requires: TriggerMask::EN_DASH,
            contexts: [wave_dash()],
        });
    }
    if let Some(numeric) = labels.dig_str(WellKnownLabel::NumberEnDash.path()) {
        rules.push(rule! {
            name: "number en-dash",
            pattern: en_dash().clone(),
            replace: numeric,
            requires: TriggerMask::EN_DASH,
            contexts: [numeric_dash()],
        });
    }
    rules
}

/// The CJK table: punctuation, then spacing, then dashes.
pub fn get(labels: &LabelTree, proportional: bool) -> Vec<RuleEntry> {
    let mut rules = rule_punct(labels, proportional);
    rules.push(rule_space_between_cjk());
    rules.extend(rule_space_cjk_latin(labels));
    rules.extend(rule_dashes(labels));
    rules
}
