use crate::{RuleEntry, TriggerMask};

/// NARROW NO-BREAK SPACE.
const NNBSP: &str = "\u{202F}";
/// NO-BREAK SPACE.
const NBSP: &str = "\u{A0}";

macro_rules! alnum_before {
    () => {
        r"[\p{Alphabetic}\p{Nd}]$"
    };
}

macro_rules! space_or_end_after {
    () => {
        r"^(?:[\t\n\x0B\x0C\r ]|$)"
    };
}

/// `» › ; ? !` take a narrow no-break space before them when they close a
/// word, or when they open the run.
fn rule_high_punct() -> RuleEntry {
    rule! {
        name: "space before high punctuation",
        pattern: regex!("[»›;?!]").clone(),
        replace: format!("{NNBSP}$0"),
        requires: TriggerMask::FRENCH_HIGH,
        contexts: [ctx!(alnum_before!(), space_or_end_after!()), ctx!("^$", "")],
    }
}

/// `« ‹` take a narrow no-break space after them unless one of the no-break
/// spaces already follows.
fn rule_open_guillemet() -> RuleEntry {
    rule! {
        name: "space after opening guillemet",
        pattern: regex!("[«‹]").clone(),
        replace: format!("$0{NNBSP}"),
        requires: TriggerMask::OPEN_GUILLEMET,
        contexts: [ctx!("", r"^(?:[^\x{A0}\x{202F}\x{2007}]|$)")],
    }
}

/// `:` takes a no-break space (`FR`) or a narrow no-break space (`CH`) before
/// it when it closes a word, or when it opens the run and is followed by a
/// space.
fn rule_colon(locale: &str) -> RuleEntry {
    let space = if locale == "CH" { NNBSP } else { NBSP };
    rule! {
        name: "space before colon",
        pattern: regex!(":").clone(),
        replace: format!("{space}$0"),
        requires: TriggerMask::COLON,
        contexts: [ctx!(alnum_before!(), space_or_end_after!()), ctx!("^$", r"^[\t\n\x0B\x0C\r ]")],
    }
}

/// The French table for `locale` (`FR`, `CH`, ...).
pub fn get(locale: &str) -> Vec<RuleEntry> {
    vec![rule_high_punct(), rule_open_guillemet(), rule_colon(locale)]
}
