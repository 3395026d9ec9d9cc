//! Context patterns for CJK rules.
//!
//! Every pattern is tested against a whole accumulated context string, so
//! *before* patterns are anchored at `$` and *after* patterns at `^`.
//! Whitespace here is ASCII whitespace only: ideographic space (U+3000) is a
//! CJK character, not a separator.

use crate::ContextPair;

/// CJK characters: ideographs, kana, hangul, bopomofo, CJK symbols and
/// punctuation, and the half-width/full-width forms block.
macro_rules! cjk_set {
    () => {
        r"\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}\p{Bopomofo}\x{2E80}-\x{2FDF}\x{3000}-\x{303F}\x{3190}-\x{319F}\x{31C0}-\x{31EF}\x{3200}-\x{33FF}\x{F900}-\x{FAFF}\x{FE30}-\x{FE4F}\x{FF00}-\x{FFEF}"
    };
}

/// CJK characters that are not punctuation.
macro_rules! cjk_letter {
    () => {
        r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}\p{Bopomofo}\x{3190}-\x{319F}\x{F900}-\x{FAFF}]"
    };
}

/// Digits plus Chinese numeral ideographs, formal/financial forms included.
/// The ideographs carry no Unicode numeric property, so they are listed.
macro_rules! numeral_set {
    () => {
        r"零〇一二三四五六七八九十百千万亿壹贰叁肆伍陆柒捌玖拾佰仟萬億兆\p{N}"
    };
}

macro_rules! cjk {
    () => {
        concat!("[", cjk_set!(), "]")
    };
}

macro_rules! cjk_non_numeral {
    () => {
        concat!("[[", cjk_set!(), "]--[", numeral_set!(), "]]")
    };
}

macro_rules! numeral {
    () => {
        concat!("[", numeral_set!(), "]")
    };
}

/// Latin punctuation that is itself converted when it borders CJK text.
macro_rules! latin_punct {
    () => {
        r"[:,.()\[\];?!\-]"
    };
}

macro_rules! ws {
    () => {
        r"[\t\n\x0B\x0C\r ]"
    };
}

/// Context pairs for punctuation in proportional mixed-CJK mode.
///
/// 1. CJK (or start) before, modulo spaces; after, optional spaces and
///    convertible punctuation, then CJK (or end).
/// 2. CJK then convertible punctuation before; after, end or convertible
///    punctuation then a space.
/// 3. Space (or start) before, CJK after.
pub fn proportional_punct() -> Vec<ContextPair> {
    vec![
        ctx!(
            concat!("(?:", cjk!(), "|^)", ws!(), "*$"),
            concat!("^", ws!(), "*", latin_punct!(), "*(?:", cjk!(), "|$)")
        ),
        ctx!(concat!(cjk!(), latin_punct!(), "*$"), concat!("^(?:$|", latin_punct!(), "*", ws!(), ")")),
        ctx!(concat!("(?:", ws!(), "|^)$"), concat!("^", cjk!())),
    ]
}

/// En-dash between non-numeral CJK text (or run edges).
pub fn wave_dash() -> ContextPair {
    ctx!(concat!("(?:", cjk_non_numeral!(), "|^)$"), concat!("^(?:", cjk_non_numeral!(), "|$)"))
}

/// En-dash between numerals (digits or CJK numeral ideographs).
pub fn numeric_dash() -> ContextPair {
    ctx!(concat!(numeral!(), "$"), concat!("^", numeral!()))
}

/// Whitespace directly between two CJK characters.
pub fn space_between_cjk() -> ContextPair {
    ctx!(concat!(cjk!(), "$"), concat!("^", cjk!()))
}

/// Whitespace between CJK and a following Latin/number run, skipping
/// punctuation on the Latin side.
pub fn space_cjk_then_latin() -> ContextPair {
    ctx!(concat!(cjk!(), "$"), r"^\p{P}*[\p{Latin}\p{N}]")
}

/// Whitespace between a Latin/number run (and trailing punctuation) and a
/// following CJK letter.
pub fn space_latin_then_cjk() -> ContextPair {
    ctx!(r"[\p{Latin}\p{N}]\p{P}*$", concat!("^", cjk_letter!()))
}

/// Without a configured separator: whitespace between CJK and a digit, or a
/// single Latin letter that is itself followed by CJK or the end.
pub fn space_cjk_then_short_latin() -> ContextPair {
    ctx!(concat!(cjk!(), "$"), concat!(r"^(?:\d|[A-Za-z](?:", cjk!(), "|$))"))
}

/// Whitespace run matched by the spacing rules.
pub fn whitespace_run() -> &'static regex::Regex {
    regex!(concat!(ws!(), "+"))
}

/// Plain en-dash.
pub fn en_dash() -> &'static regex::Regex {
    regex!("\u{2013}")
}
