//! Rule-based number formatting.
//!
//! Spelling numbers out and building ordinals is a locale-data problem that
//! belongs to a dedicated backend; the engine only talks to it through
//! [`NumberFormatter`]. [`EnglishRbnf`] is the built-in backend and covers the
//! English rule sets the fallback path needs.

use crate::error::FormatError;

/// A rule-based number formatting backend.
///
/// `rule_set` is the rule-set group (`SpelloutRules`, `OrdinalRules`) and
/// `label` the rule within it (`spellout-ordinal`, `digits-ordinal`, ...).
pub trait NumberFormatter {
    fn format(&self, number: i64, locale: &str, rule_set: &str, label: Option<&str>) -> Result<String, FormatError>;
}

/// English spell-out and ordinal rules for `0..=999_999`.
///
/// | rule set        | label                                   | 21                     |
/// |-----------------|-----------------------------------------|------------------------|
/// | `SpelloutRules` | `spellout-numbering`, `spellout-cardinal` | `twenty-one`         |
/// | `SpelloutRules` | `spellout-ordinal`                      | `twenty-first`         |
/// | `OrdinalRules`  | `digits-ordinal`                        | `21st`                 |
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishRbnf;

const MAX: i64 = 999_999;

/// Words for 0..19, indexed by value.
const ZERO_NINETEEN: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

/// Tens words, indexed by value / 10 (entries 0 and 1 unused).
const TENS: [&str; 10] = ["", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety"];

/// Cardinal words whose ordinal is not just `+th`.
const IRREGULAR_ORDINALS: [(&str, &str); 7] = [
    ("one", "first"),
    ("two", "second"),
    ("three", "third"),
    ("five", "fifth"),
    ("eight", "eighth"),
    ("nine", "ninth"),
    ("twelve", "twelfth"),
];

impl NumberFormatter for EnglishRbnf {
    fn format(&self, number: i64, locale: &str, rule_set: &str, label: Option<&str>) -> Result<String, FormatError> {
        if locale != "en" && !locale.starts_with("en-") {
            return Err(FormatError::UnsupportedLocale(locale.to_string()));
        }
        if !(0..=MAX).contains(&number) {
            return Err(FormatError::OutOfRange(number));
        }
        match (rule_set, label) {
            ("SpelloutRules", Some("spellout-numbering" | "spellout-cardinal")) => Ok(cardinal(number)),
            ("SpelloutRules", Some("spellout-ordinal")) => Ok(ordinal_words(number)),
            ("OrdinalRules", Some("digits-ordinal")) => Ok(format!("{number}{}", digits_suffix(number))),
            _ => Err(FormatError::UnknownRuleSet { rule_set: rule_set.to_string(), label: label.map(str::to_string) }),
        }
    }
}

fn below_hundred(n: i64) -> String {
    match n {
        0..=19 => ZERO_NINETEEN[n as usize].to_string(),
        _ if n % 10 == 0 => TENS[(n / 10) as usize].to_string(),
        _ => format!("{}-{}", TENS[(n / 10) as usize], ZERO_NINETEEN[(n % 10) as usize]),
    }
}

fn below_thousand(n: i64) -> String {
    match (n / 100, n % 100) {
        (0, rest) => below_hundred(rest),
        (hundreds, 0) => format!("{} hundred", ZERO_NINETEEN[hundreds as usize]),
        (hundreds, rest) => format!("{} hundred {}", ZERO_NINETEEN[hundreds as usize], below_hundred(rest)),
    }
}

fn cardinal(n: i64) -> String {
    match (n / 1000, n % 1000) {
        (0, rest) => below_thousand(rest),
        (thousands, 0) => format!("{} thousand", below_thousand(thousands)),
        (thousands, rest) => format!("{} thousand {}", below_thousand(thousands), below_thousand(rest)),
    }
}

/// Ordinal of the spelled-out cardinal: only the last word changes.
fn ordinal_words(n: i64) -> String {
    let words = cardinal(n);
    let split = words.rfind([' ', '-']).map_or(0, |i| i + 1);
    let (head, last) = words.split_at(split);
    let last = match IRREGULAR_ORDINALS.iter().find(|(cardinal, _)| *cardinal == last) {
        Some((_, ordinal)) => ordinal.to_string(),
        None => match last.strip_suffix('y') {
            Some(stem) => format!("{stem}ieth"),
            None => format!("{last}th"),
        },
    };
    format!("{head}{last}")
}

fn digits_suffix(n: i64) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(n: i64, label: &str) -> String {
        EnglishRbnf.format(n, "en", "SpelloutRules", Some(label)).unwrap()
    }

    #[test]
    fn spellout_examples() {
        let cases: Vec<(i64, &str, &str)> = vec![
            (0, "zero", "zeroth"),
            (1, "one", "first"),
            (5, "five", "fifth"),
            (12, "twelve", "twelfth"),
            (20, "twenty", "twentieth"),
            (21, "twenty-one", "twenty-first"),
            (100, "one hundred", "one hundredth"),
            (103, "one hundred three", "one hundred third"),
            (1_000, "one thousand", "one thousandth"),
            (2_468, "two thousand four hundred sixty-eight", "two thousand four hundred sixty-eighth"),
            (
                999_999,
                "nine hundred ninety-nine thousand nine hundred ninety-nine",
                "nine hundred ninety-nine thousand nine hundred ninety-ninth",
            ),
        ];
        for (n, cardinal, ordinal) in cases {
            assert_eq!(spell(n, "spellout-cardinal"), cardinal);
            assert_eq!(spell(n, "spellout-ordinal"), ordinal);
        }
    }

    #[test]
    fn digit_ordinals() {
        let cases = [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (13, "13th"), (22, "22nd"), (111, "111th")];
        for (n, expected) in cases {
            assert_eq!(EnglishRbnf.format(n, "en", "OrdinalRules", Some("digits-ordinal")).unwrap(), expected);
        }
    }

    #[test]
    fn reports_what_it_cannot_do() {
        assert_eq!(
            EnglishRbnf.format(1, "de", "SpelloutRules", Some("spellout-ordinal")),
            Err(FormatError::UnsupportedLocale("de".into()))
        );
        assert_eq!(
            EnglishRbnf.format(1_000_000, "en", "SpelloutRules", Some("spellout-ordinal")),
            Err(FormatError::OutOfRange(1_000_000))
        );
        assert!(matches!(EnglishRbnf.format(1, "en", "SpelloutRules", None), Err(FormatError::UnknownRuleSet { .. })));
    }
}
