//! Property-based invariant tests for fragment localization.
//!
//! 1. Re-localizing strict CJK output changes nothing
//! 2. Context from a sibling node and from `prev` gives the same decisions
//! 3. Context from a following sibling and from `foll` gives the same decisions
//! 4. French spacing is idempotent
//! 5. No panics on arbitrary input, markup included

use proptest::prelude::*;
use textloc::{Localizer, Options};

// ── Strategies ──────────────────────────────────────────────────────────

fn mixed_text() -> impl Strategy<Value = String> {
    "[你好世界中文東京一二三a-zA-Z0-9 ,.:;()!?\u{2013}]{0,16}"
}

/// Mixed text over every Latin punctuation glyph a CJK label may convert.
fn punct_text() -> impl Strategy<Value = String> {
    "[你好世界中文一二三a-z0-9 :,;.()\\[\\]?!\u{2014}\u{201C}\u{201D}\u{2018}\u{2019}\u{2026}\u{2013}]{0,16}"
}

fn context_text() -> impl Strategy<Value = String> {
    "[你好世界中a-z0-9,.:;()!?\u{2013}]{0,6}"
}

fn french_text() -> impl Strategy<Value = String> {
    "[a-zA-Zéà0-9 ;:?!«»‹›\u{A0}\u{202F}]{0,16}"
}

fn options(proportional: bool) -> Options {
    Options { proportional_mixed_cjk: proportional, ..Options::default() }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn relocalizing_strict_output_changes_nothing(text in punct_text()) {
        let loc = Localizer::with_defaults("zh", Some("Hans")).unwrap();
        let once = loc.localize(&text, "zh", Some("Hans"), &Options::default());
        let twice = loc.localize(&once, "zh", Some("Hans"), &Options::default());
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn sibling_context_equals_explicit_prev(
        prefix in context_text(),
        text in mixed_text(),
        proportional in any::<bool>()
    ) {
        let loc = Localizer::with_defaults("zh", Some("Hans")).unwrap();
        let via_node = loc.localize(&format!("<esc>{prefix}</esc>{text}"), "zh", Some("Hans"), &options(proportional));
        let opts = Options { prev: Some(prefix.clone()), ..options(proportional) };
        let via_prev = loc.localize(&text, "zh", Some("Hans"), &opts);
        prop_assert_eq!(via_node, format!("{prefix}{via_prev}"));
    }

    #[test]
    fn sibling_context_equals_explicit_foll(
        text in mixed_text(),
        suffix in context_text(),
        proportional in any::<bool>()
    ) {
        let loc = Localizer::with_defaults("zh", Some("Hans")).unwrap();
        let via_node = loc.localize(&format!("{text}<esc>{suffix}</esc>"), "zh", Some("Hans"), &options(proportional));
        let opts = Options { foll: Some(suffix.clone()), ..options(proportional) };
        let via_foll = loc.localize(&text, "zh", Some("Hans"), &opts);
        prop_assert_eq!(via_node, format!("{via_foll}{suffix}"));
    }

    #[test]
    fn french_spacing_is_idempotent(text in french_text(), swiss in any::<bool>()) {
        let loc = Localizer::with_defaults("fr", None).unwrap().with_locale(if swiss { "CH" } else { "FR" });
        let once = loc.l10n(&text);
        prop_assert_eq!(loc.l10n(&once), once);
    }

    #[test]
    fn never_panics(text in any::<String>()) {
        for lang in ["zh", "ja", "fr", "ar", "en"] {
            let loc = Localizer::with_defaults(lang, None).unwrap();
            let _ = loc.l10n(&text);
            let _ = loc.localize(&text, lang, None, &options(true));
        }
    }
}
