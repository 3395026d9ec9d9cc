//! Built-in label sets.
//!
//! A small baseline per language so the engine is usable without external
//! translation files. Callers with real translation data should build a
//! [`LabelTree`] themselves and pass it to `Localizer::new`.

use super::LabelTree;
use crate::error::Result;

const EN: &str = r#"{
  "text": "text",
  "at": "at",
  "binary_and": "%1 and %2",
  "multiple_and": "%1, and %2",
  "binary_or": "%1 or %2",
  "multiple_or": "%1, or %2",
  "ordinal_keys": [],
  "SpelloutRules": "spellout-ordinal",
  "OrdinalRules": "digits-ordinal"
}"#;

const FR: &str = r#"{
  "text": "texte",
  "at": "à",
  "binary_and": "%1 et %2",
  "multiple_and": "%1 et %2",
  "binary_or": "%1 ou %2",
  "multiple_or": "%1 ou %2",
  "ordinal_keys": [],
  "SpelloutRules": "spellout-ordinal",
  "OrdinalRules": "digits-ordinal"
}"#;

const ZH_HANS: &str = r#"{
  "text": "文本",
  "at": "在",
  "punct": {
    "colon": "：",
    "comma": "，",
    "semicolon": "；",
    "period": "。",
    "close-paren": "）",
    "open-paren": "（",
    "close-bracket": "］",
    "open-bracket": "［",
    "question-mark": "？",
    "exclamation-mark": "！",
    "ellipse": "……",
    "en-dash": "～",
    "number-en-dash": "－"
  },
  "binary_and": "%1和%2",
  "multiple_and": "%1和%2",
  "binary_or": "%1或%2",
  "multiple_or": "%1或%2",
  "ordinal_keys": [],
  "SpelloutRules": "spellout-ordinal",
  "OrdinalRules": "digits-ordinal"
}"#;

const ZH_HANT: &str = r#"{
  "text": "文本",
  "at": "在",
  "punct": {
    "colon": "：",
    "comma": "，",
    "semicolon": "；",
    "period": "。",
    "close-paren": "）",
    "open-paren": "（",
    "close-bracket": "］",
    "open-bracket": "［",
    "question-mark": "？",
    "exclamation-mark": "！",
    "ellipse": "……",
    "en-dash": "～",
    "number-en-dash": "－"
  },
  "binary_and": "%1和%2",
  "multiple_and": "%1和%2",
  "binary_or": "%1或%2",
  "multiple_or": "%1或%2",
  "ordinal_keys": [],
  "SpelloutRules": "spellout-ordinal",
  "OrdinalRules": "digits-ordinal"
}"#;

const JA: &str = r#"{
  "text": "テキスト",
  "at": "で",
  "punct": {
    "colon": "：",
    "comma": "、",
    "semicolon": "；",
    "period": "。",
    "close-paren": "）",
    "open-paren": "（",
    "close-bracket": "］",
    "open-bracket": "［",
    "question-mark": "？",
    "exclamation-mark": "！",
    "ellipse": "……",
    "en-dash": "～",
    "number-en-dash": "－"
  },
  "binary_and": "%1及び%2",
  "multiple_and": "%1及び%2",
  "binary_or": "%1又は%2",
  "multiple_or": "%1又は%2",
  "ordinal_keys": [],
  "SpelloutRules": "spellout-ordinal",
  "OrdinalRules": "digits-ordinal"
}"#;

const KO: &str = r#"{
  "text": "텍스트",
  "at": "에",
  "binary_and": "%1 및 %2",
  "multiple_and": "%1 및 %2",
  "binary_or": "%1 또는 %2",
  "multiple_or": "%1 또는 %2",
  "ordinal_keys": [],
  "SpelloutRules": "spellout-ordinal",
  "OrdinalRules": "digits-ordinal"
}"#;

/// Built-in labels for `lang`/`script`. Chinese picks its set by script
/// (default `Hans`); unknown languages get the English set.
pub(crate) fn builtin(lang: &str, script: Option<&str>) -> Result<LabelTree> {
    let source = match (lang, script) {
        ("zh", Some("Hant")) => ZH_HANT,
        ("zh", _) => ZH_HANS,
        ("ja", _) => JA,
        ("ko", _) => KO,
        ("fr", _) => FR,
        _ => EN,
    };
    LabelTree::from_json_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_set_parses() {
        let sets = [("en", None), ("fr", None), ("zh", None), ("zh", Some("Hant")), ("ja", None), ("ko", None)];
        for (lang, script) in sets {
            let labels = builtin(lang, script).unwrap();
            assert!(labels.dig_str(&["binary_and"]).is_some(), "{lang}");
        }
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let labels = builtin("tlh", Some("Klin")).unwrap();
        assert_eq!(labels.dig_str(&["text"]), Some("text"));
        assert_eq!(labels.dig_str(&["at"]), Some("at"));
    }
}
