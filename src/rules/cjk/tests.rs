use crate::labels::defaults;
use crate::rules::cjk;
use crate::{LabelTree, Localizer, Options};
use pretty_assertions::assert_eq;

fn zh() -> Localizer {
    Localizer::with_defaults("zh", Some("Hans")).unwrap()
}

fn proportional() -> Options {
    Options { proportional_mixed_cjk: true, ..Options::default() }
}

#[test]
fn cjk_examples_strict() {
    // Array of (input, expected)
    let cases: Vec<(&str, &str)> = vec![
        ("计算机代码 (你好, 世界.)", "计算机代码（你好，世界。）"),
        ("你好: 世界; 再见!", "你好：世界；再见！"),
        ("hello, world", "hello， world"),
        ("<b>你好</b>, 世界", "<b>你好</b>，世界"),
        ("东京–大阪", "东京～大阪"),
        ("1–2", "1－2"),
        ("三–五", "三－五"),
        ("东京–5", "东京–5"),
        ("第 3章", "第3章"),
        ("中文 Latin", "中文 Latin"),
        ("中文 A", "中文A"),
        ("&lt;你好&gt;, 世界", "&lt;你好&gt;，世界"),
        ("你好\u{2026}", "你好\u{2026}\u{2026}"),
        ("你好\u{2026}\u{2026}", "你好\u{2026}\u{2026}"),
    ];
    let loc = zh();
    for (input, expected) in cases {
        assert_eq!(loc.localize(input, "zh", Some("Hans"), &Options::default()), expected, "input: {input}");
    }
}

#[test]
fn cjk_examples_proportional() {
    let cases: Vec<(&str, &str)> = vec![
        ("你好, world", "你好， world"),
        ("hello, world", "hello, world"),
        ("你好, 世界.", "你好，世界。"),
        ("(你好)", "（你好）"),
        ("hello (world)", "hello (world)"),
    ];
    let loc = zh();
    for (input, expected) in cases {
        assert_eq!(loc.localize(input, "zh", Some("Hans"), &proportional()), expected, "input: {input}");
    }
}

#[test]
fn following_context_from_options() {
    let loc = zh();
    let with_foll = |foll: &str| Options { foll: Some(foll.to_string()), ..proportional() };
    assert_eq!(loc.localize(",", "zh", Some("Hans"), &with_foll("你好")), "，");
    assert_eq!(loc.localize(",", "zh", Some("Hans"), &with_foll("hello")), ",");
    assert_eq!(loc.localize(",<esc>你好</esc>", "zh", Some("Hans"), &proportional()), "，你好");
}

#[test]
fn japanese_uses_its_own_comma() {
    let loc = Localizer::with_defaults("ja", None).unwrap();
    assert_eq!(loc.localize("東京, 大阪.", "ja", None, &Options::default()), "東京、大阪。");
}

#[test]
fn escaped_regions_are_left_alone() {
    let loc = zh();
    let out = loc.localize("<esc>a, b</esc>你好, 世界", "zh", Some("Hans"), &Options::default());
    assert_eq!(out, "a, b你好，世界");
}

#[test]
fn separator_label_spaces_cjk_and_latin() {
    let labels = LabelTree::from_json_str(r#"{"punct":{"cjk-latin-separator":"\u2009"}}"#).unwrap();
    let loc = Localizer::new("zh", Some("Hans"), labels).unwrap();
    let out = loc.localize("中文  Latin 中文", "zh", Some("Hans"), &Options::default());
    assert_eq!(out, "中文\u{2009}Latin\u{2009}中文");
}

#[test]
fn missing_punct_labels_omit_rules() {
    let labels = LabelTree::from_json_str(r#"{"punct":{"comma":"，"}}"#).unwrap();
    let names: Vec<String> = cjk::get(&labels, false).iter().map(|r| r.name.to_string()).collect();
    assert_eq!(names, ["punct comma", "space between cjk", "space cjk-short latin"]);
}

#[test]
fn table_order_is_punct_space_dash() {
    let labels = defaults::builtin("zh", Some("Hans")).unwrap();
    let names: Vec<String> = cjk::get(&labels, true).iter().map(|r| r.name.to_string()).collect();
    let first_space = names.iter().position(|n| n.starts_with("space")).unwrap();
    let first_dash = names.iter().position(|n| n.contains("en-dash")).unwrap();
    assert!(names[..first_space].iter().all(|n| n.starts_with("punct")));
    assert!(first_space < first_dash);
    assert_eq!(names.last().map(String::as_str), Some("number en-dash"));
}

#[test]
fn localizing_twice_changes_nothing() {
    let loc = zh();
    let inputs = [
        "计算机代码 (你好, 世界.)",
        "东京–大阪, 1–2",
        "hello, 世界 (test)",
        "等等\u{2026}",
        "好\u{2026}\u{2026}\u{2026}",
    ];
    for input in inputs {
        let once = loc.localize(input, "zh", Some("Hans"), &Options::default());
        let twice = loc.localize(&once, "zh", Some("Hans"), &Options::default());
        assert_eq!(once, twice, "input: {input}");
    }
}
