//! ISO 15924 script helpers: the default script of a language and whether a
//! script is written right-to-left.

/// Default script for an ISO 639 language code. Languages not listed are
/// assumed to be written in Latin script.
pub fn default_script(lang: &str) -> &'static str {
    match lang {
        "zh" => "Hans",
        "ja" => "Jpan",
        "ko" => "Kore",
        "ar" | "fa" | "ur" | "ps" | "sd" | "ug" | "ckb" => "Arab",
        "he" | "yi" | "lad" => "Hebr",
        "syr" => "Syrc",
        "dv" => "Thaa",
        "nqo" => "Nkoo",
        "ru" | "uk" | "be" | "bg" | "mk" | "sr" | "kk" | "ky" | "tg" | "mn" | "tt" | "ba" | "cv" => "Cyrl",
        "el" => "Grek",
        "hy" => "Armn",
        "ka" => "Geor",
        "hi" | "mr" | "ne" | "sa" => "Deva",
        "bn" | "as" => "Beng",
        "pa" => "Guru",
        "gu" => "Gujr",
        "or" => "Orya",
        "ta" => "Taml",
        "te" => "Telu",
        "kn" => "Knda",
        "ml" => "Mlym",
        "si" => "Sinh",
        "th" => "Thai",
        "lo" => "Laoo",
        "my" => "Mymr",
        "km" => "Khmr",
        "am" | "ti" => "Ethi",
        "bo" | "dz" => "Tibt",
        "iu" => "Cans",
        _ => "Latn",
    }
}

/// True for scripts written right-to-left.
pub fn is_rtl_script(script: &str) -> bool {
    matches!(
        script,
        "Arab"
            | "Aran"
            | "Adlm"
            | "Armi"
            | "Hebr"
            | "Mand"
            | "Mend"
            | "Nkoo"
            | "Phnx"
            | "Rohg"
            | "Samr"
            | "Syrc"
            | "Thaa"
            | "Yezi"
    )
}
