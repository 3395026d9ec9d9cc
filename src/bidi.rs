//! Directionality wrapping.
//!
//! Applied once to the final localized string:
//!
//! ```text
//! text RTL, context LTR  ──▶  ALM text ALM   (Arab, Aran)
//!                        ──▶  RLM text RLM   (other RTL scripts)
//! text LTR, context RTL  ──▶  LRM text LRM
//! otherwise              ──▶  text
//! ```

use crate::scripts::is_rtl_script;

pub const ARABIC_LETTER_MARK: char = '\u{061c}';
pub const RIGHT_TO_LEFT_MARK: char = '\u{200f}';
pub const LEFT_TO_RIGHT_MARK: char = '\u{200e}';

/// Wrap `text`, written in `script`, for embedding in a context whose script is
/// `outer_script`.
pub fn bidi_wrap(text: &str, script: &str, outer_script: &str) -> String {
    let mark = match (is_rtl_script(script), is_rtl_script(outer_script)) {
        (true, false) if matches!(script, "Arab" | "Aran") => ARABIC_LETTER_MARK,
        (true, false) => RIGHT_TO_LEFT_MARK,
        (false, true) => LEFT_TO_RIGHT_MARK,
        _ => return text.to_string(),
    };
    let mut out = String::with_capacity(text.len() + 2 * mark.len_utf8());
    out.push(mark);
    out.push_str(text);
    out.push(mark);
    out
}
