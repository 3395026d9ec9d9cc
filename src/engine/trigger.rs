//! Trigger scanning (run pre-classification).
//!
//! Before rules run over a text run, the run is scanned once for the coarse
//! character classes rules care about. A rule whose [`TriggerMask`] is not
//! contained in the run's mask cannot match and is skipped without touching
//! its regex.
//!
//! ## Design notes
//!
//! - The scan is per character and only ever over-approximates: a set bit
//!   means "might match", never "will match".
//! - A literal rule's mask is the scan of the literal itself, so a run
//!   containing the literal always contains the mask.
//! - Rules rewrite the run; the walker rescans after any rule that changed it.

bitflags::bitflags! {
    /// Coarse character classes present in a text run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TriggerMask: u32 {
        /// ASCII whitespace.
        const WHITESPACE       = 1 << 0;
        /// U+2013 EN DASH.
        const EN_DASH          = 1 << 1;
        /// Latin punctuation with a full-width CJK counterpart.
        const CJK_CONVERTIBLE  = 1 << 2;
        /// `» › ; ? !`, which take a narrow no-break space in French.
        const FRENCH_HIGH      = 1 << 3;
        /// `« ‹`.
        const OPEN_GUILLEMET   = 1 << 4;
        const COLON            = 1 << 5;
    }
}

impl TriggerMask {
    /// Scan `text` for every class it contains.
    pub fn scan(text: &str) -> Self {
        let mut mask = TriggerMask::empty();
        for c in text.chars() {
            mask |= Self::of_char(c);
        }
        mask
    }

    /// Mask a rule matching `literal` verbatim needs.
    pub fn for_literal(literal: &str) -> Self {
        Self::scan(literal)
    }

    fn of_char(c: char) -> Self {
        match c {
            ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' => TriggerMask::WHITESPACE,
            '\u{2013}' => TriggerMask::EN_DASH,
            ':' => TriggerMask::CJK_CONVERTIBLE | TriggerMask::COLON,
            ';' | '?' | '!' => TriggerMask::CJK_CONVERTIBLE | TriggerMask::FRENCH_HIGH,
            ',' | '.' | '(' | ')' | '[' | ']' => TriggerMask::CJK_CONVERTIBLE,
            '\u{2014}' | '\u{201c}' | '\u{201d}' | '\u{2018}' | '\u{2019}' | '\u{2026}' => {
                TriggerMask::CJK_CONVERTIBLE
            }
            '\u{bb}' | '\u{203a}' => TriggerMask::FRENCH_HIGH,
            '\u{ab}' | '\u{2039}' => TriggerMask::OPEN_GUILLEMET,
            _ => TriggerMask::empty(),
        }
    }

    /// True when a rule requiring `required` may match a run with this mask.
    pub fn admits(self, required: TriggerMask) -> bool {
        self.contains(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_collects_classes() {
        let mask = TriggerMask::scan("a: b – «c»");
        assert!(mask.contains(TriggerMask::WHITESPACE | TriggerMask::COLON | TriggerMask::EN_DASH));
        assert!(mask.contains(TriggerMask::OPEN_GUILLEMET | TriggerMask::FRENCH_HIGH));
        assert!(TriggerMask::scan("计算机").is_empty());
    }

    #[test]
    fn literal_masks_are_admitted_by_runs_containing_them() {
        let run = TriggerMask::scan("你好, 世界.");
        assert!(run.admits(TriggerMask::for_literal(",")));
        assert!(run.admits(TriggerMask::empty()));
        assert!(!run.admits(TriggerMask::for_literal("–")));
    }
}
