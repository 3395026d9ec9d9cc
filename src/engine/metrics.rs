//! Localization run metrics.
//!
//! Counters are cheap and always collected by the walker; only
//! `Localizer::localize_verbose` surfaces them.
//!
//! - `RuleMetrics::skipped` counts runs where the trigger scan ruled the rule
//!   out before its regex ran.
//! - `accepted` / `rejected` count individual matches whose context was (not)
//!   accepted.

use super::substitute::Tally;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run, bidi wrapping included.
    pub total: Duration,
    /// Time spent walking text nodes and applying rules.
    pub walk: Duration,
    /// Whether the rule table came from the session cache.
    pub table_cached: bool,
    pub text_nodes: usize,
    pub escaped_nodes: usize,
    pub rules: Vec<RuleMetrics>,
}

/// Per-rule counters, in table order.
#[derive(Debug, Default, Clone)]
pub struct RuleMetrics {
    pub name: String,
    pub tried: usize,
    pub skipped: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl RuleMetrics {
    pub(crate) fn record(&mut self, tally: Tally) {
        self.tried += 1;
        self.accepted += tally.accepted;
        self.rejected += tally.rejected;
    }
}
