//! Localization engine.
//!
//! The engine is split into focused submodules under `src/engine/`:
//!
//! ```text
//! labels ──▶ rules::{cjk,french}::get ──▶ RuleTable        (compiled_rules.rs)
//!                                              │  cached per TableKey
//!                                              v
//! fragment ──▶ Fragment::parse ──▶ text nodes + context cache   (fragment.rs, walker.rs)
//!                                              │
//!                  per node, per rule:  TriggerMask gate          (trigger.rs)
//!                                       substitute(text, l, r)    (substitute.rs)
//!                                              │
//!                                              v
//!                                   Fragment::serialize ──▶ String
//! ```
//!
//! ## Responsibilities by module
//!
//! - `substitute.rs`: the context-aware substitution primitive; knows nothing
//!   about markup or languages.
//! - `compiled_rules.rs`: `RuleTable` (an ordered, precompiled rule list) and
//!   the compute-once table cache.
//! - `trigger.rs`: a per-run character-class scan that lets rules which
//!   cannot match be skipped.
//! - `fragment.rs`: the inline-markup tokenizer/serializer and escape regions.
//! - `walker.rs`: glues the above together over the text nodes of a fragment.
//! - `metrics.rs`: counters surfaced by `Localizer::localize_verbose`.
//!
//! ## Debugging
//!
//! Table builds are logged at `debug` and node rewrites at `trace` level under
//! the `textloc::engine` / `textloc::walker` targets.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/fragment.rs"]
mod fragment;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/substitute.rs"]
mod substitute;
#[path = "engine/trigger.rs"]
mod trigger;
#[path = "engine/walker.rs"]
mod walker;

pub(crate) use compiled_rules::TableCache;
pub use compiled_rules::{RuleTable, ScriptFamily, TableKey};
pub use fragment::ESCAPE_TAG;
pub(crate) use metrics::RunMetrics;
pub use substitute::substitute;
pub use trigger::TriggerMask;
pub(crate) use walker::{strip_escape_markers, walk};
