//! Rule tables and their cache.
//!
//! A [`RuleTable`] is the ordered list of [`RuleEntry`]s for one
//! `(family, script, options)` combination, with every pattern compiled up
//! front. Tables are built once per [`TableKey`], published as `Arc`s and
//! never mutated afterwards, so lookups after the first build only take a
//! read lock.
//!
//! ```text
//! TableKey ──read lock──▶ hit ──▶ Arc<RuleTable>
//!          └─miss──▶ write lock ──▶ re-check ──▶ build ──▶ insert ──▶ Arc<RuleTable>
//! ```
//!
//! ## Invariants
//!
//! - Entries are applied in table order; each sees the previous entries'
//!   output on the same run.
//! - A cached table is only valid for the labels it was built from; the
//!   session clears the cache whenever its labels change.

use crate::RuleEntry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Which rule family a language uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptFamily {
    Cjk,
    French,
    /// No punctuation or spacing rules.
    Plain,
}

impl ScriptFamily {
    pub fn of_language(lang: &str) -> Self {
        match lang {
            "zh" | "ja" | "ko" => ScriptFamily::Cjk,
            "fr" => ScriptFamily::French,
            _ => ScriptFamily::Plain,
        }
    }
}

/// Cache key for a rule table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub family: ScriptFamily,
    pub script: String,
    pub proportional: bool,
    /// Only meaningful for the French family.
    pub locale: Option<String>,
}

/// Compiled, immutable rule set.
#[derive(Debug)]
pub struct RuleTable {
    pub key: TableKey,
    pub entries: Vec<RuleEntry>,
}

impl RuleTable {
    pub fn new(key: TableKey, entries: Vec<RuleEntry>) -> Self {
        RuleTable { key, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute-once cache of rule tables.
#[derive(Debug, Default)]
pub(crate) struct TableCache {
    tables: RwLock<HashMap<TableKey, Arc<RuleTable>>>,
}

impl TableCache {
    /// Return the cached table for `key`, building it with `build` on first
    /// use. The flag is `true` when the table was already cached.
    pub fn get_or_build(&self, key: &TableKey, build: impl FnOnce(&TableKey) -> RuleTable) -> (Arc<RuleTable>, bool) {
        {
            let tables = self.tables.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(table) = tables.get(key) {
                return (Arc::clone(table), true);
            }
        }

        let mut tables = self.tables.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(table) = tables.get(key) {
            return (Arc::clone(table), true);
        }
        let table = Arc::new(build(key));
        tracing::debug!(target: "textloc::engine", ?key, rules = table.entries.len(), "built rule table");
        tables.insert(key.clone(), Arc::clone(&table));
        (table, false)
    }

    pub fn clear(&mut self) {
        self.tables.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}
