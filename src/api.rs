use crate::engine::{self, RunMetrics, ScriptFamily, TableCache, TableKey};
use crate::error::{Error, Result};
use crate::grammar::{self, EnglishRbnf, Features, NumberFormatter};
use crate::labels::{self, LabelTree, WellKnownLabel};
use crate::rules;
use crate::{bidi_wrap, default_script, resolve_self_references};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Overrides the session locale (French colon spacing: `FR`, `CH`).
    pub locale: Option<String>,
    /// Text assumed to precede the fragment.
    pub prev: Option<String>,
    /// Text assumed to follow the fragment.
    pub foll: Option<String>,
    /// Only convert CJK punctuation that borders CJK text, instead of all of
    /// it.
    pub proportional_mixed_cjk: bool,
}

/// Per-rule counters returned by [`Localizer::localize_verbose`].
#[derive(Debug, Clone)]
pub struct RuleSummary {
    pub name: String,
    /// Text nodes the rule ran over.
    pub tried: usize,
    /// Text nodes skipped because they could not contain a match.
    pub skipped: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Result from [`Localizer::localize_verbose`].
#[derive(Debug, Clone)]
pub struct LocalizeResult {
    pub text: String,
    pub family: ScriptFamily,
    /// Total elapsed time.
    pub elapsed: Duration,
    /// Time spent applying rules to text nodes.
    pub walk: Duration,
    /// Whether the rule table was already cached in the session.
    pub table_cached: bool,
    pub text_nodes: usize,
    pub escaped_nodes: usize,
    pub rules: Vec<RuleSummary>,
}

/// A localization session: one language/script/locale plus its labels.
///
/// The session owns its labels and a cache of compiled rule tables. Tables
/// are built on first use and shared by every later call; changing a label
/// through [`set`](Self::set) drops them.
///
/// # Example
/// ```
/// use textloc::{Localizer, Options};
///
/// let fr = Localizer::with_defaults("fr", None).unwrap().with_locale("CH");
/// assert_eq!(fr.l10n("Note: voir"), "Note\u{202F}: voir");
///
/// let en = Localizer::with_defaults("en", None).unwrap();
/// assert_eq!(en.boolean_conj(&["a", "b", "c"], "and"), "a, b, and c");
/// ```
pub struct Localizer {
    lang: String,
    script: String,
    locale: Option<String>,
    labels: LabelTree,
    tables: TableCache,
    formatter: Arc<dyn NumberFormatter + Send + Sync>,
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("lang", &self.lang)
            .field("script", &self.script)
            .field("locale", &self.locale)
            .field("cached_tables", &self.tables.len())
            .finish_non_exhaustive()
    }
}

impl Localizer {
    /// Start a session over already-loaded `labels`.
    ///
    /// String leaves are NFC-normalised and entity-decoded, `#{self...}`
    /// references are resolved, and `language` / `script` labels are set.
    /// `script` defaults from the language.
    pub fn new(lang: &str, script: Option<&str>, labels: LabelTree) -> Result<Self> {
        let script = script.map_or_else(|| default_script(lang).to_string(), str::to_string);
        let mut labels = resolve_self_references(labels.normalise())?;
        if !labels.insert("language", LabelTree::from(lang)) {
            return Err(Error::InvalidLabels("top-level labels must be a mapping".to_string()));
        }
        labels.insert("script", LabelTree::from(script.as_str()));
        tracing::debug!(target: "textloc::api", %lang, %script, "created localization session");

        Ok(Localizer {
            lang: lang.to_string(),
            script,
            locale: None,
            labels,
            tables: TableCache::default(),
            formatter: Arc::new(EnglishRbnf),
        })
    }

    /// Start a session with the built-in labels for `lang` (English when the
    /// language has no built-in set).
    pub fn with_defaults(lang: &str, script: Option<&str>) -> Result<Self> {
        Localizer::new(lang, script, labels::defaults::builtin(lang, script)?)
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Replace the number formatting backend used by
    /// [`inflect_ordinal`](Self::inflect_ordinal).
    pub fn with_formatter(mut self, formatter: impl NumberFormatter + Send + Sync + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    // --- Localization ---------------------------------------------------------

    /// Localize `fragment` as text in `lang`/`script`, embedded in this
    /// session's language.
    ///
    /// Never fails: text the rules do not apply to comes back unchanged
    /// (minus escape markers).
    pub fn localize(&self, fragment: &str, lang: &str, script: Option<&str>, options: &Options) -> String {
        let mut metrics = RunMetrics::default();
        self.run(fragment, lang, script, options, &mut metrics).0
    }

    /// Localize `fragment` in the session's own language and script.
    pub fn l10n(&self, fragment: &str) -> String {
        self.localize(fragment, &self.lang, Some(self.script.as_str()), &Options::default())
    }

    /// Like [`localize`](Self::localize), with timing and per-rule counters.
    pub fn localize_verbose(
        &self,
        fragment: &str,
        lang: &str,
        script: Option<&str>,
        options: &Options,
    ) -> LocalizeResult {
        let mut metrics = RunMetrics::default();
        let (text, family) = self.run(fragment, lang, script, options, &mut metrics);

        LocalizeResult {
            text,
            family,
            elapsed: metrics.total,
            walk: metrics.walk,
            table_cached: metrics.table_cached,
            text_nodes: metrics.text_nodes,
            escaped_nodes: metrics.escaped_nodes,
            rules: metrics
                .rules
                .into_iter()
                .map(|r| RuleSummary {
                    name: r.name,
                    tried: r.tried,
                    skipped: r.skipped,
                    accepted: r.accepted,
                    rejected: r.rejected,
                })
                .collect(),
        }
    }

    fn run(
        &self,
        fragment: &str,
        lang: &str,
        script: Option<&str>,
        options: &Options,
        metrics: &mut RunMetrics,
    ) -> (String, ScriptFamily) {
        let start = Instant::now();
        let script = script.unwrap_or_else(|| default_script(lang));
        let family = ScriptFamily::of_language(lang);

        let key = match family {
            ScriptFamily::Cjk => Some(TableKey {
                family,
                script: script.to_string(),
                proportional: options.proportional_mixed_cjk,
                locale: None,
            }),
            ScriptFamily::French => {
                let locale = options.locale.as_deref().or(self.locale.as_deref()).unwrap_or("FR");
                Some(TableKey {
                    family,
                    script: script.to_string(),
                    proportional: false,
                    locale: Some(locale.to_string()),
                })
            }
            ScriptFamily::Plain => None,
        };

        let walk_start = Instant::now();
        let text = match key {
            Some(key) => {
                let (table, cached) = self.tables.get_or_build(&key, |key| self.build_table(key));
                metrics.table_cached = cached;
                engine::walk(fragment, &table, options.prev.as_deref(), options.foll.as_deref(), metrics)
            }
            None => engine::strip_escape_markers(fragment),
        };
        metrics.walk = walk_start.elapsed();

        let text = bidi_wrap(&text, script, &self.script);
        metrics.total = start.elapsed();
        (text, family)
    }

    fn build_table(&self, key: &TableKey) -> engine::RuleTable {
        let entries = match key.family {
            ScriptFamily::Cjk => rules::cjk::get(&self.labels, key.proportional),
            ScriptFamily::French => rules::french::get(key.locale.as_deref().unwrap_or("FR")),
            ScriptFamily::Plain => Vec::new(),
        };
        engine::RuleTable::new(key.clone(), entries)
    }

    // --- Labels ---------------------------------------------------------------

    /// Label at `path` (mapping keys and sequence indices).
    pub fn label(&self, path: &[&str]) -> Option<&LabelTree> {
        self.labels.dig(path)
    }

    pub fn label_str(&self, path: &[&str]) -> Option<&str> {
        self.labels.dig_str(path)
    }

    pub fn well_known(&self, label: WellKnownLabel) -> Option<&LabelTree> {
        self.labels.dig(label.path())
    }

    /// The whole (resolved) label tree.
    pub fn get(&self) -> &LabelTree {
        &self.labels
    }

    /// Set a top-level label. Cached rule tables are dropped, since they may
    /// have been built from the old value.
    pub fn set(&mut self, key: impl Into<String>, value: LabelTree) {
        let key = key.into();
        tracing::debug!(target: "textloc::api", %key, "label changed, clearing rule tables");
        self.labels.insert(key, value);
        self.tables.clear();
    }

    // --- Grammar --------------------------------------------------------------

    /// Inflected form of `word` from the `inflection` labels.
    pub fn inflect(&self, word: &str, features: &Features) -> String {
        grammar::inflect(&self.labels, word, features)
    }

    /// `number` as an ordinal, using the rule label the session's labels give
    /// for `rule_set` (`SpelloutRules`, `OrdinalRules`) and the grammatical
    /// features of `term`.
    pub fn inflect_ordinal(&self, number: i64, term: &Features, rule_set: &str) -> String {
        let label = grammar::ordinal_label(&self.labels, term, rule_set);
        let locale = grammar::rbnf_locale(&self.lang, &self.script);
        grammar::format_ordinal(self.formatter.as_ref(), &locale, number, rule_set, label.as_deref())
    }

    /// Join `items` with the `binary_<connector>` / `multiple_<connector>`
    /// templates.
    pub fn boolean_conj<S: AsRef<str>>(&self, items: &[S], connector: &str) -> String {
        let comma = grammar::enum_comma(&self.script);
        match items {
            [] => String::new(),
            [only] => only.as_ref().to_string(),
            [first, second] => match self.labels.dig_str(&[format!("binary_{connector}").as_str()]) {
                Some(template) => grammar::fill_template(template, first.as_ref(), second.as_ref()),
                None => join(items, comma),
            },
            [init @ .., last] => match self.labels.dig_str(&[format!("multiple_{connector}").as_str()]) {
                Some(template) => grammar::fill_template(template, &self.l10n(&join(init, comma)), last.as_ref()),
                None => join(items, comma),
            },
        }
    }

    /// See [`cjk_extend`](crate::cjk_extend).
    pub fn cjk_extend(&self, title: &str) -> String {
        grammar::cjk_extend(title)
    }
}

fn join<S: AsRef<str>>(items: &[S], separator: &str) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(separator)
}
