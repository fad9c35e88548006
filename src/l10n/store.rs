//! The localization store.
//!
//! Entries are grouped by namespace and looked up with `"<namespace>.<key>"`.
//! The store is immutable once built and shared behind an `Arc`.

use super::entry::LocalizationEntry;
use super::loader::{LocaleCatalog, LocaleSource};
use crate::error::L10nError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// All localized strings of the bot.
#[derive(Debug, Clone)]
pub struct LocalizationStore {
    default_locale: String,
    namespaces: HashMap<String, HashMap<String, LocalizationEntry>>,
}

impl LocalizationStore {
    /// An empty store. Mostly useful in tests.
    pub fn empty(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            namespaces: HashMap::new(),
        }
    }

    /// Load every locale from `source`.
    pub fn load(
        default_locale: impl Into<String>,
        source: &dyn LocaleSource,
    ) -> Result<Self, L10nError> {
        let catalog = source.load()?;
        Self::from_catalog(default_locale, catalog)
    }

    /// Build the store from `{locale: {"ns.key": template}}`.
    ///
    /// Fails with `MissingDefault` if some key has no template for the
    /// default locale.
    pub fn from_catalog(
        default_locale: impl Into<String>,
        catalog: LocaleCatalog,
    ) -> Result<Self, L10nError> {
        let default_locale = default_locale.into();

        // key -> locale -> template
        let mut by_key: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (locale, strings) in catalog {
            for (key, template) in strings {
                by_key
                    .entry(key)
                    .or_default()
                    .insert(locale.clone(), template);
            }
        }

        let mut namespaces: HashMap<String, HashMap<String, LocalizationEntry>> = HashMap::new();
        for (key, translations) in by_key {
            let Some((namespace, name)) = split_key(&key) else {
                warn!(key = %key, "Skipping localization key without a namespace");
                continue;
            };
            let entry = LocalizationEntry::new(key.as_str(), default_locale.as_str(), translations)?;
            namespaces
                .entry(namespace.to_owned())
                .or_default()
                .insert(name.to_owned(), entry);
        }

        let store = Self {
            default_locale,
            namespaces,
        };
        info!(
            namespaces = store.namespaces.len(),
            locales = store.locales().len(),
            default_locale = %store.default_locale,
            "Localization store ready"
        );
        Ok(store)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Every locale that has at least one template.
    pub fn locales(&self) -> BTreeSet<String> {
        self.entries()
            .flat_map(|entry| entry.translations().keys().cloned())
            .collect()
    }

    /// Look up an entry by `"<namespace>.<key>"`.
    pub fn entry(&self, key: &str) -> Result<&LocalizationEntry, L10nError> {
        let (namespace, name) = split_key(key).ok_or_else(|| L10nError::NotFound(key.to_owned()))?;
        self.namespaces
            .get(namespace)
            .and_then(|entries| entries.get(name))
            .ok_or_else(|| L10nError::NotFound(key.to_owned()))
    }

    /// Render `key` for `locale`.
    ///
    /// Only an unknown key is an error; a malformed template is logged and
    /// rendered raw.
    pub fn render(&self, key: &str, locale: &str, variables: &[&str]) -> Result<String, L10nError> {
        Ok(self.entry(key)?.render(locale, variables))
    }

    /// Like [`render`](Self::render), but a malformed template is an error too.
    pub fn try_render(
        &self,
        key: &str,
        locale: &str,
        variables: &[&str],
    ) -> Result<String, L10nError> {
        self.entry(key)?.try_render(locale, variables)
    }

    /// Render `key` in every locale it has.
    pub fn render_all(
        &self,
        key: &str,
        variables: &[&str],
    ) -> Result<BTreeMap<String, String>, L10nError> {
        Ok(self.entry(key)?.render_all(variables))
    }

    /// Check every template of every entry, returning all problems found.
    pub fn validate(&self) -> Vec<L10nError> {
        let errors: Vec<L10nError> = self.entries().flat_map(LocalizationEntry::validate).collect();
        debug!(problems = errors.len(), "Validated localization templates");
        errors
    }

    fn entries(&self) -> impl Iterator<Item = &LocalizationEntry> {
        self.namespaces.values().flat_map(HashMap::values)
    }
}

fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once('.')
        .filter(|(namespace, name)| !namespace.is_empty() && !name.is_empty())
}
