//! A single translatable string and its per-locale templates.

use super::plural::PluralRule;
use super::template;
use crate::error::L10nError;
use std::collections::BTreeMap;
use tracing::warn;

/// One localization key with its templates.
///
/// The default locale is always present. Rendering a locale that has no
/// template, or whose template is byte-identical to the default one, falls
/// back to the default locale.
#[derive(Debug, Clone)]
pub struct LocalizationEntry {
    key: String,
    default_locale: String,
    translations: BTreeMap<String, String>,
}

impl LocalizationEntry {
    /// Build an entry, failing if `translations` lacks `default_locale`.
    pub fn new(
        key: impl Into<String>,
        default_locale: impl Into<String>,
        translations: BTreeMap<String, String>,
    ) -> Result<Self, L10nError> {
        let key = key.into();
        let default_locale = default_locale.into();

        if !translations.contains_key(&default_locale) {
            return Err(L10nError::MissingDefault {
                key,
                locale: default_locale,
            });
        }

        Ok(Self {
            key,
            default_locale,
            translations,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// All configured templates, keyed by locale.
    pub fn translations(&self) -> &BTreeMap<String, String> {
        &self.translations
    }

    /// Add or replace a template. Used while assembling the store.
    pub fn add_translation(&mut self, locale: impl Into<String>, template: impl Into<String>) {
        self.translations.insert(locale.into(), template.into());
    }

    /// The locale whose template is actually rendered for `locale`.
    pub fn resolve_locale<'a>(&'a self, locale: &'a str) -> &'a str {
        let default = self.default_template();
        match self.translations.get(locale) {
            Some(template) if template != default => locale,
            _ => &self.default_locale,
        }
    }

    /// Render for `locale`, surfacing malformed plural placeholders.
    pub fn try_render(&self, locale: &str, variables: &[&str]) -> Result<String, L10nError> {
        let resolved = self.resolve_locale(locale);
        let template = self.template(resolved);

        template::render(template, PluralRule::for_locale(resolved), variables).map_err(|err| {
            L10nError::MalformedTemplate {
                key: self.key.clone(),
                locale: resolved.to_owned(),
                expected: err.expected,
                found: err.found,
            }
        })
    }

    /// Render for `locale`. A malformed template is logged and returned raw.
    pub fn render(&self, locale: &str, variables: &[&str]) -> String {
        match self.try_render(locale, variables) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!(key = %self.key, error = %err, "Malformed localization template");
                self.template(self.resolve_locale(locale)).to_owned()
            }
        }
    }

    /// Render every configured locale.
    pub fn render_all(&self, variables: &[&str]) -> BTreeMap<String, String> {
        self.translations
            .keys()
            .map(|locale| (locale.clone(), self.render(locale, variables)))
            .collect()
    }

    /// Every malformed plural placeholder across the locales that render.
    ///
    /// A locale that falls back to the default template is checked only as
    /// the default.
    pub fn validate(&self) -> Vec<L10nError> {
        self.translations
            .iter()
            .filter(|(locale, _)| self.resolve_locale(locale) == locale.as_str())
            .filter_map(|(locale, template)| {
                template::check(template, PluralRule::for_locale(locale))
                    .err()
                    .map(|err| L10nError::MalformedTemplate {
                        key: self.key.clone(),
                        locale: locale.clone(),
                        expected: err.expected,
                        found: err.found,
                    })
            })
            .collect()
    }

    fn default_template(&self) -> &str {
        self.template(&self.default_locale)
    }

    fn template(&self, locale: &str) -> &str {
        self.translations
            .get(locale)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
