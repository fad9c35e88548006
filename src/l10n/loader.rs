//! Locale data sources.
//!
//! A source produces a [`LocaleCatalog`]: for each locale, a flat map of
//! `"<namespace>.<key>"` to template. Sources run once at startup.

use crate::error::L10nError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `{locale: {"ns.key": template}}`
pub type LocaleCatalog = BTreeMap<String, BTreeMap<String, String>>;

/// Supplies locale data.
pub trait LocaleSource: Send + Sync {
    fn load(&self) -> Result<LocaleCatalog, L10nError>;
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    catalog: LocaleCatalog,
}

impl StaticSource {
    pub fn new(catalog: LocaleCatalog) -> Self {
        Self { catalog }
    }

    /// Add one template. Chainable.
    pub fn with(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.catalog
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
        self
    }
}

impl LocaleSource for StaticSource {
    fn load(&self) -> Result<LocaleCatalog, L10nError> {
        Ok(self.catalog.clone())
    }
}

/// Reads `<root>/<locale>/<namespace>.json`.
///
/// Each file holds a flat JSON object of key to template; its keys are
/// prefixed with the file stem to form `namespace.key`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn load_locale(&self, dir: &Path) -> Result<BTreeMap<String, String>, L10nError> {
        let mut strings = BTreeMap::new();

        for file in read_dir(dir)? {
            let is_json = file.extension().is_some_and(|ext| ext == "json");
            let Some(namespace) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_json || !file.is_file() {
                continue;
            }

            let raw = std::fs::read_to_string(&file).map_err(|e| load_error(&file, e))?;
            let entries: BTreeMap<String, String> =
                serde_json::from_str(&raw).map_err(|e| load_error(&file, e))?;

            debug!(file = %file.display(), entries = entries.len(), "Loaded locale file");
            for (key, template) in entries {
                strings.insert(format!("{namespace}.{key}"), template);
            }
        }

        Ok(strings)
    }
}

impl LocaleSource for DirectorySource {
    fn load(&self) -> Result<LocaleCatalog, L10nError> {
        let mut catalog = LocaleCatalog::new();

        for dir in read_dir(&self.root)? {
            if !dir.is_dir() {
                continue;
            }
            let Some(locale) = dir.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let strings = self.load_locale(&dir)?;
            catalog.insert(locale.to_owned(), strings);
        }

        Ok(catalog)
    }
}

/// Directory entries, sorted so load order is stable.
fn read_dir(dir: &Path) -> Result<Vec<PathBuf>, L10nError> {
    let mut paths = std::fs::read_dir(dir)
        .map_err(|e| load_error(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| load_error(dir, e))?;
    paths.sort();
    Ok(paths)
}

fn load_error(path: &Path, err: impl std::fmt::Display) -> L10nError {
    L10nError::Load {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
