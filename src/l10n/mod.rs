//! Localized strings.
//!
//! - [`plural`]: plural rules selected by locale
//! - [`template`]: the `{N}` / `${N|a|b}` template syntax
//! - [`entry`]: one key with its per-locale templates and fallback
//! - [`store`]: the namespaced store handlers render from
//! - [`loader`]: where locale data comes from

pub mod entry;
pub mod loader;
pub mod plural;
pub mod store;
pub mod template;

pub use entry::LocalizationEntry;
pub use loader::{DirectorySource, LocaleCatalog, LocaleSource, StaticSource};
pub use plural::PluralRule;
pub use store::LocalizationStore;
