//! # Taal Translator
//!
//! Gettext-style message translation with lazily loaded `.po` catalogs.
//!
//! The [`Translator`] resolves messages against catalogs keyed by
//! (text domain, locale). Catalogs come from registered filename
//! patterns and are loaded at most once per key; a missing catalog file
//! is not an error, and an untranslated message resolves to the message
//! itself, so [`Translator::translate`] always produces a usable string.
//!
//! ```no_run
//! use taal_core::Locale;
//! use taal_translator::Translator;
//!
//! let mut translator = Translator::new(Locale::new("nl_NL")?);
//! translator.add_pattern("./i18n", "{locale}.po", "default");
//! translator.set_fallback_locale(Some(Locale::new("en_US")?));
//!
//! assert_eq!(translator.translate("Yes"), "Ja");
//! # Ok::<(), taal_core::LocaleError>(())
//! ```

pub mod cache;
pub mod gettext;
pub mod plural;
pub mod text_domain;
pub mod translator;

pub use cache::CatalogCache;
pub use gettext::{CatalogError, load_po, parse_po};
pub use plural::{PluralRule, PluralRuleError};
pub use text_domain::{TextDomain, Translation};
pub use translator::{
	DEFAULT_PATTERN, DEFAULT_TEXT_DOMAIN, LOCALE_PLACEHOLDER, TranslateError, Translator,
};
