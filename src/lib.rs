//! # Taal
//!
//! Message translation and locale-aware formatting for applications that
//! speak more than one language.
//!
//! Taal bundles a gettext-style translation engine with date, number and
//! money formatters, all pinned to one [`Locale`]:
//!
//! - **Translation**: PO catalogs on disk, loaded lazily per
//!   (text domain, locale) pair and cached for the process lifetime.
//!   Plural forms follow each catalog's `Plural-Forms` header. A missing
//!   translation falls back to one configured fallback locale and then
//!   to the message itself, so rendering never fails.
//! - **Formatting**: dates and times with localized names and time zone
//!   conversion, numbers and monetary amounts with the locale's digit
//!   grouping and decimal mark.
//! - **Configuration**: an `[i18n]` TOML table builds a ready-to-use
//!   [`I18n`] instance.
//!
//! ## Feature Flags
//!
//! ### Presets
//!
//! - `full` (default) - Everything below
//! - `minimal` - The instance-based API only
//!
//! ### Fine-grained Control
//!
//! - `shortcuts` - Process-global `t()`/`tn()` convenience functions
//!   behind a shared instance
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use taal::{DateStyle, I18nConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let i18n = I18nConfig::from_file("app.toml")?.build()?;
//!
//! // "Hallo Jan" once nl_NL catalogs carry the message
//! let greeting = i18n.translate_with_values("Hello {name}", &[("name", "Jan")]);
//!
//! // "€ 1.299,95" under nl_NL with a configured euro symbol
//! let price = i18n.money_formatter().format(1299.95);
//!
//! // "12 mei 2017" style output in the configured time zone
//! let stamp = i18n.date_formatter().format(1494627300, DateStyle::DateTime)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod i18n;
pub mod interpolate;
#[cfg(feature = "shortcuts")]
pub mod shortcuts;

// Re-export the member crates
pub use taal_core;
pub use taal_formatting;
pub use taal_translator;

// Re-export the locale type
pub use taal_core::{Locale, LocaleError};

// Re-export the translation engine
pub use taal_translator::{
	CatalogCache, CatalogError, PluralRule, PluralRuleError, TextDomain, TranslateError,
	Translation, Translator, DEFAULT_PATTERN, DEFAULT_TEXT_DOMAIN, LOCALE_PLACEHOLDER,
};

// Re-export the formatters
pub use taal_formatting::{
	DateFormatter, DateInput, DateStyle, FormatError, MoneyFormatter, NumberFormatter,
};

// Re-export the facade types
pub use config::{ConfigError, DomainConfig, FormattingConfig, I18nConfig, I18nSection};
pub use i18n::I18n;
pub use interpolate::interpolate;

/// Commonly used imports, in one line.
pub mod prelude {
	pub use taal_core::Locale;
	pub use taal_formatting::DateStyle;

	pub use crate::config::I18nConfig;
	pub use crate::i18n::I18n;
	pub use crate::interpolate::interpolate;

	#[cfg(feature = "shortcuts")]
	pub use crate::shortcuts::{t, td, tdn, tl, tn, tv};
}
