//! Process-global shortcuts for applications with one [`I18n`].
//!
//! The core API is instance-based; this module is the thin global
//! adapter on top for code bases where threading an [`I18n`] handle
//! through every call site is not worth it. Install an instance once at
//! startup:
//!
//! ```no_run
//! use std::sync::Arc;
//! use taal::shortcuts::{set_instance, t};
//! use taal::{I18n, Locale};
//!
//! let mut i18n = I18n::new(Locale::new("nl_NL")?);
//! i18n.add_translation_dir("default", "./i18n");
//! set_instance(Arc::new(i18n));
//!
//! assert_eq!(t("Yes"), "Ja");
//! # Ok::<(), taal::LocaleError>(())
//! ```
//!
//! Every shortcut degrades gracefully when no instance is installed:
//! lookups return their argument and formatting falls back to plain
//! `format!` output. Rendering never breaks because localization is not
//! set up yet.
//!
//! The installed instance is read-only. To change the locale or the
//! text domain at runtime, build a new [`I18n`] and install it with
//! [`set_instance`] again.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use taal_translator::TranslateError;

use crate::i18n::I18n;
use crate::interpolate::interpolate;

static INSTANCE: Lazy<RwLock<Option<Arc<I18n>>>> = Lazy::new(|| RwLock::new(None));

/// Installs the process-wide instance used by all shortcuts.
pub fn set_instance(i18n: impl Into<Arc<I18n>>) {
	*INSTANCE.write() = Some(i18n.into());
}

/// The installed instance, if any.
pub fn instance() -> Option<Arc<I18n>> {
	INSTANCE.read().clone()
}

/// Uninstalls the process-wide instance. Mostly useful in tests.
pub fn clear_instance() {
	*INSTANCE.write() = None;
}

/// Translates `msgid` in the active text domain and locale.
pub fn t(msgid: &str) -> String {
	match instance() {
		Some(i18n) => i18n.translate(msgid),
		None => msgid.to_string(),
	}
}

/// Translates `msgid` in the given text domain.
pub fn td(msgid: &str, text_domain: &str) -> String {
	match instance() {
		Some(i18n) => i18n.translate_with(msgid, Some(text_domain), None),
		None => msgid.to_string(),
	}
}

/// Translates a countable message, selecting the plural form for
/// `count`.
pub fn tn(singular: &str, plural: &str, count: u64) -> Result<String, TranslateError> {
	match instance() {
		Some(i18n) => i18n.translate_plural(singular, plural, count),
		None => Ok(select(singular, plural, count)),
	}
}

/// Translates a countable message in the given text domain.
pub fn tdn(
	singular: &str,
	plural: &str,
	count: u64,
	text_domain: &str,
) -> Result<String, TranslateError> {
	match instance() {
		Some(i18n) => i18n.translate_plural_with(singular, plural, count, Some(text_domain), None),
		None => Ok(select(singular, plural, count)),
	}
}

/// Translates `msgid` and substitutes `{name}` placeholders.
pub fn tv(msgid: &str, values: &[(&str, &str)]) -> String {
	match instance() {
		Some(i18n) => i18n.translate_with_values(msgid, values),
		None => interpolate(msgid, values),
	}
}

/// Picks the best entry from a list of `(locale, text)` pairs.
pub fn tl<'a>(entries: &[(&'a str, &'a str)]) -> Option<&'a str> {
	instance().and_then(|i18n| i18n.translate_list(entries))
}

/// Formats a number with the locale's digit grouping and decimal mark.
pub fn localize_number(value: f64, decimals: usize) -> String {
	match instance() {
		Some(i18n) => i18n.number_formatter().format_with_decimals(value, decimals),
		None => format!("{value:.decimals$}"),
	}
}

/// Formats a monetary amount with the configured currency symbol.
/// Without an instance the bare amount is returned.
pub fn localize_money(value: f64) -> String {
	match instance() {
		Some(i18n) => i18n.money_formatter().format(value),
		None => format!("{value:.2}"),
	}
}

fn select(singular: &str, plural: &str, count: u64) -> String {
	if count == 1 { singular } else { plural }.to_string()
}
