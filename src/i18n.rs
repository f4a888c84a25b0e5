//! One object bundling translation and locale-aware formatting.

use std::path::PathBuf;
use std::sync::Arc;

use taal_core::Locale;
use taal_formatting::{DateFormatter, MoneyFormatter, NumberFormatter};
use taal_translator::{CatalogError, TextDomain, TranslateError, Translator, DEFAULT_PATTERN};

use crate::interpolate::interpolate;

/// Translation engine and formatters behind a single locale switch.
///
/// An [`I18n`] owns a [`Translator`] and the date, number and money
/// formatters, all pinned to the same locale. Changing the locale with
/// [`set_locale`](I18n::set_locale) retargets all of them at once while
/// keeping their configuration, so a per-request locale switch is one
/// call.
///
/// # Example
///
/// ```no_run
/// use taal::{I18n, Locale};
///
/// let mut i18n = I18n::new(Locale::new("nl_NL")?);
/// i18n.add_translation_dir("core", "./i18n/core");
/// i18n.set_text_domain("core");
///
/// let greeting = i18n.translate_with_values("Hello {name}", &[("name", "Jan")]);
/// let price = i18n.money_formatter().format(1299.95);
/// # Ok::<(), taal::LocaleError>(())
/// ```
#[derive(Debug)]
pub struct I18n {
	translator: Translator,
	date_formatter: DateFormatter,
	number_formatter: NumberFormatter,
	money_formatter: MoneyFormatter,
}

impl I18n {
	pub fn new(locale: Locale) -> Self {
		Self {
			translator: Translator::new(locale.clone()),
			date_formatter: DateFormatter::new(locale.clone()),
			number_formatter: NumberFormatter::new(locale.clone()),
			money_formatter: MoneyFormatter::new(locale),
		}
	}

	pub fn locale(&self) -> &Locale {
		self.translator.locale()
	}

	/// Retargets the translator and every formatter to `locale`.
	///
	/// Formatter configuration such as date patterns, the time zone, the
	/// currency symbol and precision is kept.
	pub fn set_locale(&mut self, locale: Locale) {
		self.translator.set_locale(locale.clone());
		self.date_formatter.set_locale(locale.clone());
		self.number_formatter.set_locale(locale.clone());
		self.money_formatter.set_locale(locale);
	}

	pub fn fallback_locale(&self) -> Option<&Locale> {
		self.translator.fallback_locale()
	}

	pub fn set_fallback_locale(&mut self, locale: Option<Locale>) {
		self.translator.set_fallback_locale(locale);
	}

	pub fn text_domain(&self) -> &str {
		self.translator.text_domain()
	}

	pub fn set_text_domain(&mut self, text_domain: impl Into<String>) {
		self.translator.set_text_domain(text_domain);
	}

	/// Registers `base_dir` as a catalog directory for `text_domain`,
	/// expecting one `<locale>.po` file per locale.
	///
	/// Directories registered later take precedence for messages present
	/// in both. Use [`translator_mut`](I18n::translator_mut) to register
	/// a custom file pattern instead.
	pub fn add_translation_dir(
		&mut self,
		text_domain: impl Into<String>,
		base_dir: impl Into<PathBuf>,
	) {
		self.translator
			.add_pattern(base_dir, DEFAULT_PATTERN, text_domain);
	}

	pub fn translator(&self) -> &Translator {
		&self.translator
	}

	pub fn translator_mut(&mut self) -> &mut Translator {
		&mut self.translator
	}

	/// Translates `msgid` in the active text domain and locale.
	pub fn translate(&self, msgid: &str) -> String {
		self.translator.translate(msgid)
	}

	/// Translates `msgid`, overriding the text domain and locale where
	/// given.
	pub fn translate_with(
		&self,
		msgid: &str,
		text_domain: Option<&str>,
		locale: Option<&Locale>,
	) -> String {
		self.translator.translate_with(msgid, text_domain, locale)
	}

	/// Translates a countable message, selecting the plural form for
	/// `count`.
	pub fn translate_plural(
		&self,
		singular: &str,
		plural: &str,
		count: u64,
	) -> Result<String, TranslateError> {
		self.translator.translate_plural(singular, plural, count)
	}

	pub fn translate_plural_with(
		&self,
		singular: &str,
		plural: &str,
		count: u64,
		text_domain: Option<&str>,
		locale: Option<&Locale>,
	) -> Result<String, TranslateError> {
		self.translator
			.translate_plural_with(singular, plural, count, text_domain, locale)
	}

	/// Translates `msgid` and substitutes `{name}` placeholders.
	pub fn translate_with_values(&self, msgid: &str, values: &[(&str, &str)]) -> String {
		interpolate(&self.translator.translate(msgid), values)
	}

	/// Translates a countable message and substitutes placeholders.
	///
	/// Besides the entries in `values`, the placeholder `{count}` is
	/// bound to `count`, so templates like `"{count} files"` need no
	/// explicit value.
	pub fn translate_plural_with_values(
		&self,
		singular: &str,
		plural: &str,
		count: u64,
		values: &[(&str, &str)],
	) -> Result<String, TranslateError> {
		let template = self.translator.translate_plural(singular, plural, count)?;
		let rendered_count = count.to_string();
		let mut args: Vec<(&str, &str)> = Vec::with_capacity(values.len() + 1);
		args.push(("count", &rendered_count));
		args.extend_from_slice(values);
		Ok(interpolate(&template, &args))
	}

	/// Picks the best entry from a list of `(locale, text)` pairs.
	///
	/// The active locale is tried first, then its bare language, then
	/// the fallback locale the same way. An exact match beats a language
	/// match; within one step the first listed entry wins. Returns
	/// `None` when nothing fits.
	pub fn translate_list<'a>(&self, entries: &[(&'a str, &'a str)]) -> Option<&'a str> {
		if let Some(text) = pick(entries, self.translator.locale()) {
			return Some(text);
		}
		self.translator
			.fallback_locale()
			.and_then(|fallback| pick(entries, fallback))
	}

	/// Loads every catalog registered for the active text domain and
	/// locale, reporting the first file that fails to load.
	pub fn preload(&self) -> Result<(), CatalogError> {
		self.translator.preload(None, None)
	}

	/// The loaded catalog for the active text domain and locale.
	pub fn catalog(&self) -> Arc<TextDomain> {
		self.translator.catalog(None, None)
	}

	pub fn date_formatter(&self) -> &DateFormatter {
		&self.date_formatter
	}

	pub fn date_formatter_mut(&mut self) -> &mut DateFormatter {
		&mut self.date_formatter
	}

	pub fn number_formatter(&self) -> &NumberFormatter {
		&self.number_formatter
	}

	pub fn number_formatter_mut(&mut self) -> &mut NumberFormatter {
		&mut self.number_formatter
	}

	pub fn money_formatter(&self) -> &MoneyFormatter {
		&self.money_formatter
	}

	pub fn money_formatter_mut(&mut self) -> &mut MoneyFormatter {
		&mut self.money_formatter
	}
}

impl Default for I18n {
	/// An instance in the "C" locale: translation is the identity and
	/// formatting uses POSIX conventions.
	fn default() -> Self {
		Self::new(Locale::c())
	}
}

fn pick<'a>(entries: &[(&'a str, &'a str)], locale: &Locale) -> Option<&'a str> {
	if let Some((_, text)) = entries.iter().find(|(id, _)| *id == locale.as_str()) {
		return Some(*text);
	}
	let language = locale.language();
	entries
		.iter()
		.find(|(id, _)| id.split(['-', '_']).next() == Some(language.as_str()))
		.map(|(_, text)| *text)
}
