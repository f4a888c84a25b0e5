//! The translator
//!
//! Resolves messages against lazily loaded catalogs. Lookup order for a
//! (text domain, locale) pair: the exact catalog first, then a single
//! hop to the configured fallback locale, then the message itself.
//! Untranslated messages are never errors; they surface as structured
//! debug events and the caller gets a usable string either way.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use taal_core::Locale;
use tracing::{debug, warn};

use crate::cache::CatalogCache;
use crate::gettext::{self, CatalogError};
use crate::text_domain::TextDomain;

/// Text domain used when none is configured.
pub const DEFAULT_TEXT_DOMAIN: &str = "default";

/// Placeholder substituted with the locale identifier when a registered
/// pattern is resolved to a candidate file.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Conventional catalog filename pattern.
pub const DEFAULT_PATTERN: &str = "{locale}.po";

/// Errors raised by plural translation.
///
/// Only catalog data problems surface here; lookup misses resolve to the
/// caller's own singular/plural strings instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
	/// The catalog's plural rule selected a variant the entry does not
	/// carry.
	#[error("Plural index {index} out of range for {msgid:?} ({available} variants available)")]
	PluralIndexOutOfRange {
		msgid: String,
		index: usize,
		available: usize,
	},
}

/// A registered catalog source. `base_dir/pattern`, with
/// [`LOCALE_PLACEHOLDER`] substituted, names the candidate file for a
/// locale.
#[derive(Debug, Clone)]
struct MessagePattern {
	base_dir: PathBuf,
	pattern: String,
}

/// Message translator with per-(text domain, locale) catalogs.
///
/// Configuration happens through plain setters before the instance is
/// shared; translation itself takes `&self` and is safe to call from
/// many threads at once.
#[derive(Debug)]
pub struct Translator {
	locale: Locale,
	fallback_locale: Option<Locale>,
	text_domain: String,
	patterns: HashMap<String, Vec<MessagePattern>>,
	cache: CatalogCache,
}

impl Translator {
	pub fn new(locale: Locale) -> Self {
		Self {
			locale,
			fallback_locale: None,
			text_domain: DEFAULT_TEXT_DOMAIN.to_string(),
			patterns: HashMap::new(),
			cache: CatalogCache::new(),
		}
	}

	pub fn locale(&self) -> &Locale {
		&self.locale
	}

	pub fn set_locale(&mut self, locale: Locale) {
		self.locale = locale;
	}

	pub fn fallback_locale(&self) -> Option<&Locale> {
		self.fallback_locale.as_ref()
	}

	/// Configures the locale consulted after a miss, or disables the
	/// fallback hop with `None`.
	pub fn set_fallback_locale(&mut self, locale: Option<Locale>) {
		self.fallback_locale = locale;
	}

	pub fn text_domain(&self) -> &str {
		&self.text_domain
	}

	pub fn set_text_domain(&mut self, text_domain: impl Into<String>) {
		self.text_domain = text_domain.into();
	}

	/// Registers a catalog source for a text domain.
	///
	/// `pattern` is a filename relative to `base_dir` containing the
	/// [`LOCALE_PLACEHOLDER`] slot, e.g. `"{locale}.po"` or
	/// `"{locale}/messages.po"`. Registration never touches the
	/// filesystem; candidate files are probed on the first lookup for
	/// each (text domain, locale) pair, and sources registered earlier
	/// are merged first (so later ones win on conflicts).
	pub fn add_pattern(
		&mut self,
		base_dir: impl Into<PathBuf>,
		pattern: impl Into<String>,
		text_domain: impl Into<String>,
	) {
		// Re-collecting drops trailing separators from the directory.
		let base_dir: PathBuf = base_dir.into().components().collect();
		self.patterns
			.entry(text_domain.into())
			.or_default()
			.push(MessagePattern {
				base_dir,
				pattern: pattern.into(),
			});
	}

	/// Translates a message with the configured text domain and locale.
	///
	/// Never fails: an untranslated message resolves to itself.
	pub fn translate(&self, msgid: &str) -> String {
		self.translate_with(msgid, None, None)
	}

	/// Translates a message, overriding the text domain and/or locale.
	pub fn translate_with(
		&self,
		msgid: &str,
		text_domain: Option<&str>,
		locale: Option<&Locale>,
	) -> String {
		let text_domain = text_domain.unwrap_or(&self.text_domain);
		let locale = locale.unwrap_or(&self.locale);
		self.lookup(msgid, text_domain, locale)
	}

	/// Translates a count-dependent message with the configured text
	/// domain and locale.
	///
	/// On a miss the caller's own strings are used (`singular` when
	/// `count == 1`, `plural` otherwise). The only error is a catalog
	/// whose plural rule selects a variant the entry does not carry.
	pub fn translate_plural(
		&self,
		singular: &str,
		plural: &str,
		count: u64,
	) -> Result<String, TranslateError> {
		self.translate_plural_with(singular, plural, count, None, None)
	}

	/// Plural translation with text domain and/or locale overrides.
	pub fn translate_plural_with(
		&self,
		singular: &str,
		plural: &str,
		count: u64,
		text_domain: Option<&str>,
		locale: Option<&Locale>,
	) -> Result<String, TranslateError> {
		let text_domain = text_domain.unwrap_or(&self.text_domain);
		let locale = locale.unwrap_or(&self.locale);
		self.lookup_plural(singular, plural, count, text_domain, locale)
	}

	/// The full catalog for a (text domain, locale) pair, loading it if
	/// this is the first request. Useful for coverage tooling.
	pub fn catalog(&self, text_domain: Option<&str>, locale: Option<&Locale>) -> Arc<TextDomain> {
		let text_domain = text_domain.unwrap_or(&self.text_domain);
		let locale = locale.unwrap_or(&self.locale);
		self.catalog_for(text_domain, locale)
	}

	/// Eagerly loads a (text domain, locale) pair, propagating the I/O
	/// and parse errors the lazy path downgrades to warnings. A failed
	/// preload caches nothing, so a later attempt retries.
	pub fn preload(
		&self,
		text_domain: Option<&str>,
		locale: Option<&Locale>,
	) -> Result<(), CatalogError> {
		let text_domain = text_domain.unwrap_or(&self.text_domain);
		let locale = locale.unwrap_or(&self.locale);
		self.cache
			.try_get_or_load(text_domain, locale, || {
				let (catalog, mut failures) = self.load_from_patterns(text_domain, locale);
				if failures.is_empty() {
					Ok(catalog)
				} else {
					let (path, error) = failures.remove(0);
					Err(error.in_file(path))
				}
			})
			.map(|_| ())
	}

	fn lookup(&self, msgid: &str, text_domain: &str, locale: &Locale) -> String {
		// The "C" locale asks for the untranslated message, and the empty
		// msgid is the catalog header slot; neither touches any catalog.
		if locale.is_c() || msgid.is_empty() {
			return msgid.to_string();
		}

		let catalog = self.catalog_for(text_domain, locale);
		if let Some(entry) = catalog.get(msgid) {
			let text = entry.singular();
			if !text.is_empty() {
				return text.to_string();
			}
		}

		debug!(
			msgid = %msgid,
			locale = %locale,
			domain = %text_domain,
			"Untranslated message"
		);

		if let Some(fallback) = &self.fallback_locale {
			// One hop only: in the recursive call the fallback equals the
			// requested locale, so this guard stops it.
			if fallback != locale {
				return self.lookup(msgid, text_domain, fallback);
			}
		}

		msgid.to_string()
	}

	fn lookup_plural(
		&self,
		singular: &str,
		plural: &str,
		count: u64,
		text_domain: &str,
		locale: &Locale,
	) -> Result<String, TranslateError> {
		if locale.is_c() {
			return Ok(if count == 1 { singular } else { plural }.to_string());
		}

		let catalog = self.catalog_for(text_domain, locale);
		match catalog.get(singular) {
			// A hit requires a non-empty first variant; anything else is
			// an untranslated message.
			Some(entry) if !entry.singular().is_empty() => {
				let index = catalog.plural_rule().evaluate(count);
				match entry.variant(index) {
					Some(text) => Ok(text.to_string()),
					None => Err(TranslateError::PluralIndexOutOfRange {
						msgid: singular.to_string(),
						index,
						available: entry.variant_count(),
					}),
				}
			}
			_ => {
				debug!(
					msgid = %singular,
					msgid_plural = %plural,
					locale = %locale,
					domain = %text_domain,
					"Untranslated message"
				);

				if let Some(fallback) = &self.fallback_locale {
					if fallback != locale {
						return self.lookup_plural(singular, plural, count, text_domain, fallback);
					}
				}

				Ok(if count == 1 { singular } else { plural }.to_string())
			}
		}
	}

	fn catalog_for(&self, text_domain: &str, locale: &Locale) -> Arc<TextDomain> {
		self.cache.get_or_load(text_domain, locale, || {
			let (catalog, failures) = self.load_from_patterns(text_domain, locale);
			for (path, error) in failures {
				warn!(
					path = %path.display(),
					error = %error,
					"Skipping unreadable message catalog"
				);
			}
			catalog
		})
	}

	/// Scans the registered patterns of a text domain for a locale.
	/// Missing files are skipped; existing files are parsed and merged
	/// in registration order. Read or parse failures are returned to the
	/// caller, which decides whether they are warnings or errors.
	fn load_from_patterns(
		&self,
		text_domain: &str,
		locale: &Locale,
	) -> (TextDomain, Vec<(PathBuf, CatalogError)>) {
		let mut catalog = TextDomain::new();
		let mut failures = Vec::new();
		let Some(sources) = self.patterns.get(text_domain) else {
			return (catalog, failures);
		};

		for source in sources {
			let filename = source.pattern.replace(LOCALE_PLACEHOLDER, locale.as_str());
			let path = source.base_dir.join(filename);
			if !path.is_file() {
				continue;
			}
			match gettext::load_po(&path) {
				Ok(loaded) => {
					debug!(
						path = %path.display(),
						messages = loaded.len(),
						"Loaded message catalog"
					);
					catalog.merge(loaded);
				}
				Err(error) => failures.push((path, error)),
			}
		}

		(catalog, failures)
	}
}

impl Default for Translator {
	/// A translator in the `"C"` locale: translation is the identity
	/// until a real locale is configured.
	fn default() -> Self {
		Self::new(Locale::c())
	}
}
