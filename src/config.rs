//! TOML configuration for building an [`I18n`] instance.
//!
//! Everything lives under an `[i18n]` table, so the same document can be
//! an application's main configuration file. Unknown tables and keys are
//! ignored.
//!
//! ```toml
//! [i18n]
//! locale = "nl_NL"
//! fallback_locale = "en_US"
//! text_domain = "core"
//!
//! [[i18n.domain]]
//! name = "core"
//! base_dir = "./i18n/core"
//!
//! [i18n.formatting]
//! timezone = "Europe/Amsterdam"
//! currency = "€"
//! currency_after = true
//! decimals = 2
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use taal_core::Locale;
use taal_translator::DEFAULT_PATTERN;

use crate::i18n::I18n;

/// A configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("Failed to read configuration: {0}")]
	Io(#[from] std::io::Error),
	/// The document is not valid TOML or a value has the wrong shape.
	#[error("Failed to parse configuration: {0}")]
	Parse(#[from] toml::de::Error),
	/// The document parsed but a setting is unusable.
	#[error("Invalid configuration: {0}")]
	Invalid(String),
}

/// The `[i18n]` table of a configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct I18nConfig {
	#[serde(default)]
	pub i18n: I18nSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct I18nSection {
	/// Active locale. Defaults to "C", which translates nothing.
	pub locale: Option<Locale>,
	/// Locale consulted when the active one has no translation.
	pub fallback_locale: Option<Locale>,
	/// Text domain used when none is named. Defaults to "default".
	pub text_domain: Option<String>,
	/// Catalog directories, one `[[i18n.domain]]` entry each.
	#[serde(rename = "domain")]
	pub domains: Vec<DomainConfig>,
	pub formatting: FormattingConfig,
}

/// One catalog directory for one text domain.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
	pub name: String,
	pub base_dir: PathBuf,
	/// File name pattern relative to `base_dir`; `{locale}` is replaced
	/// by the locale identifier.
	#[serde(default = "default_pattern")]
	pub pattern: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
	/// IANA time zone name for date output. Defaults to UTC.
	pub timezone: Option<String>,
	/// Currency symbol. Defaults to "$".
	pub currency: Option<String>,
	/// Whether the symbol follows the amount, as in `12,50 €`.
	pub currency_after: Option<bool>,
	/// Fraction digits for numbers and money. Defaults to 2.
	pub decimals: Option<usize>,
}

fn default_pattern() -> String {
	DEFAULT_PATTERN.to_string()
}

impl I18nConfig {
	/// Parses a TOML document. Locale identifiers are validated during
	/// parsing.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path)?;
		Self::from_toml_str(&text)
	}

	/// Builds a ready-to-use [`I18n`] from this configuration.
	///
	/// Catalog directories are registered but not read; catalogs load on
	/// first use. Call [`I18n::preload`] afterwards to surface catalog
	/// problems eagerly.
	pub fn build(&self) -> Result<I18n, ConfigError> {
		let section = &self.i18n;
		let locale = section.locale.clone().unwrap_or_else(Locale::c);
		let mut i18n = I18n::new(locale);
		i18n.set_fallback_locale(section.fallback_locale.clone());
		if let Some(text_domain) = &section.text_domain {
			i18n.set_text_domain(text_domain.as_str());
		}

		for domain in &section.domains {
			if domain.name.is_empty() {
				return Err(ConfigError::Invalid(format!(
					"text domain name for {} is empty",
					domain.base_dir.display()
				)));
			}
			i18n.translator_mut().add_pattern(
				&domain.base_dir,
				domain.pattern.as_str(),
				domain.name.as_str(),
			);
		}

		let formatting = &section.formatting;
		if let Some(timezone) = &formatting.timezone {
			i18n.date_formatter_mut()
				.set_timezone(timezone)
				.map_err(|error| ConfigError::Invalid(error.to_string()))?;
		}
		if let Some(currency) = &formatting.currency {
			i18n.money_formatter_mut().set_currency(currency.as_str());
		}
		if let Some(after) = formatting.currency_after {
			i18n.money_formatter_mut().set_currency_after(after);
		}
		if let Some(decimals) = formatting.decimals {
			i18n.number_formatter_mut().set_decimals(decimals);
			i18n.money_formatter_mut().set_decimals(decimals);
		}

		Ok(i18n)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_full_document_parses() {
		let config = I18nConfig::from_toml_str(
			r#"
			[i18n]
			locale = "nl_NL"
			fallback_locale = "en_US"
			text_domain = "core"

			[[i18n.domain]]
			name = "core"
			base_dir = "./i18n/core"

			[[i18n.domain]]
			name = "mail"
			base_dir = "./i18n/mail"
			pattern = "mail-{locale}.po"

			[i18n.formatting]
			timezone = "Europe/Amsterdam"
			currency = "€"
			currency_after = true
			decimals = 3
			"#,
		)
		.unwrap();

		let section = &config.i18n;
		assert_eq!(section.locale.as_ref().unwrap().as_str(), "nl_NL");
		assert_eq!(section.fallback_locale.as_ref().unwrap().as_str(), "en_US");
		assert_eq!(section.text_domain.as_deref(), Some("core"));
		assert_eq!(section.domains.len(), 2);
		assert_eq!(section.domains[0].pattern, DEFAULT_PATTERN);
		assert_eq!(section.domains[1].pattern, "mail-{locale}.po");
		assert_eq!(section.formatting.decimals, Some(3));
	}

	#[test]
	fn test_empty_document_builds_the_c_locale() {
		let i18n = I18nConfig::from_toml_str("").unwrap().build().unwrap();
		assert!(i18n.locale().is_c());
		assert_eq!(i18n.text_domain(), "default");
		assert_eq!(i18n.translate("Hello"), "Hello");
	}

	#[test]
	fn test_unrelated_tables_are_ignored() {
		let config = I18nConfig::from_toml_str(
			"[database]\nurl = \"postgres://localhost\"\n\n[i18n]\nlocale = \"de_DE\"\n",
		)
		.unwrap();
		assert_eq!(config.i18n.locale.as_ref().unwrap().as_str(), "de_DE");
	}

	#[test]
	fn test_malformed_toml_is_a_parse_error() {
		let error = I18nConfig::from_toml_str("[i18n\nlocale = ").unwrap_err();
		assert!(matches!(error, ConfigError::Parse(_)));
	}

	#[test]
	fn test_invalid_locale_is_a_parse_error() {
		let error = I18nConfig::from_toml_str("[i18n]\nlocale = \"9nl\"\n").unwrap_err();
		assert!(matches!(error, ConfigError::Parse(_)));
	}

	#[test]
	fn test_build_applies_formatting_settings() {
		let i18n = I18nConfig::from_toml_str(
			r#"
			[i18n]
			locale = "nl_NL"

			[i18n.formatting]
			currency = "€"
			currency_after = true
			"#,
		)
		.unwrap()
		.build()
		.unwrap();

		assert_eq!(i18n.money_formatter().format(1234.5), "1.234,50 €");
		assert_eq!(i18n.number_formatter().format(1234.5), "1.234,50");
	}

	#[test]
	fn test_build_rejects_an_unknown_time_zone() {
		let error = I18nConfig::from_toml_str(
			"[i18n.formatting]\ntimezone = \"Mars/Olympus_Mons\"\n",
		)
		.unwrap()
		.build()
		.unwrap_err();
		assert!(matches!(error, ConfigError::Invalid(_)));
		assert!(error.to_string().contains("Mars/Olympus_Mons"));
	}

	#[test]
	fn test_build_rejects_an_unnamed_domain() {
		let error = I18nConfig::from_toml_str(
			"[[i18n.domain]]\nname = \"\"\nbase_dir = \"./i18n\"\n",
		)
		.unwrap()
		.build()
		.unwrap_err();
		assert!(matches!(error, ConfigError::Invalid(_)));
	}

	#[test]
	fn test_from_file_reads_the_document() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("app.toml");
		std::fs::write(&path, "[i18n]\nlocale = \"fr_FR\"\n").unwrap();

		let config = I18nConfig::from_file(&path).unwrap();
		assert_eq!(config.i18n.locale.as_ref().unwrap().as_str(), "fr_FR");
	}

	#[test]
	fn test_from_file_reports_a_missing_document() {
		let dir = tempfile::tempdir().unwrap();
		let error = I18nConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
		assert!(matches!(error, ConfigError::Io(_)));
	}
}
