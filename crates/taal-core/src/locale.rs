//! Validated locale identifiers
//!
//! A locale names a language and optionally a territory, in the POSIX
//! shape used by gettext catalogs (`nl`, `nl_NL`, `pt-BR`, `C`). The
//! identifier is kept exactly as written; callers that need looser
//! matching work with [`Locale::language`].

use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Errors raised when constructing a [`Locale`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
	/// The identifier was empty.
	#[error("Empty locale identifier")]
	Empty,
	/// The identifier contains characters outside `A-Z a-z 0-9 - _`, or
	/// does not start with a letter.
	#[error("Invalid locale identifier: {0:?}")]
	Invalid(String),
}

/// A syntactically valid locale identifier.
///
/// Ordering, equality and hashing all operate on the exact string; no
/// case folding or separator normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
	/// Validates and wraps a locale identifier.
	pub fn new(id: impl Into<String>) -> Result<Self, LocaleError> {
		let id = id.into();
		if id.is_empty() {
			return Err(LocaleError::Empty);
		}
		let mut chars = id.chars();
		let first_ok = chars
			.next()
			.map(|c| c.is_ascii_alphabetic())
			.unwrap_or(false);
		if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
			return Err(LocaleError::Invalid(id));
		}
		Ok(Self(id))
	}

	/// The `"C"` locale: translation and formatting are identity
	/// operations under it.
	pub fn c() -> Self {
		Self("C".to_string())
	}

	/// Whether this is the `"C"` (or equivalently `"POSIX"`) locale.
	pub fn is_c(&self) -> bool {
		self.0 == "C" || self.0 == "POSIX"
	}

	/// The identifier exactly as written.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The primary language subtag, lowercased (`"NL_nl"` → `"nl"`).
	pub fn language(&self) -> String {
		self.0
			.split(['-', '_'])
			.next()
			.unwrap_or(&self.0)
			.to_ascii_lowercase()
	}

	/// The territory subtag when present, uppercased
	/// (`"nl_nl"` → `Some("NL")`).
	pub fn region(&self) -> Option<String> {
		self.0
			.split(['-', '_'])
			.nth(1)
			.map(str::to_ascii_uppercase)
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Locale {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for Locale {
	type Err = LocaleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<&str> for Locale {
	type Error = LocaleError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl PartialEq<str> for Locale {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for Locale {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

impl Serialize for Locale {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Locale {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Self::new(raw).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("en")]
	#[case("en_US")]
	#[case("nl-NL")]
	#[case("pt_BR")]
	#[case("C")]
	#[case("POSIX")]
	#[case("sr_RS_latin")]
	#[case("zh_Hant_TW")]
	fn test_accepts_well_formed_identifiers(#[case] id: &str) {
		let locale = Locale::new(id).unwrap();
		assert_eq!(locale.as_str(), id);
		assert_eq!(locale.to_string(), id);
	}

	#[rstest]
	#[case("en US")]
	#[case("en/US")]
	#[case("12en")]
	#[case("-nl")]
	#[case("ün")]
	#[case("nl.UTF-8")]
	fn test_rejects_malformed_identifiers(#[case] id: &str) {
		assert_eq!(Locale::new(id), Err(LocaleError::Invalid(id.to_string())));
	}

	#[test]
	fn test_rejects_empty_identifier() {
		assert_eq!(Locale::new(""), Err(LocaleError::Empty));
	}

	#[rstest]
	#[case("nl_NL", "nl", Some("NL"))]
	#[case("nl-NL", "nl", Some("NL"))]
	#[case("nl", "nl", None)]
	#[case("NL_nl", "nl", Some("NL"))]
	#[case("sr_RS_latin", "sr", Some("RS"))]
	fn test_splits_language_and_region(
		#[case] id: &str,
		#[case] language: &str,
		#[case] region: Option<&str>,
	) {
		let locale = Locale::new(id).unwrap();
		assert_eq!(locale.language(), language);
		assert_eq!(locale.region().as_deref(), region);
	}

	#[test]
	fn test_c_locale_is_recognized_in_both_spellings() {
		assert!(Locale::c().is_c());
		assert!(Locale::new("POSIX").unwrap().is_c());
		assert!(!Locale::new("cs").unwrap().is_c());
	}

	#[test]
	fn test_no_normalization_is_applied() {
		// Catalog keys are exact strings; these are three different locales.
		let a = Locale::new("nl_NL").unwrap();
		let b = Locale::new("nl-NL").unwrap();
		let c = Locale::new("NL_NL").unwrap();
		assert_ne!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn test_deserialization_validates() {
		let ok: Locale = serde_json::from_str("\"nl_NL\"").unwrap();
		assert_eq!(ok.as_str(), "nl_NL");
		assert!(serde_json::from_str::<Locale>("\"not a locale\"").is_err());
	}
}
