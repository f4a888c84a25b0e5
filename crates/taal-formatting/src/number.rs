//! Locale-aware number formatting
//!
//! Grouped digits and decimal separators per locale, backed by
//! `num-format`'s CLDR tables. Locales without grouping data fall back
//! to English conventions.

use num_format::{Locale as NumLocale, ToFormattedString};
use taal_core::Locale;
use tracing::debug;

use crate::error::FormatError;

/// Decimal digits rendered when none are configured.
pub const DEFAULT_DECIMALS: usize = 2;

/// Formats and parses numbers for one locale.
#[derive(Debug, Clone)]
pub struct NumberFormatter {
	locale: Locale,
	num_locale: NumLocale,
	decimals: usize,
}

impl NumberFormatter {
	pub fn new(locale: Locale) -> Self {
		let num_locale = grouping_locale_for(&locale);
		Self {
			locale,
			num_locale,
			decimals: DEFAULT_DECIMALS,
		}
	}

	pub fn locale(&self) -> &Locale {
		&self.locale
	}

	/// Switches the locale whose digit grouping and decimal mark are used.
	/// The configured precision stays as is.
	pub fn set_locale(&mut self, locale: Locale) {
		self.num_locale = grouping_locale_for(&locale);
		self.locale = locale;
	}

	pub fn decimals(&self) -> usize {
		self.decimals
	}

	/// Sets the number of decimal digits rendered by [`format`].
	///
	/// [`format`]: NumberFormatter::format
	pub fn set_decimals(&mut self, decimals: usize) {
		self.decimals = decimals;
	}

	pub(crate) fn minus_sign(&self) -> &'static str {
		self.num_locale.minus_sign()
	}

	/// Renders a number with grouped digits, the locale's decimal
	/// separator and the configured precision.
	pub fn format(&self, value: f64) -> String {
		self.format_with_decimals(value, self.decimals)
	}

	/// [`format`] with an explicit precision.
	///
	/// [`format`]: NumberFormatter::format
	pub fn format_with_decimals(&self, value: f64, decimals: usize) -> String {
		if !value.is_finite() {
			return value.to_string();
		}
		let rendered = format!("{value:.decimals$}");
		let unsigned = rendered.strip_prefix('-');
		let negative = unsigned.is_some();
		let digits = unsigned.unwrap_or(&rendered);
		let (int_part, frac_part) = match digits.split_once('.') {
			Some((int_part, frac_part)) => (int_part, Some(frac_part)),
			None => (digits, None),
		};

		let mut out = String::new();
		if negative {
			out.push_str(self.num_locale.minus_sign());
		}
		out.push_str(&group_digits(int_part, &self.num_locale));
		if let Some(frac) = frac_part {
			out.push_str(self.num_locale.decimal());
			out.push_str(frac);
		}
		out
	}

	/// Renders an integer with grouped digits.
	pub fn format_int(&self, value: i64) -> String {
		value.to_formatted_string(&self.num_locale)
	}

	/// Parses a number written in this locale's format: group
	/// separators are dropped and the locale's decimal separator and
	/// minus sign are mapped to their ASCII forms.
	pub fn parse(&self, text: &str) -> Result<f64, FormatError> {
		let invalid = || FormatError::InvalidNumber(text.to_string());
		let mut cleaned = text.trim().to_string();
		let separator = self.num_locale.separator();
		if !separator.is_empty() {
			cleaned = cleaned.replace(separator, "");
		}
		let minus = self.num_locale.minus_sign();
		if minus != "-" {
			cleaned = cleaned.replace(minus, "-");
		}
		let decimal = self.num_locale.decimal();
		if decimal != "." {
			cleaned = cleaned.replace(decimal, ".");
		}
		if cleaned.is_empty() {
			return Err(invalid());
		}
		cleaned.parse::<f64>().map_err(|_| invalid())
	}
}

/// Groups an unsigned digit string per the locale.
///
/// Digit strings wider than `u128` (floats above roughly 3.4e38) pass
/// through ungrouped.
fn group_digits(digits: &str, locale: &NumLocale) -> String {
	match digits.parse::<u128>() {
		Ok(value) => value.to_formatted_string(locale),
		Err(_) => digits.to_string(),
	}
}

/// Resolves the `num-format` locale carrying the grouping data.
fn grouping_locale_for(locale: &Locale) -> NumLocale {
	let exact = locale.as_str().replace('_', "-");
	if let Ok(found) = NumLocale::from_name(&exact) {
		return found;
	}
	let language = locale.language();
	if let Ok(found) = NumLocale::from_name(&language) {
		return found;
	}
	debug!(locale = %locale, "No digit grouping data for locale, using \"en\"");
	NumLocale::en
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn formatter(locale: &str) -> NumberFormatter {
		NumberFormatter::new(Locale::new(locale).unwrap())
	}

	#[rstest]
	#[case("en", 1234567.891, "1,234,567.89")]
	#[case("nl", 1234567.891, "1.234.567,89")]
	#[case("de_DE", 1234567.891, "1.234.567,89")]
	#[case("en", 0.5, "0.50")]
	#[case("en", -12345.678, "-12,345.68")]
	fn test_format_groups_and_localizes(
		#[case] locale: &str,
		#[case] value: f64,
		#[case] expected: &str,
	) {
		assert_eq!(formatter(locale).format(value), expected);
	}

	#[rstest]
	#[case("en", 1234567, "1,234,567")]
	#[case("de", 1234567, "1.234.567")]
	#[case("en", -1234567, "-1,234,567")]
	fn test_format_int_groups(#[case] locale: &str, #[case] value: i64, #[case] expected: &str) {
		assert_eq!(formatter(locale).format_int(value), expected);
	}

	#[test]
	fn test_precision_is_configurable() {
		let mut formatter = formatter("en");
		assert_eq!(formatter.decimals(), DEFAULT_DECIMALS);
		formatter.set_decimals(0);
		assert_eq!(formatter.format(1234.9), "1,235");
		formatter.set_decimals(3);
		assert_eq!(formatter.format(1234.9), "1,234.900");
		assert_eq!(formatter.format_with_decimals(1234.9, 1), "1,234.9");
	}

	#[test]
	fn test_wide_integers_group_fully() {
		let mut formatter = formatter("en");
		formatter.set_decimals(0);
		assert_eq!(formatter.format(1e18), "1,000,000,000,000,000,000");
	}

	#[test]
	fn test_non_finite_values_render_plainly() {
		assert_eq!(formatter("en").format(f64::NAN), "NaN");
		assert_eq!(formatter("en").format(f64::INFINITY), "inf");
	}

	#[rstest]
	#[case("en", "1,234,567.89", 1234567.89)]
	#[case("nl", "1.234,5", 1234.5)]
	#[case("en", " 42.5 ", 42.5)]
	#[case("en", "-7", -7.0)]
	fn test_parse_reads_the_locale_format(
		#[case] locale: &str,
		#[case] text: &str,
		#[case] expected: f64,
	) {
		assert_eq!(formatter(locale).parse(text).unwrap(), expected);
	}

	#[rstest]
	#[case("abc")]
	#[case("")]
	#[case("12..5")]
	fn test_parse_rejects_garbage(#[case] text: &str) {
		assert_eq!(
			formatter("en").parse(text).unwrap_err(),
			FormatError::InvalidNumber(text.to_string())
		);
	}

	#[test]
	fn test_unknown_locale_degrades_to_english_grouping() {
		assert_eq!(formatter("xx_XX").format(1234.5), "1,234.50");
	}

	#[test]
	fn test_set_locale_keeps_precision() {
		let mut formatter = formatter("en");
		formatter.set_decimals(3);
		formatter.set_locale(Locale::new("nl_NL").unwrap());
		assert_eq!(formatter.format(1234.5), "1.234,500");
	}
}
