//! Money formatting
//!
//! A [`MoneyFormatter`] renders amounts with the locale's number
//! conventions and an explicitly configured currency symbol. The
//! symbol is configuration rather than locale data; nothing here
//! guesses a currency from a territory.

use taal_core::Locale;

use crate::error::FormatError;
use crate::number::NumberFormatter;

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY: &str = "$";

/// Formats monetary amounts for one locale.
///
/// Prefixed symbols attach directly to the amount with the sign
/// hoisted in front (`-$12.50`); suffixed symbols follow the amount
/// after a space (`12,50 €`).
#[derive(Debug, Clone)]
pub struct MoneyFormatter {
	number: NumberFormatter,
	symbol: String,
	symbol_after: bool,
}

impl MoneyFormatter {
	pub fn new(locale: Locale) -> Self {
		Self {
			number: NumberFormatter::new(locale),
			symbol: DEFAULT_CURRENCY.to_string(),
			symbol_after: false,
		}
	}

	pub fn locale(&self) -> &Locale {
		self.number.locale()
	}

	/// Switches the locale used for digit grouping and the decimal mark.
	/// The currency symbol and its placement stay as configured.
	pub fn set_locale(&mut self, locale: Locale) {
		self.number.set_locale(locale);
	}

	pub fn currency(&self) -> &str {
		&self.symbol
	}

	pub fn set_currency(&mut self, symbol: impl Into<String>) {
		self.symbol = symbol.into();
	}

	pub fn currency_after(&self) -> bool {
		self.symbol_after
	}

	/// Places the symbol after the amount instead of before it.
	pub fn set_currency_after(&mut self, after: bool) {
		self.symbol_after = after;
	}

	pub fn decimals(&self) -> usize {
		self.number.decimals()
	}

	pub fn set_decimals(&mut self, decimals: usize) {
		self.number.set_decimals(decimals);
	}

	/// Renders an amount with the configured symbol and placement.
	pub fn format(&self, value: f64) -> String {
		let amount = self.number.format(value);
		if self.symbol_after {
			return format!("{amount} {}", self.symbol);
		}
		match amount.strip_prefix(self.number.minus_sign()) {
			Some(magnitude) => format!("{}{}{magnitude}", self.number.minus_sign(), self.symbol),
			None => format!("{}{amount}", self.symbol),
		}
	}

	/// Parses an amount, tolerating the configured symbol anywhere in
	/// the text.
	pub fn parse(&self, text: &str) -> Result<f64, FormatError> {
		let stripped = text.replace(&self.symbol, "");
		self.number
			.parse(stripped.trim())
			.map_err(|_| FormatError::InvalidNumber(text.to_string()))
	}
}
