//! Formatting errors

/// Errors raised by the formatters.
///
/// Every variant names the offending input. Setters that return one of
/// these leave the formatter unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
	/// The time zone name is not in the IANA database.
	#[error("Invalid time zone: {0}")]
	InvalidTimeZone(String),
	/// The strftime pattern contains an unknown specifier.
	#[error("Invalid date/time pattern: {0}")]
	InvalidPattern(String),
	/// The input could not be interpreted as a date, time or instant.
	#[error("Invalid date: {0}")]
	InvalidDate(String),
	/// The input could not be interpreted as a number.
	#[error("Invalid number: {0}")]
	InvalidNumber(String),
}
