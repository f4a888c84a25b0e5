//! Locale-aware date and time formatting
//!
//! A [`DateFormatter`] renders instants with `chrono`'s localized
//! month and day names, in a configurable `chrono-tz` time zone, with
//! one strftime pattern per [`DateStyle`]. Patterns and time zones are
//! validated when they are set, so formatting itself cannot trip over
//! configuration after the fact.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{
	DateTime, Locale as CalendarLocale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use taal_core::Locale;
use tracing::debug;

use crate::error::FormatError;

/// Default date pattern (ISO 8601).
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";

/// Default time pattern (ISO 8601).
pub const DEFAULT_TIME_PATTERN: &str = "%H:%M:%S";

/// Default combined pattern (ISO 8601, space-separated).
pub const DEFAULT_DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// What a pattern describes: a calendar date, a wall-clock time, or
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateStyle {
	Date,
	Time,
	DateTime,
}

/// An input accepted by [`DateFormatter::format`].
///
/// Seconds, text and naive values are interpreted as UTC; rendering
/// converts to the formatter's configured zone.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
	/// Seconds since the Unix epoch.
	Timestamp(i64),
	/// RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` text.
	Text(String),
	Utc(DateTime<Utc>),
	Naive(NaiveDateTime),
}

impl From<i64> for DateInput {
	fn from(seconds: i64) -> Self {
		Self::Timestamp(seconds)
	}
}

impl From<&str> for DateInput {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for DateInput {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<DateTime<Utc>> for DateInput {
	fn from(instant: DateTime<Utc>) -> Self {
		Self::Utc(instant)
	}
}

impl From<DateTime<Tz>> for DateInput {
	fn from(instant: DateTime<Tz>) -> Self {
		Self::Utc(instant.with_timezone(&Utc))
	}
}

impl From<NaiveDateTime> for DateInput {
	fn from(naive: NaiveDateTime) -> Self {
		Self::Naive(naive)
	}
}

/// Formats and parses dates, times and datetimes for one locale.
#[derive(Debug, Clone)]
pub struct DateFormatter {
	locale: Locale,
	calendar_locale: CalendarLocale,
	timezone: Tz,
	date_pattern: String,
	time_pattern: String,
	datetime_pattern: String,
}

impl DateFormatter {
	/// A formatter for `locale` with ISO-shaped default patterns and
	/// the UTC time zone.
	pub fn new(locale: Locale) -> Self {
		let calendar_locale = calendar_locale_for(&locale);
		Self {
			locale,
			calendar_locale,
			timezone: Tz::UTC,
			date_pattern: DEFAULT_DATE_PATTERN.to_string(),
			time_pattern: DEFAULT_TIME_PATTERN.to_string(),
			datetime_pattern: DEFAULT_DATETIME_PATTERN.to_string(),
		}
	}

	pub fn locale(&self) -> &Locale {
		&self.locale
	}

	/// Switches the locale whose month and day names are used.
	/// Patterns and the time zone stay as configured.
	pub fn set_locale(&mut self, locale: Locale) {
		self.calendar_locale = calendar_locale_for(&locale);
		self.locale = locale;
	}

	pub fn timezone(&self) -> Tz {
		self.timezone
	}

	/// Switches the rendering time zone.
	///
	/// `name` must be an IANA zone name such as `"Europe/Amsterdam"`;
	/// an unknown name is rejected and the current zone stays active.
	pub fn set_timezone(&mut self, name: &str) -> Result<(), FormatError> {
		let zone: Tz = name
			.parse()
			.map_err(|_| FormatError::InvalidTimeZone(name.to_string()))?;
		self.timezone = zone;
		Ok(())
	}

	/// The active pattern for a style.
	pub fn pattern(&self, style: DateStyle) -> &str {
		match style {
			DateStyle::Date => &self.date_pattern,
			DateStyle::Time => &self.time_pattern,
			DateStyle::DateTime => &self.datetime_pattern,
		}
	}

	/// Replaces the pattern for a style.
	///
	/// The pattern is checked for unknown specifiers before it is
	/// stored; on rejection the previous pattern remains active.
	pub fn set_format(&mut self, style: DateStyle, pattern: &str) -> Result<(), FormatError> {
		if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
			return Err(FormatError::InvalidPattern(pattern.to_string()));
		}
		let slot = match style {
			DateStyle::Date => &mut self.date_pattern,
			DateStyle::Time => &mut self.time_pattern,
			DateStyle::DateTime => &mut self.datetime_pattern,
		};
		*slot = pattern.to_string();
		Ok(())
	}

	/// Renders an input with the style's pattern, in the configured
	/// time zone, with the locale's month and day names.
	pub fn format(
		&self,
		input: impl Into<DateInput>,
		style: DateStyle,
	) -> Result<String, FormatError> {
		let instant = self.instant(&input.into())?;
		let zoned = instant.with_timezone(&self.timezone);
		let pattern = self.pattern(style);
		let mut out = String::new();
		write!(out, "{}", zoned.format_localized(pattern, self.calendar_locale))
			.map_err(|_| FormatError::InvalidPattern(pattern.to_string()))?;
		Ok(out)
	}

	pub fn format_date(&self, input: impl Into<DateInput>) -> Result<String, FormatError> {
		self.format(input, DateStyle::Date)
	}

	pub fn format_time(&self, input: impl Into<DateInput>) -> Result<String, FormatError> {
		self.format(input, DateStyle::Time)
	}

	pub fn format_datetime(&self, input: impl Into<DateInput>) -> Result<String, FormatError> {
		self.format(input, DateStyle::DateTime)
	}

	/// Parses text with the style's pattern and resolves it in the
	/// configured time zone.
	///
	/// A date anchors at midnight and a time anchors at 1970-01-01.
	/// A wall-clock reading that exists twice in the zone (the end of
	/// daylight saving time) resolves to the earlier instant; one that
	/// does not exist at all is invalid.
	pub fn parse(&self, text: &str, style: DateStyle) -> Result<DateTime<Tz>, FormatError> {
		let invalid = || FormatError::InvalidDate(text.to_string());
		let naive = match style {
			DateStyle::Date => NaiveDate::parse_from_str(text, &self.date_pattern)
				.map_err(|_| invalid())?
				.and_time(NaiveTime::MIN),
			DateStyle::Time => {
				let time =
					NaiveTime::parse_from_str(text, &self.time_pattern).map_err(|_| invalid())?;
				DateTime::<Utc>::UNIX_EPOCH.date_naive().and_time(time)
			}
			DateStyle::DateTime => NaiveDateTime::parse_from_str(text, &self.datetime_pattern)
				.map_err(|_| invalid())?,
		};
		self.timezone
			.from_local_datetime(&naive)
			.earliest()
			.ok_or_else(invalid)
	}

	fn instant(&self, input: &DateInput) -> Result<DateTime<Utc>, FormatError> {
		match input {
			DateInput::Timestamp(seconds) => DateTime::from_timestamp(*seconds, 0)
				.ok_or_else(|| FormatError::InvalidDate(format!("timestamp {seconds}"))),
			DateInput::Text(text) => instant_from_text(text),
			DateInput::Utc(instant) => Ok(*instant),
			DateInput::Naive(naive) => Ok(naive.and_utc()),
		}
	}
}

/// Interprets free-form text as a UTC instant.
fn instant_from_text(text: &str) -> Result<DateTime<Utc>, FormatError> {
	if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
		return Ok(instant.with_timezone(&Utc));
	}
	if let Ok(naive) = NaiveDateTime::parse_from_str(text, DEFAULT_DATETIME_PATTERN) {
		return Ok(naive.and_utc());
	}
	if let Ok(date) = NaiveDate::parse_from_str(text, DEFAULT_DATE_PATTERN) {
		return Ok(date.and_time(NaiveTime::MIN).and_utc());
	}
	Err(FormatError::InvalidDate(text.to_string()))
}

/// Resolves the chrono locale carrying month and day names.
///
/// Tried in order: the identifier itself (separators normalized), then
/// the language with its customary territory. Locales without calendar
/// data fall back to POSIX (English) names.
fn calendar_locale_for(locale: &Locale) -> CalendarLocale {
	let exact = locale.as_str().replace('-', "_");
	if let Ok(found) = CalendarLocale::try_from(exact.as_str()) {
		return found;
	}

	let language = locale.language();
	let territory = match language.as_str() {
		"en" => "US",
		"ja" => "JP",
		"zh" => "CN",
		"ko" => "KR",
		"cs" => "CZ",
		"da" => "DK",
		"sv" => "SE",
		"el" => "GR",
		"he" => "IL",
		"uk" => "UA",
		"ar" => "EG",
		"hi" => "IN",
		// Most other languages double their code (nl_NL, fr_FR, ...).
		_ => "",
	};
	let guess = if territory.is_empty() {
		format!("{language}_{}", language.to_ascii_uppercase())
	} else {
		format!("{language}_{territory}")
	};
	if let Ok(found) = CalendarLocale::try_from(guess.as_str()) {
		return found;
	}

	debug!(locale = %locale, "No calendar data for locale, using POSIX names");
	CalendarLocale::POSIX
}
