//! # Taal Formatting
//!
//! Locale-aware date/time, number and money formatting.
//!
//! The formatters in this crate are cheap value types built from a
//! [`taal_core::Locale`]. Calendar names come from `chrono`'s locale
//! data, time zones from `chrono-tz`, and digit grouping from
//! `num-format`; a locale without data in those tables degrades to
//! POSIX/English conventions rather than failing.
//!
//! Formatting itself never mutates a formatter. Configuration setters
//! validate their input up front and leave the previous state in place
//! when the new value is rejected.

pub mod date;
pub mod error;
pub mod money;
pub mod number;

pub use date::{DateFormatter, DateInput, DateStyle};
pub use error::FormatError;
pub use money::MoneyFormatter;
pub use number::NumberFormatter;
