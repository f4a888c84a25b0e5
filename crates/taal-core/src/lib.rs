//! # Taal Core
//!
//! Shared foundation for the taal localization workspace.
//!
//! This crate defines the [`Locale`] identifier used throughout the
//! workspace. Catalog lookups key on the exact identifier string, so the
//! type deliberately performs no normalization beyond syntax validation;
//! `"nl_NL"`, `"nl-NL"` and `"nl"` are three distinct locales as far as
//! translation catalogs are concerned.

pub mod locale;

pub use locale::{Locale, LocaleError};
