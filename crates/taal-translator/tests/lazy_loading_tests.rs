//! Lazy catalog loading tests
//!
//! Catalogs are read on the first lookup for a (text domain, locale)
//! pair and never again. These tests pin down the observable side of
//! that contract: late registration works, loaded catalogs survive
//! file changes, and failed preloads stay retryable.

use std::fs;
use std::path::Path;
use std::sync::Barrier;

use taal_core::Locale;
use taal_translator::Translator;
use tempfile::TempDir;

const DUTCH_PO: &str = r#"msgid ""
msgstr ""
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "Yes"
msgstr "Ja"
"#;

const GERMAN_PO: &str = r#"msgid "Yes"
msgstr "Doch"
"#;

fn write_po(dir: &Path, name: &str, content: &str) {
	fs::write(dir.join(name), content).unwrap();
}

fn locale(id: &str) -> Locale {
	Locale::new(id).unwrap()
}

#[test]
fn test_registration_does_not_touch_the_filesystem() {
	let dir = TempDir::new().unwrap();
	let missing = dir.path().join("i18n");

	let mut translator = Translator::new(locale("nl"));
	// The directory does not exist yet; registration must not care.
	translator.add_pattern(&missing, "{locale}.po", "default");

	fs::create_dir(&missing).unwrap();
	write_po(&missing, "nl.po", DUTCH_PO);

	// The first lookup sees whatever is on disk at that moment.
	assert_eq!(translator.translate("Yes"), "Ja");
}

#[test]
fn test_first_lookup_pins_the_catalog() {
	let dir = TempDir::new().unwrap();
	write_po(dir.path(), "nl.po", DUTCH_PO);

	let mut translator = Translator::new(locale("nl"));
	translator.add_pattern(dir.path(), "{locale}.po", "default");
	assert_eq!(translator.translate("Yes"), "Ja");

	// Rewriting the file after the first lookup changes nothing.
	write_po(dir.path(), "nl.po", "msgid \"Yes\"\nmsgstr \"Jawel\"\n");
	assert_eq!(translator.translate("Yes"), "Ja");
}

#[test]
fn test_translations_survive_file_deletion() {
	let dir = TempDir::new().unwrap();
	write_po(dir.path(), "nl.po", DUTCH_PO);

	let mut translator = Translator::new(locale("nl"));
	translator.add_pattern(dir.path(), "{locale}.po", "default");
	assert_eq!(translator.translate("Yes"), "Ja");

	fs::remove_file(dir.path().join("nl.po")).unwrap();
	assert_eq!(translator.translate("Yes"), "Ja");
}

#[test]
fn test_absent_catalogs_are_remembered_as_empty() {
	let dir = TempDir::new().unwrap();

	let mut translator = Translator::new(locale("nl"));
	translator.add_pattern(dir.path(), "{locale}.po", "default");
	assert_eq!(translator.translate("Yes"), "Yes");

	// The empty result was cached; a file arriving later is not seen.
	write_po(dir.path(), "nl.po", DUTCH_PO);
	assert_eq!(translator.translate("Yes"), "Yes");
}

#[test]
fn test_each_locale_loads_its_own_catalog() {
	let dir = TempDir::new().unwrap();
	write_po(dir.path(), "nl.po", DUTCH_PO);
	write_po(dir.path(), "de.po", GERMAN_PO);

	let mut translator = Translator::new(locale("nl"));
	translator.add_pattern(dir.path(), "{locale}.po", "default");

	assert_eq!(translator.translate("Yes"), "Ja");
	assert_eq!(
		translator.translate_with("Yes", None, Some(&locale("de"))),
		"Doch"
	);
	// Loading "de" must not disturb the "nl" catalog.
	assert_eq!(translator.translate("Yes"), "Ja");
}

#[test]
fn test_failed_preload_stays_retryable() {
	let dir = TempDir::new().unwrap();
	write_po(dir.path(), "nl.po", "msgid \"Yes\nmsgstr broken\n");

	let mut translator = Translator::new(locale("nl"));
	translator.add_pattern(dir.path(), "{locale}.po", "default");

	assert!(translator.preload(None, None).is_err());

	// A failed preload caches nothing, so fixing the file suffices.
	write_po(dir.path(), "nl.po", DUTCH_PO);
	translator.preload(None, None).unwrap();
	assert_eq!(translator.translate("Yes"), "Ja");
}

#[test]
fn test_concurrent_first_lookups_agree() {
	let dir = TempDir::new().unwrap();
	write_po(dir.path(), "nl.po", DUTCH_PO);

	let mut translator = Translator::new(locale("nl"));
	translator.add_pattern(dir.path(), "{locale}.po", "default");

	let barrier = Barrier::new(8);
	std::thread::scope(|scope| {
		for _ in 0..8 {
			scope.spawn(|| {
				barrier.wait();
				assert_eq!(translator.translate("Yes"), "Ja");
			});
		}
	});
}
