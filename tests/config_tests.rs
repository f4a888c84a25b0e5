//! Configuration-driven construction: a TOML document, catalogs on
//! disk, and a working instance out the other end.

use std::path::{Path, PathBuf};

use taal::{CatalogError, DateStyle, I18nConfig};

const DUTCH_PO: &str = r#"msgid ""
msgstr ""
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "Yes"
msgstr "Ja"

msgid "Save"
msgstr "Opslaan"
"#;

const DUTCH_MAIL_PO: &str = r#"msgid ""
msgstr ""

msgid "Subject"
msgstr "Onderwerp"
"#;

fn write_po(dir: &Path, relative: &str, content: &str) -> PathBuf {
	let path = dir.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap();
	}
	std::fs::write(&path, content).unwrap();
	path
}

#[test]
fn test_a_config_document_builds_a_working_instance() {
	let dir = tempfile::tempdir().unwrap();
	write_po(dir.path(), "core/nl_NL.po", DUTCH_PO);

	let document = format!(
		r#"
		[i18n]
		locale = "nl_NL"
		fallback_locale = "en_US"
		text_domain = "core"

		[[i18n.domain]]
		name = "core"
		base_dir = {base_dir:?}

		[i18n.formatting]
		currency = "€"
		currency_after = true
		"#,
		base_dir = dir.path().join("core")
	);

	let i18n = I18nConfig::from_toml_str(&document).unwrap().build().unwrap();

	assert_eq!(i18n.locale().as_str(), "nl_NL");
	assert_eq!(i18n.fallback_locale().unwrap().as_str(), "en_US");
	assert_eq!(i18n.text_domain(), "core");
	assert_eq!(i18n.translate("Yes"), "Ja");
	assert_eq!(i18n.money_formatter().format(1234.5), "1.234,50 €");
}

#[test]
fn test_a_custom_file_pattern_is_honored() {
	let dir = tempfile::tempdir().unwrap();
	write_po(dir.path(), "po/nl_NL/messages.po", DUTCH_PO);

	let document = format!(
		"[i18n]\nlocale = \"nl_NL\"\n\n[[i18n.domain]]\nname = \"default\"\nbase_dir = {:?}\npattern = \"po/{{locale}}/messages.po\"\n",
		dir.path()
	);

	let i18n = I18nConfig::from_toml_str(&document).unwrap().build().unwrap();
	assert_eq!(i18n.translate("Save"), "Opslaan");
}

#[test]
fn test_domains_from_config_stay_separate() {
	let dir = tempfile::tempdir().unwrap();
	write_po(dir.path(), "core/nl_NL.po", DUTCH_PO);
	write_po(dir.path(), "mail/nl_NL.po", DUTCH_MAIL_PO);

	let document = format!(
		"[i18n]\nlocale = \"nl_NL\"\ntext_domain = \"core\"\n\n\
		[[i18n.domain]]\nname = \"core\"\nbase_dir = {core:?}\n\n\
		[[i18n.domain]]\nname = \"mail\"\nbase_dir = {mail:?}\n",
		core = dir.path().join("core"),
		mail = dir.path().join("mail")
	);

	let i18n = I18nConfig::from_toml_str(&document).unwrap().build().unwrap();

	assert_eq!(i18n.translate("Yes"), "Ja");
	assert_eq!(i18n.translate_with("Subject", Some("mail"), None), "Onderwerp");
	// The mail domain does not leak into core.
	assert_eq!(i18n.translate("Subject"), "Subject");
}

#[test]
fn test_the_formatting_section_configures_every_formatter() {
	let i18n = I18nConfig::from_toml_str(
		r#"
		[i18n]
		locale = "nl_NL"

		[i18n.formatting]
		timezone = "Europe/Amsterdam"
		currency = "€"
		currency_after = true
		decimals = 3
		"#,
	)
	.unwrap()
	.build()
	.unwrap();

	// 2017-05-12 22:15:00 UTC is 00:15:00 the next day in Amsterdam.
	assert_eq!(
		i18n.date_formatter()
			.format(1_494_627_300, DateStyle::Time)
			.unwrap(),
		"00:15:00"
	);
	assert_eq!(i18n.number_formatter().format(1234.5), "1.234,500");
	assert_eq!(i18n.money_formatter().format(1234.5), "1.234,500 €");
}

#[test]
fn test_preload_after_build_reports_broken_catalogs() {
	let dir = tempfile::tempdir().unwrap();
	let path = write_po(dir.path(), "nl_NL.po", "msgid \"Yes\nmsgstr \"Ja\"\n");

	let document = format!(
		"[i18n]\nlocale = \"nl_NL\"\n\n[[i18n.domain]]\nname = \"default\"\nbase_dir = {:?}\n",
		dir.path()
	);
	let i18n = I18nConfig::from_toml_str(&document).unwrap().build().unwrap();

	match i18n.preload().unwrap_err() {
		CatalogError::File { path: reported, .. } => assert_eq!(reported, path),
		other => panic!("expected a file error, got {other:?}"),
	}
}
