//! Gettext `.po` catalog loader
//!
//! Line-based parser for the PO format: keyword lines (`msgctxt`,
//! `msgid`, `msgid_plural`, `msgstr`, `msgstr[N]`), quoted string
//! continuations and `#` comments. The header entry (the one with an
//! empty msgid) is not a message; its `Plural-Forms:` line, when
//! present, supplies the catalog's plural rule.
//!
//! Context entries are stored under the conventional compound key
//! `msgctxt\u{4}msgid` (EOT separator), so contextual messages stay
//! addressable without a dedicated lookup API.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::plural::{PluralRule, PluralRuleError};
use crate::text_domain::{TextDomain, Translation};

// Gettext plural rules top out at six forms; anything past this is a
// corrupt index, not a real catalog.
const MAX_PLURAL_INDEX: usize = 32;

/// Errors raised while loading a `.po` catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Parse error at line {line}: {message}")]
	Parse { line: usize, message: String },
	#[error("{0}")]
	PluralForms(#[from] PluralRuleError),
	#[error("Failed to load {}: {source}", path.display())]
	File {
		path: PathBuf,
		source: Box<CatalogError>,
	},
}

impl CatalogError {
	fn at(line: usize, message: impl Into<String>) -> Self {
		Self::Parse {
			line,
			message: message.into(),
		}
	}

	/// Wraps an error with the path of the catalog it came from.
	pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
		Self::File {
			path: path.into(),
			source: Box::new(self),
		}
	}
}

/// One entry as written in the file, before it is folded into the
/// catalog.
#[derive(Debug, Clone, Default)]
struct PoEntry {
	msgctxt: Option<String>,
	msgid: Option<String>,
	msgid_plural: Option<String>,
	msgstr: Vec<String>,
}

/// Which string the next continuation line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
	Msgctxt,
	Msgid,
	MsgidPlural,
	Msgstr(usize),
}

/// Loads a `.po` catalog from a file.
pub fn load_po(path: &Path) -> Result<TextDomain, CatalogError> {
	let file = File::open(path)?;
	parse_po(file)
}

/// Parses a `.po` catalog from a reader.
pub fn parse_po<R: Read>(reader: R) -> Result<TextDomain, CatalogError> {
	let reader = BufReader::new(reader);
	let mut domain = TextDomain::new();
	let mut entry = PoEntry::default();
	let mut field: Option<Field> = None;
	let mut line_no = 0;

	for line in reader.lines() {
		line_no += 1;
		let line = line?;
		let trimmed = line.trim();

		if trimmed.is_empty() {
			// A blank line closes the entry under construction.
			flush_entry(&mut domain, &mut entry, &mut field, line_no)?;
			continue;
		}
		if trimmed.starts_with('#') {
			continue;
		}

		if let Some(rest) = trimmed.strip_prefix("msgid_plural") {
			entry.msgid_plural = Some(parse_quoted(rest.trim_start(), line_no)?);
			field = Some(Field::MsgidPlural);
		} else if let Some(rest) = trimmed.strip_prefix("msgid") {
			// Entries are not required to be blank-line separated; a new
			// msgid also closes the previous entry.
			if entry.msgid.is_some() {
				flush_entry(&mut domain, &mut entry, &mut field, line_no)?;
			}
			entry.msgid = Some(parse_quoted(rest.trim_start(), line_no)?);
			field = Some(Field::Msgid);
		} else if let Some(rest) = trimmed.strip_prefix("msgctxt") {
			if entry.msgid.is_some() {
				flush_entry(&mut domain, &mut entry, &mut field, line_no)?;
			}
			entry.msgctxt = Some(parse_quoted(rest.trim_start(), line_no)?);
			field = Some(Field::Msgctxt);
		} else if let Some(rest) = trimmed.strip_prefix("msgstr") {
			let rest = rest.trim_start();
			if let Some(indexed) = rest.strip_prefix('[') {
				let (index, tail) = indexed
					.split_once(']')
					.ok_or_else(|| CatalogError::at(line_no, "Unterminated msgstr index"))?;
				let index: usize = index
					.trim()
					.parse()
					.map_err(|_| CatalogError::at(line_no, format!("Invalid msgstr index {index:?}")))?;
				if index > MAX_PLURAL_INDEX {
					return Err(CatalogError::at(
						line_no,
						format!("msgstr index {index} out of range"),
					));
				}
				store_indexed(&mut entry.msgstr, index, parse_quoted(tail.trim_start(), line_no)?);
				field = Some(Field::Msgstr(index));
			} else {
				store_indexed(&mut entry.msgstr, 0, parse_quoted(rest, line_no)?);
				field = Some(Field::Msgstr(0));
			}
		} else if trimmed.starts_with('"') {
			let value = parse_quoted(trimmed, line_no)?;
			let target = match field {
				Some(Field::Msgctxt) => entry.msgctxt.as_mut(),
				Some(Field::Msgid) => entry.msgid.as_mut(),
				Some(Field::MsgidPlural) => entry.msgid_plural.as_mut(),
				Some(Field::Msgstr(index)) => entry.msgstr.get_mut(index),
				None => None,
			};
			match target {
				Some(slot) => slot.push_str(&value),
				None => {
					return Err(CatalogError::at(
						line_no,
						"String continuation without a keyword line",
					));
				}
			}
		} else {
			return Err(CatalogError::at(
				line_no,
				format!("Unrecognized line: {trimmed:?}"),
			));
		}
	}

	flush_entry(&mut domain, &mut entry, &mut field, line_no + 1)?;
	Ok(domain)
}

/// Folds the pending entry into the catalog.
fn flush_entry(
	domain: &mut TextDomain,
	entry: &mut PoEntry,
	field: &mut Option<Field>,
	line: usize,
) -> Result<(), CatalogError> {
	*field = None;
	let entry = std::mem::take(entry);
	let Some(msgid) = entry.msgid else {
		if entry.msgctxt.is_some() || !entry.msgstr.is_empty() {
			return Err(CatalogError::at(line, "Entry without msgid"));
		}
		return Ok(());
	};

	if msgid.is_empty() && entry.msgctxt.is_none() {
		// The header pseudo-entry. Only its Plural-Forms line matters.
		if let Some(header) = entry.msgstr.first() {
			if let Some(declaration) = plural_forms_of(header) {
				domain.set_plural_rule(PluralRule::parse(declaration)?);
			}
		}
		return Ok(());
	}

	let key = match entry.msgctxt {
		Some(context) => format!("{context}\u{4}{msgid}"),
		None => msgid,
	};
	let translation = match entry.msgid_plural {
		Some(_) => Translation::Plural(entry.msgstr),
		None => Translation::Singular(entry.msgstr.into_iter().next().unwrap_or_default()),
	};
	domain.insert(key, translation);
	Ok(())
}

fn store_indexed(slots: &mut Vec<String>, index: usize, value: String) {
	if slots.len() <= index {
		slots.resize(index + 1, String::new());
	}
	slots[index] = value;
}

/// Extracts the `Plural-Forms` declaration from a header block.
fn plural_forms_of(header: &str) -> Option<&str> {
	header
		.lines()
		.find_map(|line| line.strip_prefix("Plural-Forms:"))
		.map(str::trim)
}

fn parse_quoted(s: &str, line: usize) -> Result<String, CatalogError> {
	let inner = s
		.strip_prefix('"')
		.and_then(|rest| rest.strip_suffix('"'))
		.ok_or_else(|| CatalogError::at(line, format!("Expected quoted string, found {s:?}")))?;
	unescape(inner, line)
}

fn unescape(input: &str, line: usize) -> Result<String, CatalogError> {
	let mut out = String::with_capacity(input.len());
	let mut chars = input.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('n') => out.push('\n'),
			Some('t') => out.push('\t'),
			Some('r') => out.push('\r'),
			Some('"') => out.push('"'),
			Some('\\') => out.push('\\'),
			// Unknown escapes are kept verbatim, as msgfmt does.
			Some(other) => {
				out.push('\\');
				out.push(other);
			}
			None => return Err(CatalogError::at(line, "Trailing backslash in string")),
		}
	}
	Ok(out)
}
