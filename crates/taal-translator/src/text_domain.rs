//! Loaded message catalogs
//!
//! A [`TextDomain`] holds the messages of one (text domain, locale) pair
//! together with the plural rule that selects between variants. Merging
//! two catalogs is a plain union in which the later catalog wins.

use std::collections::HashMap;

use crate::plural::PluralRule;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
	/// An entry without plural forms.
	Singular(String),
	/// An entry with one variant per plural form index.
	Plural(Vec<String>),
}

impl Translation {
	/// The text a singular lookup resolves to. A plural entry answers
	/// with its first variant, matching what `gettext()` returns for
	/// entries that carry plural forms.
	pub fn singular(&self) -> &str {
		match self {
			Self::Singular(text) => text,
			Self::Plural(variants) => variants.first().map(String::as_str).unwrap_or(""),
		}
	}

	/// The variant at a plural form index, when the entry carries one.
	/// A singular entry behaves as a one-variant sequence.
	pub fn variant(&self, index: usize) -> Option<&str> {
		match self {
			Self::Singular(text) => (index == 0).then_some(text.as_str()),
			Self::Plural(variants) => variants.get(index).map(String::as_str),
		}
	}

	/// Number of selectable variants.
	pub fn variant_count(&self) -> usize {
		match self {
			Self::Singular(_) => 1,
			Self::Plural(variants) => variants.len(),
		}
	}
}

/// Messages of one (text domain, locale) pair.
#[derive(Debug, Clone, Default)]
pub struct TextDomain {
	messages: HashMap<String, Translation>,
	plural_rule: PluralRule,
	// Set when the rule came from a Plural-Forms header rather than the
	// germanic default; merge only adopts explicit rules.
	explicit_rule: bool,
}

impl TextDomain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores a singular entry, replacing any previous entry for the
	/// msgid.
	pub fn add(&mut self, msgid: impl Into<String>, text: impl Into<String>) {
		self.messages
			.insert(msgid.into(), Translation::Singular(text.into()));
	}

	/// Stores a plural entry, replacing any previous entry for the
	/// msgid.
	pub fn add_plural(&mut self, msgid: impl Into<String>, variants: Vec<String>) {
		self.messages
			.insert(msgid.into(), Translation::Plural(variants));
	}

	/// Stores an already-built entry.
	pub fn insert(&mut self, msgid: impl Into<String>, translation: Translation) {
		self.messages.insert(msgid.into(), translation);
	}

	pub fn get(&self, msgid: &str) -> Option<&Translation> {
		self.messages.get(msgid)
	}

	pub fn contains(&self, msgid: &str) -> bool {
		self.messages.contains_key(msgid)
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Translation)> {
		self.messages.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// The rule that maps counts onto variant indices.
	pub fn plural_rule(&self) -> &PluralRule {
		&self.plural_rule
	}

	/// Whether the rule was declared by the catalog (as opposed to the
	/// germanic default).
	pub fn has_plural_rule(&self) -> bool {
		self.explicit_rule
	}

	/// Installs a declared plural rule.
	pub fn set_plural_rule(&mut self, rule: PluralRule) {
		self.plural_rule = rule;
		self.explicit_rule = true;
	}

	/// Merges `other` into `self`: overlapping msgids take `other`'s
	/// entry, and `other`'s declared plural rule (when it has one)
	/// replaces the current rule.
	pub fn merge(&mut self, other: TextDomain) {
		self.messages.extend(other.messages);
		if other.explicit_rule {
			self.plural_rule = other.plural_rule;
			self.explicit_rule = true;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn domain(entries: &[(&str, &str)]) -> TextDomain {
		let mut domain = TextDomain::new();
		for (msgid, text) in entries {
			domain.add(*msgid, *text);
		}
		domain
	}

	#[test]
	fn test_merge_prefers_later_entries_and_keeps_disjoint_ones() {
		let mut base = domain(&[("Yes", "Ja"), ("No", "Nee")]);
		let overlay = domain(&[("No", "Neen"), ("Maybe", "Misschien")]);

		base.merge(overlay);

		assert_eq!(base.get("Yes").map(Translation::singular), Some("Ja"));
		assert_eq!(base.get("No").map(Translation::singular), Some("Neen"));
		assert_eq!(
			base.get("Maybe").map(Translation::singular),
			Some("Misschien")
		);
		assert_eq!(base.len(), 3);
	}

	#[test]
	fn test_merge_adopts_explicit_plural_rule_only() {
		let mut base = TextDomain::new();
		base.set_plural_rule(PluralRule::parse("nplurals=1; plural=0;").unwrap());

		// A catalog without a header must not reset the declared rule.
		base.merge(TextDomain::new());
		assert_eq!(base.plural_rule().nplurals(), 1);

		let mut overlay = TextDomain::new();
		overlay.set_plural_rule(PluralRule::parse("nplurals=2; plural=(n > 1);").unwrap());
		base.merge(overlay);
		assert_eq!(base.plural_rule().nplurals(), 2);
		assert_eq!(base.plural_rule().evaluate(1), 0);
	}

	#[test]
	fn test_plural_entry_answers_singular_lookups_with_first_variant() {
		let mut domain = TextDomain::new();
		domain.add_plural("file", vec!["bestand".to_string(), "bestanden".to_string()]);

		let entry = domain.get("file").unwrap();
		assert_eq!(entry.singular(), "bestand");
		assert_eq!(entry.variant(1), Some("bestanden"));
		assert_eq!(entry.variant(2), None);
		assert_eq!(entry.variant_count(), 2);
	}

	#[test]
	fn test_singular_entry_behaves_as_one_variant_sequence() {
		let entry = Translation::Singular("ja".to_string());
		assert_eq!(entry.variant(0), Some("ja"));
		assert_eq!(entry.variant(1), None);
		assert_eq!(entry.variant_count(), 1);
	}

	#[test]
	fn test_default_rule_is_germanic_until_declared() {
		let domain = TextDomain::new();
		assert!(!domain.has_plural_rule());
		assert_eq!(domain.plural_rule().evaluate(1), 0);
		assert_eq!(domain.plural_rule().evaluate(2), 1);
	}
}
