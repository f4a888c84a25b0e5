//! Catalog cache
//!
//! Load-once storage for catalogs keyed by (text domain, locale). A key
//! is populated at most once per process: concurrent requests for the
//! same cold key serialize on a per-key gate so exactly one loader runs,
//! while lookups of populated keys and loads of different keys proceed
//! independently. Nothing is ever evicted; an empty load result is a
//! cached fact, not a retryable condition.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use taal_core::Locale;

use crate::text_domain::TextDomain;

#[derive(Debug, Default)]
pub struct CatalogCache {
	// Text domain -> locale -> catalog. Nested so lookups borrow &str
	// keys without allocating.
	catalogs: RwLock<HashMap<String, HashMap<String, Arc<TextDomain>>>>,
	// Per-key gates for loads in flight.
	pending: Mutex<HashMap<(String, String), Arc<Mutex<()>>>>,
}

impl CatalogCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// The cached catalog for a key, if one has been populated.
	pub fn get(&self, text_domain: &str, locale: &Locale) -> Option<Arc<TextDomain>> {
		self.catalogs
			.read()
			.get(text_domain)
			.and_then(|per_locale| per_locale.get(locale.as_str()))
			.cloned()
	}

	pub fn contains(&self, text_domain: &str, locale: &Locale) -> bool {
		self.get(text_domain, locale).is_some()
	}

	/// Installs a catalog directly, replacing any cached one.
	pub fn insert(&self, text_domain: &str, locale: &Locale, catalog: TextDomain) {
		self.catalogs
			.write()
			.entry(text_domain.to_string())
			.or_default()
			.insert(locale.as_str().to_string(), Arc::new(catalog));
	}

	/// Number of populated (text domain, locale) entries.
	pub fn len(&self) -> usize {
		self.catalogs
			.read()
			.values()
			.map(HashMap::len)
			.sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the cached catalog for a key, running `load` exactly once
	/// to populate it when cold.
	pub fn get_or_load<F>(&self, text_domain: &str, locale: &Locale, load: F) -> Arc<TextDomain>
	where
		F: FnOnce() -> TextDomain,
	{
		match self.try_get_or_load(text_domain, locale, || Ok::<_, Infallible>(load())) {
			Ok(catalog) => catalog,
			Err(never) => match never {},
		}
	}

	/// Fallible variant of [`get_or_load`](Self::get_or_load). When the
	/// loader fails nothing is cached, so a later request retries.
	pub fn try_get_or_load<F, E>(
		&self,
		text_domain: &str,
		locale: &Locale,
		load: F,
	) -> Result<Arc<TextDomain>, E>
	where
		F: FnOnce() -> Result<TextDomain, E>,
	{
		let key = (text_domain.to_string(), locale.as_str().to_string());
		loop {
			if let Some(found) = self.get(text_domain, locale) {
				return Ok(found);
			}

			let gate = {
				let mut pending = self.pending.lock();
				// Re-check under the pending lock so a load that finished
				// since the read above does not get a fresh gate.
				if let Some(found) = self.get(text_domain, locale) {
					return Ok(found);
				}
				Arc::clone(pending.entry(key.clone()).or_default())
			};
			let guard = gate.lock();

			// The thread that held the gate before us may have published
			// the catalog already.
			if let Some(found) = self.get(text_domain, locale) {
				return Ok(found);
			}
			// Or its load failed and the gate was retired. Start over on
			// the current gate so retries run one at a time.
			let retired = !self
				.pending
				.lock()
				.get(&key)
				.is_some_and(|current| Arc::ptr_eq(current, &gate));
			if retired {
				drop(guard);
				continue;
			}

			let loaded = match load() {
				Ok(catalog) => Arc::new(catalog),
				Err(error) => {
					// Retire the gate before releasing it so waiters
					// re-enter instead of loading on a dead gate.
					self.pending.lock().remove(&key);
					return Err(error);
				}
			};
			self.catalogs
				.write()
				.entry(key.0.clone())
				.or_default()
				.insert(key.1.clone(), Arc::clone(&loaded));
			// Publish first, then retire: waiters that wake re-check the
			// map and hit.
			self.pending.lock().remove(&key);
			return Ok(loaded);
		}
	}
}
