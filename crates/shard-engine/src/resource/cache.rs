use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Memoizes backend resource creation per key.
///
/// Contract:
/// - the first `acquire` for a key runs the loader; later calls return the
///   stored result without touching the backend
/// - a failed load is stored as an empty entry, so a broken asset fails once
///   per key instead of once per frame
/// - entries are never evicted; [`drain`](Self::drain) hands the live handles
///   back to the owner at teardown
pub struct ResourceCache<K, H> {
    label: &'static str,
    entries: HashMap<K, Option<H>>,
}

impl<K, H> ResourceCache<K, H>
where
    K: Eq + Hash,
    H: Copy,
{
    /// Creates an empty cache. `label` names the cache in log output.
    pub fn new(label: &'static str) -> Self {
        Self { label, entries: HashMap::new() }
    }

    /// Returns the handle stored for `key`, loading it on first use.
    ///
    /// `None` is the empty handle: the load failed (now or earlier) and the
    /// caller should skip whatever it wanted to draw.
    pub fn acquire<Q, E, F>(&mut self, key: &Q, load: F) -> Option<H>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + fmt::Display + ?Sized,
        E: fmt::Display,
        F: FnOnce(&Q) -> Result<H, E>,
    {
        if let Some(entry) = self.entries.get(key) {
            return *entry;
        }

        let entry = match load(key) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("{}: failed to load '{key}': {e}", self.label);
                None
            }
        };

        self.entries.insert(key.to_owned(), entry);
        entry
    }

    /// Looks up `key` without loading.
    ///
    /// Outer `None`: never requested. `Some(None)`: cached failure.
    pub fn peek<Q>(&self, key: &Q) -> Option<Option<H>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).copied()
    }

    /// Number of cached keys, failures included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the cache and yields every live handle for release.
    pub fn drain(&mut self) -> impl Iterator<Item = H> + '_ {
        log::debug!("{}: releasing {} entries", self.label, self.entries.len());
        self.entries.drain().filter_map(|(_, h)| h)
    }
}
