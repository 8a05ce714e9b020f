//! Insertion-ordered attribute maps for the LEEF and CEF formatters.
//!
//! Both event formats emit `key=value` pairs in a stable order: the
//! format's base dictionary first, then whatever the caller added.
//! Entries hold `Option` values so a seeded key can exist without being
//! emitted until it is given a value.

/// An insertion-ordered `key -> Option<value>` collection.
///
/// Lookups are linear; the maps involved are a few dozen entries and are
/// walked in full when a message is built, so order matters more than
/// lookup speed.
#[derive(Clone, Debug)]
pub struct AttributeMap<V> {
    entries: Vec<(String, Option<V>)>,
}

impl<V> AttributeMap<V> {
    /// Seed a map with the given keys, all unset.
    pub fn from_template(keys: &[&str]) -> Self {
        Self {
            entries: keys.iter().map(|key| ((*key).to_owned(), None)).collect(),
        }
    }

    /// Set a value, updating an existing key in place or appending a new
    /// one at the end.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<V>) {
        let key = key.into();
        let value = Some(value.into());
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Unset a key without disturbing its position.
    pub fn clear(&mut self, key: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == key) {
            entry.1 = None;
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Iterate the entries that carry a value, in insertion order.
    pub fn set_entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|value| (name.as_str(), value)))
    }
}
