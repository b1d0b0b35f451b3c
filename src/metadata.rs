//! Multi-valued call metadata.
//!
//! [`Metadata`] maps a header name to one or more values. Keys are stored in
//! ASCII lowercase, the way they travel on an HTTP/2 based RPC wire, so
//! `"X-Request-ID"` and `"x-request-id"` name the same entry.
//!
//! Merging two stores is done with [`Metadata::join`], which appends values
//! per key instead of overwriting them.

use std::collections::BTreeMap;

/// Header carrying the caller identity.
pub const ID_KEY: &str = "id";

/// Header carrying `"<scheme> <value>"`.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Header carrying the request-correlation identifier.
pub const REQUEST_ID_KEY: &str = "x-request-id";

/// A mapping from lowercase header name to one or more string values.
///
/// # Examples
///
/// ```
/// use rpc_metadata::Metadata;
///
/// let md = Metadata::new()
///     .with("X-Request-ID", "req-1")
///     .with("x-request-id", "req-2");
///
/// assert_eq!(md.get("x-request-id"), Some("req-1"));
/// assert_eq!(md.get_all("X-REQUEST-ID"), ["req-1", "req-2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&normalize(key))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .get(&normalize(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns `true` if `key` holds at least one value.
    pub fn contains_key(&self, key: &str) -> bool {
        !self.get_all(key).is_empty()
    }

    /// Replaces all values for `key` with a single value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(normalize(key), vec![value.into()]);
    }

    /// Adds a value for `key`, keeping the existing ones.
    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .entry(normalize(key))
            .or_default()
            .push(value.into());
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// Returns a new store holding the union of `self` and `other`.
    ///
    /// For keys present in both, the values of `self` come first followed by
    /// those of `other`. Nothing is deduplicated.
    pub fn join(&self, other: &Metadata) -> Metadata {
        let mut joined = self.clone();
        for (key, values) in &other.entries {
            joined
                .entries
                .entry(key.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
        joined
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut md = Metadata::new();
        for (key, value) in iter {
            md.append(key.as_ref(), value);
        }
        md
    }
}

fn normalize(key: &str) -> String {
    key.to_ascii_lowercase()
}
