use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::BuildHasher;

use http::HeaderMap;

/// Immutable snapshot of response headers.
///
/// Names are kept exactly as received and looked up case-sensitively.
/// A repeated name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    /// Create an empty header snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs where absent (`None`) entries are skipped.
    #[must_use]
    pub fn from_optional_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = Option<(K, V)>>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().flatten().collect()
    }

    /// Get a header value by its exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying map
    #[must_use]
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.inner
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<S: BuildHasher> From<HashMap<String, String, S>> for Headers {
    fn from(map: HashMap<String, String, S>) -> Self {
        map.into_iter().collect()
    }
}

/// Values that are not visible ASCII have no string form and are skipped.
impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Self {
        Self::from_optional_pairs(map.iter().map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        }))
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::HeaderValue;

    #[test]
    fn test_lookup_is_case_sensitive() {
        let headers: Headers = [("Content-Type", "application/json")].into_iter().collect();
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.get("content-type"), None);
    }

    #[test]
    fn test_duplicate_names_keep_last_value() {
        let headers: Headers = [("X-Trace", "first"), ("X-Trace", "second")]
            .into_iter()
            .collect();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Trace"), Some("second"));
    }

    #[test]
    fn test_absent_entries_are_skipped() {
        let headers = Headers::from_optional_pairs([
            Some(("Server", "nginx")),
            None,
            Some(("Vary", "Accept")),
        ]);
        assert_eq!(headers.len(), 2);
        assert!(headers.contains("Server"));
        assert!(headers.contains("Vary"));
    }

    #[test]
    fn test_from_header_map_skips_opaque_values() {
        let mut map = HeaderMap::new();
        map.insert("x-request-id", HeaderValue::from_static("abc-123"));
        map.insert("x-binary", HeaderValue::from_bytes(b"caf\xE9").unwrap());

        let headers = Headers::from(&map);
        assert_eq!(headers.get("x-request-id"), Some("abc-123"));
        assert!(!headers.contains("x-binary"));
    }

    #[test]
    fn test_empty_snapshot() {
        let headers = Headers::from_optional_pairs(std::iter::empty::<Option<(String, String)>>());
        assert!(headers.is_empty());
    }
}
