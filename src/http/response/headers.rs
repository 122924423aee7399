use std::slice;

pub const CONTENT_TYPE: &str = "Content-Type";

/// Ordered, multi-valued set of response headers.
///
/// Names and values are kept exactly as supplied. Lookups compare names
/// case-insensitively; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Creates an empty HeaderSet
    pub fn new() -> Self {
        HeaderSet {
            entries: Vec::new(),
        }
    }

    /// Appends a header, keeping any existing values for the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style append
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Returns the first value for the header, case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value for the header in insertion order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over `(name, value)` pairs of a HeaderSet
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for HeaderSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderSet::new();
        headers.extend(iter);
        headers
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for HeaderSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

/// Combines caller headers with the encoder's content type.
///
/// Caller entries keep their order and values. The content type is appended
/// last, unless the caller already supplied one, in which case theirs wins.
pub fn merge_headers(caller: Option<HeaderSet>, content_type: Option<&str>) -> HeaderSet {
    let mut headers = caller.unwrap_or_default();

    if let Some(content_type) = content_type {
        if !headers.contains(CONTENT_TYPE) {
            headers.append(CONTENT_TYPE, content_type);
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let headers = HeaderSet::new().with("X-Request-Id", "abc");

        assert_eq!(headers.get("x-request-id"), Some("abc"));
        assert!(headers.contains("X-REQUEST-ID"));
        assert_eq!(headers.get("missing"), None);
    }

    #[test]
    fn test_multiple_values_keep_order() {
        let headers: HeaderSet = [("Set-Cookie", "a=1"), ("Vary", "Accept"), ("set-cookie", "b=2")]
            .into_iter()
            .collect();

        assert_eq!(headers.len(), 3);
        assert_eq!(
            headers.get_all("Set-Cookie").collect::<Vec<_>>(),
            vec!["a=1", "b=2"]
        );
        assert_eq!(
            headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["Set-Cookie", "Vary", "set-cookie"]
        );
    }

    #[test]
    fn test_merge_unset_caller_headers() {
        let merged = merge_headers(None, Some("application/json"));

        assert_eq!(
            merged.iter().collect::<Vec<_>>(),
            vec![(CONTENT_TYPE, "application/json")]
        );
        assert!(merge_headers(None, None).is_empty());
    }

    #[test]
    fn test_merge_preserves_caller_order() {
        let caller = HeaderSet::new().with("a", "1").with("b", "2");
        let merged = merge_headers(Some(caller), Some("text/plain; charset=utf-8"));

        assert_eq!(
            merged.iter().collect::<Vec<_>>(),
            vec![
                ("a", "1"),
                ("b", "2"),
                (CONTENT_TYPE, "text/plain; charset=utf-8")
            ]
        );
    }

    #[test]
    fn test_merge_without_content_type_is_untouched() {
        let caller = HeaderSet::new().with("a", "1");
        let merged = merge_headers(Some(caller.clone()), None);

        assert_eq!(merged, caller);
    }

    #[test]
    fn test_merge_caller_content_type_wins() {
        let caller = HeaderSet::new().with("content-type", "text/csv");
        let merged = merge_headers(Some(caller), Some("application/octet-stream"));

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(CONTENT_TYPE), Some("text/csv"));
    }
}
