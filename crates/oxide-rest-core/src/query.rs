//! Decoded query-string parameters.
//!
//! Keys keep their first-appearance order and every key keeps all of its
//! values in order of appearance. The parser relies on both.

use percent_encoding::percent_decode_str;

/// An ordered multimap of decoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw query string, with or without the leading `?`.
    ///
    /// `+` decodes to a space. A pair without `=` yields an empty value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut params = Self::new();
        for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.append(decode(key), decode(value));
        }
        params
    }

    /// Appends a value to a key, creating the key if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Appends a value, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// Returns all values of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterates over keys and their values in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

fn decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_key_order_and_values() {
        let params = QueryParams::parse("?b=1&a=2&b=3");
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(params.get("b").unwrap(), ["1", "3"]);
    }

    #[test]
    fn test_parse_decodes_brackets_and_spaces() {
        let params = QueryParams::parse(":between%5BID%5D%5B%5D=2&name=John+Doe");
        assert_eq!(params.get(":between[ID][]").unwrap(), ["2"]);
        assert_eq!(params.get("name").unwrap(), ["John Doe"]);
    }

    #[test]
    fn test_parse_key_without_value() {
        let params = QueryParams::parse("flag&&x=");
        assert_eq!(params.get("flag").unwrap(), [""]);
        assert_eq!(params.get("x").unwrap(), [""]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn test_builder() {
        let params = QueryParams::new().with("b", "1").with("a", "2").with("b", "3");
        assert_eq!(params, QueryParams::parse("b=1&a=2&b=3"));
    }

    #[test]
    fn test_from_iterator() {
        let params: QueryParams = [("a", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(params.get("a").unwrap(), ["1", "2"]);
    }
}
