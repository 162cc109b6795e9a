//! Extracted document metadata.
//!
//! A [`Metadata`] set maps attribute names to one or more string values.
//! Names keep the position of their first insertion, which is the order
//! they are written out in.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered, multi-valued attribute set produced by an extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, Vec<String>)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`. A new name goes to the end; an existing
    /// name keeps its position and gains another value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Replace every value under `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = vec![value],
            None => self.entries.push((name, vec![value])),
        }
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.entries[i].1.as_slice())
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate `(name, first value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(name, values)| {
            values
                .first()
                .map(|value| (name.as_str(), value.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        metadata.extend(iter);
        metadata
    }
}

impl<K, V> Extend<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.add(name, value);
        }
    }
}

/// Serializes as a flat object of name to first value. Extra values under a
/// name are dropped; callers that need them must flatten beforehand.
impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_keep_first_insertion_order() {
        let mut metadata = Metadata::new();
        metadata.add("title", "Report");
        metadata.add("author", "J. Doe");
        metadata.add("title", "Draft");

        let names: Vec<&str> = metadata.names().collect();
        assert_eq!(names, ["title", "author"]);
        assert_eq!(metadata.get("title"), Some("Report"));
        assert_eq!(
            metadata.get_all("title").unwrap(),
            ["Report".to_string(), "Draft".to_string()]
        );
    }

    #[test]
    fn set_replaces_all_values_in_place() {
        let mut metadata: Metadata = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        metadata.set("a", "x");

        assert_eq!(metadata.get_all("a").unwrap(), ["x".to_string()]);
        assert_eq!(metadata.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn remove_drops_name_and_values() {
        let mut metadata: Metadata = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(metadata.remove("a"), Some(vec!["1".to_string()]));
        assert!(!metadata.contains("a"));
        assert_eq!(metadata.len(), 1);
        assert!(metadata.remove("a").is_none());
    }

    #[test]
    fn serializes_first_value_per_name() {
        let metadata: Metadata = [
            ("Content-Type", "application/pdf"),
            ("dc:creator", "A"),
            ("dc:creator", "B"),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(
            json,
            r#"{"Content-Type":"application/pdf","dc:creator":"A"}"#
        );
    }

    #[test]
    fn empty_metadata_serializes_to_empty_object() {
        let json = serde_json::to_string(&Metadata::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
