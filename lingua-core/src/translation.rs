use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// First fallback language of the chain.
pub const ENGLISH: &str = "en";
/// Last fallback language of the chain.
pub const SPANISH: &str = "es";

/// Returns a value following a prearranged chain of preference.
///
/// The chain gives preference to the requested lang, then english and finally
/// spanish if no other translation is available. Empty strings count as
/// missing; the worst case is an empty string.
pub fn lang_chain<'a>(values: &'a BTreeMap<String, String>, lang: &str) -> &'a str {
    [lang, ENGLISH, SPANISH]
        .into_iter()
        .filter_map(|l| values.get(l))
        .map(String::as_str)
        .find(|v| !v.is_empty())
        .unwrap_or("")
}

/// Display strings of one piece of content keyed by language code.
///
/// A missing key means "no value for that language", which is different from
/// a key holding an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    values: BTreeMap<String, String>,
}

impl Translation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a translation from an optional mapping.
    ///
    /// `None` yields an empty translation that accepts writes like any other.
    pub fn from_map(map: Option<BTreeMap<String, String>>) -> Self {
        Self {
            values: map.unwrap_or_default(),
        }
    }

    /// Value stored for `lang`, or an empty string.
    pub fn get(&self, lang: &str) -> &str {
        self.values.get(lang).map(String::as_str).unwrap_or_default()
    }

    /// Inserts or overwrites the value for `lang`.
    pub fn set(&mut self, lang: impl Into<String>, value: impl Into<String>) {
        self.values.insert(lang.into(), value.into());
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.values.contains_key(lang)
    }

    /// Resolves one display string: `lang`, then english, then spanish.
    pub fn lang_chain(&self, lang: &str) -> &str {
        lang_chain(&self.values, lang)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.values.iter()
    }

    /// Copies every language of `other` this translation does not hold yet.
    /// Languages already present keep their current value.
    pub(crate) fn fill_missing(&mut self, other: &Translation) {
        for (lang, value) in &other.values {
            if !self.values.contains_key(lang) {
                self.values.insert(lang.clone(), value.clone());
            }
        }
    }
}

impl From<BTreeMap<String, String>> for Translation {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for Translation
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Translation
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'a> IntoIterator for &'a Translation {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Serialize for Translation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

// A stored `null` is a translation that was never written.
impl<'de> Deserialize<'de> for Translation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<BTreeMap<String, String>>::deserialize(deserializer).map(Translation::from_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(pairs: &[(&str, &str)]) -> Translation {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_set_translation() {
        let mut t = translation(&[("es", "foo")]);
        t.set("en", "bar");

        assert_eq!(t.get("es"), "foo");
        assert_eq!(t.get("en"), "bar");
    }

    #[test]
    fn test_set_translation_from_none() {
        let mut t = Translation::from_map(None);
        assert!(t.is_empty());

        t.set("en", "bar");
        assert_eq!(t.get("en"), "bar");
    }

    #[test]
    fn test_set_overwrites() {
        let mut t = Translation::new();
        t.set("it", "uno");
        t.set("it", "due");
        assert_eq!(t.get("it"), "due");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_from_map_copies_source() {
        let mut source = BTreeMap::new();
        source.insert("es".to_string(), "foo".to_string());

        let mut t = Translation::from_map(Some(source.clone()));
        t.set("en", "bar");

        assert_eq!(source.len(), 1);
        assert!(!source.contains_key("en"));
    }

    #[test]
    fn test_missing_differs_from_empty() {
        let t = translation(&[("es", "")]);
        assert!(t.contains("es"));
        assert!(!t.contains("en"));
        assert_eq!(t.get("es"), "");
        assert_eq!(t.get("en"), "");
    }

    #[test]
    fn test_as_map() {
        let mut t = translation(&[("es", "foo")]);
        t.set("en", "bar");

        let m = t.as_map();
        assert_eq!(m["es"], "foo");
        assert_eq!(m["en"], "bar");
    }

    #[test]
    fn test_chain_requested_lang_first() {
        let t = translation(&[("es", "foo"), ("en", "bar"), ("it", "baz")]);

        assert_eq!(t.lang_chain("es"), "foo");
        assert_eq!(t.lang_chain("en"), "bar");
        assert_eq!(t.lang_chain("it"), "baz");
    }

    #[test]
    fn test_chain_english_above_spanish() {
        let t = translation(&[("es", "foo"), ("en", "bar"), ("it", "baz")]);
        assert_eq!(t.lang_chain("de"), "bar");
    }

    #[test]
    fn test_chain_spanish_as_backup() {
        let t = translation(&[("es", "foo"), ("it", "baz")]);
        assert_eq!(t.lang_chain("de"), "foo");

        let only_es = translation(&[("es", "solo")]);
        for lang in ["es", "en", "it", "de", ""] {
            assert_eq!(only_es.lang_chain(lang), "solo");
        }
    }

    #[test]
    fn test_chain_english_without_spanish() {
        let t = translation(&[("en", "bar"), ("it", "baz")]);

        assert_eq!(t.lang_chain("en"), "bar");
        assert_eq!(t.lang_chain("it"), "baz");
        assert_eq!(t.lang_chain("de"), "bar");
    }

    #[test]
    fn test_chain_skips_empty_values() {
        let t = translation(&[("it", ""), ("en", ""), ("es", "foo")]);
        assert_eq!(t.lang_chain("it"), "foo");
    }

    #[test]
    fn test_chain_empty_translation() {
        assert_eq!(Translation::new().lang_chain("en"), "");
        assert_eq!(translation(&[("it", "baz")]).lang_chain("de"), "");
    }

    #[test]
    fn test_fill_missing_keeps_existing() {
        let mut t = translation(&[("es", "1")]);
        t.fill_missing(&translation(&[("es", "2"), ("en", "3")]));

        assert_eq!(t, translation(&[("es", "1"), ("en", "3")]));
    }

    #[test]
    fn test_deserialize_null() {
        let t: Translation = serde_json::from_str("null").unwrap();
        assert!(t.is_empty());

        let t: Translation = serde_json::from_str(r#"{"en":"bar"}"#).unwrap();
        assert_eq!(t.get("en"), "bar");
    }
}
