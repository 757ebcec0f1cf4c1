use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chain::global_provider_chain;
use crate::translation::Translation;

/// Translations of one piece of content keyed by provider name.
///
/// Reading a provider that is not in the map behaves exactly like reading a
/// provider with an empty translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMap {
    providers: BTreeMap<String, Translation>,
}

impl ProviderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the providers following the global provider chain.
    pub fn chain(&self) -> Translation {
        let order = global_provider_chain();
        self.custom_chain(&order[..])
    }

    /// Merges the providers following `order`, ignoring the global chain.
    ///
    /// Every language takes the value of the first provider in `order` that
    /// defines it, so lower priority providers only fill the gaps. Providers
    /// not named in `order` are never read.
    pub fn custom_chain<S: AsRef<str>>(&self, order: &[S]) -> Translation {
        let mut merged = Translation::new();
        for name in order {
            if let Some(translation) = self.providers.get(name.as_ref()) {
                merged.fill_missing(translation);
            }
        }
        merged
    }

    /// Display string for `lang` after merging with the global chain.
    pub fn resolve(&self, lang: &str) -> String {
        self.chain().lang_chain(lang).to_string()
    }

    /// Display string for `lang` after merging with `order`.
    pub fn resolve_with<S: AsRef<str>>(&self, order: &[S], lang: &str) -> String {
        self.custom_chain(order).lang_chain(lang).to_string()
    }

    /// Sets `lang` for `provider`, creating the provider when needed.
    pub fn set_value(
        &mut self,
        provider: impl Into<String>,
        lang: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.providers
            .entry(provider.into())
            .or_default()
            .set(lang, value);
    }

    /// Translation of `name`; empty when the provider is unknown.
    pub fn provider(&self, name: &str) -> Translation {
        self.providers.get(name).cloned().unwrap_or_default()
    }

    pub fn insert(&mut self, provider: impl Into<String>, translation: Translation) -> Option<Translation> {
        self.providers.insert(provider.into(), translation)
    }

    pub fn remove(&mut self, provider: &str) -> Option<Translation> {
        self.providers.remove(provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Translation> {
        self.providers.iter()
    }
}

impl From<BTreeMap<String, Translation>> for ProviderMap {
    fn from(providers: BTreeMap<String, Translation>) -> Self {
        Self { providers }
    }
}

impl<K: Into<String>> FromIterator<(K, Translation)> for ProviderMap {
    fn from_iter<I: IntoIterator<Item = (K, Translation)>>(iter: I) -> Self {
        Self {
            providers: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Translation)> for ProviderMap {
    fn extend<I: IntoIterator<Item = (K, Translation)>>(&mut self, iter: I) {
        for (k, t) in iter {
            self.providers.insert(k.into(), t);
        }
    }
}

impl<'a> IntoIterator for &'a ProviderMap {
    type Item = (&'a String, &'a Translation);
    type IntoIter = btree_map::Iter<'a, String, Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

impl Serialize for ProviderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.providers.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProviderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<BTreeMap<String, Translation>>::deserialize(deserializer)
            .map(|providers| Self::from(providers.unwrap_or_default()))
    }
}
