//! Token value mapping

use std::collections::BTreeMap;
use std::str::FromStr;

use super::error::TokenMapError;
use super::words::split_words;

/// Result of looking a token name up in a [`TokenMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Name is known and has a value
    Value(&'a str),
    /// Name is known but explicitly has no value
    Absent,
    /// Name is not in the map
    Missing,
}

/// Mapping from case-sensitive token names to values
///
/// A name can also be registered with the absent marker: it is known, but
/// has no value. That is distinct from the name being missing entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: BTreeMap<String, Option<String>>,
}

impl TokenMap {
    /// Create an empty token map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a token value, replacing any earlier entry
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), Some(value.into()));
    }

    /// Register a token name with the absent marker
    pub fn insert_absent(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), None);
    }

    /// Builder form of [`TokenMap::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder form of [`TokenMap::insert_absent`]
    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.insert_absent(name);
        self
    }

    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        match self.entries.get(name) {
            Some(Some(value)) => Lookup::Value(value),
            Some(None) => Lookup::Absent,
            None => Lookup::Missing,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a shell-style `key=value key2='quoted value'` string
    ///
    /// Words are split with POSIX shell quoting rules. Every word must contain
    /// exactly one `=`. Later duplicates override earlier ones.
    pub fn parse(input: &str) -> Result<Self, TokenMapError> {
        let mut map = Self::new();

        for word in split_words(input)? {
            let mut parts = word.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(value), None) => map.insert(name, value),
                _ => return Err(TokenMapError::MalformedPair { word }),
            }
        }

        Ok(map)
    }
}

impl FromStr for TokenMap {
    type Err = TokenMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K, V> FromIterator<(K, V)> for TokenMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
