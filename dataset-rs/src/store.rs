//! Insertion-ordered map keyed by normalized access keys

use sanitizer_rs::{Modifier, TrimStr};
use shared_types_rs::Charset;
use std::collections::HashMap;

/// Canonical lookup form of a key: trimmed like the sanitizer's `Trim`
/// modifier, then lowercased per `charset`
pub fn normalize_access_key(charset: Charset, key: &str) -> String {
    let trimmed = Modifier::Trim(TrimStr::Both).apply(key, charset);
    charset.to_lowercase(&trimmed)
}

#[derive(Debug, Clone)]
pub(crate) struct EntryMap<T> {
    slots: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for EntryMap<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> EntryMap<T> {
    /// Insert or overwrite. An overwritten key keeps its position.
    pub fn insert(&mut self, key: String, value: T) -> Option<T> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.slots[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.slots.len());
                self.slots.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.slots[pos].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.slots[pos].1),
            None => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<T> {
        let pos = self.index.remove(key)?;
        let (_, value) = self.slots.remove(pos);
        for (k, _) in &self.slots[pos..] {
            if let Some(i) = self.index.get_mut(k) {
                *i -= 1;
            }
        }
        Some(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, T)> {
        self.slots.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_access_key() {
        assert_eq!(normalize_access_key(Charset::Ascii, "  Foo Bar "), "foo bar");
        assert_eq!(normalize_access_key(Charset::Ascii, "ÉTÉ"), "ÉtÉ");
        assert_eq!(normalize_access_key(Charset::Utf8, " ÉTÉ\n"), "été");
    }

    #[test]
    fn test_utf8_key_trim_matches_trim_modifier() {
        let key = "\u{FEFF}\u{00A0}Foo\u{2003}";
        let trimmed = Modifier::Trim(TrimStr::Both).apply(key, Charset::Utf8);

        assert_eq!(trimmed, "Foo");
        assert_eq!(normalize_access_key(Charset::Utf8, key), "foo");
        assert_eq!(normalize_access_key(Charset::Utf8, "\u{FEFF}Foo"), "foo");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = EntryMap::default();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        assert_eq!(map.insert("a".to_string(), 3), Some(1));

        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", &3), ("b", &2)]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut map = EntryMap::default();
        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            map.insert(key.to_string(), i);
        }

        assert_eq!(map.remove("b"), Some(1));
        assert_eq!(map.remove("b"), None);
        assert_eq!(map.get("c"), Some(&2));
        assert_eq!(map.get("d"), Some(&3));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);

        *map.get_mut("d").unwrap() = 9;
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 2, 9]);

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(!map.contains_key("a"));
    }
}
