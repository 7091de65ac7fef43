use crate::url::normalize_url;
use std::collections::HashSet;

/// How URLs are turned into set keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Exact string equality; `/apa` and `/apa/` are different pages
    Exact,

    /// Keys go through [`normalize_url`]; unparsable URLs fall back to the
    /// exact string
    Normalized,
}

/// URLs already fetched during one run
///
/// Grows monotonically and is discarded with the crawler that owns it.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    mode: KeyMode,
    keys: HashSet<String>,
}

impl VisitedSet {
    pub fn new(mode: KeyMode) -> Self {
        Self {
            mode,
            keys: HashSet::new(),
        }
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Computes the key `url` is tracked under
    pub fn key_for(&self, url: &str) -> String {
        match self.mode {
            KeyMode::Exact => url.to_string(),
            KeyMode::Normalized => normalize_url(url)
                .map(|normalized| normalized.to_string())
                .unwrap_or_else(|_| url.to_string()),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.keys.contains(&self.key_for(url))
    }

    /// Marks `url` as visited
    ///
    /// Returns false if it (or an equivalent URL) was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        let key = self.key_for(url);
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
