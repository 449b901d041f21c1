use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use refgraph_types::{RawValue, Url};

use crate::update::Update;

/// A snapshot of URL to raw JSON value.
///
/// Keys are unique and unordered. The only mutation is [`Cache::apply`];
/// everything else reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cache {
    entries: HashMap<Url, RawValue>,
}

impl Cache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of updates over an empty cache.
    pub fn build<I>(updates: I) -> Self
    where
        I: IntoIterator<Item = Update>,
    {
        updates.into_iter().fold(Self::new(), Self::applied)
    }

    /// Apply one update in place.
    ///
    /// Upserts replace any previous value at the URL. Deleting a URL that is
    /// not present leaves the cache unchanged.
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Noop => {}
            Update::Upsert { url, value } => {
                self.entries.insert(url, value);
            }
            Update::Delete { url } => {
                self.entries.remove(&url);
            }
        }
    }

    /// Apply one update, consuming this snapshot and returning the next.
    pub fn applied(mut self, update: Update) -> Self {
        self.apply(update);
        self
    }

    /// The raw value at `url`, if any.
    pub fn get(&self, url: &str) -> Option<&RawValue> {
        self.entries.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All URLs in the cache, sorted.
    pub fn urls(&self) -> Vec<Url> {
        let mut urls: Vec<Url> = self.entries.keys().cloned().collect();
        urls.sort();
        urls
    }

    /// Iterate over entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Url, &RawValue)> {
        self.entries.iter()
    }
}

impl FromIterator<Update> for Cache {
    fn from_iter<I: IntoIterator<Item = Update>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl Extend<Update> for Cache {
    fn extend<I: IntoIterator<Item = Update>>(&mut self, iter: I) {
        for update in iter {
            self.apply(update);
        }
    }
}
