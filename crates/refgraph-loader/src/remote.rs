use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use refgraph_types::Url;

/// A loaded value tagged with the URL it was loaded from.
///
/// Serializes as the value's own fields plus a `url` field, so `T` must
/// serialize as a map and must not have a `url` field of its own, or the
/// output carries the key twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote<T> {
    pub url: Url,
    #[serde(flatten)]
    pub value: T,
}

impl<T> Remote<T> {
    pub fn new(url: impl Into<Url>, value: T) -> Self {
        Self {
            url: url.into(),
            value,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Drop the URL and keep the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value, keeping the URL.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Remote<U> {
        Remote {
            url: self.url,
            value: f(self.value),
        }
    }
}

impl<T> Deref for Remote<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Remote<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Writer {
        name: String,
    }

    #[test]
    fn serializes_with_url_field() {
        let remote = Remote::new("/w1", Writer { name: "Ada".into() });
        assert_eq!(
            serde_json::to_value(&remote).unwrap(),
            json!({"name": "Ada", "url": "/w1"})
        );
    }

    #[test]
    fn deserializes_from_flat_object() {
        let remote: Remote<Writer> =
            serde_json::from_value(json!({"name": "Ada", "url": "/w1"})).unwrap();
        assert_eq!(remote.url(), "/w1");
        assert_eq!(remote.name, "Ada");
    }

    #[test]
    fn map_keeps_url() {
        let remote = Remote::new("/w1", Writer { name: "Ada".into() });
        let upper = remote.map(|w| w.name.to_uppercase());
        assert_eq!(upper.url(), "/w1");
        assert_eq!(upper.into_inner(), "ADA");
    }
}
